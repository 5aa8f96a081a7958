//! Water shading parameters uploaded on (re)initialization

use crate::config::WaterConfig;
use crate::error::WaterResult;
use crate::foundation::math::Vec4;
use crate::waves::{WaveFieldGenerator, WaveFieldResult, PACKED_SLOTS};
use super::{names, ShaderParameterSink};

/// Everything the water shader reads about the wave field
#[derive(Debug, Clone, PartialEq)]
pub struct WaterShaderState {
    /// Resting water level
    pub wave_height: f32,
    /// Mean wave amplitude
    pub max_wave_height: f32,
    /// Depth at which the water becomes opaque
    pub max_depth: f32,
    /// Number of active waves
    pub wave_count: i32,
    /// Packed per-wave parameters
    pub wave_data: [Vec4; PACKED_SLOTS],
}

impl WaterShaderState {
    /// Collect the shader state for a generated field
    pub fn from_field(field: &WaveFieldResult, surface_height: f32, max_visibility: f32) -> Self {
        // Bounded by MAX_WAVES.
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let wave_count = field.count() as i32;

        Self {
            wave_height: surface_height,
            max_wave_height: field.mean_amplitude,
            max_depth: max_visibility,
            wave_count,
            wave_data: field.packed_params,
        }
    }

    /// Generate the configured wave field and collect its shader state
    ///
    /// # Errors
    /// Invalid wave authoring data or wave counts.
    pub fn from_config(config: &WaterConfig, generator: &WaveFieldGenerator) -> WaterResult<Self> {
        let field = generator.generate(&config.surface.wave_spec()?)?;
        Ok(Self::from_field(
            &field,
            config.transform.position.y,
            config.surface.max_visibility,
        ))
    }

    /// Push the state to the host under the shader's parameter names
    pub fn upload<S: ShaderParameterSink>(&self, sink: &mut S) {
        sink.set_global_float(names::WAVE_HEIGHT, self.wave_height);
        sink.set_global_float(names::MAX_WAVE_HEIGHT, self.max_wave_height);
        sink.set_global_float(names::MAX_DEPTH, self.max_depth);
        sink.set_global_int(names::WAVE_COUNT, self.wave_count);
        sink.set_global_vector_array(names::WAVE_DATA, &self.wave_data);
        log::debug!("Uploaded {} waves to the water shader", self.wave_count);
    }
}
