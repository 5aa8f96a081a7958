//! # Water Configuration
//!
//! Serializable authoring data for the water surface and its planar
//! reflection. Everything here is plain data; the solvers never read files
//! themselves.
//!
//! ## Defaults
//! - Max visibility depth 40
//! - Procedural waves: seed 3234, 6 waves, amplitude 1.5, direction 45°,
//!   wavelength 5
//! - Reflection: clip-plane offset 0.07, no plane offset, all layers,
//!   resolution scale 0.33

use serde::{Deserialize, Serialize};

use crate::error::{WaterError, WaterResult};
use crate::foundation::math::Vec3;
use crate::reflection::{
    Plane, ReflectionCameraSolver, ALL_LAYERS, DEFAULT_CLIP_PLANE_OFFSET, REFLECTION_RESOLUTION_SCALE,
};
use crate::waves::{ProceduralWaves, Wave, WaveFieldSpec};
use super::Config;

/// Base settings for procedurally generated waves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicWaves {
    /// Number of waves to generate
    pub count: usize,
    /// Mean amplitude
    pub amplitude: f32,
    /// Mean travel direction in degrees
    pub direction_degrees: f32,
    /// Mean wavelength
    pub wavelength: f32,
}

impl BasicWaves {
    /// Six waves with the given base parameters
    pub fn new(amplitude: f32, direction_degrees: f32, wavelength: f32) -> Self {
        Self {
            count: 6,
            amplitude,
            direction_degrees,
            wavelength,
        }
    }
}

impl Default for BasicWaves {
    fn default() -> Self {
        Self::new(1.5, 45.0, 5.0)
    }
}

/// Surface authoring data
///
/// Exactly one of `custom_waves` and `basic_waves` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSurfaceData {
    /// Depth at which the water becomes opaque
    pub max_visibility: f32,
    /// Seed for procedural waves
    pub random_seed: i32,
    /// Hand-authored waves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_waves: Option<Vec<Wave>>,
    /// Procedural wave settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_waves: Option<BasicWaves>,
}

impl Default for WaterSurfaceData {
    fn default() -> Self {
        Self {
            max_visibility: 40.0,
            random_seed: 3234,
            custom_waves: None,
            basic_waves: Some(BasicWaves::default()),
        }
    }
}

impl WaterSurfaceData {
    /// Switch to hand-authored waves
    pub fn with_custom_waves(mut self, waves: Vec<Wave>) -> Self {
        self.custom_waves = Some(waves);
        self.basic_waves = None;
        self
    }

    /// Switch to procedural waves
    pub fn with_basic_waves(mut self, basic: BasicWaves, seed: i32) -> Self {
        self.basic_waves = Some(basic);
        self.random_seed = seed;
        self.custom_waves = None;
        self
    }

    /// The wave field this data describes
    ///
    /// # Errors
    /// `InvalidSpec` when both or neither wave source is populated.
    pub fn wave_spec(&self) -> WaterResult<WaveFieldSpec> {
        match (&self.custom_waves, &self.basic_waves) {
            (Some(waves), None) => Ok(WaveFieldSpec::Custom(waves.clone())),
            (None, Some(basic)) => Ok(WaveFieldSpec::Procedural(ProceduralWaves::new(
                self.random_seed,
                basic.amplitude,
                basic.direction_degrees,
                basic.wavelength,
                basic.count,
            ))),
            (Some(_), Some(_)) => Err(WaterError::InvalidSpec(
                "both custom and procedural waves are set".to_string(),
            )),
            (None, None) => Err(WaterError::InvalidSpec(
                "neither custom nor procedural waves are set".to_string(),
            )),
        }
    }
}

/// Transform whose up axis defines the reflection plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectionTarget {
    /// World position of the target
    pub position: Vec3,
    /// World up axis of the target
    pub up: Vec3,
}

/// Planar reflection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarReflectionSettings {
    /// Reflect across this transform; horizontal plane at y = 0 when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ReflectionTarget>,
    /// Height added to the target position along world up
    pub plane_offset: f32,
    /// Bias that moves the clip plane toward the viewer
    pub clip_plane_offset: f32,
    /// Layers the reflection camera renders
    pub cull_mask: u32,
    /// Fraction of the primary resolution used for the reflection target
    pub resolution_scale: f32,
}

impl Default for PlanarReflectionSettings {
    fn default() -> Self {
        Self {
            target: None,
            plane_offset: 0.0,
            clip_plane_offset: DEFAULT_CLIP_PLANE_OFFSET,
            cull_mask: ALL_LAYERS,
            resolution_scale: REFLECTION_RESOLUTION_SCALE,
        }
    }
}

impl PlanarReflectionSettings {
    /// Reflect across `target` raised by `plane_offset`
    pub fn with_target(mut self, target: ReflectionTarget, plane_offset: f32) -> Self {
        self.target = Some(target);
        self.plane_offset = plane_offset;
        self
    }

    /// The reflecting plane for this frame
    pub fn plane(&self) -> Plane {
        self.target.map_or_else(Plane::default, |target| {
            Plane::new(target.position + Vec3::y() * self.plane_offset, target.up)
        })
    }

    /// Solver configured from these settings
    pub fn solver(&self) -> ReflectionCameraSolver {
        ReflectionCameraSolver {
            resolution_scale: self.resolution_scale,
            cull_mask: self.cull_mask,
        }
    }
}

/// Placement of the water object in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterTransform {
    /// World position; its height is the resting water level
    pub position: Vec3,
    /// Local scale applied to the surface mesh
    pub scale: Vec3,
}

impl Default for WaterTransform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// # Complete Water Configuration
///
/// Top-level configuration loaded from RON or TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Water object placement
    #[serde(default)]
    pub transform: WaterTransform,
    /// Surface authoring data
    #[serde(default)]
    pub surface: WaterSurfaceData,
    /// Planar reflection settings
    #[serde(default)]
    pub reflection: PlanarReflectionSettings,
}

impl WaterConfig {
    /// Validate the entire configuration
    ///
    /// # Errors
    /// `InvalidSpec` for an inconsistent wave source or non-finite settings,
    /// `DegenerateInput` for a degenerate reflection target or scale.
    pub fn validate(&self) -> WaterResult<()> {
        self.surface.wave_spec()?;

        if !(self.surface.max_visibility.is_finite() && self.surface.max_visibility > 0.0) {
            return Err(WaterError::InvalidSpec("max visibility must be positive".to_string()));
        }
        if !self.reflection.clip_plane_offset.is_finite() || !self.reflection.plane_offset.is_finite() {
            return Err(WaterError::InvalidSpec("reflection offsets must be finite".to_string()));
        }
        if !(self.reflection.resolution_scale.is_finite() && self.reflection.resolution_scale > 0.0) {
            return Err(WaterError::DegenerateInput("resolution scale must be positive".to_string()));
        }
        self.reflection.plane().unit_normal()?;

        Ok(())
    }
}

impl Config for WaterConfig {}
