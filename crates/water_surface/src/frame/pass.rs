//! Per-camera planar reflection pass

use crate::config::PlanarReflectionSettings;
use crate::error::WaterResult;
use crate::reflection::{CameraState, ReflectionCameraSolver, ReflectionResult};
use super::targets::ReflectionTargets;
use super::{names, CameraKind, RenderTargetAllocator, ShaderParameterSink};

/// Prepares the mirrored camera and its target for each primary camera
#[derive(Debug)]
pub struct PlanarReflectionPass<H> {
    settings: PlanarReflectionSettings,
    solver: ReflectionCameraSolver,
    targets: ReflectionTargets<H>,
}

impl<H> PlanarReflectionPass<H> {
    /// Create a pass from reflection settings
    pub fn new(settings: PlanarReflectionSettings) -> Self {
        let solver = settings.solver();
        Self {
            settings,
            solver,
            targets: ReflectionTargets::new(),
        }
    }

    /// Current reflection settings
    pub fn settings(&self) -> &PlanarReflectionSettings {
        &self.settings
    }

    /// Replace the reflection settings; the cached target is kept
    pub fn set_settings(&mut self, settings: PlanarReflectionSettings) {
        self.solver = settings.solver();
        self.settings = settings;
    }

    /// Reflection target cache
    pub fn targets(&self) -> &ReflectionTargets<H> {
        &self.targets
    }

    /// Release the cached reflection target to the caller
    pub fn release_target(&mut self) -> Option<H> {
        self.targets.release()
    }

    /// Solve the reflection for `camera` and bind its target
    ///
    /// Returns `Ok(None)` for cameras that do not receive reflections. On
    /// success the host renders the mirrored view described by the result
    /// into [`ReflectionTargets::current`].
    ///
    /// # Errors
    /// Propagates solver errors; nothing is allocated or uploaded then.
    pub fn prepare<A, S>(
        &mut self,
        kind: CameraKind,
        camera: &CameraState,
        render_scale: f32,
        allocator: &mut A,
        sink: &mut S,
    ) -> WaterResult<Option<ReflectionResult>>
    where
        A: RenderTargetAllocator<Handle = H>,
        S: ShaderParameterSink<Texture = H>,
    {
        if !kind.receives_reflection() {
            log::trace!("Skipping planar reflection for {:?} camera", kind);
            return Ok(None);
        }

        let plane = self.settings.plane();
        let result = self
            .solver
            .solve(camera, &plane, self.settings.clip_plane_offset, render_scale)?;

        let target = self.targets.get_or_acquire(allocator, result.target_resolution);
        sink.set_global_matrix(names::REFLECTION_WORLD_TO_VIEW, &result.world_to_view);
        sink.set_global_matrix(names::REFLECTION_PROJECTION, &result.projection);
        sink.set_global_texture(names::PLANAR_REFLECTION_TEXTURE, target);

        Ok(Some(result))
    }
}
