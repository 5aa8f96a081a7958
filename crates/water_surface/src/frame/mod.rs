//! # Frame Integration
//!
//! Glue between the pure solvers and the host renderer. The host owns the
//! camera objects, textures and draw calls; this module talks to it only
//! through [`RenderTargetAllocator`] and [`ShaderParameterSink`].
//!
//! Per frame and primary camera:
//! 1. [`PlanarReflectionPass::prepare`] solves the mirrored camera, reuses or
//!    allocates the reflection target and binds it for the water shader
//! 2. the host renders the mirrored view into that target
//! 3. [`surface_transform`] places the water mesh in front of the camera
//!
//! On (re)initialization [`WaterShaderState`] uploads the wave field.

pub mod pass;
pub mod shader;
pub mod surface;
pub mod targets;

pub use pass::PlanarReflectionPass;
pub use shader::WaterShaderState;
pub use surface::surface_transform;
pub use targets::ReflectionTargets;

use crate::foundation::math::{Mat4, Vec4};

/// Global shader parameter names shared with the water shader
pub mod names {
    /// Reflection texture binding
    pub const PLANAR_REFLECTION_TEXTURE: &str = "_PlanarReflectionTexture";
    /// Packed per-wave array (20 `Vec4` slots)
    pub const WAVE_DATA: &str = "waveData";
    /// Resting water level
    pub const WAVE_HEIGHT: &str = "_WaveHeight";
    /// Mean wave amplitude
    pub const MAX_WAVE_HEIGHT: &str = "_MaxWaveHeight";
    /// Depth at which the water becomes opaque
    pub const MAX_DEPTH: &str = "_MaxDepth";
    /// Number of active waves
    pub const WAVE_COUNT: &str = "_WaveCount";
    /// Mirrored world-to-view matrix
    pub const REFLECTION_WORLD_TO_VIEW: &str = "_PlanarReflectionWorldToView";
    /// Oblique projection of the mirrored camera
    pub const REFLECTION_PROJECTION: &str = "_PlanarReflectionProjection";
}

/// What a camera renders for; only some cameras get a reflection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    /// In-game camera
    Game,
    /// Editor scene view
    SceneView,
    /// Asset preview thumbnails
    Preview,
    /// A reflection camera itself
    Reflection,
}

impl CameraKind {
    /// Whether a planar reflection should be rendered for this camera
    pub fn receives_reflection(self) -> bool {
        !matches!(self, Self::Preview | Self::Reflection)
    }
}

/// Host-side render target allocation
pub trait RenderTargetAllocator {
    /// Opaque target handle
    type Handle;

    /// Allocate a color target of the given size
    fn acquire_render_target(&mut self, width: u32, height: u32) -> Self::Handle;
}

/// Host-side global shader parameter upload
pub trait ShaderParameterSink {
    /// Texture handle type accepted for bindings
    type Texture;

    /// Bind a texture globally
    fn set_global_texture(&mut self, name: &str, texture: &Self::Texture);

    /// Set a global float
    fn set_global_float(&mut self, name: &str, value: f32);

    /// Set a global integer
    fn set_global_int(&mut self, name: &str, value: i32);

    /// Set a global matrix
    fn set_global_matrix(&mut self, name: &str, value: &Mat4);

    /// Set a global vector array
    fn set_global_vector_array(&mut self, name: &str, values: &[Vec4]);
}
