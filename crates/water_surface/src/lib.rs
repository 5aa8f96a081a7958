//! # Water Surface
//!
//! Per-frame math for a planar-reflecting, procedurally animated water
//! surface.
//!
//! ## Features
//!
//! - **Reflection Camera**: mirrored view, oblique near-plane projection and
//!   target resolution from a primary camera snapshot
//! - **Wave Field**: deterministic seeded generation of up to ten waves,
//!   packed for shader upload
//! - **Frame Glue**: target caching, camera filtering and shader parameter
//!   upload through host traits
//! - **Configuration**: RON/TOML authoring data
//!
//! ## Quick Start
//!
//! ```rust
//! use water_surface::prelude::*;
//!
//! let camera = CameraState::perspective(
//!     Vec3::new(0.0, 5.0, -10.0),
//!     Vec3::new(0.0, 5.0, 0.0),
//!     60.0, 0.3, 1000.0,
//!     1920, 1080,
//! );
//! let reflection = ReflectionCameraSolver::new()
//!     .solve(&camera, &Plane::default(), DEFAULT_CLIP_PLANE_OFFSET, 1.0)
//!     .unwrap();
//! assert!((reflection.position.y + 5.0).abs() < 1e-4);
//!
//! let spec = WaterSurfaceData::default().wave_spec().unwrap();
//! let field = WaveFieldGenerator::new().generate(&spec).unwrap();
//! assert_eq!(field.count(), 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod frame;
pub mod reflection;
pub mod waves;

#[cfg(test)]
mod tests;

pub use error::{WaterError, WaterResult};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PlanarReflectionSettings, WaterConfig, WaterSurfaceData},
        error::{WaterError, WaterResult},
        foundation::math::{Mat4, Vec2, Vec3, Vec4},
        frame::{
            surface_transform, CameraKind, PlanarReflectionPass, RenderTargetAllocator,
            ShaderParameterSink, WaterShaderState,
        },
        reflection::{CameraState, Plane, ReflectionCameraSolver, ReflectionResult, DEFAULT_CLIP_PLANE_OFFSET},
        waves::{ProceduralWaves, Wave, WaveFieldGenerator, WaveFieldResult, WaveFieldSpec, MAX_WAVES},
    };
}
