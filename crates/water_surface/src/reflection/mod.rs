//! Planar reflection camera math
//!
//! - [`plane`]: reflecting plane, mirror matrix, view-space clip plane
//! - [`oblique`]: oblique near-plane projection
//! - [`solver`]: the per-frame reflection camera solve

pub mod oblique;
pub mod plane;
pub mod solver;

pub use oblique::oblique_projection;
pub use plane::{camera_space_plane, reflection_matrix, Plane};
pub use solver::{
    CameraState, ReflectionCameraSolver, ReflectionResult, ALL_LAYERS, CLIP_PLANE_SINK,
    DEFAULT_CLIP_PLANE_OFFSET, REFLECTION_RESOLUTION_SCALE,
};
