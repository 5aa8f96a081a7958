//! Water mesh placement
//!
//! The surface mesh is a finite patch that follows the camera. It is anchored
//! ahead of the camera and snapped to a coarse grid so the vertices do not
//! swim as the camera moves.

use crate::config::WaterTransform;
use crate::foundation::math::{Mat4, Vec3};
use crate::reflection::CameraState;

/// Distance ahead of the camera the surface patch is centred on
pub const SURFACE_LOOK_AHEAD: f32 = 10.0;

/// Height of the patch relative to the water object
pub const SURFACE_HEIGHT_OFFSET: f32 = -0.25;

/// Grid the patch position snaps to on X and Z
pub const SURFACE_GRID_STEP: f32 = 6.25;

/// Model matrix for the water mesh as seen by `camera`
pub fn surface_transform(camera: &CameraState, water: &WaterTransform) -> Mat4 {
    let ahead = camera.position + camera.forward * SURFACE_LOOK_AHEAD;
    let anchor = Vec3::new(snap(ahead.x), SURFACE_HEIGHT_OFFSET, snap(ahead.z));

    Mat4::new_translation(&(anchor + water.position)) * Mat4::new_nonuniform_scaling(&water.scale)
}

// Truncates toward zero, so the cell around the origin is twice as wide.
fn snap(value: f32) -> f32 {
    SURFACE_GRID_STEP * (value / SURFACE_GRID_STEP).trunc()
}
