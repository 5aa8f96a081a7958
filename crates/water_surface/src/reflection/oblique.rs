//! Oblique near-plane clipping
//!
//! Replaces the near plane of a perspective projection with an arbitrary
//! view-space plane, so geometry behind the water line is clipped by the
//! depth test instead of a separate clip pass. See Eric Lengyel,
//! "Oblique View Frustum Depth Projection and Clipping" (2005).

use crate::error::{WaterError, WaterResult};
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec4};

/// Skew `projection` so its near plane matches `clip_plane`
///
/// `clip_plane` is `(a, b, c, d)` in view space with the kept half-space on
/// the positive side. `projection` must use OpenGL clip depth (`[-w, w]`).
/// Only the third row of the matrix changes; when `clip_plane` is the
/// projection's own near plane the input is returned unchanged.
///
/// # Errors
/// `DegenerateInput` when `projection` is singular or the plane is parallel
/// to the far corner direction.
pub fn oblique_projection(projection: &Mat4, clip_plane: &Vec4) -> WaterResult<Mat4> {
    let inverse = projection.try_inverse().ok_or_else(|| {
        WaterError::DegenerateInput("projection matrix is not invertible".to_string())
    })?;

    // Far-plane frustum corner opposite the clip plane, left homogeneous.
    let corner = Vec4::new(utils::sgn(clip_plane.x), utils::sgn(clip_plane.y), 1.0, 1.0);
    let q = inverse * corner;

    let denominator = clip_plane.dot(&q);
    if denominator.abs() <= f32::EPSILON || !denominator.is_finite() {
        return Err(WaterError::DegenerateInput(format!(
            "clip plane {clip_plane:?} cannot bound the frustum"
        )));
    }

    let scaled = clip_plane * (2.0 / denominator);
    let third_row = scaled - projection.row_vec(3);

    let mut result = *projection;
    result.set_row(2, &third_row.transpose());

    log::trace!("Oblique near plane {:?} -> third row {:?}", clip_plane, third_row);
    Ok(result)
}
