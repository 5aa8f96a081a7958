//! Reflection plane and the matrices derived from it
//!
//! Plane equations are stored as `(nx, ny, nz, d)` with `dot(n, x) + d = 0`
//! for points `x` on the plane and a unit normal `n`.

use crate::error::{WaterError, WaterResult};
use crate::foundation::math::{utils, Mat4, Point3, Vec3, Vec4};

/// A reflecting plane given by a point on it and its normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Surface normal; renormalized before use
    pub normal: Vec3,

    /// Any point on the plane
    pub point: Vec3,
}

impl Default for Plane {
    /// Horizontal plane through the origin, facing up
    fn default() -> Self {
        Self {
            normal: Vec3::y(),
            point: Vec3::zeros(),
        }
    }
}

impl Plane {
    /// Create a plane from a point on it and its normal
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { normal, point }
    }

    /// Horizontal plane at `height`, facing up
    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::new(0.0, height, 0.0), Vec3::y())
    }

    /// The normal scaled to unit length
    ///
    /// # Errors
    /// `DegenerateInput` when the normal is zero-length or not finite.
    pub fn unit_normal(&self) -> WaterResult<Vec3> {
        utils::try_normalize(&self.normal).ok_or_else(|| {
            WaterError::DegenerateInput(format!("plane normal {:?} has no direction", self.normal))
        })
    }

    /// Plane equation with the constant term pushed back by `clip_offset`
    ///
    /// The bias moves the plane slightly toward the viewer so geometry lying
    /// exactly on the water line is not clipped away in the reflection.
    ///
    /// # Errors
    /// `DegenerateInput` when the normal is zero-length.
    pub fn equation(&self, clip_offset: f32) -> WaterResult<Vec4> {
        let n = self.unit_normal()?;
        let d = -n.dot(&self.point) - clip_offset;
        Ok(Vec4::new(n.x, n.y, n.z, d))
    }
}

/// Build the planar mirror transform for a plane equation `(a, b, c, d)`
///
/// ```text
/// | 1-2a²  -2ab   -2ac   -2ad |
/// | -2ab   1-2b²  -2bc   -2bd |
/// | -2ac   -2bc   1-2c²  -2cd |
/// |  0      0      0      1   |
/// ```
///
/// The normal part of `plane` must be unit length; the result is then its own
/// inverse.
pub fn reflection_matrix(plane: &Vec4) -> Mat4 {
    let (a, b, c, d) = (plane.x, plane.y, plane.z, plane.w);

    Mat4::new(
        1.0 - 2.0 * a * a, -2.0 * a * b, -2.0 * a * c, -2.0 * d * a,
        -2.0 * b * a, 1.0 - 2.0 * b * b, -2.0 * b * c, -2.0 * d * b,
        -2.0 * c * a, -2.0 * c * b, 1.0 - 2.0 * c * c, -2.0 * d * c,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Express a world-space plane in the view space of `world_to_view`
///
/// `point` is first pushed along `normal` by `clip_offset`. `side_sign`
/// selects which half-space is kept (`1.0` keeps the side the normal points
/// to).
///
/// # Errors
/// `DegenerateInput` when `world_to_view` collapses the normal.
pub fn camera_space_plane(
    world_to_view: &Mat4,
    point: &Vec3,
    normal: &Vec3,
    clip_offset: f32,
    side_sign: f32,
) -> WaterResult<Vec4> {
    let offset_point = point + normal * clip_offset;
    let view_point = world_to_view.transform_point(&Point3::from(offset_point)).coords;
    let view_normal = utils::try_normalize(&world_to_view.transform_vector(normal))
        .ok_or_else(|| WaterError::DegenerateInput("view matrix collapses the plane normal".to_string()))?
        * side_sign;

    Ok(Vec4::new(
        view_normal.x,
        view_normal.y,
        view_normal.z,
        -view_point.dot(&view_normal),
    ))
}
