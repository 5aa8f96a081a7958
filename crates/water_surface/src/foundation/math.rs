//! Math utilities and types
//!
//! Provides the `f32` nalgebra aliases used by the reflection and wave code,
//! plus the handful of matrix helpers that nalgebra does not spell out.

pub use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Squared length below which a direction is treated as zero
    pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Sign function that maps zero to zero
    ///
    /// `f32::signum` returns 1.0 for +0.0, which would tilt the oblique
    /// near plane toward a frustum corner for axis-aligned clip planes.
    pub fn sgn(value: f32) -> f32 {
        if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Normalize a vector, or `None` when it is too short to carry a direction
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        if v.norm_squared() <= constants::DEGENERATE_LENGTH_SQUARED || !v.iter().all(|c| c.is_finite()) {
            None
        } else {
            Some(v.normalize())
        }
    }

    /// Right and up axes of a camera looking along unit `forward`
    ///
    /// When `forward` is parallel to `up` the hint carries no roll, so the
    /// world axis least aligned with `forward` stands in for it.
    pub fn view_basis(forward: &Vec3, up: &Vec3) -> (Vec3, Vec3) {
        let right = try_normalize(&forward.cross(up)).unwrap_or_else(|| {
            let fallback = if forward.z.abs() < 0.9 { Vec3::z() } else { Vec3::x() };
            forward.cross(&fallback).normalize()
        });
        (right, right.cross(forward))
    }

    /// Mirror a direction across the plane with unit normal `normal`
    pub fn reflect(direction: &Vec3, normal: &Vec3) -> Vec3 {
        direction - normal * (2.0 * direction.dot(normal))
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a right-handed perspective projection with OpenGL clip depth
    ///
    /// View space looks down -Z and depth maps to `[-w, w]`, which is the
    /// convention the oblique near-plane derivation assumes.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Row `index` as a column vector
    fn row_vec(&self, index: usize) -> Vec4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [f/a  0    0              0            ]
        //     [0    f    0              0            ]
        //     [0    0    (f+n)/(n-f)    2fn/(n-f)    ]
        //     [0    0   -1              0            ]
        let focal = 1.0 / (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = focal / aspect;
        result[(1, 1)] = focal;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let (right, camera_up) = utils::view_basis(&forward, &up);

        // Camera axes as rows; the view looks down -Z.
        Mat4::new(
            right.x, right.y, right.z, -right.dot(&eye),
            camera_up.x, camera_up.y, camera_up.z, -camera_up.dot(&eye),
            -forward.x, -forward.y, -forward.z, forward.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn row_vec(&self, index: usize) -> Vec4 {
        self.row(index).transpose()
    }
}
