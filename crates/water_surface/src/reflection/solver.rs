//! # Reflection Camera Solver
//!
//! Derives the mirrored camera used to render a planar water reflection from
//! a snapshot of the primary camera and the reflecting plane.
//!
//! ## Pipeline
//! 1. Plane equation biased by the clip offset
//! 2. Mirror matrix R; the reflected view is `view * R`
//! 3. Mirrored forward vector and camera position
//! 4. Reflection plane expressed in the mirrored view space
//! 5. Oblique projection whose near plane is that view-space plane
//! 6. Downscaled render target resolution
//!
//! ## Conventions
//! View space is right-handed looking down -Z; projections use OpenGL clip
//! depth. `CameraState::look_at` and `Mat4Ext::perspective` produce matching
//! matrices.

use crate::error::{WaterError, WaterResult};
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use super::oblique::oblique_projection;
use super::plane::{camera_space_plane, reflection_matrix, Plane};

/// Fraction of the primary camera resolution used for the reflection target
pub const REFLECTION_RESOLUTION_SCALE: f32 = 0.33;

/// Default bias that pushes the reflection plane toward the viewer
pub const DEFAULT_CLIP_PLANE_OFFSET: f32 = 0.07;

/// Distance the view-space clip plane is sunk below the water surface
pub const CLIP_PLANE_SINK: f32 = 0.1;

/// Culling mask that renders every layer
pub const ALL_LAYERS: u32 = u32::MAX;

/// Read-only snapshot of the primary camera for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Camera position in world space
    pub position: Vec3,

    /// Unit view direction in world space
    pub forward: Vec3,

    /// Unit right vector in world space
    pub right: Vec3,

    /// Unit up vector in world space
    pub up: Vec3,

    /// World to view space transform
    pub world_to_view: Mat4,

    /// View to clip space transform (OpenGL depth)
    pub projection: Mat4,

    /// Viewport width in pixels
    pub pixel_width: u32,

    /// Viewport height in pixels
    pub pixel_height: u32,
}

impl CameraState {
    /// Snapshot a camera at `eye` looking at `target`
    ///
    /// The basis vectors are orthonormalized from `target - eye` and `up` the
    /// same way the view matrix is built, including the fallback roll when
    /// the camera looks along `up`.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Mat4,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Self {
        let forward = (target - eye).normalize();
        let (right, camera_up) = utils::view_basis(&forward, &up);

        Self {
            position: eye,
            forward,
            right,
            up: camera_up,
            world_to_view: Mat4::look_at(eye, target, up),
            projection,
            pixel_width,
            pixel_height,
        }
    }

    /// Snapshot a Y-up perspective camera; the aspect ratio comes from the viewport
    pub fn perspective(
        eye: Vec3,
        target: Vec3,
        fov_degrees: f32,
        near: f32,
        far: f32,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Self {
        let aspect = pixel_width.max(1) as f32 / pixel_height.max(1) as f32;
        let projection = Mat4::perspective(utils::deg_to_rad(fov_degrees), aspect, near, far);
        Self::look_at(eye, target, Vec3::y(), projection, pixel_width, pixel_height)
    }
}

/// Mirrored camera state for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionResult {
    /// Primary view composed with the plane mirror
    pub world_to_view: Mat4,

    /// Primary projection with its near plane on the water surface
    pub projection: Mat4,

    /// Camera position mirrored across the plane height
    pub position: Vec3,

    /// Primary forward vector mirrored across the plane
    pub forward: Vec3,

    /// Render target size in pixels
    pub target_resolution: (u32, u32),

    /// The mirrored view flips triangle winding, so back-face culling must be inverted
    pub invert_culling: bool,

    /// Layers the reflection camera renders
    pub cull_mask: u32,
}

/// Computes the mirrored camera for planar reflections
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionCameraSolver {
    /// Fraction of the primary resolution used for the reflection target
    pub resolution_scale: f32,

    /// Layers copied into every result
    pub cull_mask: u32,
}

impl Default for ReflectionCameraSolver {
    fn default() -> Self {
        Self {
            resolution_scale: REFLECTION_RESOLUTION_SCALE,
            cull_mask: ALL_LAYERS,
        }
    }
}

impl ReflectionCameraSolver {
    /// Create a solver with the default resolution scale that renders all layers
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the layers the reflection camera renders
    pub fn with_cull_mask(mut self, cull_mask: u32) -> Self {
        self.cull_mask = cull_mask;
        self
    }

    /// Solve the mirrored camera for `primary` reflected in `plane`
    ///
    /// `clip_offset` biases the plane toward the viewer to hide seams at the
    /// water line. `render_scale` is the host pipeline's render scale.
    ///
    /// # Errors
    /// `DegenerateInput` for a zero plane normal, a zero forward vector, a
    /// non-invertible view or projection, a non-positive render scale, or
    /// any non-finite intermediate.
    pub fn solve(
        &self,
        primary: &CameraState,
        plane: &Plane,
        clip_offset: f32,
        render_scale: f32,
    ) -> WaterResult<ReflectionResult> {
        let normal = plane.unit_normal()?;
        let forward = utils::try_normalize(&primary.forward).ok_or_else(|| {
            WaterError::DegenerateInput("primary camera forward vector has no direction".to_string())
        })?;
        if primary.world_to_view.try_inverse().is_none() {
            return Err(WaterError::DegenerateInput("primary view matrix is not invertible".to_string()));
        }
        if !(render_scale.is_finite() && render_scale > 0.0) {
            return Err(WaterError::DegenerateInput(format!("render scale {render_scale} must be positive")));
        }

        let equation = plane.equation(clip_offset)?;
        let reflection = reflection_matrix(&equation);
        let world_to_view = primary.world_to_view * reflection;
        let mirrored_forward = utils::reflect(&forward, &normal);

        let height = primary.position.y - plane.point.y;
        let position = Vec3::new(primary.position.x, plane.point.y - height, primary.position.z);

        let clip_plane = camera_space_plane(
            &world_to_view,
            &(plane.point - normal * CLIP_PLANE_SINK),
            &normal,
            clip_offset,
            1.0,
        )?;
        let projection = oblique_projection(&primary.projection, &clip_plane)?;

        if !world_to_view.iter().chain(projection.iter()).all(|v| v.is_finite()) {
            return Err(WaterError::DegenerateInput("reflection matrices are not finite".to_string()));
        }

        let target_resolution = self.target_resolution(primary, render_scale);
        log::debug!(
            "Reflection camera at {:?} facing {:?}, target {}x{}",
            position,
            mirrored_forward,
            target_resolution.0,
            target_resolution.1
        );

        Ok(ReflectionResult {
            world_to_view,
            projection,
            position,
            forward: mirrored_forward,
            target_resolution,
            invert_culling: true,
            cull_mask: self.cull_mask,
        })
    }

    /// Reflection target size for `primary` at the given render scale
    pub fn target_resolution(&self, primary: &CameraState, render_scale: f32) -> (u32, u32) {
        let scale = render_scale * self.resolution_scale;
        let scaled = |pixels: u32| (pixels as f32 * scale).round().max(0.0) as u32;
        (scaled(primary.pixel_width), scaled(primary.pixel_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Vec4};
    use approx::assert_relative_eq;

    fn camera(eye: Vec3, target: Vec3) -> CameraState {
        CameraState::perspective(eye, target, 60.0, 0.3, 1000.0, 1920, 1080)
    }

    #[test]
    fn test_camera_above_plane_mirrors_height() {
        let primary = camera(Vec3::new(2.0, 7.5, -3.0), Vec3::new(2.0, 0.0, -3.0));
        assert!(primary.world_to_view.iter().all(|v| v.is_finite()));
        assert_relative_eq!(primary.forward, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);

        let result = ReflectionCameraSolver::new()
            .solve(&primary, &Plane::default(), DEFAULT_CLIP_PLANE_OFFSET, 1.0)
            .unwrap();
        assert_relative_eq!(result.position, Vec3::new(2.0, -7.5, -3.0), epsilon = 1e-5);
        assert_relative_eq!(result.forward, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_camera_over_origin_looking_down_mirrors_below() {
        let primary = camera(Vec3::new(0.0, 5.0, 0.0), Vec3::zeros());
        assert!(primary.right.iter().all(|v| v.is_finite()));

        let result = ReflectionCameraSolver::new()
            .solve(&primary, &Plane::default(), DEFAULT_CLIP_PLANE_OFFSET, 1.0)
            .unwrap();
        assert_relative_eq!(result.position, Vec3::new(0.0, -5.0, 0.0), epsilon = 1e-5);
        assert!(result.projection.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_raised_plane_mirrors_around_its_height() {
        let primary = camera(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let result = ReflectionCameraSolver::new()
            .solve(&primary, &Plane::horizontal(2.0), 0.0, 1.0)
            .unwrap();
        assert_relative_eq!(result.position.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mirrored_forward_matches_reflection_matrix() {
        let primary = camera(Vec3::new(1.0, 4.0, -6.0), Vec3::new(-2.0, 0.5, 3.0));
        let plane = Plane::default();
        let result = ReflectionCameraSolver::new()
            .solve(&primary, &plane, DEFAULT_CLIP_PLANE_OFFSET, 1.0)
            .unwrap();

        let r = reflection_matrix(&plane.equation(DEFAULT_CLIP_PLANE_OFFSET).unwrap());
        let via_matrix = r.transform_vector(&primary.forward);
        assert_relative_eq!(result.forward, via_matrix, epsilon = 1e-5);
        assert_relative_eq!(
            result.forward,
            Vec3::new(primary.forward.x, -primary.forward.y, primary.forward.z),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_tilted_plane_forward_is_householder_reflection() {
        let primary = camera(Vec3::new(0.0, 3.0, -4.0), Vec3::zeros());
        let normal = Vec3::new(0.2, 1.0, -0.1);
        let plane = Plane::new(Vec3::new(0.0, -0.5, 0.0), normal);
        let result = ReflectionCameraSolver::new().solve(&primary, &plane, 0.0, 1.0).unwrap();

        let r = reflection_matrix(&plane.equation(0.0).unwrap());
        assert_relative_eq!(result.forward, r.transform_vector(&primary.forward), epsilon = 1e-5);
        assert_relative_eq!(result.forward.norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_reflected_view_mirrors_world() {
        let primary = camera(Vec3::new(0.0, 5.0, -10.0), Vec3::new(0.0, 5.0, 0.0));
        let result = ReflectionCameraSolver::new().solve(&primary, &Plane::default(), 0.0, 1.0).unwrap();

        // A point above the water seen by the mirror lands where the primary
        // camera would see its underwater twin.
        let above = Point3::new(1.0, 2.0, 3.0);
        let twin = Point3::new(1.0, -2.0, 3.0);
        assert_relative_eq!(
            result.world_to_view.transform_point(&above),
            primary.world_to_view.transform_point(&twin),
            epsilon = 1e-4
        );
        assert!(result.world_to_view.determinant() < 0.0);
        assert!(result.invert_culling);
    }

    #[test]
    fn test_underwater_geometry_is_clipped() {
        let primary = camera(Vec3::new(0.0, 5.0, -10.0), Vec3::new(0.0, 0.0, 10.0));
        let result = ReflectionCameraSolver::new()
            .solve(&primary, &Plane::default(), DEFAULT_CLIP_PLANE_OFFSET, 1.0)
            .unwrap();
        let clip_from_world = result.projection * result.world_to_view;

        let ndc_depth = |p: Point3| {
            let clip: Vec4 = clip_from_world * p.to_homogeneous();
            clip.z / clip.w
        };
        // Above the water stays inside the depth range, below falls in front of the near plane.
        assert!(ndc_depth(Point3::new(0.0, 1.0, 10.0)) > -1.0);
        assert!(ndc_depth(Point3::new(0.0, -1.0, 10.0)) < -1.0);
    }

    #[test]
    fn test_target_resolution_rounds_scaled_size() {
        let primary = camera(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let solver = ReflectionCameraSolver::new();
        assert_eq!(solver.target_resolution(&primary, 1.0), (634, 356));
        assert_eq!(solver.target_resolution(&primary, 0.5), (317, 178));
    }

    #[test]
    fn test_cull_mask_is_carried() {
        let primary = camera(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let result = ReflectionCameraSolver::new()
            .with_cull_mask(0b1011)
            .solve(&primary, &Plane::default(), 0.0, 1.0)
            .unwrap();
        assert_eq!(result.cull_mask, 0b1011);
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        let solver = ReflectionCameraSolver::new();
        let primary = camera(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));

        let flat = Plane::new(Vec3::zeros(), Vec3::zeros());
        assert!(matches!(solver.solve(&primary, &flat, 0.07, 1.0), Err(WaterError::DegenerateInput(_))));

        let mut blind = primary.clone();
        blind.forward = Vec3::zeros();
        assert!(matches!(
            solver.solve(&blind, &Plane::default(), 0.07, 1.0),
            Err(WaterError::DegenerateInput(_))
        ));

        let mut collapsed = primary.clone();
        collapsed.world_to_view = Mat4::zeros();
        assert!(matches!(
            solver.solve(&collapsed, &Plane::default(), 0.07, 1.0),
            Err(WaterError::DegenerateInput(_))
        ));

        assert!(matches!(
            solver.solve(&primary, &Plane::default(), 0.07, 0.0),
            Err(WaterError::DegenerateInput(_))
        ));
    }
}
