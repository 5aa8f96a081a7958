//! Reflection camera scenarios

#[cfg(test)]
mod tests {
    use crate::foundation::math::{Mat4Ext, Point3, Vec3};
    use crate::reflection::{CameraState, Plane, ReflectionCameraSolver, DEFAULT_CLIP_PLANE_OFFSET};
    use approx::assert_relative_eq;

    fn primary() -> CameraState {
        CameraState::perspective(
            Vec3::new(0.0, 5.0, -10.0),
            Vec3::new(0.0, 5.0, 0.0),
            60.0,
            0.3,
            1000.0,
            1920,
            1080,
        )
    }

    #[test]
    fn test_camera_looking_along_z_over_ground_plane() {
        let primary = primary();
        let plane = Plane::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        let result = ReflectionCameraSolver::new()
            .solve(&primary, &plane, DEFAULT_CLIP_PLANE_OFFSET, 1.0)
            .unwrap();

        assert_relative_eq!(result.position.y, -5.0, epsilon = 1e-5);
        assert_eq!(result.position.x, primary.position.x);
        assert_eq!(result.position.z, primary.position.z);

        for row in [0, 1, 3] {
            assert_eq!(result.projection.row_vec(row), primary.projection.row_vec(row));
        }
        assert_ne!(result.projection.row_vec(2), primary.projection.row_vec(2));
    }

    #[test]
    fn test_solver_does_not_touch_primary() {
        let primary = primary();
        let snapshot = primary.clone();
        let _ = ReflectionCameraSolver::new().solve(&primary, &Plane::default(), 0.07, 1.0);
        assert_eq!(primary, snapshot);
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let solver = ReflectionCameraSolver::new();
        let a = solver.solve(&primary(), &Plane::default(), 0.07, 1.0).unwrap();
        let b = solver.solve(&primary(), &Plane::default(), 0.07, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mirrored_camera_sees_reflection_of_scene() {
        // Looking down at the water, the mirror of a mast top must appear at
        // the same screen position as the real mast top mirrored through the
        // surface would for the primary camera.
        let primary = CameraState::perspective(
            Vec3::new(4.0, 6.0, -8.0),
            Vec3::new(0.0, 0.0, 5.0),
            50.0,
            0.3,
            500.0,
            1280,
            720,
        );
        let result = ReflectionCameraSolver::new().solve(&primary, &Plane::default(), 0.0, 1.0).unwrap();

        let mast_top = Point3::new(1.0, 3.0, 6.0);
        let mirrored_mast = Point3::new(1.0, -3.0, 6.0);

        let reflected = result.projection * result.world_to_view * mast_top.to_homogeneous();
        let direct = primary.projection * primary.world_to_view * mirrored_mast.to_homogeneous();

        // x/y screen positions match; depth differs because the near plane moved.
        assert_relative_eq!(reflected.x / reflected.w, direct.x / direct.w, epsilon = 1e-4);
        assert_relative_eq!(reflected.y / reflected.w, direct.y / direct.w, epsilon = 1e-4);
    }
}
