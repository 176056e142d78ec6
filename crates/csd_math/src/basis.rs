// World-space direction and camera basis helpers.
//
// Directions are transformed by the rotation/scale 3x3 submatrix only
// (translation never applies to directions). Points go through the full
// affine matrix via glam's Mat4::transform_point3.

use glam::{Mat3, Mat4, Vec3};

/// Length below which a transformed direction is considered degenerate.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Transform a local-space direction into world space and normalize it.
///
/// Uses only the 3x3 rotation/scale submatrix of `world`. Returns `None`
/// when the submatrix collapses the direction to (near-)zero length, i.e.
/// the transform is degenerate along that axis.
pub fn world_direction(world: Mat4, local: Vec3) -> Option<Vec3> {
    let v = Mat3::from_mat4(world) * local;
    let len = v.length();
    if len <= DEGENERATE_EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// World-space camera basis vectors, each independently normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Camera right axis, world space (local +X)
    pub right: Vec3,

    /// Camera up axis, world space (local +Y)
    pub up: Vec3,

    /// Camera forward/gaze axis, world space (local -Z)
    pub gaze: Vec3,
}

/// Derive the camera basis from a world matrix.
///
/// Convention: right = world * (1, 0, 0), up = world * (0, 1, 0),
/// gaze = world * (0, 0, -1). Returns `None` if any axis is degenerate.
pub fn camera_basis(world: Mat4) -> Option<CameraBasis> {
    Some(CameraBasis {
        right: world_direction(world, Vec3::X)?,
        up: world_direction(world, Vec3::Y)?,
        gaze: world_direction(world, Vec3::NEG_Z)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::PI;

    #[test]
    fn test_world_direction_ignores_translation() {
        let world = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let dir = world_direction(world, Vec3::X).unwrap();
        assert_eq!(dir, Vec3::X);
    }

    #[test]
    fn test_world_direction_normalizes_scale() {
        let world = Mat4::from_scale(Vec3::new(5.0, 5.0, 5.0));
        let dir = world_direction(world, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_world_direction_rotation() {
        // 90 degree rotation around Z maps +X to +Y
        let world = Mat4::from_rotation_z(PI / 2.0);
        let dir = world_direction(world, Vec3::X).unwrap();
        assert!((dir - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_world_direction_degenerate() {
        // Zero scale on X collapses the X axis
        let world = Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
        assert!(world_direction(world, Vec3::X).is_none());
        assert!(world_direction(world, Vec3::Y).is_some());
    }

    #[test]
    fn test_camera_basis_identity() {
        let basis = camera_basis(Mat4::IDENTITY).unwrap();
        assert_eq!(basis.right, Vec3::X);
        assert_eq!(basis.up, Vec3::Y);
        assert_eq!(basis.gaze, Vec3::NEG_Z);
    }

    #[test]
    fn test_camera_basis_orthonormal_under_rotation() {
        let rot = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 2.4);
        let world = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 2.0, 2.0),
            rot,
            Vec3::new(1.0, -4.0, 7.0),
        );
        let basis = camera_basis(world).unwrap();

        assert!((basis.right.length() - 1.0).abs() < 1e-5);
        assert!((basis.up.length() - 1.0).abs() < 1e-5);
        assert!((basis.gaze.length() - 1.0).abs() < 1e-5);

        assert!(basis.right.dot(basis.up).abs() < 1e-5);
        assert!(basis.right.dot(basis.gaze).abs() < 1e-5);
        assert!(basis.up.dot(basis.gaze).abs() < 1e-5);
    }

    #[test]
    fn test_camera_basis_singular() {
        let world = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));
        assert!(camera_basis(world).is_none());
    }
}
