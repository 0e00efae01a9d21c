//! Rotation-based calibration between the device frame and the venue frame

use crate::{Matrix3, Vector3D};
use std::f64::consts::PI;

/// Above this dot product the two directions are treated as already aligned
const ALIGNED_DOT: f64 = 0.9999;
/// Below this dot product the two directions are treated as opposite
const OPPOSED_DOT: f64 = -0.9999;
/// Fallback-axis candidates closer than this to `current` are rejected
const AXIS_PARALLEL_DOT: f64 = 0.9;

/// Rotation matrix that turns `current` onto `target`.
///
/// Both inputs are normalized first. The result is always a proper rotation
/// (orthonormal, determinant +1) and is deterministic for a given input pair.
///
/// Opposite vectors rotate by pi around an axis perpendicular to `current`,
/// derived from +Z, or from +X when `current` is too close to vertical.
pub fn rotation_between(current: Vector3D, target: Vector3D) -> Matrix3 {
    let current = current.normalize();
    let target = target.normalize();
    let dot = current.dot(&target);

    if dot > ALIGNED_DOT {
        return Matrix3::IDENTITY;
    }

    let (axis, angle) = if dot < OPPOSED_DOT {
        let helper = if current.dot(&Vector3D::UP).abs() > AXIS_PARALLEL_DOT {
            Vector3D::EAST
        } else {
            Vector3D::UP
        };
        (current.cross(&helper).normalize(), PI)
    } else {
        (
            current.cross(&target).normalize(),
            crate::clamp(dot, -1.0, 1.0).acos(),
        )
    };

    axis_angle(axis, angle)
}

/// Rodrigues' formula: `R = I + sin(t) K + (1 - cos(t)) K^2` for a unit `axis`.
pub fn axis_angle(axis: Vector3D, angle: f64) -> Matrix3 {
    let k = Matrix3::skew(axis);
    Matrix3::IDENTITY + k.scale(angle.sin()) + (k * k).scale(1.0 - angle.cos())
}

/// Rotate `direction` by `rotation` and re-normalize to cancel floating-point drift.
pub fn apply_calibration(direction: Vector3D, rotation: &Matrix3) -> Vector3D {
    rotation.transform(direction).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.01;

    fn sample_directions() -> Vec<Vector3D> {
        vec![
            Vector3D::NORTH,
            Vector3D::EAST,
            Vector3D::UP,
            -Vector3D::UP,
            Vector3D::new(1.0, 1.0, 0.0),
            Vector3D::new(-0.3, 0.2, 0.9),
            Vector3D::new(0.0, 5.0, 1.0),
            Vector3D::new(0.7, -0.7, -0.1),
            Vector3D::new(0.05, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_same_vector_is_identity() {
        for v in sample_directions() {
            assert_eq!(rotation_between(v, v), Matrix3::IDENTITY);
        }
    }

    #[test]
    fn test_90_degrees_east_to_north() {
        let r = rotation_between(Vector3D::EAST, Vector3D::NORTH);
        let result = apply_calibration(Vector3D::EAST, &r);
        assert!(result.approx_eq(&Vector3D::NORTH, TOL), "got {result}");
    }

    #[test]
    fn test_rotation_maps_current_onto_target() {
        for current in sample_directions() {
            for target in sample_directions() {
                let r = rotation_between(current, target);
                let result = apply_calibration(current, &r);
                assert!(
                    result.approx_eq(&target.normalize(), TOL),
                    "{current} -> {target}: got {result}"
                );
            }
        }
    }

    #[test]
    fn test_result_is_proper_rotation() {
        for current in sample_directions() {
            for target in sample_directions() {
                let r = rotation_between(current, target);
                assert!(r.is_rotation(1e-9), "{current} -> {target}: {r:?}");
            }
        }
    }

    #[test]
    fn test_opposite_vectors_use_z_helper_axis() {
        let r = rotation_between(Vector3D::NORTH, -Vector3D::NORTH);
        // Axis is NORTH x UP = EAST, so UP stays in the plane and flips
        assert!(apply_calibration(Vector3D::UP, &r).approx_eq(&-Vector3D::UP, 1e-9));
        assert!(apply_calibration(Vector3D::NORTH, &r).approx_eq(&-Vector3D::NORTH, 1e-9));
    }

    #[test]
    fn test_opposite_vertical_vectors_use_x_helper_axis() {
        let r = rotation_between(Vector3D::UP, -Vector3D::UP);
        assert!(r.is_rotation(1e-9));
        assert!(apply_calibration(Vector3D::UP, &r).approx_eq(&-Vector3D::UP, 1e-9));
    }

    #[test]
    fn test_deterministic() {
        let a = Vector3D::new(0.2, -0.4, 0.8);
        let b = Vector3D::new(-0.9, 0.1, 0.3);
        assert_eq!(rotation_between(a, b), rotation_between(a, b));
    }

    #[test]
    fn test_apply_renormalizes() {
        let scaled = Matrix3::IDENTITY.scale(3.0);
        let v = apply_calibration(Vector3D::new(0.0, 2.0, 0.0), &scaled);
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
    }
}
