//! 3D vector representation for directions and positions

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Magnitudes below this are treated as zero-length by [`Vector3D::normalize`]
pub const NORMALIZE_EPSILON: f64 = 1e-10;

/// A vector in 3D venue space
///
/// Z-up coordinate system:
/// - X: East (+) / West (-)
/// - Y: North (+) / South (-)
/// - Z: Up (+) / Down (-)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    /// Zero vector
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing east (+X)
    pub const EAST: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing north (+Y), the uncalibrated forward direction
    pub const NORTH: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector pointing up (+Z)
    pub const UP: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from an `[x, y, z]` array
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Convert to an `[x, y, z]` array (wire format for pointer payloads)
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component by axis index (0 = x, 1 = y, 2 = z)
    pub fn axis(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Calculate the magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Calculate the squared magnitude (faster, avoids sqrt)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Normalize the vector to unit length.
    ///
    /// Near-zero vectors return [`Vector3D::NORTH`] instead of NaN so downstream
    /// consumers never see a non-finite direction.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag < NORMALIZE_EPSILON {
            return Self::NORTH;
        }
        Self {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Calculate the dot product with another vector
    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the cross product with another vector
    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Vector3D) -> f64 {
        (*self - *other).magnitude()
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise approximate equality
    pub fn approx_eq(&self, other: &Vector3D, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

/// Saturate `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics when the bounds are inverted; `min` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

impl From<[f64; 3]> for Vector3D {
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3D> for [f64; 3] {
    fn from(v: Vector3D) -> Self {
        v.to_array()
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vector3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        let v = Vector3D::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize() {
        let n = Vector3D::new(0.0, 0.0, 7.5).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
        assert_eq!(n, Vector3D::UP);
    }

    #[test]
    fn test_normalize_zero_falls_back_to_north() {
        assert_eq!(Vector3D::ZERO.normalize(), Vector3D::NORTH);
        assert_eq!(Vector3D::new(1e-12, 0.0, -1e-12).normalize(), Vector3D::NORTH);
    }

    #[test]
    fn test_cross_product() {
        // East x North = Up in a right-handed Z-up frame
        let result = Vector3D::EAST.cross(&Vector3D::NORTH);
        assert!(result.approx_eq(&Vector3D::UP, 1e-12));
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(Vector3D::EAST.dot(&Vector3D::NORTH), 0.0);
        assert_eq!(Vector3D::EAST.dot(&Vector3D::new(2.0, 5.0, 0.0)), 2.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(1.7, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-3.0, -1.0, 1.0), -1.0);
        assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
        // inverted bounds do not panic
        assert_eq!(clamp(0.5, 2.0, 1.0), 2.0);
    }

    #[test]
    fn test_array_conversion() {
        let v = Vector3D::from([1.0, 2.0, 3.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(v.axis(1), 2.0);
    }
}
