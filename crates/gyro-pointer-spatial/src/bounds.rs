//! Axis-aligned venue volume

use super::Vector3D;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Expected to satisfy `min <= max` componentwise. Zero-volume boxes are legal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector3D,
    pub max: Vector3D,
}

impl Bounds {
    pub const fn new(min: Vector3D, max: Vector3D) -> Self {
        Self { min, max }
    }

    /// Box anchored at the origin with the given extents
    pub fn from_size(width: f64, depth: f64, height: f64) -> Self {
        Self::new(Vector3D::ZERO, Vector3D::new(width, depth, height))
    }

    /// True when `min <= max` on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn center(&self) -> Vector3D {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3D {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Check if a point is inside the box (faces included)
    pub fn contains(&self, point: Vector3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// The 8 corners, floor level (`min.z`) first, x-major then y within each level
    pub fn corners(&self) -> [Vector3D; 8] {
        let mut out = [Vector3D::ZERO; 8];
        let mut i = 0;
        for z in [self.min.z, self.max.z] {
            for x in [self.min.x, self.max.x] {
                for y in [self.min.y, self.max.y] {
                    out[i] = Vector3D::new(x, y, z);
                    i += 1;
                }
            }
        }
        out
    }

    /// Where a ray from `origin` along `direction` meets this box, see [`crate::intersect`]
    pub fn intersect_ray(&self, origin: Vector3D, direction: Vector3D) -> Option<Vector3D> {
        crate::raycast::intersect(origin, direction, self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_size(10.0, 10.0, 4.0)
    }
}
