//! Row-major 3x3 matrix used for calibration rotations

use super::Vector3D;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A 3x3 matrix stored row-major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    pub rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Zero matrix
    pub const ZERO: Self = Self {
        rows: [[0.0; 3]; 3],
    };

    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Skew-symmetric cross-product matrix `K` such that `K * v == axis x v`
    pub fn skew(axis: Vector3D) -> Self {
        Self::new([
            [0.0, -axis.z, axis.y],
            [axis.z, 0.0, -axis.x],
            [-axis.y, axis.x, 0.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self::new([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// Multiply by a scalar
    pub fn scale(&self, s: f64) -> Self {
        let mut out = *self;
        for row in out.rows.iter_mut() {
            for v in row.iter_mut() {
                *v *= s;
            }
        }
        out
    }

    /// Matrix-vector product
    pub fn transform(&self, v: Vector3D) -> Vector3D {
        let r = &self.rows;
        Vector3D::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// True when the matrix is orthonormal with determinant +1, within `tolerance`
    pub fn is_rotation(&self, tolerance: f64) -> bool {
        if (self.determinant() - 1.0).abs() > tolerance {
            return false;
        }
        (*self * self.transpose()).approx_eq(&Self::IDENTITY, tolerance)
    }

    pub fn approx_eq(&self, other: &Matrix3, tolerance: f64) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Matrix3 {
    type Output = Matrix3;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = self;
        for (i, row) in out.rows.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v += rhs.rows[i][j];
            }
        }
        out
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.rows[i][j] = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        out
    }
}

impl Mul<Vector3D> for Matrix3 {
    type Output = Vector3D;

    fn mul(self, rhs: Vector3D) -> Self::Output {
        self.transform(rhs)
    }
}
