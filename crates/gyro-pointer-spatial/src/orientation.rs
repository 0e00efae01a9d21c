//! Device orientation samples and the Euler-to-direction conversion

use crate::error::{Result, SpatialError};
use crate::Vector3D;
use serde::{Deserialize, Serialize};

pub const YAW_RANGE: (f64, f64) = (0.0, 360.0);
pub const PITCH_RANGE: (f64, f64) = (-180.0, 180.0);
pub const ROLL_RANGE: (f64, f64) = (-90.0, 90.0);

/// One orientation reading from the phone's compass/pitch/roll sensors.
///
/// On the wire the angles are named after the browser's `DeviceOrientationEvent`
/// fields: `alpha` (yaw), `beta` (pitch), `gamma` (roll). Angles are degrees,
/// `timestamp` is milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationSample {
    #[serde(rename = "alpha")]
    pub yaw: f64,
    #[serde(rename = "beta")]
    pub pitch: f64,
    #[serde(rename = "gamma")]
    pub roll: f64,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl OrientationSample {
    /// Build a sample without range checks. The spatial core trusts its input;
    /// use [`OrientationSample::validated`] at the edge.
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self {
            yaw,
            pitch,
            roll,
            timestamp: None,
        }
    }

    pub const fn with_timestamp(mut self, timestamp_ms: f64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    /// Build a sample, rejecting non-finite or out-of-range angles.
    pub fn validated(yaw: f64, pitch: f64, roll: f64, timestamp: Option<f64>) -> Result<Self> {
        check_range("alpha", yaw, YAW_RANGE)?;
        check_range("beta", pitch, PITCH_RANGE)?;
        check_range("gamma", roll, ROLL_RANGE)?;
        if let Some(ts) = timestamp {
            if !ts.is_finite() {
                return Err(SpatialError::NonFinite("timestamp"));
            }
        }
        Ok(Self {
            yaw,
            pitch,
            roll,
            timestamp,
        })
    }

    /// Unit pointing direction for this sample, see [`direction_from_euler`]
    pub fn direction(&self) -> Vector3D {
        direction_from_euler(self.yaw, self.pitch, self.roll)
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() {
        return Err(SpatialError::NonFinite(field));
    }
    if value < min || value > max {
        return Err(SpatialError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Convert sensor Euler angles (degrees) into a unit direction vector.
///
/// Yaw 0 points north (+Y), positive pitch tilts up toward +Z. The yaw sign is
/// inverted to match the phone's compass convention. Roll is accepted but not
/// part of the pointing model.
pub fn direction_from_euler(yaw: f64, pitch: f64, _roll: f64) -> Vector3D {
    let yaw_rad = (-yaw).to_radians();
    let pitch_rad = pitch.to_radians();

    Vector3D::new(
        yaw_rad.sin() * pitch_rad.cos(),
        yaw_rad.cos() * pitch_rad.cos(),
        pitch_rad.sin(),
    )
    .normalize()
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
