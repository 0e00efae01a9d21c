//! gyro-pointer-spatial: phone orientation to venue pointer
//!
//! This crate holds the spatial pipeline:
//! - Euler angle (yaw/pitch/roll) to unit direction conversion
//! - Rotation calibration between device and venue frames (Rodrigues' formula)
//! - Ray / axis-aligned box intersection (slab method)
//! - Latency compensation buffer with circular yaw interpolation
//! - A [`SpatialProcessor`] that composes the above per session
//!
//! Coordinates are Z-up: X east, Y north, Z up. Angles are degrees, times are
//! milliseconds.

pub mod buffer;
pub mod calibration;
pub mod error;
pub mod fixture;
pub mod orientation;
pub mod processor;
pub mod raycast;

mod bounds;
mod matrix3;
mod vector3d;

pub use bounds::Bounds;
pub use buffer::SampleBuffer;
pub use calibration::{apply_calibration, rotation_between};
pub use error::SpatialError;
pub use fixture::{fixture_pan_tilt, Mounting, PanTilt};
pub use matrix3::Matrix3;
pub use orientation::{direction_from_euler, OrientationSample};
pub use processor::{CalibrationState, InteractionResult, SpatialProcessor};
pub use raycast::intersect;
pub use vector3d::{clamp, Vector3D};
