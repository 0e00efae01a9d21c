//! Spatial processor: orientation sample in, venue intersection out.
//!
//! Pipeline per sample:
//! `sample -> [yaw offset] -> [Euler -> vector] -> [calibration rotation] -> [ray/box] -> result`
//!
//! One processor per session. It holds no locks; callers serialize access.

use crate::calibration::{apply_calibration, rotation_between};
use crate::error::{Result, SpatialError};
use crate::orientation::{direction_from_euler, wrap_degrees};
use crate::{Bounds, Matrix3, OrientationSample, Vector3D};
use serde::{Deserialize, Serialize};

/// Calibration state owned by a [`SpatialProcessor`].
///
/// `rotation` and `target` are present exactly when `is_calibrated` is true.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationState {
    pub is_calibrated: bool,
    pub rotation: Option<Matrix3>,
    pub target: Option<Vector3D>,
    pub alpha_offset: f64,
}

/// Output of one successful [`SpatialProcessor::process`] call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    /// Where the pointer ray meets the venue bounds
    pub intersection: Vector3D,
    /// Unit pointing direction after calibration
    pub direction: Vector3D,
    pub calibrated: bool,
    /// The sample that produced this result, echoed back
    pub raw_sample: OrientationSample,
}

/// Turns orientation samples into venue hits, applying calibration when set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialProcessor {
    calibration: CalibrationState,
}

impl SpatialProcessor {
    pub fn new() -> Self {
        tracing::debug!("SpatialProcessor initialized");
        Self::default()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated
    }

    pub fn alpha_offset(&self) -> f64 {
        self.calibration.alpha_offset
    }

    /// Copy of the current calibration state
    pub fn calibration_state(&self) -> CalibrationState {
        self.calibration
    }

    /// Calibrate so that `sample` maps onto `target_direction`.
    ///
    /// Captures the sample's yaw as the new offset, then computes the rotation
    /// taking the offset-corrected direction onto the target. Returns `false`
    /// and leaves the state untouched on a numeric fault.
    pub fn calibrate(&mut self, sample: &OrientationSample, target_direction: Vector3D) -> bool {
        match Self::compute_calibration(sample, target_direction) {
            Ok(state) => {
                self.calibration = state;
                tracing::info!(
                    alpha_offset = state.alpha_offset,
                    target_direction = %target_direction,
                    "Calibration successful"
                );
                true
            }
            Err(e) => {
                tracing::error!("Calibration failed: {}", e);
                false
            }
        }
    }

    fn compute_calibration(
        sample: &OrientationSample,
        target_direction: Vector3D,
    ) -> Result<CalibrationState> {
        if !target_direction.is_finite() {
            return Err(SpatialError::NonFinite("target direction"));
        }

        let alpha_offset = sample.yaw;
        // TODO: the offset is taken from this same sample, so the corrected yaw is
        // always 0 here; revisit once the offset and matrix schemes are reconciled.
        let corrected_yaw = wrap_degrees(sample.yaw - alpha_offset);
        let current = direction_from_euler(corrected_yaw, sample.pitch, sample.roll);
        let rotation = rotation_between(current, target_direction.normalize());

        if !rotation.is_finite() {
            return Err(SpatialError::NumericFault("calibration rotation"));
        }

        Ok(CalibrationState {
            is_calibrated: true,
            rotation: Some(rotation),
            target: Some(target_direction),
            alpha_offset,
        })
    }

    /// Drop any calibration and return to the uncalibrated state
    pub fn reset(&mut self) {
        self.calibration = CalibrationState::default();
        tracing::info!("Calibration reset");
    }

    /// Project `sample` from `user_position` into `bounds`.
    ///
    /// `None` when the ray misses the venue, or on a numeric fault (logged).
    pub fn process(
        &self,
        sample: &OrientationSample,
        user_position: Vector3D,
        bounds: &Bounds,
    ) -> Option<InteractionResult> {
        match self.try_process(sample, user_position, bounds) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error processing sensor data: {}", e);
                None
            }
        }
    }

    fn try_process(
        &self,
        sample: &OrientationSample,
        user_position: Vector3D,
        bounds: &Bounds,
    ) -> Result<Option<InteractionResult>> {
        let state = &self.calibration;

        let yaw = if state.is_calibrated {
            wrap_degrees(sample.yaw - state.alpha_offset)
        } else {
            sample.yaw
        };

        let mut direction = direction_from_euler(yaw, sample.pitch, sample.roll);
        if let Some(rotation) = state.rotation.as_ref().filter(|_| state.is_calibrated) {
            direction = apply_calibration(direction, rotation);
        }
        if !direction.is_finite() {
            return Err(SpatialError::NumericFault("pointer direction"));
        }

        let Some(intersection) = bounds.intersect_ray(user_position, direction) else {
            tracing::debug!(%direction, "Ray does not intersect venue bounds");
            return Ok(None);
        };
        if !intersection.is_finite() {
            return Err(SpatialError::NumericFault("intersection"));
        }

        Ok(Some(InteractionResult {
            intersection,
            direction,
            calibrated: state.is_calibrated,
            raw_sample: *sample,
        }))
    }
}
