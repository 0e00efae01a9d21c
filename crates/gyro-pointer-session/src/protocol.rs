//! JSON message types exchanged with clients.
//!
//! Every message is an object tagged by `"type"`. Inbound angle fields that are
//! missing default to `0`.

use gyro_pointer_spatial::InteractionResult;
use serde::{Deserialize, Serialize};

/// Message sent by the phone or a control surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SensorData {
        #[serde(default)]
        alpha: f64,
        #[serde(default)]
        beta: f64,
        #[serde(default)]
        gamma: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<f64>,
    },
    Calibrate {
        #[serde(default)]
        alpha: f64,
        #[serde(default)]
        beta: f64,
        #[serde(default)]
        gamma: f64,
    },
    ResetCalibration,
    Ping,
}

impl ClientMessage {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Wire name of this message's `type`
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::SensorData { .. } => "sensor_data",
            ClientMessage::Calibrate { .. } => "calibrate",
            ClientMessage::ResetCalibration => "reset_calibration",
            ClientMessage::Ping => "ping",
        }
    }

    /// Client-side timestamp, when the message carries one
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            ClientMessage::SensorData { timestamp, .. } => *timestamp,
            _ => None,
        }
    }
}

/// Message produced by a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Connected { message: String, timestamp: f64 },
    StateUpdate(StateUpdate),
    CalibrationResult { success: bool, message: String },
    Pong,
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    pub fn calibration_result(success: bool, message: impl Into<String>) -> Self {
        ServerMessage::CalibrationResult {
            success,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Pointer broadcast payload.
///
/// Field names and nesting are consumed by existing visualizers and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub sensor: SensorPayload,
    pub pointer: PointerPayload,
    pub calibrated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub timestamp: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPayload {
    pub direction: [f64; 3],
    pub intersection: [f64; 3],
}

impl From<&InteractionResult> for StateUpdate {
    fn from(result: &InteractionResult) -> Self {
        let raw = &result.raw_sample;
        Self {
            sensor: SensorPayload {
                alpha: raw.yaw,
                beta: raw.pitch,
                gamma: raw.roll,
                timestamp: raw.timestamp,
            },
            pointer: PointerPayload {
                direction: result.direction.to_array(),
                intersection: result.intersection.to_array(),
            },
            calibrated: result.calibrated,
        }
    }
}

impl From<&InteractionResult> for ServerMessage {
    fn from(result: &InteractionResult) -> Self {
        ServerMessage::StateUpdate(result.into())
    }
}
