//! Per-connection pointer session.
//!
//! A [`PointerSession`] bundles the state one phone needs: a processor with its
//! calibration, a latency buffer, the venue, and counters. It does no I/O; the
//! transport feeds it [`ClientMessage`]s together with the receive time and
//! sends back whatever [`ServerMessage`]s it returns.

use crate::protocol::{ClientMessage, ServerMessage};
use gyro_pointer_config::{AppConfig, BufferConfig, Venue, VenueError};
use gyro_pointer_spatial::{OrientationSample, SampleBuffer, SpatialProcessor};
use serde::Serialize;
use uuid::Uuid;

const GREETING: &str = "Connection established";

/// Snapshot of a session's state and counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub id: Uuid,
    pub calibrated: bool,
    pub alpha_offset: f64,
    pub buffer_size: usize,
    pub messages_received: u64,
    pub updates_sent: u64,
    pub errors: u64,
}

#[derive(Debug, Clone)]
pub struct PointerSession {
    id: Uuid,
    processor: SpatialProcessor,
    buffer: SampleBuffer,
    interpolate: bool,
    venue: Venue,
    messages_received: u64,
    updates_sent: u64,
    errors: u64,
}

impl PointerSession {
    pub fn new(venue: Venue, buffer: &BufferConfig) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, capacity = buffer.capacity, "Session created");
        Self {
            id,
            processor: SpatialProcessor::new(),
            buffer: SampleBuffer::new(buffer.capacity),
            interpolate: buffer.interpolate,
            venue,
            messages_received: 0,
            updates_sent: 0,
            errors: 0,
        }
    }

    /// Build a session from the `[venue]` and `[buffer]` config sections
    pub fn from_config(config: &AppConfig) -> Result<Self, VenueError> {
        Ok(Self::new(config.venue()?, &config.buffer))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Swap the venue; takes effect from the next message
    pub fn set_venue(&mut self, venue: Venue) {
        tracing::info!(session = %self.id, "Venue updated");
        self.venue = venue;
    }

    pub fn processor(&self) -> &SpatialProcessor {
        &self.processor
    }

    /// First message to send after a client connects
    pub fn greeting(&self, now_ms: f64) -> ServerMessage {
        ServerMessage::Connected {
            message: GREETING.to_string(),
            timestamp: now_ms,
        }
    }

    /// Dispatch one client message received at `now_ms`.
    ///
    /// Returns the replies in send order. A sensor sample whose ray misses the
    /// venue produces no reply.
    pub fn handle(&mut self, message: ClientMessage, now_ms: f64) -> Vec<ServerMessage> {
        self.messages_received += 1;

        match message {
            ClientMessage::SensorData {
                alpha,
                beta,
                gamma,
                timestamp,
            } => self.on_sensor_data(alpha, beta, gamma, timestamp, now_ms),
            ClientMessage::Calibrate { alpha, beta, gamma } => self.on_calibrate(alpha, beta, gamma),
            ClientMessage::ResetCalibration => {
                self.processor.reset();
                vec![ServerMessage::calibration_result(true, "Calibration reset")]
            }
            ClientMessage::Ping => vec![ServerMessage::Pong],
        }
    }

    fn on_sensor_data(
        &mut self,
        alpha: f64,
        beta: f64,
        gamma: f64,
        timestamp: Option<f64>,
        now_ms: f64,
    ) -> Vec<ServerMessage> {
        let sample = match OrientationSample::validated(alpha, beta, gamma, timestamp) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(session = %self.id, "Rejected sensor data: {}", e);
                self.errors += 1;
                return vec![ServerMessage::error(format!("Invalid sensor data: {e}"))];
            }
        };

        self.buffer.add(sample, timestamp.unwrap_or(now_ms));
        let buffered = if self.interpolate {
            self.buffer.interpolated(Some(now_ms))
        } else {
            self.buffer.latest()
        };

        buffered
            .and_then(|sample| self.process(&sample))
            .into_iter()
            .collect()
    }

    fn on_calibrate(&mut self, alpha: f64, beta: f64, gamma: f64) -> Vec<ServerMessage> {
        let sample = match OrientationSample::validated(alpha, beta, gamma, None) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(session = %self.id, "Rejected calibration data: {}", e);
                self.errors += 1;
                return vec![ServerMessage::calibration_result(
                    false,
                    format!("Invalid calibration data: {e}"),
                )];
            }
        };

        let target = self.venue.calibration_direction();
        if !self.processor.calibrate(&sample, target) {
            self.errors += 1;
            return vec![ServerMessage::calibration_result(false, "Calibration failed")];
        }

        let mut replies = vec![ServerMessage::calibration_result(
            true,
            "Calibration successful",
        )];
        replies.extend(self.process(&sample));
        replies
    }

    fn process(&mut self, sample: &OrientationSample) -> Option<ServerMessage> {
        let result = self.processor.process(
            sample,
            self.venue.user_position(),
            &self.venue.bounds(),
        )?;
        self.updates_sent += 1;
        Some(ServerMessage::from(&result))
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            calibrated: self.processor.is_calibrated(),
            alpha_offset: self.processor.alpha_offset(),
            buffer_size: self.buffer.size(),
            messages_received: self.messages_received,
            updates_sent: self.updates_sent,
            errors: self.errors,
        }
    }
}

impl Default for PointerSession {
    fn default() -> Self {
        Self::new(Venue::default(), &BufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_status() {
        let session = PointerSession::default();
        let status = session.status();
        assert!(!status.calibrated);
        assert_eq!(status.buffer_size, 0);
        assert_eq!(status.messages_received, 0);
        assert_eq!(status.id, session.id());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(PointerSession::default().id(), PointerSession::default().id());
    }

    #[test]
    fn test_greeting() {
        let session = PointerSession::default();
        match session.greeting(1234.0) {
            ServerMessage::Connected { timestamp, .. } => assert_eq!(timestamp, 1234.0),
            other => panic!("unexpected greeting: {other:?}"),
        }
    }

    #[test]
    fn test_from_config_uses_buffer_section() {
        let mut config = AppConfig::default();
        config.buffer.capacity = 5;
        let mut session = PointerSession::from_config(&config).unwrap();
        for i in 0..8 {
            session.handle(
                ClientMessage::SensorData {
                    alpha: 0.0,
                    beta: 0.0,
                    gamma: 0.0,
                    timestamp: Some(i as f64),
                },
                i as f64,
            );
        }
        assert_eq!(session.status().buffer_size, 5);
    }

    #[test]
    fn test_from_config_rejects_bad_venue() {
        let mut config = AppConfig::default();
        config.venue.width = 0.5;
        assert!(PointerSession::from_config(&config).is_err());
    }
}
