use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use gyro_pointer_config::AppConfig;
use gyro_pointer_session::{ClientMessage, PointerSession, ServerMessage};
use gyro_pointer_spatial::{buffer::now_millis, fixture_pan_tilt, Mounting, Vector3D};
use tracing::{info, warn};

/// Parse `x,y,z` into a point
pub fn parse_point(s: &str) -> Result<Vector3D, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }
    let mut coords = [0.0; 3];
    for (slot, part) in coords.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))?;
    }
    Ok(Vector3D::from_array(coords))
}

fn emit(out: &mut impl Write, message: &ServerMessage) -> Result<()> {
    writeln!(out, "{}", message.to_json()?)?;
    Ok(())
}

/// Replay a JSON-lines file through a fresh session, writing every reply.
///
/// The session clock follows message timestamps; messages without one reuse the
/// previous clock value.
pub fn replay(config: &AppConfig, path: &Path, out: &mut impl Write) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut session = PointerSession::from_config(config)?;
    let mut clock = 0.0;
    let mut skipped = 0usize;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message = match ClientMessage::from_json(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(line = index + 1, "Skipping malformed message: {}", e);
                skipped += 1;
                continue;
            }
        };

        if let Some(ts) = message.timestamp() {
            clock = ts;
        }
        for reply in session.handle(message, clock) {
            emit(out, &reply)?;
        }
    }

    let status = session.status();
    info!(
        session = %status.id,
        messages = status.messages_received,
        updates = status.updates_sent,
        errors = status.errors,
        skipped,
        calibrated = status.calibrated,
        "Replay finished"
    );
    Ok(())
}

/// Evaluate a single orientation, calibrating first when asked
pub fn point(
    config: &AppConfig,
    (alpha, beta, gamma): (f64, f64, f64),
    calibration: Option<(f64, f64, f64)>,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = PointerSession::from_config(config)?;
    let now = now_millis();

    if let Some((alpha, beta, gamma)) = calibration {
        let replies = session.handle(ClientMessage::Calibrate { alpha, beta, gamma }, now);
        // The pointer after calibration is reported below
        for reply in replies
            .iter()
            .filter(|r| matches!(r, ServerMessage::CalibrationResult { .. }))
        {
            emit(out, reply)?;
        }
    }

    let replies = session.handle(
        ClientMessage::SensorData {
            alpha,
            beta,
            gamma,
            timestamp: None,
        },
        now,
    );
    if replies.is_empty() {
        info!("Pointer ray misses the venue");
    }
    for reply in &replies {
        emit(out, reply)?;
    }
    Ok(())
}

pub fn venue(config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let venue = config.venue()?;
    serde_json::to_writer_pretty(&mut *out, &venue.info())?;
    writeln!(out)?;
    Ok(())
}

pub fn fixture(
    fixture: Vector3D,
    target: Vector3D,
    mounting: Mounting,
    pan_invert: bool,
    tilt_invert: bool,
    out: &mut impl Write,
) -> Result<()> {
    let aim = fixture_pan_tilt(fixture, target, mounting, pan_invert, tilt_invert);
    serde_json::to_writer(&mut *out, &aim)?;
    writeln!(out)?;
    Ok(())
}
