//! Pan/tilt aiming for moving-head light fixtures

use crate::Vector3D;
use serde::{Deserialize, Serialize};

/// How a fixture is mounted in the venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mounting {
    /// Hanging from the ceiling; pan 0 faces south (-Y), toward the front of the venue
    #[default]
    Ceiling,
    /// Standing on the floor; pan 0 faces north (+Y)
    Floor,
    /// Bolted to a wall facing inward; treated like a floor mount
    Wall,
}

impl std::str::FromStr for Mounting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ceiling" => Ok(Mounting::Ceiling),
            "floor" => Ok(Mounting::Floor),
            "wall" => Ok(Mounting::Wall),
            other => Err(format!("unknown mounting: {other}")),
        }
    }
}

/// Pan and tilt angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanTilt {
    pub pan: f64,
    pub tilt: f64,
}

/// Angles that aim a fixture at `fixture` toward `target`.
///
/// Tilt is measured from the horizontal plane, negative pointing down.
pub fn fixture_pan_tilt(
    fixture: Vector3D,
    target: Vector3D,
    mounting: Mounting,
    pan_invert: bool,
    tilt_invert: bool,
) -> PanTilt {
    let d = target - fixture;

    let pan_rad = match mounting {
        Mounting::Ceiling => d.x.atan2(-d.y),
        Mounting::Floor | Mounting::Wall => d.x.atan2(d.y),
    };
    let tilt_rad = d.z.atan2(d.x.hypot(d.y));

    let mut pan = pan_rad.to_degrees();
    let mut tilt = tilt_rad.to_degrees();
    if pan_invert {
        pan = -pan;
    }
    if tilt_invert {
        tilt = -tilt;
    }

    PanTilt { pan, tilt }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_fixture_aims_at_center() {
        let fixture = Vector3D::new(5.0, 9.0, 3.5);
        let target = Vector3D::new(5.0, 5.0, 1.0);
        let aim = fixture_pan_tilt(fixture, target, Mounting::Ceiling, false, false);
        assert!(aim.pan.abs() < 5.0, "pan should be near 0, got {}", aim.pan);
        assert!(aim.tilt < 0.0, "tilt should point down, got {}", aim.tilt);
    }

    #[test]
    fn test_floor_mount_uses_north_reference() {
        let aim = fixture_pan_tilt(
            Vector3D::ZERO,
            Vector3D::new(1.0, 1.0, 0.0),
            Mounting::Floor,
            false,
            false,
        );
        assert!((aim.pan - 45.0).abs() < 1e-9);
        assert!(aim.tilt.abs() < 1e-9);
    }

    #[test]
    fn test_inversions() {
        let fixture = Vector3D::ZERO;
        let target = Vector3D::new(1.0, 1.0, 1.0);
        let plain = fixture_pan_tilt(fixture, target, Mounting::Wall, false, false);
        let inverted = fixture_pan_tilt(fixture, target, Mounting::Wall, true, true);
        assert_eq!(inverted.pan, -plain.pan);
        assert_eq!(inverted.tilt, -plain.tilt);
    }

    #[test]
    fn test_mounting_parse() {
        assert_eq!("Ceiling".parse::<Mounting>(), Ok(Mounting::Ceiling));
        assert_eq!("wall".parse::<Mounting>(), Ok(Mounting::Wall));
        assert!("roof".parse::<Mounting>().is_err());
    }
}
