//! Physical venue model
//!
//! The venue is a box anchored at the origin, Z-up, measured in metres. The
//! user stands in the middle of the floor plan; the centre of the back wall
//! (the `+Y` face) is where calibration aims.

use gyro_pointer_spatial::{Bounds, Vector3D};
use serde::{Deserialize, Serialize};

pub const DIMENSION_RANGE: (f64, f64) = (2.0, 100.0);
pub const GRID_SIZE_RANGE: (f64, f64) = (0.1, 5.0);
pub const USER_HEIGHT_RANGE: (f64, f64) = (0.5, 1.5);

pub const DEFAULT_WIDTH: f64 = 10.0;
pub const DEFAULT_DEPTH: f64 = 10.0;
pub const DEFAULT_HEIGHT: f64 = 4.0;
pub const DEFAULT_GRID_SIZE: f64 = 1.0;
pub const DEFAULT_USER_HEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VenueError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<f64, VenueError> {
    // NaN fails both comparisons, so test for inclusion rather than exclusion
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(VenueError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Validated venue dimensions and user placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VenueDocument", into = "VenueDocument")]
pub struct Venue {
    width: f64,
    depth: f64,
    height: f64,
    grid_size: f64,
    user_height: f64,
}

impl Venue {
    /// Build a venue, rejecting any value outside its allowed range
    pub fn new(
        width: f64,
        depth: f64,
        height: f64,
        grid_size: f64,
        user_height: f64,
    ) -> Result<Self, VenueError> {
        Ok(Self {
            width: check("width", width, DIMENSION_RANGE)?,
            depth: check("depth", depth, DIMENSION_RANGE)?,
            height: check("height", height, DIMENSION_RANGE)?,
            grid_size: check("grid_size", grid_size, GRID_SIZE_RANGE)?,
            user_height: check("user_height", user_height, USER_HEIGHT_RANGE)?,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn user_height(&self) -> f64 {
        self.user_height
    }

    /// Resize the venue. Nothing changes unless all three values are valid.
    pub fn set_dimensions(&mut self, width: f64, depth: f64, height: f64) -> Result<(), VenueError> {
        let width = check("width", width, DIMENSION_RANGE)?;
        let depth = check("depth", depth, DIMENSION_RANGE)?;
        let height = check("height", height, DIMENSION_RANGE)?;
        self.width = width;
        self.depth = depth;
        self.height = height;
        tracing::info!(width, depth, height, "Venue dimensions updated");
        Ok(())
    }

    pub fn set_grid_size(&mut self, grid_size: f64) -> Result<(), VenueError> {
        self.grid_size = check("grid_size", grid_size, GRID_SIZE_RANGE)?;
        Ok(())
    }

    pub fn set_user_height(&mut self, user_height: f64) -> Result<(), VenueError> {
        self.user_height = check("user_height", user_height, USER_HEIGHT_RANGE)?;
        Ok(())
    }

    /// Where the pointer ray starts
    pub fn user_position(&self) -> Vector3D {
        Vector3D::new(self.width / 2.0, self.depth / 2.0, self.user_height)
    }

    /// Calibration target on the `+Y` wall
    pub fn back_wall_center(&self) -> Vector3D {
        Vector3D::new(self.width / 2.0, self.depth, self.height / 2.0)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.depth, self.height)
    }

    pub fn corners(&self) -> [Vector3D; 8] {
        self.bounds().corners()
    }

    /// Direction from the user to the back wall centre
    pub fn calibration_direction(&self) -> Vector3D {
        self.back_wall_center() - self.user_position()
    }

    pub fn info(&self) -> VenueInfo {
        VenueInfo {
            dimensions: DimensionsInfo {
                width: self.width,
                depth: self.depth,
                height: self.height,
                volume: self.width * self.depth * self.height,
            },
            grid_size: self.grid_size,
            user_position: self.user_position(),
            user_height: self.user_height,
            back_wall_center: self.back_wall_center(),
            bounds: self.bounds(),
        }
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            height: DEFAULT_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            user_height: DEFAULT_USER_HEIGHT,
        }
    }
}

/// Serializable venue summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueInfo {
    pub dimensions: DimensionsInfo,
    pub grid_size: f64,
    pub user_position: Vector3D,
    pub user_height: f64,
    pub back_wall_center: Vector3D,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionsInfo {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub volume: f64,
}

// Wire shape: {"dimensions": {...}, "grid_size": .., "user_height": ..}
#[derive(Serialize, Deserialize)]
struct VenueDocument {
    #[serde(default)]
    dimensions: Dimensions,
    #[serde(default = "default_grid_size")]
    grid_size: f64,
    #[serde(default = "default_user_height")]
    user_height: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct Dimensions {
    width: f64,
    depth: f64,
    height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE
}

fn default_user_height() -> f64 {
    DEFAULT_USER_HEIGHT
}

impl TryFrom<VenueDocument> for Venue {
    type Error = VenueError;

    fn try_from(doc: VenueDocument) -> Result<Self, Self::Error> {
        Venue::new(
            doc.dimensions.width,
            doc.dimensions.depth,
            doc.dimensions.height,
            doc.grid_size,
            doc.user_height,
        )
    }
}

impl From<Venue> for VenueDocument {
    fn from(venue: Venue) -> Self {
        Self {
            dimensions: Dimensions {
                width: venue.width,
                depth: venue.depth,
                height: venue.height,
            },
            grid_size: venue.grid_size,
            user_height: venue.user_height,
        }
    }
}
