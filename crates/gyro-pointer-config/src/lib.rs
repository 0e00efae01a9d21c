//! Venue model and application configuration for gyro-pointer

pub mod config;
pub mod venue;

pub use config::{AppConfig, BufferConfig, LoggingConfig, VenueConfig};
pub use venue::{Venue, VenueError, VenueInfo};
