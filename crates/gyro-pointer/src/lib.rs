pub use gyro_pointer_config::{config, venue};
pub use gyro_pointer_session::{protocol, session};
pub use gyro_pointer_spatial::{buffer, calibration, error, fixture, orientation, processor, raycast};

pub use gyro_pointer_config::{AppConfig, Venue};
pub use gyro_pointer_session::{ClientMessage, PointerSession, ServerMessage};
pub use gyro_pointer_spatial::{Bounds, OrientationSample, SampleBuffer, SpatialProcessor, Vector3D};
