//! Wire protocol and transport-free session dispatch

pub mod protocol;
pub mod session;

pub use protocol::{ClientMessage, PointerPayload, SensorPayload, ServerMessage, StateUpdate};
pub use session::{PointerSession, SessionStatus};
