//! Plain data: buffers, session records, events, and UI state.

pub mod buffer;
pub mod event;
pub mod session;
pub mod state;
pub mod telemetry;
