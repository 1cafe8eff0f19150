//! Read-only derivations over application data.

pub mod output;
pub mod session;
pub mod telemetry;
