//! Side-effecting operations: pty launch, output capture, and telemetry reads.

pub mod pty;
pub mod reader;
pub mod runner;
pub mod telemetry;
