//! cmdterm: a TUI that runs one shell command at a time through a
//! pseudo-terminal and shows its captured output next to CPU/RAM gauges.

pub mod actions;
pub mod data;
pub mod error;
pub mod queries;
pub mod transforms;
pub mod ui;
