//! State transitions driven by user input and worker events.

pub mod input;
pub mod session;
