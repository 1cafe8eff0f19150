//! Individual pane renderers.

pub mod gauges;
pub mod header;
pub mod input;
pub mod output;
