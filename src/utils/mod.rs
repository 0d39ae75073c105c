//! Shared display and console utilities

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter, ProgressIndicator};
