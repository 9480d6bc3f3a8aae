//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod input;
pub mod signals;
pub mod time;

// Re-export main functions
pub use input::parse_time_field;
pub use signals::shutdown_signal;
pub use time::{seconds_to_time, time_to_millis};
