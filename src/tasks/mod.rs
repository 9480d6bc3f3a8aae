//! Background tasks module
//!
//! This module contains the countdown task that runs alongside the HTTP server.

pub mod countdown_timer;

// Re-export main types
pub use countdown_timer::{CountdownListener, CountdownTimer, TICK_DURATION};
