//! Countdown - A state-managed HTTP countdown timer
//!
//! This library converts hours/minutes/seconds into a running countdown,
//! publishes its state once per tick and exposes start/stop/reset over HTTP.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownState, TimeModel};
pub use tasks::{CountdownListener, CountdownTimer};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
