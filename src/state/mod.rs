//! State management module
//!
//! This module contains the countdown state and the application state that
//! publishes it.

pub mod app_state;
pub mod countdown_state;

// Re-export main types
pub use app_state::{AppState, StatePublisher};
pub use countdown_state::{CountdownState, TimeModel};
