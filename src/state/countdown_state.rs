//! Countdown state published to observers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Remaining time split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeModel {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeModel {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// All fields zero
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Renders as `H : M : S` without zero padding.
impl fmt::Display for TimeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.hours, self.minutes, self.seconds)
    }
}

/// Observable state of the countdown.
///
/// A run publishes any number of `Ticking` states followed by a single
/// `Finished`. Resetting publishes `Ticking` with a zero triple instead, so
/// "ran out" and "was reset" stay distinguishable while both display zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CountdownState {
    Ticking { remaining: TimeModel },
    Finished,
}

impl CountdownState {
    pub fn ticking(remaining: TimeModel) -> Self {
        Self::Ticking { remaining }
    }

    /// Remaining time, zero once finished
    pub fn remaining(&self) -> TimeModel {
        match self {
            Self::Ticking { remaining } => *remaining,
            Self::Finished => TimeModel::zero(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Text shown by a display, e.g. `1 : 5 : 0`
    pub fn display(&self) -> String {
        self.remaining().to_string()
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::Finished
    }
}
