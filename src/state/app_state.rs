//! Main application state management

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{CountdownState, TimeModel};
use crate::{
    tasks::{CountdownListener, CountdownTimer},
    utils::{seconds_to_time, time::MILLIS_PER_SECOND, time_to_millis},
};

/// Publishes countdown updates to everyone observing the application state
#[derive(Debug)]
pub struct StatePublisher {
    /// Latest published state
    state_tx: watch::Sender<CountdownState>,
    /// Every single publication, in order
    event_tx: broadcast::Sender<CountdownState>,
    /// Held while publishing so a snapshot never straddles an update
    publish_lock: Mutex<()>,
}

impl StatePublisher {
    fn new() -> Self {
        let (state_tx, _) = watch::channel(CountdownState::default());
        let (event_tx, _) = broadcast::channel(100);
        Self { state_tx, event_tx, publish_lock: Mutex::new(()) }
    }

    /// Replace the current state and notify subscribers
    pub fn publish(&self, state: CountdownState) {
        let _guard = self.publish_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.state_tx.send_replace(state);
        if self.event_tx.send(state).is_err() {
            debug!("No event subscribers for {:?}", state);
        }
    }

    /// Current state plus a receiver for every later publication
    fn snapshot(&self) -> (CountdownState, broadcast::Receiver<CountdownState>) {
        let _guard = self.publish_lock.lock().unwrap_or_else(PoisonError::into_inner);
        (*self.state_tx.borrow(), self.event_tx.subscribe())
    }
}

impl CountdownListener for StatePublisher {
    fn on_tick(&self, remaining: TimeModel) {
        debug!("Tick: {}", remaining);
        self.publish(CountdownState::ticking(remaining));
    }

    fn on_finish(&self) {
        info!("Countdown finished");
        self.publish(CountdownState::Finished);
    }
}

/// Main application state that owns the countdown and its observers
#[derive(Debug)]
pub struct AppState {
    timer: CountdownTimer,
    publisher: Arc<StatePublisher>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState whose countdown ticks every `tick_interval`
    pub fn new(port: u16, host: String, tick_interval: Duration) -> Self {
        Self {
            timer: CountdownTimer::with_tick_interval(tick_interval),
            publisher: Arc::new(StatePublisher::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Start a countdown of the given length, replacing any running one.
    ///
    /// Returns the requested duration normalised to hours/minutes/seconds.
    pub fn start_timer(&self, hours: u64, minutes: u64, seconds: u64) -> TimeModel {
        let millis = time_to_millis(hours, minutes, seconds);
        self.start_timer_millis(millis)
    }

    /// Start a countdown of `millis` milliseconds
    pub fn start_timer_millis(&self, millis: u64) -> TimeModel {
        self.record_action("start");
        self.timer.start(Duration::from_millis(millis), Arc::clone(&self.publisher));
        seconds_to_time(millis / MILLIS_PER_SECOND)
    }

    /// Stop the countdown, leaving the last published state visible
    pub fn stop_timer(&self) {
        self.record_action("stop");
        self.timer.stop();
    }

    /// Stop the countdown and show an all-zero display.
    ///
    /// Publishes a zero `Ticking` state, not `Finished`.
    pub fn reset_timer(&self) -> CountdownState {
        self.record_action("reset");
        self.timer.stop();
        let state = CountdownState::ticking(TimeModel::zero());
        self.publisher.publish(state);
        state
    }

    /// Current countdown state
    pub fn current_state(&self) -> CountdownState {
        *self.publisher.state_tx.borrow()
    }

    /// Whether a countdown is in flight
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Watch the latest state
    pub fn watch(&self) -> watch::Receiver<CountdownState> {
        self.publisher.state_tx.subscribe()
    }

    /// Receive every publication from now on
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownState> {
        self.publisher.event_tx.subscribe()
    }

    /// Current state and a receiver that yields exactly the publications
    /// made after it, with no gap and no repeat
    pub fn subscribe_with_current(&self) -> (CountdownState, broadcast::Receiver<CountdownState>) {
        self.publisher.snapshot()
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let TimeModel { hours, minutes, seconds } = seconds_to_time(total_seconds);

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
