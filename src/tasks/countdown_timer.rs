//! Countdown timer background task

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{
    state::TimeModel,
    utils::{seconds_to_time, time::MILLIS_PER_SECOND},
};

/// Default interval between two ticks
pub const TICK_DURATION: Duration = Duration::from_millis(1000);

/// Receives the updates of a running countdown.
///
/// Callbacks run while the timer holds its internal lock, so they must not
/// call back into the [`CountdownTimer`] that invokes them.
pub trait CountdownListener: Send + Sync + 'static {
    /// Called on every tick with the remaining time
    fn on_tick(&self, remaining: TimeModel);

    /// Called once the countdown ran out, right after a zero tick
    fn on_finish(&self);
}

/// Book-keeping for the current run.
///
/// Every `start` and `stop` bumps `generation`; a run may only publish while
/// its own generation is still current.
#[derive(Debug, Default)]
struct Run {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Countdown controller wrapping a periodic tokio timer
#[derive(Debug)]
pub struct CountdownTimer {
    tick_interval: Duration,
    run: Arc<Mutex<Run>>,
}

impl CountdownTimer {
    /// Create a timer ticking once per second
    pub fn new() -> Self {
        Self::with_tick_interval(TICK_DURATION)
    }

    /// Create a timer with a custom tick interval (at least one millisecond)
    pub fn with_tick_interval(tick_interval: Duration) -> Self {
        Self {
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            run: Arc::new(Mutex::new(Run::default())),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Start counting down `total`, cancelling any countdown still in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<L: CountdownListener>(&self, total: Duration, listener: Arc<L>) {
        let mut run = self.run.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = run.handle.take() {
            if !handle.is_finished() {
                info!("Cancelling running countdown before starting a new one");
            }
            handle.abort();
        }

        run.generation += 1;
        let generation = run.generation;
        info!("Starting countdown of {}ms (run {})", total.as_millis(), generation);

        let shared = Arc::clone(&self.run);
        let tick_interval = self.tick_interval;
        let started = Instant::now();
        run.handle = Some(tokio::spawn(async move {
            countdown_task(shared, generation, started, total, tick_interval, listener).await;
        }));
    }

    /// Cancel the running countdown. Does nothing if none is active.
    ///
    /// Once this returns, no tick or finish of the cancelled run is published.
    pub fn stop(&self) {
        let mut run = self.run.lock().unwrap_or_else(PoisonError::into_inner);

        match run.handle.take() {
            Some(handle) if !handle.is_finished() => {
                run.generation += 1;
                handle.abort();
                info!("Countdown stopped");
            }
            _ => debug!("Stop requested without an active countdown"),
        }
    }

    /// Whether a countdown is currently in flight
    pub fn is_running(&self) -> bool {
        let run = self.run.lock().unwrap_or_else(PoisonError::into_inner);
        run.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs `publish` only if `generation` is still the current run.
/// Returns false when the run has been superseded.
fn publish_if_current<F: FnOnce()>(run: &Mutex<Run>, generation: u64, publish: F) -> bool {
    let run = run.lock().unwrap_or_else(PoisonError::into_inner);
    if run.generation != generation {
        debug!("Dropping update of cancelled run {}", generation);
        return false;
    }
    publish();
    true
}

async fn countdown_task<L: CountdownListener>(
    run: Arc<Mutex<Run>>,
    generation: u64,
    started: Instant,
    total: Duration,
    tick_interval: Duration,
    listener: Arc<L>,
) {
    let deadline = started + total;
    let mut next_tick = started;

    loop {
        // The last wait is cut short so the countdown ends on the deadline
        next_tick = (next_tick + tick_interval).min(deadline);
        sleep_until(next_tick).await;

        let now = Instant::now();
        if now >= deadline {
            publish_if_current(&run, generation, || {
                listener.on_tick(TimeModel::zero());
                listener.on_finish();
            });
            debug!("Countdown run {} finished", generation);
            break;
        }

        let remaining_millis =
            u64::try_from(deadline.saturating_duration_since(now).as_millis()).unwrap_or(u64::MAX);
        let remaining = seconds_to_time(remaining_millis / MILLIS_PER_SECOND);
        if !publish_if_current(&run, generation, || listener.on_tick(remaining)) {
            break;
        }

        // Boundaries missed by a late wakeup are skipped, not replayed
        let missed = (now - next_tick).as_nanos() / tick_interval.as_nanos();
        if missed > 0 {
            debug!("Countdown run {} woke late, skipping {} ticks", generation, missed);
            next_tick = u32::try_from(missed)
                .ok()
                .and_then(|missed| tick_interval.checked_mul(missed))
                .map_or(now, |skipped| next_tick + skipped);
        }
    }
}
