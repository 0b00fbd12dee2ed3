//! Background driver ticking a [`CountdownState`] once per second.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{CountdownDisplay, CountdownState};

const TICK: Duration = Duration::from_secs(1);

/// Async sleeping abstraction so tick cadence can be driven by tests.
#[async_trait]
pub trait TickSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl TickSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Mounted countdown ticking on a background task.
///
/// At most one tick is pending at any time and none is scheduled once the
/// remaining time reaches zero. Dropping the timer cancels the task.
pub struct CountdownTimer {
    input: watch::Sender<i64>,
    remaining: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Mount a countdown seeded with `time_remaining` seconds.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(time_remaining: i64, sleeper: Arc<dyn TickSleeper>) -> Self {
        let mut state = CountdownState::new(time_remaining);
        state.mount();
        let (input, mut inputs) = watch::channel(time_remaining);
        let (remaining_tx, remaining) = watch::channel(state.time_left());

        let task = tokio::spawn(async move {
            loop {
                if state.is_ticking() {
                    tokio::select! {
                        changed = inputs.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            state.reseed(*inputs.borrow_and_update());
                        }
                        () = sleeper.sleep(TICK) => {
                            state.tick();
                        }
                    }
                } else {
                    if inputs.changed().await.is_err() {
                        break;
                    }
                    state.reseed(*inputs.borrow_and_update());
                }
                remaining_tx.send_replace(state.time_left());
            }
            debug!("countdown input closed; timer finished");
        });

        Self {
            input,
            remaining,
            task,
        }
    }

    /// Reseed from a new external value. Takes effect even when the value
    /// equals the previous one.
    pub fn set_time_remaining(&self, time_remaining: i64) {
        self.input.send_replace(time_remaining);
    }

    /// Seconds left.
    pub fn time_left(&self) -> u64 {
        *self.remaining.borrow()
    }

    /// Output to render; `None` once expired.
    pub fn display(&self) -> Option<CountdownDisplay> {
        CountdownDisplay::for_remaining(self.time_left())
    }

    /// Subscribe to remaining-time updates.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.clone()
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
