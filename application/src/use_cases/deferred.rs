//! Cancellable deferred effects.
//!
//! A [`DeferredTask`] sleeps on the tokio timer and then posts an event to
//! its owner's inbox. Dropping or cancelling it before the deadline
//! suppresses the event. [`TimerSlot`] keeps at most one task armed and
//! stamps each arming with a generation, so an event that was already in
//! flight when the slot was re-armed can be recognised as stale.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A single pending timer
#[derive(Debug)]
pub struct DeferredTask {
    token: CancellationToken,
}

impl DeferredTask {
    /// Post `event` to `tx` after `delay` unless cancelled first.
    pub fn schedule<T: Send + 'static>(
        delay: Duration,
        tx: mpsc::UnboundedSender<T>,
        event: T,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the owner shut down
                    let _ = tx.send(event);
                }
            }
        });
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Holds the latest armed [`DeferredTask`] for one kind of effect
#[derive(Debug, Default)]
pub struct TimerSlot {
    task: Option<DeferredTask>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any armed task and arm a new one.
    ///
    /// `make_event` receives the new generation so the event can carry it
    /// back. Returns that generation.
    pub fn arm<T, F>(&mut self, delay: Duration, tx: &mpsc::UnboundedSender<T>, make_event: F) -> u64
    where
        T: Send + 'static,
        F: FnOnce(u64) -> T,
    {
        self.generation += 1;
        let event = make_event(self.generation);
        self.task = Some(DeferredTask::schedule(delay, tx.clone(), event));
        self.generation
    }

    /// Cancel the armed task, if any. Events already delivered become stale.
    pub fn disarm(&mut self) {
        self.generation += 1;
        self.task = None;
    }

    /// Generation of the most recent arming
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an event stamped with `generation` is still wanted
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && self.generation == generation
    }

    /// Mark the current event as handled
    pub fn complete(&mut self, generation: u64) {
        if self.generation == generation {
            self.task = None;
        }
    }
}
