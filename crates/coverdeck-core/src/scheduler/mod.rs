//! Deferred, cancelable callbacks for the reveal state machine.
//!
//! The core never sleeps. It asks a [`Scheduler`] to deliver a [`TimerEvent`]
//! later and keeps the returned [`TimerHandle`]; the host feeds fired events
//! back through `Carousel::on_timer`. Two implementations exist:
//! [`ManualScheduler`] (simulated clock, used by tests) and
//! [`TokioScheduler`] (real timers on the tokio runtime).

mod manual;
mod runtime;

use std::time::Duration;

use crate::deck::ItemId;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// Identifies one scheduled timer. Never reused by the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a timer means once it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The overlay delay for this card has elapsed
    OverlayDue(ItemId),
}

/// A timer that reached its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub event: TimerEvent,
}

pub trait Scheduler {
    /// Deliver `event` after `delay`
    fn schedule_after(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Cancel a pending timer. No-op if it already fired, was already
    /// cancelled, or was never issued by this scheduler.
    fn cancel(&mut self, handle: TimerHandle);
}
