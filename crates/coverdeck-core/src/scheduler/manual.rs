use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{Scheduler, TimerEvent, TimerFired, TimerHandle};

/// Scheduler driven by a simulated clock.
///
/// Nothing fires until [`ManualScheduler::advance`] moves time forward.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, handle) so equal deadlines fire in scheduling order
    queue: BTreeMap<(Duration, TimerHandle), TimerEvent>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward and return every timer that became due
    pub fn advance(&mut self, by: Duration) -> Vec<TimerFired> {
        self.now += by;

        let mut fired = Vec::new();
        while let Some((&(deadline, handle), _)) = self.queue.first_key_value() {
            if deadline > self.now {
                break;
            }
            if let Some(event) = self.queue.remove(&(deadline, handle)) {
                self.deadlines.remove(&handle);
                fired.push(TimerFired { handle, event });
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let deadline = self.now + delay;
        self.queue.insert((deadline, handle), event);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle) {
            self.queue.remove(&(deadline, handle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ItemId;

    fn due(id: &str) -> TimerEvent {
        TimerEvent::OverlayDue(ItemId::new(id))
    }

    #[test]
    fn test_fires_only_after_deadline() {
        let mut s = ManualScheduler::new();
        let h = s.schedule_after(Duration::from_millis(100), due("a"));

        assert!(s.advance(Duration::from_millis(99)).is_empty());
        let fired = s.advance(Duration::from_millis(1));
        assert_eq!(fired, vec![TimerFired { handle: h, event: due("a") }]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_fires_in_deadline_then_schedule_order() {
        let mut s = ManualScheduler::new();
        let late = s.schedule_after(Duration::from_millis(50), due("late"));
        let first = s.schedule_after(Duration::from_millis(10), due("first"));
        let second = s.schedule_after(Duration::from_millis(10), due("second"));

        let handles: Vec<_> = s
            .advance(Duration::from_millis(60))
            .into_iter()
            .map(|f| f.handle)
            .collect();
        assert_eq!(handles, vec![first, second, late]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = ManualScheduler::new();
        let h = s.schedule_after(Duration::from_millis(10), due("a"));
        s.cancel(h);
        s.cancel(h);
        s.cancel(TimerHandle::new(999));
        assert!(s.advance(Duration::from_secs(1)).is_empty());

        let h2 = s.schedule_after(Duration::from_millis(10), due("b"));
        assert_eq!(s.advance(Duration::from_millis(10)).len(), 1);
        // Cancelling after the fire is a no-op
        s.cancel(h2);
        assert_eq!(s.pending(), 0);
    }
}
