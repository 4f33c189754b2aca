//! One-shot deferred events
//!
//! Stands in for a host's "call me back in N ms" facility. Events fire in
//! due-time order; events due at the same instant fire in the order they
//! were scheduled. Nothing repeats on its own: a loop that wants another
//! tick must schedule it, and stops by simply not doing so.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Scheduled<E> {
    due_ms: u64,
    event: E,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now_ms: u64,
    pending: VecDeque<Scheduled<E>>,
    scheduled_total: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            pending: VecDeque::new(),
            scheduled_total: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock (time of the last fired event or advance)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `event` once, `delay_ms` after the current clock
    pub fn schedule(&mut self, delay_ms: u64, event: E) {
        let due_ms = self.now_ms + delay_ms;
        // Insert after everything due at or before this instant
        let pos = self
            .pending
            .iter()
            .position(|s| s.due_ms > due_ms)
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, Scheduled { due_ms, event });
        self.scheduled_total += 1;
    }

    /// Pop the next event due at or before `now_ms`, moving the clock to its
    /// due time. Returns `None` (and moves the clock to `now_ms`) once
    /// nothing else is due.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<E> {
        match self.pending.front() {
            Some(next) if next.due_ms <= now_ms => {
                let next = self.pending.pop_front()?;
                self.now_ms = self.now_ms.max(next.due_ms);
                Some(next.event)
            }
            _ => {
                self.now_ms = self.now_ms.max(now_ms);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of `schedule` calls over the queue's lifetime
    pub fn scheduled_total(&self) -> u64 {
        self.scheduled_total
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.pending.iter().map(|s| &s.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(1000, "reset");
        timers.schedule(16, "tick");
        timers.schedule(16, "tick2");

        assert_eq!(timers.pop_due(10), None);
        assert_eq!(timers.now_ms(), 10);
        assert_eq!(timers.pop_due(20), Some("tick"));
        assert_eq!(timers.now_ms(), 16);
        assert_eq!(timers.pop_due(20), Some("tick2"));
        assert_eq!(timers.pop_due(20), None);
        assert_eq!(timers.pop_due(999), None);
        assert_eq!(timers.pop_due(5000), Some("reset"));
        assert!(timers.is_empty());
        assert_eq!(timers.scheduled_total(), 3);
    }

    #[test]
    fn test_delay_is_relative_to_fire_time() {
        let mut timers = TimerQueue::new();
        timers.schedule(16, 1);
        assert_eq!(timers.pop_due(100), Some(1));
        // Scheduled from inside the callback at t=16
        timers.schedule(16, 2);
        assert_eq!(timers.pop_due(31), None);
        assert_eq!(timers.pop_due(32), Some(2));
        assert_eq!(timers.pop_due(100), None);
        assert_eq!(timers.now_ms(), 100);
    }
}
