//! Timer system for Horizon Swiper.
//!
//! Provides one-shot and repeating timers on a virtual timeline. Times are
//! expressed as the `Duration` elapsed since the engine started (see
//! [`FrameClock`](crate::FrameClock)), so firing is fully determined by how
//! far the host has advanced the clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Duration,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    /// Insertion order, so timers due at the same instant fire in start order.
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages a set of timers on a virtual timeline.
#[derive(Debug)]
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
    /// Next queue sequence number.
    next_seq: u64,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Start a one-shot timer that fires `delay` after `now`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, now: Duration, delay: Duration) -> TimerId {
        self.insert(now + delay, delay, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires every `interval` starting from `now`.
    ///
    /// The first fire occurs at `now + interval`. A zero interval is treated
    /// as one millisecond so a repeating timer can never fire endlessly
    /// within a single step.
    pub fn start_repeating(&mut self, now: Duration, interval: Duration) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.insert(now + interval, interval, TimerKind::Repeating)
    }

    fn insert(&mut self, next_fire: Duration, interval: Duration, kind: TimerKind) -> TimerId {
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.push_entry(id, next_fire);
        tracing::trace!(target: "horizon_swiper_core::timer", ?id, ?kind, ?next_fire, "timer started");
        id
    }

    fn push_entry(&mut self, id: TimerId, fire_time: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(TimerQueueEntry { id, fire_time, seq });
    }

    /// Stop and remove a timer.
    ///
    /// Returns `Ok(())` if the timer was found and removed, or an error if not found.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: "horizon_swiper_core::timer", ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId)
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration from `now` until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self, now: Duration) -> Option<Duration> {
        self.discard_stale_entries();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_sub(now))
    }

    /// Process all timers due at or before `now`.
    ///
    /// Returns the IDs of fired timers in firing order. A repeating timer that
    /// fell behind by several intervals appears once per elapsed interval.
    #[tracing::instrument(skip(self), target = "horizon_swiper_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            let id = entry.id;
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            // A stale entry left behind by a restarted schedule.
            if timer.next_fire != entry.fire_time {
                continue;
            }

            tracing::trace!(target: "horizon_swiper_core::timer", ?id, fire_time = ?entry.fire_time, "timer fired");
            fired.push(id);

            let kind = timer.kind;
            match kind {
                TimerKind::OneShot => {
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    let next = entry.fire_time + timer.interval;
                    timer.next_fire = next;
                    self.push_entry(id, next);
                }
            }
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Drop queue entries whose timers were stopped.
    fn discard_stale_entries(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(ms(0), ms(100));

        assert!(timers.process_expired(ms(99)).is_empty());
        assert_eq!(timers.process_expired(ms(100)), vec![id]);
        assert!(!timers.is_active(id));
        assert!(timers.process_expired(ms(500)).is_empty());
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), ms(1000));

        assert_eq!(timers.process_expired(ms(1000)), vec![id]);
        assert_eq!(timers.process_expired(ms(2000)), vec![id]);
        assert_eq!(timers.process_expired(ms(2500)), Vec::<TimerId>::new());
        assert!(timers.is_active(id));
    }

    #[test]
    fn test_repeating_catches_up_after_long_step() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), ms(100));

        assert_eq!(timers.process_expired(ms(350)), vec![id, id, id]);
        assert_eq!(timers.time_until_next(ms(350)), Some(ms(50)));
    }

    #[test]
    fn test_stop_timer() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), ms(100));

        assert!(timers.stop(id).is_ok());
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert!(timers.process_expired(ms(1000)).is_empty());
        assert_eq!(timers.time_until_next(ms(1000)), None);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_same_deadline_fires_in_start_order() {
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot(ms(0), ms(50));
        let second = timers.start_one_shot(ms(0), ms(50));

        assert_eq!(timers.process_expired(ms(50)), vec![first, second]);
    }

    #[test]
    fn test_zero_interval_is_bounded() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(ms(0), Duration::ZERO);

        assert_eq!(timers.process_expired(ms(3)), vec![id, id, id]);
    }
}
