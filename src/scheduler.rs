//! Single-consumer animation work queue.
//!
//! Producers (notification handlers, the poller) call
//! [`AnimationScheduler::submit`] from any context; it only records a due time
//! in a fixed table and returns. The animation worker is the single consumer
//! and takes due items one at a time with [`AnimationScheduler::take_due`].
//!
//! There is one slot per [`AnimationSource`]. Submitting a source that is
//! already pending replaces its schedule, so a burst of notifications from one
//! source results in a single execution.

use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::AnimationSource;
use core::cell::RefCell;
use critical_section::Mutex;
use heapless::Vec;

/// Wakes the consumer after new work has been submitted.
pub trait Notify {
    /// Called after every submission. Must not block.
    fn notify(&self);
}

/// No-op notifier for consumers that poll on their own schedule.
impl Notify for () {
    fn notify(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot<I> {
    due: I,
    sequence: u32,
}

/// Fixed-size table of pending work, one slot per source.
///
/// Not synchronized on its own; [`AnimationScheduler`] wraps it in a
/// critical-section mutex.
#[derive(Debug, Clone)]
pub struct WorkQueue<I: TimeInstant> {
    slots: [Option<Slot<I>>; AnimationSource::COUNT],
    next_sequence: u32,
}

impl<I: TimeInstant> Default for WorkQueue<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> WorkQueue<I> {
    pub const fn new() -> Self {
        Self {
            slots: [None; AnimationSource::COUNT],
            next_sequence: 0,
        }
    }

    /// Schedules `source` at `due`, replacing any pending schedule.
    ///
    /// Returns true if a pending schedule was replaced.
    pub fn schedule(&mut self, source: AnimationSource, due: I) -> bool {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.slots[source.slot()]
            .replace(Slot { due, sequence })
            .is_some()
    }

    /// Drops the pending schedule of `source`. Returns true if one existed.
    pub fn cancel(&mut self, source: AnimationSource) -> bool {
        self.slots[source.slot()].take().is_some()
    }

    pub fn is_pending(&self, source: AnimationSource) -> bool {
        self.slots[source.slot()].is_some()
    }

    /// Removes and returns the earliest item that is due at `now`.
    ///
    /// Items due at the same instant run in submission order.
    pub fn take_due(&mut self, now: I) -> Option<AnimationSource> {
        let source = self
            .ordered()
            .into_iter()
            .next()
            .filter(|source| self.slots[source.slot()].is_some_and(|slot| slot.due <= now))?;
        self.slots[source.slot()] = None;
        Some(source)
    }

    /// Earliest due instant among pending items.
    pub fn next_due(&self) -> Option<I> {
        self.slots.iter().flatten().map(|slot| slot.due).min()
    }

    /// Pending sources in the order they would execute.
    pub fn ordered(&self) -> Vec<AnimationSource, { AnimationSource::COUNT }> {
        let mut pending: Vec<(Slot<I>, AnimationSource), { AnimationSource::COUNT }> = Vec::new();
        for source in AnimationSource::ALL {
            if let Some(slot) = self.slots[source.slot()] {
                // capacity equals the slot count
                let _ = pending.push((slot, source));
            }
        }
        pending.sort_unstable_by(|(a, _), (b, _)| {
            a.due.cmp(&b.due).then_with(|| {
                // wrapping comparison keeps order across sequence overflow
                (a.sequence.wrapping_sub(b.sequence) as i32).cmp(&0)
            })
        });
        pending.iter().map(|&(_, source)| source).collect()
    }
}

/// Thread- and interrupt-safe front end of the [`WorkQueue`].
pub struct AnimationScheduler<I: TimeInstant, T: TimeSource<I>, N: Notify = ()> {
    queue: Mutex<RefCell<WorkQueue<I>>>,
    clock: T,
    notifier: N,
}

impl<I: TimeInstant, T: TimeSource<I>, N: Notify> AnimationScheduler<I, T, N> {
    pub fn new(clock: T, notifier: N) -> Self {
        Self {
            queue: Mutex::new(RefCell::new(WorkQueue::new())),
            clock,
            notifier,
        }
    }

    /// Schedules `source` to run once `delay` has elapsed.
    ///
    /// Never blocks beyond a short critical section. A still-pending request
    /// from the same source is replaced; an already running one is unaffected.
    pub fn submit(&self, source: AnimationSource, delay: I::Duration) {
        let now = self.clock.now();
        let due = now.checked_add(delay).unwrap_or(now);
        let replaced =
            critical_section::with(|cs| self.queue.borrow_ref_mut(cs).schedule(source, due));
        if replaced {
            log::trace!("coalesced pending {:?}", source);
        }
        self.notifier.notify();
    }

    /// Schedules `source` after `delay_ms` milliseconds.
    pub fn submit_after_ms(&self, source: AnimationSource, delay_ms: u32) {
        self.submit(source, I::Duration::from_millis(u64::from(delay_ms)));
    }

    /// Drops a not-yet-run request for `source`.
    ///
    /// Cancelling [`AnimationSource::ConnectionCheck`] leaves an armed
    /// [`ConnectionPoller`](crate::poller::ConnectionPoller) armed; its next
    /// `arm` call queues the check again.
    pub fn cancel(&self, source: AnimationSource) -> bool {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).cancel(source))
    }

    pub fn is_pending(&self, source: AnimationSource) -> bool {
        critical_section::with(|cs| self.queue.borrow_ref(cs).is_pending(source))
    }

    /// Removes and returns the next item due at `now`.
    pub fn take_due(&self, now: I) -> Option<AnimationSource> {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).take_due(now))
    }

    /// Earliest due instant among pending items.
    pub fn next_due(&self) -> Option<I> {
        critical_section::with(|cs| self.queue.borrow_ref(cs).next_due())
    }

    /// Pending sources in execution order.
    pub fn pending(&self) -> Vec<AnimationSource, { AnimationSource::COUNT }> {
        critical_section::with(|cs| self.queue.borrow_ref(cs).ordered())
    }

    /// Reads the scheduler's clock.
    pub fn now(&self) -> I {
        self.clock.now()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
