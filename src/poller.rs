//! Connection-health poller.
//!
//! Once armed, the poller runs a connection check every poll interval as a
//! [`AnimationSource::ConnectionCheck`] work item. Each check either sees the
//! wireless profile connected (or a wired link powered) and disarms, or plays a
//! warning blink and reschedules. There is no retry cap: the check repeats
//! until one of the stop conditions holds.

use crate::scheduler::{AnimationScheduler, Notify};
use crate::time::{TimeInstant, TimeSource};
use crate::types::AnimationSource;
use core::cell::Cell;
use critical_section::{CriticalSection, Mutex};

/// Whether the poller is checking the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollerState {
    #[default]
    Idle,
    Checking,
}

/// Result of one connection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CheckOutcome {
    /// The poller was not armed; nothing to do.
    Inactive,

    /// A link is up; the poller went back to idle.
    Disarmed,

    /// Still no link; warn and check again.
    Retry,
}

/// Idle/checking state machine driving the periodic connection check.
pub struct ConnectionPoller {
    state: Mutex<Cell<PollerState>>,
    interval_ms: u32,
}

impl ConnectionPoller {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            state: Mutex::new(Cell::new(PollerState::Idle)),
            interval_ms,
        }
    }

    pub fn state(&self) -> PollerState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    pub fn is_checking(&self) -> bool {
        self.state() == PollerState::Checking
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Starts checking, first check one interval from now.
    ///
    /// Does nothing if already checking with a check queued. A checking
    /// poller whose check was cancelled gets a fresh one. Returns true if this
    /// call queued a check.
    pub fn arm<I, T, N>(&self, scheduler: &AnimationScheduler<I, T, N>) -> bool
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        let was = critical_section::with(|cs| self.state.borrow(cs).replace(PollerState::Checking));
        match was {
            PollerState::Idle => {
                log::info!("connection check armed, every {} ms", self.interval_ms);
            }
            PollerState::Checking if !scheduler.is_pending(AnimationSource::ConnectionCheck) => {
                log::debug!("connection check armed but not queued, requeueing");
            }
            PollerState::Checking => return false,
        }
        scheduler.submit_after_ms(AnimationSource::ConnectionCheck, self.interval_ms);
        true
    }

    /// Evaluates one check cycle against the current link status.
    ///
    /// The caller plays the warning and calls [`ConnectionPoller::reschedule`]
    /// on [`CheckOutcome::Retry`].
    pub fn check(&self, wireless_connected: bool, wired_present: bool) -> CheckOutcome {
        critical_section::with(|cs| self.check_in(cs, wireless_connected, wired_present))
    }

    /// Same as [`ConnectionPoller::check`], inside a critical section the
    /// caller already holds, so the inputs can be read under the same lock.
    pub fn check_in(
        &self,
        cs: CriticalSection<'_>,
        wireless_connected: bool,
        wired_present: bool,
    ) -> CheckOutcome {
        let state = self.state.borrow(cs);
        match state.get() {
            PollerState::Idle => CheckOutcome::Inactive,
            PollerState::Checking if wireless_connected || wired_present => {
                state.set(PollerState::Idle);
                CheckOutcome::Disarmed
            }
            PollerState::Checking => CheckOutcome::Retry,
        }
    }

    /// Queues the next check cycle.
    pub fn reschedule<I, T, N>(&self, scheduler: &AnimationScheduler<I, T, N>)
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        scheduler.submit_after_ms(AnimationSource::ConnectionCheck, self.interval_ms);
    }
}
