//! Time abstraction traits for platform-agnostic scheduling.
//!
//! The scheduler only needs to read a clock, add a delay to an instant and
//! order instants. Blocking waits inside an animation go through
//! `embedded_hal::delay::DelayNs` instead.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

impl<I: TimeInstant, T: TimeSource<I> + ?Sized> TimeSource<I> for &T {
    fn now(&self) -> I {
        (**self).now()
    }
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
///
/// Instants must be totally ordered so pending work can be sorted by due time.
pub trait TimeInstant: Copy + Ord {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant, saturating at zero.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_millis(&self) -> u64 {
        u64::try_from(core::time::Duration::as_millis(self)).unwrap_or(u64::MAX)
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.saturating_duration_since(earlier)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        std::time::Instant::checked_add(&self, duration)
    }
}

/// Monotonic clock backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdClock;

#[cfg(feature = "std")]
impl TimeSource<std::time::Instant> for StdClock {
    fn now(&self) -> std::time::Instant {
        std::time::Instant::now()
    }
}
