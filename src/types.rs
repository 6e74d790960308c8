//! Core types shared between the event bridge, scheduler and worker.

/// Power and data state of the wired link, as last reported by the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiredLinkState {
    /// No cable, no power.
    #[default]
    Absent,

    /// Powered, but no host has enumerated the device.
    PoweredNoData,

    /// Powered and talking to a host.
    PoweredWithHost,

    /// Powered, host has suspended the bus.
    Suspended,
}

impl WiredLinkState {
    /// Returns true if the cable supplies power, whatever the data state.
    #[inline]
    pub fn is_powered(self) -> bool {
        !matches!(self, WiredLinkState::Absent)
    }

    /// Returns true if entering this state plays the wired link animation.
    ///
    /// A host enumerating the device follows shortly after power-up, so
    /// `PoweredWithHost` is announced by the preceding `PoweredNoData`.
    #[inline]
    pub fn is_announced(self) -> bool {
        matches!(self, WiredLinkState::PoweredNoData | WiredLinkState::Suspended)
    }
}

/// Identity of a unit of animation work.
///
/// The scheduler keeps exactly one slot per source, so a second request from
/// the same source replaces the pending one instead of queueing behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationSource {
    /// Periodic wireless connection check.
    ConnectionCheck,

    /// Wired link came up or was suspended.
    WiredLink,

    /// Battery level display.
    Battery,

    /// Active pairing slot changed.
    PairingProfile,
}

impl AnimationSource {
    /// Number of distinct sources (and scheduler slots).
    pub const COUNT: usize = 4;

    /// All sources, in slot order.
    pub const ALL: [AnimationSource; Self::COUNT] = [
        AnimationSource::ConnectionCheck,
        AnimationSource::WiredLink,
        AnimationSource::Battery,
        AnimationSource::PairingProfile,
    ];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

/// Index of an active wireless pairing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileIndex(u8);

impl ProfileIndex {
    /// Highest valid pairing slot.
    pub const MAX: u8 = 2;

    /// Creates a profile index, rejecting slots above [`ProfileIndex::MAX`].
    pub fn new(index: u8) -> Result<Self, ProfileIndexError> {
        if index > Self::MAX {
            return Err(ProfileIndexError { index });
        }
        Ok(Self(index))
    }

    /// Returns the raw slot number.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of blinks that identify this slot (one more than the index).
    #[inline]
    pub fn blink_count(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for ProfileIndex {
    type Error = ProfileIndexError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        ProfileIndex::new(index)
    }
}

/// A pairing slot outside `0..=ProfileIndex::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileIndexError {
    pub index: u8,
}

impl core::fmt::Display for ProfileIndexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "profile index {} out of range (max {})",
            self.index,
            ProfileIndex::MAX
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProfileIndexError {}

/// Returned by every notification handler.
///
/// The indicator only observes notifications, so handlers always let them
/// continue to the remaining subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Propagation {
    /// Deliver the notification to the next subscriber.
    Bubble,

    /// Stop delivery here. Part of the notification bus contract; the
    /// indicator's own handlers never capture.
    Capture,
}
