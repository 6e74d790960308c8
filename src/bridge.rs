//! Notification handlers feeding the animation scheduler.
//!
//! [`EventBridge`] is the state shared between notification contexts and the
//! animation worker. Its handlers only record the notification payload and
//! submit work; none of them touch the LED or block.

use crate::config::{BatteryBand, ConfigError, IndicatorConfig};
use crate::poller::{CheckOutcome, ConnectionPoller};
use crate::scheduler::{AnimationScheduler, Notify};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{AnimationSource, ProfileIndex, Propagation, WiredLinkState};
use core::cell::Cell;
use critical_section::Mutex;

/// A state-change notification the indicator subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// The active wireless pairing slot changed. The index is unchecked.
    ProfileChanged { index: u8 },

    /// The wired link changed power or data state.
    WiredLinkChanged { state: WiredLinkState },

    /// The battery charge estimate changed, in percent.
    BatteryChanged { charge: u8 },
}

/// One handler per notification topic.
///
/// Handlers may be called from any notification-delivery context and must
/// return quickly.
pub trait StatusListener {
    fn on_profile_changed(&self, index: u8) -> Propagation;

    fn on_wired_link_changed(&self, state: WiredLinkState) -> Propagation;

    fn on_battery_changed(&self, charge: u8) -> Propagation;

    /// Dispatches a typed event to the matching handler.
    fn handle_event(&self, event: StatusEvent) -> Propagation {
        match event {
            StatusEvent::ProfileChanged { index } => self.on_profile_changed(index),
            StatusEvent::WiredLinkChanged { state } => self.on_wired_link_changed(state),
            StatusEvent::BatteryChanged { charge } => self.on_battery_changed(charge),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LinkState {
    wired: WiredLinkState,
    profile: ProfileIndex,
    shown_battery: Option<BatteryBand>,
}

/// Shared indicator context: scheduler, poller and the latest link state.
///
/// Share it by reference (or `Arc` under `std`) between every notification
/// context and the single [`AnimationWorker`](crate::worker::AnimationWorker).
pub struct EventBridge<I: TimeInstant, T: TimeSource<I>, N: Notify = ()> {
    scheduler: AnimationScheduler<I, T, N>,
    poller: ConnectionPoller,
    links: Mutex<Cell<LinkState>>,
    config: IndicatorConfig,
}

impl<I: TimeInstant, T: TimeSource<I>, N: Notify> EventBridge<I, T, N> {
    /// Creates the bridge after validating `config`.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found by [`IndicatorConfig::validate`].
    pub fn new(config: IndicatorConfig, clock: T, notifier: N) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scheduler: AnimationScheduler::new(clock, notifier),
            poller: ConnectionPoller::new(config.poll_interval_ms),
            links: Mutex::new(Cell::new(LinkState {
                wired: WiredLinkState::Absent,
                profile: ProfileIndex::default(),
                shown_battery: None,
            })),
            config,
        })
    }

    /// Queues the battery animation to run as soon as the worker is free.
    pub fn show_battery(&self) {
        self.scheduler.submit(AnimationSource::Battery, I::Duration::ZERO);
    }

    /// Hook for suppressing the battery animation. Currently leaves the
    /// display untouched.
    pub fn hide_battery(&self) {}

    /// Last reported wired link state.
    pub fn wired_state(&self) -> WiredLinkState {
        self.links().wired
    }

    /// Pairing slot whose blink the next pairing animation shows.
    pub fn pairing_profile(&self) -> ProfileIndex {
        self.links().profile
    }

    /// Battery band displayed most recently, if any.
    pub fn shown_battery(&self) -> Option<BatteryBand> {
        self.links().shown_battery
    }

    /// Runs one poller cycle. The wired link is read under the same lock as
    /// the poller transition, so an unplug can't slip in between.
    pub fn check_connection(&self, wireless_connected: bool) -> CheckOutcome {
        critical_section::with(|cs| {
            let wired = self.links.borrow(cs).get().wired.is_powered();
            self.poller.check_in(cs, wireless_connected, wired)
        })
    }

    pub(crate) fn record_shown_battery(&self, band: BatteryBand) {
        self.update_links(|links| links.shown_battery = Some(band));
    }

    pub fn scheduler(&self) -> &AnimationScheduler<I, T, N> {
        &self.scheduler
    }

    pub fn poller(&self) -> &ConnectionPoller {
        &self.poller
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    fn links(&self) -> LinkState {
        critical_section::with(|cs| self.links.borrow(cs).get())
    }

    fn update_links(&self, f: impl FnOnce(&mut LinkState)) {
        critical_section::with(|cs| {
            let cell = self.links.borrow(cs);
            let mut links = cell.get();
            f(&mut links);
            cell.set(links);
        });
    }
}

impl<I: TimeInstant, T: TimeSource<I>, N: Notify> StatusListener for EventBridge<I, T, N> {
    fn on_profile_changed(&self, index: u8) -> Propagation {
        let profile = match ProfileIndex::new(index) {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("ignoring profile change: {}", err);
                return Propagation::Bubble;
            }
        };
        log::debug!("profile changed to {}", profile.get());

        self.update_links(|links| links.profile = profile);
        self.scheduler
            .submit(AnimationSource::PairingProfile, I::Duration::ZERO);
        self.poller.arm(&self.scheduler);
        Propagation::Bubble
    }

    fn on_wired_link_changed(&self, state: WiredLinkState) -> Propagation {
        log::debug!("wired link changed to {:?}", state);

        self.update_links(|links| links.wired = state);
        if state.is_announced() {
            self.scheduler
                .submit(AnimationSource::WiredLink, I::Duration::ZERO);
        } else {
            // Absent keeps warning, a host link disarms on the first check
            self.poller.arm(&self.scheduler);
        }
        Propagation::Bubble
    }

    fn on_battery_changed(&self, charge: u8) -> Propagation {
        let band = self.config.battery_thresholds.band(charge);
        log::debug!("battery changed to {}% ({:?})", charge, band);

        if self.shown_battery() != Some(band) {
            self.show_battery();
        }
        Propagation::Bubble
    }
}
