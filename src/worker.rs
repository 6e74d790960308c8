//! The animation worker: sole consumer of the scheduler and sole user of the
//! renderer.
//!
//! Run [`AnimationWorker::service`] in a loop on a dedicated low-priority
//! context. Every animation blocks that context while it plays, which is what
//! keeps two animations from ever writing to the LED at the same time.

use crate::blink::Blink;
use crate::bridge::EventBridge;
use crate::hal::{BatteryGauge, BrightnessDriver, WirelessLink};
use crate::poller::CheckOutcome;
use crate::renderer::{ColorRenderer, FadeTiming};
use crate::scheduler::Notify;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{AnimationSource, WiredLinkState};
use embedded_hal::delay::DelayNs;

/// When the worker needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// A work item just ran. Service again right away.
    Ready,

    /// Nothing is due yet. Service again after this delay, or earlier if
    /// notified of new work.
    Delay(D),

    /// Nothing is pending. Service again once notified.
    Idle,
}

/// Executes animation work items on the LED.
///
/// # Type Parameters
/// * `L` - LED driver
/// * `D` - Blocking delay used between fade steps and blink phases
/// * `B` - Battery gauge
/// * `W` - Wireless link status
pub struct AnimationWorker<L: BrightnessDriver, D: DelayNs, B: BatteryGauge, W: WirelessLink> {
    renderer: ColorRenderer<L, D>,
    battery: B,
    wireless: W,
}

impl<L, D, B, W> AnimationWorker<L, D, B, W>
where
    L: BrightnessDriver,
    D: DelayNs,
    B: BatteryGauge,
    W: WirelessLink,
{
    pub fn new(renderer: ColorRenderer<L, D>, battery: B, wireless: W) -> Self {
        Self {
            renderer,
            battery,
            wireless,
        }
    }

    /// Creates a worker whose fade timing comes from the bridge's config.
    pub fn with_config<I, T, N>(
        bridge: &EventBridge<I, T, N>,
        driver: L,
        delay: D,
        battery: B,
        wireless: W,
    ) -> Self
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        let config = bridge.config();
        let timing = FadeTiming {
            steps: config.fade_steps,
            step_delay_ms: config.fade_step_delay_ms,
        };
        Self::new(ColorRenderer::new(driver, delay, timing), battery, wireless)
    }

    /// Startup: turns the LED off and queues the first battery display.
    pub fn boot<I, T, N>(&mut self, bridge: &EventBridge<I, T, N>)
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        log::info!("status indicator starting");
        self.renderer.extinguish();
        bridge
            .scheduler()
            .submit_after_ms(AnimationSource::Battery, bridge.config().boot_delay_ms);
    }

    /// Runs at most one due work item.
    pub fn service<I, T, N>(&mut self, bridge: &EventBridge<I, T, N>) -> ServiceTiming<I::Duration>
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        let scheduler = bridge.scheduler();
        let now = scheduler.now();
        if let Some(source) = scheduler.take_due(now) {
            self.run(source, bridge);
            return ServiceTiming::Ready;
        }
        match scheduler.next_due() {
            Some(due) => ServiceTiming::Delay(due.duration_since(now)),
            None => ServiceTiming::Idle,
        }
    }

    /// Runs every item that is already due, returning the timing after the last.
    pub fn run_pending<I, T, N>(&mut self, bridge: &EventBridge<I, T, N>) -> ServiceTiming<I::Duration>
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        loop {
            match self.service(bridge) {
                ServiceTiming::Ready => continue,
                timing => return timing,
            }
        }
    }

    /// Executes one work item to completion.
    pub fn run<I, T, N>(&mut self, source: AnimationSource, bridge: &EventBridge<I, T, N>)
    where
        I: TimeInstant,
        T: TimeSource<I>,
        N: Notify,
    {
        log::debug!("running {:?}", source);
        let config = bridge.config();
        match source {
            AnimationSource::Battery => {
                let charge = self.battery.state_of_charge();
                let band = config.battery_thresholds.band(charge);
                bridge.record_shown_battery(band);
                self.play(config.battery_blink(band));
            }
            AnimationSource::PairingProfile => {
                self.play(config.pairing_blink(bridge.pairing_profile()));
            }
            AnimationSource::WiredLink => {
                let state = bridge.wired_state();
                if config.dark_when_suspended && state == WiredLinkState::Suspended {
                    self.renderer.extinguish();
                } else {
                    self.play(config.wired_blink());
                }
            }
            AnimationSource::ConnectionCheck => {
                let poller = bridge.poller();
                match bridge.check_connection(self.wireless.is_profile_connected()) {
                    CheckOutcome::Inactive => {}
                    CheckOutcome::Disarmed => {
                        // A link that dropped after the read was armed against a checking poller
                        let wired = bridge.wired_state().is_powered();
                        if !wired && !self.wireless.is_profile_connected() {
                            log::debug!("link lost during connection check");
                            poller.arm(bridge.scheduler());
                        } else {
                            log::info!("link up, connection check disarmed");
                        }
                    }
                    CheckOutcome::Retry => {
                        self.play(config.connection_blink());
                        poller.reschedule(bridge.scheduler());
                    }
                }
            }
        }
    }

    /// Returns the renderer, e.g. to inspect the displayed color.
    pub fn renderer(&self) -> &ColorRenderer<L, D> {
        &self.renderer
    }

    fn play(&mut self, blink: Blink) {
        blink.play(&mut self.renderer);
    }
}
