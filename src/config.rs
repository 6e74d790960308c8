//! Timing, color and threshold configuration.
//!
//! [`IndicatorConfig::default`] reproduces the stock firmware behavior. All
//! setters consume and return the config so it can be built in one expression,
//! then checked once with [`IndicatorConfig::validate`], which
//! [`EventBridge::new`](crate::bridge::EventBridge::new) runs for you.

use crate::blink::Blink;
use crate::color::{self, Color};
use crate::types::ProfileIndex;

/// Charge level bands, each bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryThresholds {
    /// At or below this the battery is critical.
    pub critical: u8,
    /// At or below this the battery is low.
    pub low: u8,
    /// At or below this the battery is half full.
    pub medium: u8,
}

impl Default for BatteryThresholds {
    fn default() -> Self {
        Self {
            critical: 15,
            low: 30,
            medium: 70,
        }
    }
}

/// Which band a charge percentage falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryBand {
    Critical,
    Low,
    Medium,
    High,
}

impl BatteryThresholds {
    /// Classifies a charge percentage. Values above 100 count as 100.
    pub fn band(&self, charge: u8) -> BatteryBand {
        let charge = charge.min(100);
        if charge <= self.critical {
            BatteryBand::Critical
        } else if charge <= self.low {
            BatteryBand::Low
        } else if charge <= self.medium {
            BatteryBand::Medium
        } else {
            BatteryBand::High
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A fade needs at least one step.
    ZeroFadeSteps,

    /// Battery thresholds must not decrease from critical to medium.
    UnorderedBatteryThresholds,

    /// The connection check would reschedule itself immediately.
    ZeroPollInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFadeSteps => write!(f, "fade step count must be at least 1"),
            ConfigError::UnorderedBatteryThresholds => {
                write!(f, "battery thresholds must satisfy critical <= low <= medium")
            }
            ConfigError::ZeroPollInterval => {
                write!(f, "connection poll interval must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// All tunables of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    pub fade_steps: u16,
    pub fade_step_delay_ms: u32,
    pub pairing_delay_ms: u32,
    pub battery_delay_ms: u32,
    pub connection_delay_ms: u32,
    pub wired_delay_ms: u32,
    pub connection_blinks: u8,
    pub wired_blinks: u8,
    pub battery_thresholds: BatteryThresholds,
    /// Interval between connection checks while the poller is armed.
    pub poll_interval_ms: u32,
    /// Delay between boot and the first battery display.
    pub boot_delay_ms: u32,
    /// Extinguish instead of blinking when the wired link is suspended.
    pub dark_when_suspended: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fade_steps: 100,
            fade_step_delay_ms: 2,
            pairing_delay_ms: 500,
            battery_delay_ms: 400,
            connection_delay_ms: 400,
            wired_delay_ms: 200,
            connection_blinks: 3,
            wired_blinks: 3,
            battery_thresholds: BatteryThresholds::default(),
            poll_interval_ms: 4000,
            boot_delay_ms: 1000,
            dark_when_suspended: true,
        }
    }
}

impl IndicatorConfig {
    pub fn with_fade(mut self, steps: u16, step_delay_ms: u32) -> Self {
        self.fade_steps = steps;
        self.fade_step_delay_ms = step_delay_ms;
        self
    }

    pub fn with_poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    pub fn with_boot_delay_ms(mut self, delay_ms: u32) -> Self {
        self.boot_delay_ms = delay_ms;
        self
    }

    pub fn with_battery_thresholds(mut self, thresholds: BatteryThresholds) -> Self {
        self.battery_thresholds = thresholds;
        self
    }

    pub fn with_dark_when_suspended(mut self, dark: bool) -> Self {
        self.dark_when_suspended = dark;
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_steps == 0 {
            return Err(ConfigError::ZeroFadeSteps);
        }
        let t = &self.battery_thresholds;
        if t.critical > t.low || t.low > t.medium {
            return Err(ConfigError::UnorderedBatteryThresholds);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Blink announcing the given pairing slot.
    pub fn pairing_blink(&self, profile: ProfileIndex) -> Blink {
        Blink::new(color::BLUE, self.pairing_delay_ms, profile.blink_count())
    }

    /// Warning blink played on each failed connection check.
    pub fn connection_blink(&self) -> Blink {
        Blink::new(color::RED, self.connection_delay_ms, self.connection_blinks)
    }

    /// Blink announcing a powered wired link.
    pub fn wired_blink(&self) -> Blink {
        Blink::new(color::PURPLE, self.wired_delay_ms, self.wired_blinks)
    }

    /// Blink for a battery band.
    pub fn battery_blink(&self, band: BatteryBand) -> Blink {
        let (color, count): (Color, u8) = match band {
            BatteryBand::Critical => (color::YELLOW, 3),
            BatteryBand::Low => (color::GREEN, 1),
            BatteryBand::Medium => (color::GREEN, 2),
            BatteryBand::High => (color::GREEN, 3),
        };
        Blink::new(color, self.battery_delay_ms, count)
    }
}
