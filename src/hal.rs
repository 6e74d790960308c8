//! Hardware and collaborator seams.
//!
//! The indicator only talks to the outside world through these traits. Delays
//! are not listed here: the renderer takes any `embedded_hal::delay::DelayNs`.

use crate::color::Channel;

/// Trait for abstracting the tri-color LED brightness hardware.
///
/// Implement this for your LED driver (PWM, LED controller, etc.). Both methods
/// are fire-and-forget: handle any hardware errors internally.
pub trait BrightnessDriver {
    /// Sets one channel to a brightness in `0..=255`.
    fn set_brightness(&mut self, channel: Channel, brightness: u8);

    /// Switches one channel off entirely.
    fn turn_off(&mut self, channel: Channel);
}

/// Source of the current battery charge estimate.
pub trait BatteryGauge {
    /// Returns the state of charge in percent. Values above 100 are treated as 100.
    fn state_of_charge(&self) -> u8;
}

/// Connection status of the active wireless pairing slot.
pub trait WirelessLink {
    /// Returns true if the active profile has an established connection.
    fn is_profile_connected(&self) -> bool;
}

impl<L: BrightnessDriver + ?Sized> BrightnessDriver for &mut L {
    fn set_brightness(&mut self, channel: Channel, brightness: u8) {
        (**self).set_brightness(channel, brightness);
    }

    fn turn_off(&mut self, channel: Channel) {
        (**self).turn_off(channel);
    }
}

impl<B: BatteryGauge + ?Sized> BatteryGauge for &B {
    fn state_of_charge(&self) -> u8 {
        (**self).state_of_charge()
    }
}

impl<W: WirelessLink + ?Sized> WirelessLink for &W {
    fn is_profile_connected(&self) -> bool {
        (**self).is_profile_connected()
    }
}
