//! Fixed palette and per-channel helpers for the indicator LED.
//!
//! Colors are plain `Srgb<u8>` values: one 8-bit intensity per channel, compared
//! channel-wise. The indicator never interpolates in floating point, so there is
//! no conversion step between a color and what the driver receives.

use palette::Srgb;

/// An 8-bit-per-channel color as shown on the LED.
pub type Color = Srgb<u8>;

/// All channels dark.
pub const OFF: Color = Srgb::new(0x00, 0x00, 0x00);

/// Wired link notification.
pub const PURPLE: Color = Srgb::new(0x80, 0x00, 0x80);

/// Critical battery level.
pub const YELLOW: Color = Srgb::new(0xFF, 0xFF, 0x00);

/// Battery level.
pub const GREEN: Color = Srgb::new(0x00, 0xFF, 0x00);

/// Wireless link not established.
pub const RED: Color = Srgb::new(0xFF, 0x00, 0x00);

/// Pairing slot.
pub const BLUE: Color = Srgb::new(0x00, 0x00, 0xFF);

/// One output channel of the tri-color LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in the order the driver is written on every step.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Returns this channel's intensity in `color`.
    #[inline]
    pub fn of(self, color: Color) -> u8 {
        match self {
            Channel::Red => color.red,
            Channel::Green => color.green,
            Channel::Blue => color.blue,
        }
    }
}

/// Returns true if every channel of `color` is zero.
#[inline]
pub fn is_off(color: Color) -> bool {
    color == OFF
}

/// Linear interpolation of one channel with integer truncation.
///
/// `step == 0` yields `from` and `step == steps` yields exactly `to`. The
/// difference is truncated toward zero, so intermediate values never overshoot
/// the target in either direction.
#[inline]
pub fn lerp_channel(from: u8, to: u8, step: u16, steps: u16) -> u8 {
    if steps == 0 {
        return to;
    }
    let from = i32::from(from);
    let delta = i32::from(to) - from;
    let value = from + delta * i32::from(step) / i32::from(steps);
    value.clamp(0, 255) as u8
}

/// Interpolates all three channels, see [`lerp_channel`].
#[inline]
pub fn lerp(from: Color, to: Color, step: u16, steps: u16) -> Color {
    Srgb::new(
        lerp_channel(from.red, to.red, step, steps),
        lerp_channel(from.green, to.green, step, steps),
        lerp_channel(from.blue, to.blue, step, steps),
    )
}
