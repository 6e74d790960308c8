//! Repeated on/off notifications built on the renderer's fades.

use crate::color::Color;
use crate::hal::BrightnessDriver;
use crate::renderer::ColorRenderer;
use embedded_hal::delay::DelayNs;

/// One visible notification: `count` fade-in/fade-out cycles of `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub color: Color,
    /// Hold time after fading in and again after fading out.
    pub delay_ms: u32,
    pub count: u8,
}

impl Blink {
    #[inline]
    pub const fn new(color: Color, delay_ms: u32, count: u8) -> Self {
        Self {
            color,
            delay_ms,
            count,
        }
    }

    /// Plays the blink to completion.
    ///
    /// Blocks for at least `count * 2 * delay_ms` plus fade time, so this must
    /// only run on the animation worker.
    pub fn play<L: BrightnessDriver, D: DelayNs>(&self, renderer: &mut ColorRenderer<L, D>) {
        for _ in 0..self.count {
            renderer.render(self.color);
            renderer.pause_ms(self.delay_ms);
            renderer.extinguish();
            renderer.pause_ms(self.delay_ms);
        }
    }
}
