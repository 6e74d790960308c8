//! Fading color renderer.
//!
//! [`ColorRenderer`] owns the LED driver and the only copy of the displayed
//! color. Every transition is a fixed number of linear steps, each written to
//! all three channels and followed by a blocking delay.

use crate::color::{self, Channel, Color, OFF};
use crate::hal::BrightnessDriver;
use embedded_hal::delay::DelayNs;

/// Step count and per-step delay of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeTiming {
    /// Number of interpolation steps. A fade writes `steps + 1` frames.
    pub steps: u16,
    /// Delay after every frame, in milliseconds.
    pub step_delay_ms: u32,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            steps: 100,
            step_delay_ms: 2,
        }
    }
}

/// Drives a tri-color LED with smooth fades.
///
/// Must only be used from one execution context; the displayed color is
/// tracked here and nowhere else.
pub struct ColorRenderer<L: BrightnessDriver, D: DelayNs> {
    driver: L,
    delay: D,
    timing: FadeTiming,
    current: Color,
}

impl<L: BrightnessDriver, D: DelayNs> ColorRenderer<L, D> {
    /// Creates a renderer that assumes the LED starts dark.
    ///
    /// A `timing.steps` of zero is treated as a single step.
    pub fn new(driver: L, delay: D, timing: FadeTiming) -> Self {
        Self {
            driver,
            delay,
            timing: FadeTiming {
                steps: timing.steps.max(1),
                ..timing
            },
            current: OFF,
        }
    }

    /// Fades from the displayed color to `target`.
    ///
    /// Returns without touching the hardware if `target` is already shown.
    pub fn render(&mut self, target: Color) {
        if target == self.current {
            return;
        }
        self.fade_to(target);
    }

    /// Fades the displayed color down to off.
    ///
    /// If the LED is already dark, every channel is switched off directly
    /// without a fade.
    pub fn extinguish(&mut self) {
        if color::is_off(self.current) {
            for channel in Channel::ALL {
                self.driver.turn_off(channel);
            }
            return;
        }
        self.fade_to(OFF);
    }

    /// Returns the color currently displayed.
    pub fn current(&self) -> Color {
        self.current
    }

    /// Returns the fade timing in use.
    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    /// Suspends the calling context.
    pub fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Returns a reference to the LED driver.
    pub fn driver(&self) -> &L {
        &self.driver
    }

    /// Consumes the renderer, returning the driver and delay.
    pub fn release(self) -> (L, D) {
        (self.driver, self.delay)
    }

    fn fade_to(&mut self, target: Color) {
        let start = self.current;
        let steps = self.timing.steps;
        for step in 0..=steps {
            let frame = color::lerp(start, target, step, steps);
            self.current = frame;
            self.write(frame);
            self.delay.delay_ms(self.timing.step_delay_ms);
        }
        // lerp lands exactly on target at step == steps
        self.current = target;
    }

    fn write(&mut self, frame: Color) {
        for channel in Channel::ALL {
            self.driver.set_brightness(channel, channel.of(frame));
        }
    }
}
