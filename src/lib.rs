#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! Status indicator for a battery-and-radio-powered device with a single RGB LED.
//!
//! # Core Concepts
//!
//! - **`ColorRenderer`**: Fades the LED between colors in fixed integer steps
//! - **`Blink`**: Repeated fade-in/fade-out cycles, the unit of one notification
//! - **`AnimationScheduler`**: One pending slot per `AnimationSource`; resubmitting coalesces
//! - **`ConnectionPoller`**: Periodic wireless connection check, armed on link loss
//! - **`EventBridge`**: Non-blocking notification handlers (`StatusListener`)
//! - **`AnimationWorker`**: The single consumer that plays animations on the LED
//! - **`BrightnessDriver`**, **`BatteryGauge`**, **`WirelessLink`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Notification handlers only record state and submit work, so they are safe to
//! call from event-delivery contexts. Everything that touches the LED runs on the
//! worker, one item at a time. With the `std` feature, [`thread::spawn`] provides
//! that worker as a dedicated thread.
//!
//! ```ignore
//! let bridge = Arc::new(EventBridge::new(IndicatorConfig::default(), StdClock, Wakeup::new())?);
//! let worker = AnimationWorker::with_config(&bridge, led, ThreadDelay, gauge, radio);
//! let handle = thread::spawn(worker, Arc::clone(&bridge))?;
//!
//! bridge.on_profile_changed(1); // two blue blinks
//! ```

pub use palette::Srgb;

pub mod blink;
pub mod bridge;
pub mod color;
pub mod config;
pub mod hal;
pub mod poller;
pub mod renderer;
pub mod scheduler;
#[cfg(feature = "std")]
pub mod thread;
pub mod time;
pub mod types;
pub mod worker;

pub use blink::Blink;
pub use bridge::{EventBridge, StatusEvent, StatusListener};
pub use color::{BLUE, Channel, Color, GREEN, OFF, PURPLE, RED, YELLOW};
pub use config::{BatteryBand, BatteryThresholds, ConfigError, IndicatorConfig};
pub use hal::{BatteryGauge, BrightnessDriver, WirelessLink};
pub use poller::{CheckOutcome, ConnectionPoller, PollerState};
pub use renderer::{ColorRenderer, FadeTiming};
pub use scheduler::{AnimationScheduler, Notify, WorkQueue};
pub use time::{TimeDuration, TimeInstant, TimeSource};
#[cfg(feature = "std")]
pub use time::StdClock;
pub use types::{AnimationSource, ProfileIndex, ProfileIndexError, Propagation, WiredLinkState};
pub use worker::{AnimationWorker, ServiceTiming};
