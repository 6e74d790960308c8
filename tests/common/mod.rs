//! Shared test infrastructure for rgb-status-indicator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use rgb_status_indicator::{
    AnimationWorker, BatteryGauge, BrightnessDriver, Channel, Color, EventBridge,
    IndicatorConfig, OFF, Srgb, TimeDuration, TimeInstant, TimeSource, WirelessLink,
};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

/// Mock clock with controllable time advancement
pub struct MockClock {
    current_time: Cell<TestInstant>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockClock {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Recording LED and delay
// ============================================================================

/// One observable effect on the hardware or the worker context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Set(Channel, u8),
    Off(Channel),
    Delay(u32),
}

/// Shared, ordered log of LED writes and delays.
#[derive(Debug, Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<Op>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, op: Op) {
        self.0.lock().unwrap().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }

    /// Colors written, one per red/green/blue triple.
    pub fn frames(&self) -> Vec<Color> {
        let sets: Vec<(Channel, u8)> = self
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Set(channel, value) => Some((channel, value)),
                _ => None,
            })
            .collect();
        sets.chunks(3)
            .map(|chunk| {
                assert_eq!(chunk.len(), 3, "incomplete frame");
                assert_eq!(chunk[0].0, Channel::Red);
                assert_eq!(chunk[1].0, Channel::Green);
                assert_eq!(chunk[2].0, Channel::Blue);
                Srgb::new(chunk[0].1, chunk[1].1, chunk[2].1)
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Delay(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    pub fn count_delays(&self, ms: u32) -> usize {
        self.delays().into_iter().filter(|&d| d == ms).count()
    }

    pub fn offs(&self) -> usize {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, Op::Off(_)))
            .count()
    }

    /// Color held during each delay longer than a fade step.
    pub fn holds(&self, fade_delay_ms: u32) -> Vec<Color> {
        let mut shown = OFF;
        let mut pending = Vec::new();
        let mut holds = Vec::new();
        for op in self.ops() {
            match op {
                Op::Set(channel, value) => {
                    pending.push(value);
                    if channel == Channel::Blue && pending.len() == 3 {
                        shown = Srgb::new(pending[0], pending[1], pending[2]);
                        pending.clear();
                    }
                }
                Op::Off(_) => shown = OFF,
                Op::Delay(ms) if ms != fade_delay_ms => holds.push(shown),
                Op::Delay(_) => {}
            }
        }
        holds
    }

    /// Lit colors held between fades, i.e. the visible blinks.
    pub fn blinks(&self, fade_delay_ms: u32) -> Vec<Color> {
        self.holds(fade_delay_ms)
            .into_iter()
            .filter(|&color| color != OFF)
            .collect()
    }
}

/// LED that records every channel write
pub struct MockLed {
    trace: Trace,
}

impl MockLed {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl BrightnessDriver for MockLed {
    fn set_brightness(&mut self, channel: Channel, brightness: u8) {
        self.trace.push(Op::Set(channel, brightness));
    }

    fn turn_off(&mut self, channel: Channel) {
        self.trace.push(Op::Off(channel));
    }
}

/// Delay that records instead of sleeping
pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Op::Delay(ms));
    }
}

// ============================================================================
// Fake collaborators
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeBattery(Arc<AtomicU8>);

impl FakeBattery {
    pub fn new(charge: u8) -> Self {
        Self(Arc::new(AtomicU8::new(charge)))
    }

    pub fn set(&self, charge: u8) {
        self.0.store(charge, Ordering::SeqCst);
    }
}

impl BatteryGauge for FakeBattery {
    fn state_of_charge(&self) -> u8 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRadio(Arc<AtomicBool>);

impl FakeRadio {
    pub fn new(connected: bool) -> Self {
        Self(Arc::new(AtomicBool::new(connected)))
    }

    pub fn set_connected(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }
}

impl WirelessLink for FakeRadio {
    fn is_profile_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Radio whose answer comes from a closure, called with the 0-based read
/// number. Lets a test deliver notifications in the middle of a check.
pub struct ScriptedRadio<F: Fn(usize) -> bool> {
    reads: Cell<usize>,
    script: F,
}

impl<F: Fn(usize) -> bool> ScriptedRadio<F> {
    pub fn new(script: F) -> Self {
        Self {
            reads: Cell::new(0),
            script,
        }
    }
}

impl<F: Fn(usize) -> bool> WirelessLink for ScriptedRadio<F> {
    fn is_profile_connected(&self) -> bool {
        let read = self.reads.get();
        self.reads.set(read + 1);
        (self.script)(read)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub type TestBridge<'c> = EventBridge<TestInstant, &'c MockClock>;
pub type TestWorker = AnimationWorker<MockLed, MockDelay, FakeBattery, FakeRadio>;

/// Default timing with short fades so traces stay small.
pub fn test_config() -> IndicatorConfig {
    IndicatorConfig::default().with_fade(4, 1)
}

pub struct Rig<'c> {
    pub bridge: TestBridge<'c>,
    pub worker: TestWorker,
    pub trace: Trace,
    pub battery: FakeBattery,
    pub radio: FakeRadio,
}

impl<'c> Rig<'c> {
    pub fn new(clock: &'c MockClock, config: IndicatorConfig) -> Self {
        let trace = Trace::new();
        let battery = FakeBattery::new(100);
        let radio = FakeRadio::new(true);
        let bridge = EventBridge::new(config, clock, ()).expect("valid test config");
        let worker = AnimationWorker::with_config(
            &bridge,
            MockLed::new(&trace),
            MockDelay::new(&trace),
            battery.clone(),
            radio.clone(),
        );
        Self {
            bridge,
            worker,
            trace,
            battery,
            radio,
        }
    }

    /// Runs everything that is due right now.
    pub fn run_due(&mut self) {
        self.worker.run_pending(&self.bridge);
    }
}
