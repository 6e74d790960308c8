//! Dedicated background thread for hosts with `std`.
//!
//! [`spawn`] boots the worker and services it on its own thread, sleeping on a
//! condition variable between work items. Notification handlers keep running
//! on their own threads and only ever touch the shared [`EventBridge`].

use crate::bridge::EventBridge;
use crate::hal::{BatteryGauge, BrightnessDriver, WirelessLink};
use crate::scheduler::Notify;
use crate::time::{TimeInstant, TimeSource};
use crate::worker::{AnimationWorker, ServiceTiming};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[derive(Debug, Default)]
struct WakeState {
    pending: bool,
    shutdown: bool,
}

/// Condvar-backed notifier that wakes the worker thread.
#[derive(Debug, Default)]
pub struct Wakeup {
    state: Mutex<WakeState>,
    condvar: Condvar,
}

impl Wakeup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until notified or `timeout` elapses. Returns false once shutdown
    /// was requested.
    fn wait(&self, timeout: Option<Duration>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.pending && !state.shutdown {
            state = match timeout {
                Some(timeout) => {
                    self.condvar
                        .wait_timeout_while(state, timeout, |s| !s.pending && !s.shutdown)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .condvar
                    .wait_while(state, |s| !s.pending && !s.shutdown)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }
        state.pending = false;
        !state.shutdown
    }

    fn is_shutdown(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .shutdown
    }

    fn request_shutdown(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .shutdown = true;
        self.condvar.notify_all();
    }
}

impl Notify for Wakeup {
    fn notify(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending = true;
        self.condvar.notify_all();
    }
}

/// Handle to a running indicator thread.
pub struct IndicatorHandle<I: TimeInstant, T: TimeSource<I>> {
    bridge: Arc<EventBridge<I, T, Wakeup>>,
    thread: Option<JoinHandle<()>>,
}

impl<I: TimeInstant, T: TimeSource<I>> IndicatorHandle<I, T> {
    /// The shared bridge, for wiring up notification handlers.
    pub fn bridge(&self) -> &Arc<EventBridge<I, T, Wakeup>> {
        &self.bridge
    }

    /// Stops the worker thread and waits for it to exit.
    ///
    /// An animation that is already playing runs to completion first.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.bridge.scheduler().notifier().request_shutdown();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("status indicator thread panicked");
            }
        }
    }
}

impl<I: TimeInstant, T: TimeSource<I>> Drop for IndicatorHandle<I, T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Boots `worker` and runs it on a new thread named `status-indicator`.
pub fn spawn<I, T, L, D, B, W>(
    mut worker: AnimationWorker<L, D, B, W>,
    bridge: Arc<EventBridge<I, T, Wakeup>>,
) -> std::io::Result<IndicatorHandle<I, T>>
where
    I: TimeInstant + Send + 'static,
    I::Duration: Into<Duration>,
    T: TimeSource<I> + Send + Sync + 'static,
    L: BrightnessDriver + Send + 'static,
    D: DelayNs + Send + 'static,
    B: BatteryGauge + Send + 'static,
    W: WirelessLink + Send + 'static,
{
    let shared = Arc::clone(&bridge);
    let thread = std::thread::Builder::new()
        .name("status-indicator".into())
        .spawn(move || {
            let bridge: &EventBridge<I, T, Wakeup> = &shared;
            worker.boot(bridge);
            let wakeup = bridge.scheduler().notifier();
            while !wakeup.is_shutdown() {
                let timeout = match worker.service(bridge) {
                    ServiceTiming::Ready => continue,
                    ServiceTiming::Delay(delay) => Some(delay.into()),
                    ServiceTiming::Idle => None,
                };
                if !wakeup.wait(timeout) {
                    break;
                }
            }
            log::info!("status indicator stopped");
        })?;

    Ok(IndicatorHandle {
        bridge,
        thread: Some(thread),
    })
}
