//! Board-side implementations of the engine's collaborator traits.

use compass_core::{Doorbell, StatusIndicator, TickSource, Workload};
use embassy_futures::block_on;
use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{block_for, Duration, Ticker};

/// Tick boundary backed by the embassy timer.
///
/// A [`Ticker`] counts absolute deadlines, so an iteration that finishes
/// early parks until the boundary and one that overruns fires the next tick
/// immediately instead of drifting.
pub struct PeriodicTick {
    ticker: Ticker,
}

impl PeriodicTick {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            ticker: Ticker::every(period),
        }
    }
}

impl TickSource for PeriodicTick {
    fn wait_for_next_tick(&mut self) {
        // Parks the thread-mode executor; the pump tasks keep running on
        // the interrupt executor above it.
        block_on(self.ticker.next());
    }
}

/// Stand-in for the unit's control computation: burns a fixed slice of each
/// tick so the loop timing matches the deployed load.
pub struct BusyWork {
    budget: Duration,
}

impl BusyWork {
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }
}

impl Workload for BusyWork {
    fn run(&mut self) {
        block_for(self.budget);
    }
}

/// On-board LED as the liveness indicator.
pub struct BoardLed {
    led: Output<'static>,
}

impl BoardLed {
    #[must_use]
    pub fn new(led: Output<'static>) -> Self {
        Self { led }
    }
}

impl StatusIndicator for BoardLed {
    fn toggle(&mut self) {
        self.led.toggle();
    }
}

/// Doorbell that wakes the transmit pump task.
///
/// [`Signal`] latches, so a ring while the pump is mid-drain is simply
/// observed on its next wait; nothing is ever lost or double-handled.
pub struct SignalDoorbell {
    signal: &'static Signal<CriticalSectionRawMutex, ()>,
}

impl SignalDoorbell {
    #[must_use]
    pub fn new(signal: &'static Signal<CriticalSectionRawMutex, ()>) -> Self {
        Self { signal }
    }
}

impl Doorbell for SignalDoorbell {
    fn ring(&mut self) {
        self.signal.signal(());
    }
}
