//! RP2040 firmware for the magnetometer heading unit.
//!
//! This crate provides the embedded implementation of a compass unit that
//! samples a BMX055 magnetometer, smooths the readings, and reports the
//! field vector and derived heading over a serial link.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Drives everything from a fixed 100 Hz tick loop
//! 2. Samples the magnetometer over SPI at 25 Hz into a 5-deep window
//! 3. Emits `$MAG` (rate-configurable) and `$YAW` (5 Hz) reports at
//!    9600 baud, 8N1
//! 4. Accepts `$RATE,<hz>*` commands from the host
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description                    |
//! |-----------|------|--------------------------------|
//! | UART0 TX  | 0    | Serial transmit (reports)      |
//! | UART0 RX  | 1    | Serial receive (host commands) |
//! | SPI0 SCK  | 18   | Magnetometer clock             |
//! | SPI0 MOSI | 19   | Magnetometer data out          |
//! | SPI0 MISO | 16   | Magnetometer data in           |
//! | SPI0 CS   | 17   | Magnetometer chip select       |
//! | LED       | 25   | On-board LED (1 Hz liveness)   |
//!
//! # Architecture
//!
//! The engine loop from [`compass_core`] runs on the thread-mode executor
//! and never yields; the two serial pumps run on a higher-priority
//! interrupt executor and preempt it. The only shared state is the pair of
//! SPSC byte rings plus one latching [`Signal`](embassy_sync::signal::Signal)
//! that wakes the transmit pump whenever the engine queues output.
//!
//! # Modules
//!
//! - [`magnetometer`]: BMX055 magnetometer driver ([`Bmx055Mag`])
//! - [`board`]: Board-side implementations of the engine's collaborator
//!   traits
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)

#![no_std]

// The panic strategies each install a #[panic_handler]; exactly one must be
// selected.
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export engine types for convenience
pub use compass_core::{
    AxisSample, Consumer, Doorbell, Magnetometer, Producer, ReportRate, RingBuffer, Scheduler,
    StatusIndicator, TickSource, TxChannel, Workload, BASE_TICK_HZ,
};

pub mod board;
pub mod magnetometer;

pub use board::{BoardLed, BusyWork, PeriodicTick, SignalDoorbell};
pub use magnetometer::Bmx055Mag;
