//! Platform-agnostic compass engine: rings, smoothing, and the scheduler.
//!
//! This crate holds everything the unit does that is not a hardware
//! register: the interrupt-safe byte rings, the smoothing window and heading
//! math, and the fixed-rate scheduler that ties them together. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`ring`]: Interrupt-safe SPSC byte queues ([`RingBuffer`], [`Producer`], [`Consumer`])
//! - [`link`]: Transmit channel and doorbell ([`TxChannel`], [`Doorbell`])
//! - [`heading`]: Smoothing window and heading math ([`SensorAverager`], [`heading_degrees`])
//! - [`traits`]: Hardware collaborator traits ([`Magnetometer`], [`TickSource`], ...)
//! - [`scheduler`]: The fixed-rate main loop ([`Scheduler`])
//!
//! # Architecture
//!
//! The [`Scheduler`] owns the engine ends of two byte rings. The board crate
//! owns the other ends: its receive interrupt pushes into one ring, its
//! transmit path pops from the other. Everything timing-related happens at a
//! fixed 100 Hz tick, with per-duty counters deciding which duties run on a
//! given tick. Tests drive [`Scheduler::run_tick`] directly with scripted
//! collaborators; firmware hands real peripherals to the same type and calls
//! [`Scheduler::run`].
//!
//! # Example
//!
//! ```
//! use compass_core::link::{NullDoorbell, TxChannel};
//! use compass_core::ring::RingBuffer;
//!
//! let mut output = RingBuffer::<48>::new();
//! let (producer, mut consumer) = output.split();
//!
//! let mut tx = TxChannel::new(producer, NullDoorbell);
//! tx.send(b"$YAW,90*");
//!
//! let mut sent = [0u8; 8];
//! for slot in &mut sent {
//!     *slot = consumer.try_pop().unwrap();
//! }
//! assert_eq!(&sent, b"$YAW,90*");
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod heading;
pub mod link;
pub mod ring;
pub mod scheduler;
pub mod traits;

// Re-export main types at crate root
pub use heading::{heading_degrees, AxisSample, SensorAverager, WINDOW_LEN};
pub use link::{Doorbell, NullDoorbell, TxChannel};
pub use ring::{Consumer, Producer, RingBuffer};
pub use scheduler::{
    ReportRate, Scheduler, TickCounter, ACCEPTED_RATES, ACQUIRE_TICKS, BASE_TICK_HZ,
    STATUS_TOGGLE_TICKS, YAW_REPORT_TICKS,
};
pub use traits::{
    Axis, IdleWorkload, Magnetometer, NullIndicator, StatusIndicator, TickSource, Workload,
};

// The protocol crate travels with the engine; re-export it for boards that
// only want one dependency.
pub use compass_proto as proto;
