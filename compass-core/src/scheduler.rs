//! Tick-driven cooperative scheduler.
//!
//! The unit runs everything off one fixed-rate loop. Each iteration runs the
//! foreground workload, services whichever periodic duties are due this
//! tick, drains the receive ring through the frame parser, and then parks on
//! the tick boundary. There is no preemption inside the loop; the interrupt
//! side only ever touches the rings.

use compass_proto::{parse_signed_integer, Frame, FrameParser, Message, ERR_INVALID_RATE};

use crate::heading::{heading_degrees, AxisSample, SensorAverager, WINDOW_LEN};
use crate::link::{Doorbell, TxChannel};
use crate::ring::Consumer;
use crate::traits::{Magnetometer, StatusIndicator, TickSource, Workload};

/// Base loop rate: one tick every 10 ms.
pub const BASE_TICK_HZ: u32 = 100;

/// Status indicator toggle period in ticks (1 Hz blink).
pub const STATUS_TOGGLE_TICKS: u32 = 50;

/// Magnetometer acquisition period in ticks (25 Hz sampling).
pub const ACQUIRE_TICKS: u32 = 4;

/// Heading report period in ticks (5 Hz).
pub const YAW_REPORT_TICKS: u32 = 20;

/// Field report rates the host may select, in Hz. 0 disables the report.
///
/// Every non-zero member divides [`BASE_TICK_HZ`] evenly, so each rate maps
/// to a whole number of ticks.
pub const ACCEPTED_RATES: [i32; 6] = [0, 1, 2, 4, 5, 10];

/// Validated `$MAG` report rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportRate(u32);

impl ReportRate {
    /// Power-on default: 5 Hz.
    pub const DEFAULT: Self = Self(5);

    /// Accept `raw` only if it is in [`ACCEPTED_RATES`].
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        ACCEPTED_RATES.contains(&raw).then_some(Self(raw as u32))
    }

    /// Report period in ticks, or `None` when reporting is disabled.
    #[must_use]
    pub fn period_ticks(self) -> Option<u32> {
        (self.0 != 0).then(|| BASE_TICK_HZ / self.0)
    }

    /// The rate in Hz (0 means disabled).
    #[inline]
    #[must_use]
    pub const fn hz(self) -> u32 {
        self.0
    }
}

impl Default for ReportRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Free-running per-duty tick counter.
///
/// The period is supplied on every call rather than stored, so a runtime
/// period change takes effect on the next tick without restarting the count.
/// A count already past a newly shortened period fires immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickCounter {
    count: u32,
}

impl TickCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Count one tick. Returns true exactly when `period_ticks` have
    /// elapsed, restarting the count.
    pub fn advance(&mut self, period_ticks: u32) -> bool {
        self.count += 1;
        if self.count >= period_ticks {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// The unit's main loop.
///
/// Owns the smoothing window, the frame parser, and the engine ends of both
/// serial rings; all hardware access goes through the collaborator traits.
/// One [`run_tick`](Self::run_tick) call is one base-period iteration, which
/// is what the tests drive directly; firmware calls [`run`](Self::run).
pub struct Scheduler<'a, M, T, S, W, D, const IN: usize, const OUT: usize> {
    magnetometer: M,
    ticks: T,
    status: S,
    workload: W,
    rx: Consumer<'a, IN>,
    tx: TxChannel<'a, D, OUT>,
    parser: FrameParser,
    averager: SensorAverager,
    field: AxisSample,
    heading: i32,
    rate: ReportRate,
    status_blink: TickCounter,
    acquire: TickCounter,
    mag_report: TickCounter,
    yaw_report: TickCounter,
}

impl<'a, M, T, S, W, D, const IN: usize, const OUT: usize> Scheduler<'a, M, T, S, W, D, IN, OUT>
where
    M: Magnetometer,
    T: TickSource,
    S: StatusIndicator,
    W: Workload,
    D: Doorbell,
{
    pub fn new(
        magnetometer: M,
        ticks: T,
        status: S,
        workload: W,
        rx: Consumer<'a, IN>,
        tx: TxChannel<'a, D, OUT>,
    ) -> Self {
        Self {
            magnetometer,
            ticks,
            status,
            workload,
            rx,
            tx,
            parser: FrameParser::new(),
            averager: SensorAverager::new(),
            field: AxisSample::new(0, 0, 0),
            heading: 0,
            rate: ReportRate::DEFAULT,
            status_blink: TickCounter::new(),
            acquire: TickCounter::new(),
            mag_report: TickCounter::new(),
            yaw_report: TickCounter::new(),
        }
    }

    /// Fill the smoothing window with real readings before the loop starts.
    ///
    /// Takes one sample per tick for [`WINDOW_LEN`] ticks, so the first
    /// report ever sent already reflects a fully populated window instead of
    /// zero-initialized slots.
    pub fn prefill(&mut self) {
        for _ in 0..WINDOW_LEN {
            let sample = self.magnetometer.read_sample();
            self.averager.insert(sample);
            self.ticks.wait_for_next_tick();
        }
        self.field = self.averager.average();
        self.heading = heading_degrees(self.field);
    }

    /// One base-period iteration.
    pub fn run_tick(&mut self) {
        self.workload.run();

        if self.status_blink.advance(STATUS_TOGGLE_TICKS) {
            self.status.toggle();
        }

        if self.acquire.advance(ACQUIRE_TICKS) {
            let sample = self.magnetometer.read_sample();
            self.averager.insert(sample);
            self.field = self.averager.average();
            self.heading = heading_degrees(self.field);
        }

        // Rate 0 skips the advance entirely, freezing the counter until the
        // report is re-enabled.
        if let Some(period) = self.rate.period_ticks() {
            if self.mag_report.advance(period) {
                let report = Message::MagReport {
                    x: self.field.x,
                    y: self.field.y,
                    z: self.field.z,
                };
                self.tx.send(report.encode().as_bytes());
            }
        }

        if self.yaw_report.advance(YAW_REPORT_TICKS) {
            let report = Message::YawReport {
                degrees: self.heading,
            };
            self.tx.send(report.encode().as_bytes());
        }

        while let Some(byte) = self.rx.try_pop() {
            if let Some(frame) = self.parser.feed(byte) {
                self.handle_frame(&frame);
            }
        }

        self.ticks.wait_for_next_tick();
    }

    /// Run forever at the base rate.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_tick();
        }
    }

    /// The currently selected `$MAG` report rate.
    #[must_use]
    pub fn report_rate(&self) -> ReportRate {
        self.rate
    }

    /// The most recent smoothed field vector.
    #[must_use]
    pub fn current_field(&self) -> AxisSample {
        self.field
    }

    /// The most recent derived heading, in whole degrees.
    #[must_use]
    pub fn current_heading_degrees(&self) -> i32 {
        self.heading
    }

    fn handle_frame(&mut self, frame: &Frame) {
        // Unknown message types are not an error on this link.
        if !frame.is(b"RATE") {
            return;
        }
        let raw = parse_signed_integer(frame.payload());
        match ReportRate::from_raw(raw) {
            Some(rate) => self.rate = rate,
            None => {
                let reject = Message::Error {
                    code: ERR_INVALID_RATE,
                };
                self.tx.send(reject.encode().as_bytes());
            }
        }
    }
}
