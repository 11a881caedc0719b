//! Sliding-window smoothing and heading derivation.

use core::f32::consts::PI;

/// Number of readings in the smoothing window.
pub const WINDOW_LEN: usize = 5;

/// One tri-axis magnetometer reading, in raw sensor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AxisSample {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Fixed circular window over the most recent readings.
///
/// [`insert`](Self::insert) overwrites the oldest slot, so after the initial
/// fill the window always holds exactly the [`WINDOW_LEN`] newest samples.
/// The average is undefined until the window has been filled once; the
/// scheduler pre-fills it at tick cadence before entering the periodic loop.
#[derive(Debug, Clone)]
pub struct SensorAverager {
    window: [AxisSample; WINDOW_LEN],
    next_slot: usize,
}

impl SensorAverager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window: [AxisSample::new(0, 0, 0); WINDOW_LEN],
            next_slot: 0,
        }
    }

    /// Overwrite the oldest slot with `sample`.
    pub fn insert(&mut self, sample: AxisSample) {
        self.window[self.next_slot] = sample;
        self.next_slot = (self.next_slot + 1) % WINDOW_LEN;
    }

    /// Per-axis mean of the window, truncated toward zero.
    ///
    /// Recomputed from the slots on every call; there is no running sum to
    /// fall out of step with the window contents.
    #[must_use]
    pub fn average(&self) -> AxisSample {
        let mut sum_x: i64 = 0;
        let mut sum_y: i64 = 0;
        let mut sum_z: i64 = 0;
        for sample in &self.window {
            sum_x += i64::from(sample.x);
            sum_y += i64::from(sample.y);
            sum_z += i64::from(sample.z);
        }
        let len = WINDOW_LEN as i64;
        AxisSample {
            x: (sum_x / len) as i32,
            y: (sum_y / len) as i32,
            z: (sum_z / len) as i32,
        }
    }
}

impl Default for SensorAverager {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading of the field vector in the X/Y plane, in whole degrees.
///
/// `atan2(y, x)` scaled to degrees and truncated toward zero, giving the
/// range [-180, 180]: 0 along +X, +90 along +Y, and the -X axis reported as
/// +180. A zero vector yields 0.
#[must_use]
pub fn heading_degrees(field: AxisSample) -> i32 {
    (180.0 * libm::atan2f(field.y as f32, field.x as f32) / PI) as i32
}
