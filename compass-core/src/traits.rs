//! Hardware collaborator traits.
//!
//! The engine never touches a register; the board crate supplies these four
//! capabilities and the tests supply scripted stand-ins.

use crate::heading::AxisSample;

/// Magnetometer axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Raw access to the tri-axis magnetometer.
pub trait Magnetometer {
    /// Read one axis, in raw sensor counts.
    fn read_axis(&mut self, axis: Axis) -> i32;

    /// Read all three axes as one sample, X first.
    fn read_sample(&mut self) -> AxisSample {
        AxisSample {
            x: self.read_axis(Axis::X),
            y: self.read_axis(Axis::Y),
            z: self.read_axis(Axis::Z),
        }
    }
}

/// Fixed-period tick boundary from a hardware timer.
///
/// The scheduler calls [`wait_for_next_tick`](Self::wait_for_next_tick) once
/// per loop iteration; the implementation absorbs whatever time the
/// iteration left over, which is what makes the loop rate independent of the
/// work done per tick (as long as the work fits in the period).
pub trait TickSource {
    fn wait_for_next_tick(&mut self);
}

/// Visible liveness indicator, typically an LED.
pub trait StatusIndicator {
    fn toggle(&mut self);
}

/// Indicator for boards with nothing to blink.
pub struct NullIndicator;

impl StatusIndicator for NullIndicator {
    fn toggle(&mut self) {}
}

/// Bounded foreground work run at the top of every tick.
///
/// This is the slot the unit's actual control computation plugs into; its
/// worst case must fit inside the tick period together with the scheduler's
/// own duties.
pub trait Workload {
    fn run(&mut self);
}

/// Workload that does nothing, for bench setups and tests.
pub struct IdleWorkload;

impl Workload for IdleWorkload {
    fn run(&mut self) {}
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    struct SequencedAxes;

    impl Magnetometer for SequencedAxes {
        fn read_axis(&mut self, axis: Axis) -> i32 {
            match axis {
                Axis::X => 1,
                Axis::Y => 2,
                Axis::Z => 3,
            }
        }
    }

    #[test]
    fn test_read_sample_gathers_all_axes() {
        let mut mag = SequencedAxes;
        assert_eq!(mag.read_sample(), AxisSample::new(1, 2, 3));
    }
}
