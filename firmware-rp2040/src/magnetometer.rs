//! BMX055 magnetometer driver, SPI variant.
//!
//! Covers exactly what heading duty needs: wake the magnetometer interface
//! and read the three axis registers. The driver is generic over
//! `embedded-hal` SPI and pin traits so it carries no chip-specific wiring.

use compass_core::{Axis, Magnetometer};
use defmt::{warn, Debug2Format};
use embassy_time::{block_for, Duration};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Magnetometer power control; writing 1 leaves suspend for sleep mode.
const REG_POWER_CTRL: u8 = 0x4B;
/// Operation mode; writing 0 selects normal (active) mode.
const REG_OP_MODE: u8 = 0x4C;
/// X axis LSB register; Y and Z follow at +2 and +4.
const REG_DATA_X_LSB: u8 = 0x42;
/// Read transactions set the register address MSB.
const READ_FLAG: u8 = 0x80;

/// Mode transitions settle in 3 ms per the datasheet.
const MODE_SETTLE: Duration = Duration::from_millis(3);

/// BMX055 magnetometer behind a dedicated SPI bus and chip-select pin.
///
/// Bus errors are reported once per read via defmt and the affected axis
/// reads as 0; the unit keeps running on whatever data it can get.
pub struct Bmx055Mag<SPI, CS> {
    spi: SPI,
    chip_select: CS,
}

impl<SPI, CS> Bmx055Mag<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    pub fn new(spi: SPI, chip_select: CS) -> Self {
        Self { spi, chip_select }
    }

    /// Bring the magnetometer from suspend to active measurement.
    ///
    /// The part powers up suspended; it first has to be moved to sleep
    /// before normal mode is reachable, with a settle delay after each
    /// step.
    pub fn activate(&mut self) {
        self.write_register(REG_POWER_CTRL, 0x01);
        block_for(MODE_SETTLE);
        self.write_register(REG_OP_MODE, 0x00);
        block_for(MODE_SETTLE);
    }

    fn write_register(&mut self, register: u8, value: u8) {
        let _ = self.chip_select.set_low();
        if let Err(e) = self.spi.write(&[register, value]) {
            warn!("mag register write failed: {}", Debug2Format(&e));
        }
        let _ = self.chip_select.set_high();
    }

    /// Read the LSB/MSB register pair for one axis.
    fn read_axis_registers(&mut self, axis: Axis) -> (u8, u8) {
        let base = match axis {
            Axis::X => REG_DATA_X_LSB,
            Axis::Y => REG_DATA_X_LSB + 2,
            Axis::Z => REG_DATA_X_LSB + 4,
        };

        let mut frame = [base | READ_FLAG, 0, 0];
        let _ = self.chip_select.set_low();
        let result = self.spi.transfer_in_place(&mut frame);
        let _ = self.chip_select.set_high();

        if let Err(e) = result {
            warn!("mag axis read failed: {}", Debug2Format(&e));
            return (0, 0);
        }
        (frame[1], frame[2])
    }
}

impl<SPI, CS> Magnetometer for Bmx055Mag<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    fn read_axis(&mut self, axis: Axis) -> i32 {
        let (lsb, msb) = self.read_axis_registers(axis);
        i32::from(decode_axis(axis, lsb, msb))
    }
}

/// Assemble an axis value from its register pair.
///
/// X and Y are 13-bit left-justified, Z is 15-bit; the arithmetic shift
/// keeps the sign.
fn decode_axis(axis: Axis, lsb: u8, msb: u8) -> i16 {
    match axis {
        Axis::X | Axis::Y => i16::from_le_bytes([lsb & 0xF8, msb]) >> 3,
        Axis::Z => i16::from_le_bytes([lsb & 0xFE, msb]) >> 1,
    }
}
