//! Platform-agnostic driver for the ADXL345 three-axis accelerometer.
//!
//! The chip is reached through a [`Transport`]: [`I2cInterface`] for I²C
//! (address `0x53`, or `0x1D` with SDO high) and [`SpiInterface`] for
//! four-wire SPI with a separate chip-select pin.
//!
//! ```ignore
//! use adxl345::{Adxl345, I2cInterface, SlaveAddr, Range};
//!
//! let mut adxl = Adxl345::new(I2cInterface::new(i2c, SlaveAddr::Default));
//! adxl.initialize()?;
//! adxl.set_range(Range::G8)?;
//! adxl.power_on()?;
//!
//! let sample = adxl.read_sample()?;
//! let tilt = adxl.read_roll_pitch()?;
//! ```
//!
//! Reference: <https://www.analog.com/media/en/technical-documentation/data-sheets/adxl345.pdf>

#![cfg_attr(not(test), no_std)]

use core::convert::TryFrom;
use core::fmt::Debug;

pub use accelerometer;
use accelerometer::error::Error as AccelerometerError;
use accelerometer::vector::{F32x3, I16x3};
use accelerometer::{Accelerometer, RawAccelerometer};

#[cfg(feature = "defmt")]
use defmt::{debug, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

mod i2c;
mod interrupts;
pub mod orientation;
pub mod register;
mod spi;

pub use i2c::I2cInterface;
pub use interrupts::{triggered, Interrupt, InterruptPin, InterruptPolarity, InterruptSource};
pub use orientation::{roll_pitch, RollPitch};
pub use register::{
    DataRate, Field, FifoMode, Justify, Range, Register, SlaveAddr, Wakeup, DEVICE_ID,
};
pub use spi::SpiInterface;

use register::*;

/// Longest payload a single register write may carry.
pub const MAX_WRITE_LEN: usize = 16;

/// Scale of one LSB in full-resolution mode, and in 10-bit mode at ±2 g.
pub const SCALE_G_PER_LSB: f32 = 0.0039;

/// Errors reported by the driver.
#[derive(Debug)]
pub enum Error<BusError, PinError> {
    /// Bus error
    Bus(BusError),
    /// GPIO error on the chip-select pin
    Pin(PinError),
    /// Fewer bytes came back than were asked for
    ShortRead(usize),
    /// `DEVID` did not read back as the ADXL345 id
    WrongAddress(u8),
    /// Attempted to write to a read-only register
    WriteToReadOnly,
    /// Data rate out of the supported range
    InvalidDataRate,
    /// Range other than ±2/4/8/16 g
    InvalidRange,
    /// Value does not fit the target register field
    InvalidArgument,
}

impl<BusError, PinError> Error<BusError, PinError> {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Bus(_) | Error::Pin(_) | Error::ShortRead(_) | Error::WrongAddress(_) => {
                ErrorCode::ReadError
            }
            Error::WriteToReadOnly
            | Error::InvalidDataRate
            | Error::InvalidRange
            | Error::InvalidArgument => ErrorCode::BadArgument,
        }
    }
}

/// Outcome of the most recent operation, as kept by [`Adxl345`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    NoError     = 0,
    /// The transport failed or returned short
    ReadError   = 1,
    /// A configuration value was rejected
    BadArgument = 2,
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::NoError
    }
}

/// Register-level access to the chip. Implemented by [`I2cInterface`] and
/// [`SpiInterface`].
pub trait Transport {
    type BusError: Debug;
    type PinError: Debug;

    /// Write `data` to consecutive registers starting at `address`.
    fn write_bytes(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> Result<(), Error<Self::BusError, Self::PinError>>;

    /// Fill `buf` from consecutive registers starting at `address` and
    /// return the number of bytes read.
    fn read_bytes(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<usize, Error<Self::BusError, Self::PinError>>;
}

pub type AdxlResult<T, B> =
    Result<T, Error<<B as Transport>::BusError, <B as Transport>::PinError>>;

/// Settings applied by [`Adxl345::initialize_with_config`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub datarate: DataRate,
    pub range: Range,
    pub full_resolution: bool,
    pub justify: Justify,
    pub low_power: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            datarate: DataRate::Hz_100,
            range: Range::G2,
            full_resolution: false,
            justify: Justify::Right,
            low_power: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Significant bits per sample: 10, or 10 + range in full resolution.
pub fn resolution_bits(full_resolution: bool, range: Range) -> u8 {
    if full_resolution {
        10 + range.bits()
    } else {
        10
    }
}

/// Scale (g per LSB of the 16-bit data word) for a data format.
///
/// Left-justified samples sit in the top bits of the word, so each LSB of
/// the word is worth `2^(16 - bits)` times less.
pub fn gain(full_resolution: bool, range: Range, justify: Justify) -> f32 {
    let scale = if full_resolution {
        SCALE_G_PER_LSB
    } else {
        SCALE_G_PER_LSB * (1u8 << range.bits()) as f32
    };

    match justify {
        Justify::Right => scale,
        Justify::Left => {
            scale / (1u32 << (16 - resolution_bits(full_resolution, range))) as f32
        }
    }
}

/// `ADXL345` driver.
pub struct Adxl345<T> {
    transport: T,
    /// Set when the latest operation failed
    status: bool,
    error_code: ErrorCode,
    /// g per LSB, per axis
    gains: [f32; 3],
}

impl<T> Adxl345<T>
where
    T: Transport,
{
    /// Wrap a transport. Nothing is sent to the chip until
    /// [`initialize`](Self::initialize).
    pub fn new(transport: T) -> Self {
        Adxl345 {
            transport,
            status: false,
            error_code: ErrorCode::NoError,
            gains: [gain(false, Range::G2, Justify::Right); 3],
        }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    // Status

    /// `true` when the latest operation failed.
    pub fn is_error(&self) -> bool {
        self.status
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn clear_error(&mut self) {
        self.status = false;
        self.error_code = ErrorCode::NoError;
    }

    fn record<R>(&mut self, res: AdxlResult<R, T>) -> AdxlResult<R, T> {
        match &res {
            Ok(_) => {
                self.status = false;
                self.error_code = ErrorCode::NoError;
            }
            Err(e) => {
                self.status = true;
                self.error_code = e.code();
                warn!("adxl345: operation failed ({})", self.error_code);
            }
        }
        res
    }

    fn reject<R>(&mut self, error: Error<T::BusError, T::PinError>) -> AdxlResult<R, T> {
        self.record(Err(error))
    }

    // Init

    /// Check the device id and apply the default [`Configuration`].
    pub fn initialize(&mut self) -> AdxlResult<(), T> {
        self.initialize_with_config(Configuration::default())
    }

    /// Check the device id and apply `config`. On failure the driver stays
    /// usable and the error is also kept in [`error_code`](Self::error_code).
    pub fn initialize_with_config(&mut self, config: Configuration) -> AdxlResult<(), T> {
        let id = self.device_id()?;
        if id != DEVICE_ID {
            return self.reject(Error::WrongAddress(id));
        }

        let bw_rate = RATE.insert(
            LOW_POWER.insert(0, config.low_power as u8),
            config.datarate.bits(),
        );
        self.write_register(Register::BW_RATE, bw_rate)?;

        let mut format = self.read_register(Register::DATA_FORMAT)?;
        format = FULL_RES.insert(format, config.full_resolution as u8);
        format = JUSTIFY.insert(format, config.justify as u8);
        format = RANGE.insert(format, config.range.bits());
        self.write_register(Register::DATA_FORMAT, format)?;

        self.gains = [gain(config.full_resolution, config.range, config.justify); 3];

        debug!("adxl345: initialized ({})", config);
        Ok(())
    }

    /// Leave standby and start measuring.
    pub fn power_on(&mut self) -> AdxlResult<(), T> {
        self.write_register(Register::POWER_CTL, MEASURE.insert(0, 1))
    }

    // Raw access

    /// Read one register.
    pub fn read_register(&mut self, register: Register) -> AdxlResult<u8, T> {
        let mut data = [0];
        self.read_registers(register, &mut data)?;
        Ok(data[0])
    }

    /// Burst read starting at `register`.
    pub fn read_registers(&mut self, register: Register, buf: &mut [u8]) -> AdxlResult<(), T> {
        let res = match self.transport.read_bytes(register.addr(), buf) {
            Ok(n) if n < buf.len() => Err(Error::ShortRead(n)),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };
        self.record(res)
    }

    /// Write a byte to the given register.
    pub fn write_register(&mut self, register: Register, value: u8) -> AdxlResult<(), T> {
        self.write_registers(register, &[value])
    }

    /// Burst write starting at `register`.
    pub fn write_registers(&mut self, register: Register, data: &[u8]) -> AdxlResult<(), T> {
        if register.read_only() {
            return self.reject(Error::WriteToReadOnly);
        }

        let res = self.transport.write_bytes(register.addr(), data);
        self.record(res)
    }

    /// Read a bit field.
    pub fn read_field(&mut self, field: Field) -> AdxlResult<u8, T> {
        Ok(field.extract(self.read_register(field.register)?))
    }

    /// Read-modify-write of one bit field. Other bits of the register are
    /// written back unchanged; whole-register fields skip the read.
    pub fn write_field(&mut self, field: Field, value: u8) -> AdxlResult<(), T> {
        if value > field.mask() >> field.shift {
            return self.reject(Error::InvalidArgument);
        }

        let current = if field.is_whole_register() {
            0
        } else {
            self.read_register(field.register)?
        };

        self.write_register(field.register, field.insert(current, value))
    }

    fn read_flag(&mut self, field: Field) -> AdxlResult<bool, T> {
        Ok(self.read_field(field)? != 0)
    }

    fn write_flag(&mut self, field: Field, on: bool) -> AdxlResult<(), T> {
        self.write_field(field, on as u8)
    }

    // Samples

    pub fn device_id(&mut self) -> AdxlResult<u8, T> {
        self.read_register(Register::DEVID)
    }

    /// Burst-read DATAX0..DATAZ1 as raw little-endian counts.
    pub fn read_sample(&mut self) -> AdxlResult<I16x3, T> {
        let mut data = [0u8; 6];
        self.read_registers(Register::DATAX0, &mut data)?;

        let x = i16::from_le_bytes([data[0], data[1]]);
        let y = i16::from_le_bytes([data[2], data[3]]);
        let z = i16::from_le_bytes([data[4], data[5]]);

        Ok(I16x3::new(x, y, z))
    }

    /// Sample scaled to g by the gain table.
    pub fn read_acceleration(&mut self) -> AdxlResult<F32x3, T> {
        let raw = self.read_sample()?;

        Ok(F32x3::new(
            raw.x as f32 * self.gains[0],
            raw.y as f32 * self.gains[1],
            raw.z as f32 * self.gains[2],
        ))
    }

    /// Read a sample and derive roll and pitch from it.
    pub fn read_roll_pitch(&mut self) -> AdxlResult<RollPitch, T> {
        let raw = self.read_sample()?;
        Ok(roll_pitch(raw.x as f32, raw.y as f32, raw.z as f32))
    }

    /// g per LSB for X, Y and Z.
    pub fn gains(&self) -> [f32; 3] {
        self.gains
    }

    /// Override the gain table, e.g. with calibrated values. Writing the
    /// range or resolution recomputes it.
    pub fn set_gains(&mut self, gains: [f32; 3]) {
        self.gains = gains;
    }

    fn update_gains(&mut self) -> AdxlResult<(), T> {
        let format = self.read_register(Register::DATA_FORMAT)?;
        let range = Range::try_from(RANGE.extract(format)).map_err(|_| Error::InvalidRange)?;
        let justify = match JUSTIFY.extract(format) {
            0 => Justify::Right,
            _ => Justify::Left,
        };
        self.gains = [gain(FULL_RES.extract(format) != 0, range, justify); 3];
        Ok(())
    }

    // Tap

    /// Tap threshold, 62.5 mg/LSB.
    pub fn tap_threshold(&mut self) -> AdxlResult<u8, T> {
        self.read_field(TAP_THRESHOLD)
    }

    pub fn set_tap_threshold(&mut self, threshold: u8) -> AdxlResult<(), T> {
        self.write_field(TAP_THRESHOLD, threshold)
    }

    /// Maximum tap duration, 625 µs/LSB.
    pub fn tap_duration(&mut self) -> AdxlResult<u8, T> {
        self.read_field(TAP_DURATION)
    }

    pub fn set_tap_duration(&mut self, duration: u8) -> AdxlResult<(), T> {
        self.write_field(TAP_DURATION, duration)
    }

    /// Wait after a tap before the double-tap window opens, 1.25 ms/LSB.
    pub fn double_tap_latency(&mut self) -> AdxlResult<u8, T> {
        self.read_field(TAP_LATENCY)
    }

    pub fn set_double_tap_latency(&mut self, latency: u8) -> AdxlResult<(), T> {
        self.write_field(TAP_LATENCY, latency)
    }

    /// Length of the double-tap window, 1.25 ms/LSB.
    pub fn double_tap_window(&mut self) -> AdxlResult<u8, T> {
        self.read_field(TAP_WINDOW)
    }

    pub fn set_double_tap_window(&mut self, window: u8) -> AdxlResult<(), T> {
        self.write_field(TAP_WINDOW, window)
    }

    pub fn is_tap_detection_enabled(&mut self, axis: Axis) -> AdxlResult<bool, T> {
        self.read_flag(tap_axis_field(axis))
    }

    pub fn set_tap_detection(&mut self, axis: Axis, on: bool) -> AdxlResult<(), T> {
        self.write_flag(tap_axis_field(axis), on)
    }

    /// Suppress double taps when acceleration stays above the threshold
    /// between taps.
    pub fn set_tap_suppress(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(TAP_SUPPRESS, on)
    }

    pub fn is_tap_suppressed(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(TAP_SUPPRESS)
    }

    /// Whether `axis` took part in the last tap event.
    pub fn is_tap_source(&mut self, axis: Axis) -> AdxlResult<bool, T> {
        self.read_flag([TAP_X_SRC, TAP_Y_SRC, TAP_Z_SRC][axis.index()])
    }

    // Activity / inactivity

    /// Activity threshold, 62.5 mg/LSB.
    pub fn activity_threshold(&mut self) -> AdxlResult<u8, T> {
        self.read_field(ACTIVITY_THRESHOLD)
    }

    pub fn set_activity_threshold(&mut self, threshold: u8) -> AdxlResult<(), T> {
        self.write_field(ACTIVITY_THRESHOLD, threshold)
    }

    /// Inactivity threshold, 62.5 mg/LSB.
    pub fn inactivity_threshold(&mut self) -> AdxlResult<u8, T> {
        self.read_field(INACTIVITY_THRESHOLD)
    }

    pub fn set_inactivity_threshold(&mut self, threshold: u8) -> AdxlResult<(), T> {
        self.write_field(INACTIVITY_THRESHOLD, threshold)
    }

    /// Time below the inactivity threshold before inactivity is declared,
    /// 1 s/LSB.
    pub fn inactivity_time(&mut self) -> AdxlResult<u8, T> {
        self.read_field(INACTIVITY_TIME)
    }

    pub fn set_inactivity_time(&mut self, seconds: u8) -> AdxlResult<(), T> {
        self.write_field(INACTIVITY_TIME, seconds)
    }

    pub fn is_activity_enabled(&mut self, axis: Axis) -> AdxlResult<bool, T> {
        self.read_flag([ACT_X_EN, ACT_Y_EN, ACT_Z_EN][axis.index()])
    }

    pub fn set_activity(&mut self, axis: Axis, on: bool) -> AdxlResult<(), T> {
        self.write_flag([ACT_X_EN, ACT_Y_EN, ACT_Z_EN][axis.index()], on)
    }

    pub fn is_inactivity_enabled(&mut self, axis: Axis) -> AdxlResult<bool, T> {
        self.read_flag([INACT_X_EN, INACT_Y_EN, INACT_Z_EN][axis.index()])
    }

    pub fn set_inactivity(&mut self, axis: Axis, on: bool) -> AdxlResult<(), T> {
        self.write_flag([INACT_X_EN, INACT_Y_EN, INACT_Z_EN][axis.index()], on)
    }

    /// AC-coupled activity detection compares against a reference taken at
    /// the start of detection instead of against zero.
    pub fn set_activity_ac_coupled(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(ACT_AC_COUPLED, on)
    }

    pub fn set_inactivity_ac_coupled(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(INACT_AC_COUPLED, on)
    }

    /// Whether `axis` took part in the last activity event.
    pub fn is_activity_source(&mut self, axis: Axis) -> AdxlResult<bool, T> {
        self.read_flag([ACT_X_SRC, ACT_Y_SRC, ACT_Z_SRC][axis.index()])
    }

    pub fn is_asleep(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(ASLEEP)
    }

    // Free fall

    /// Free-fall threshold, 62.5 mg/LSB.
    pub fn free_fall_threshold(&mut self) -> AdxlResult<u8, T> {
        self.read_field(FREE_FALL_THRESHOLD)
    }

    pub fn set_free_fall_threshold(&mut self, threshold: u8) -> AdxlResult<(), T> {
        self.write_field(FREE_FALL_THRESHOLD, threshold)
    }

    /// Minimum free-fall time, 5 ms/LSB.
    pub fn free_fall_duration(&mut self) -> AdxlResult<u8, T> {
        self.read_field(FREE_FALL_TIME)
    }

    pub fn set_free_fall_duration(&mut self, duration: u8) -> AdxlResult<(), T> {
        self.write_field(FREE_FALL_TIME, duration)
    }

    // Offsets

    /// X, Y, Z offset trims, 15.6 mg/LSB, two's complement.
    pub fn axis_offsets(&mut self) -> AdxlResult<(i8, i8, i8), T> {
        let mut data = [0u8; 3];
        self.read_registers(Register::OFSX, &mut data)?;
        Ok((data[0] as i8, data[1] as i8, data[2] as i8))
    }

    pub fn set_axis_offsets(&mut self, x: i8, y: i8, z: i8) -> AdxlResult<(), T> {
        self.write_registers(Register::OFSX, &[x as u8, y as u8, z as u8])
    }

    // Rate and power

    pub fn is_low_power(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(LOW_POWER)
    }

    pub fn set_low_power(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(LOW_POWER, on)
    }

    pub fn datarate(&mut self) -> AdxlResult<DataRate, T> {
        let code = self.read_field(RATE)?;
        DataRate::try_from(code).or_else(|_| self.reject(Error::InvalidDataRate))
    }

    pub fn set_datarate(&mut self, datarate: DataRate) -> AdxlResult<(), T> {
        self.write_field(RATE, datarate.bits())
    }

    /// Output data rate in Hz.
    pub fn rate_hz(&mut self) -> AdxlResult<f32, T> {
        Ok(self.datarate()?.sample_rate())
    }

    /// Pick the highest rate code not above `hz`. Accepts 6.25 to 3200 Hz.
    pub fn set_rate_hz(&mut self, hz: f32) -> AdxlResult<(), T> {
        if !(6.25..=3200.0).contains(&hz) {
            return self.reject(Error::InvalidDataRate);
        }

        let steps = (hz / 6.25) as u32;
        let code = (31 - steps.leading_zeros()) as u8 + DataRate::Hz_6_25.bits();
        self.write_field(RATE, code)
    }

    /// Raw `BW_RATE` byte.
    pub fn bw_code(&mut self) -> AdxlResult<u8, T> {
        self.read_register(Register::BW_RATE)
    }

    /// Write the whole `BW_RATE` byte. Accepts codes `0x06` (6.25 Hz) to
    /// `0x0F` (3200 Hz); this also clears the low-power bit.
    pub fn set_bw_code(&mut self, code: u8) -> AdxlResult<(), T> {
        if !(DataRate::Hz_6_25.bits()..=DataRate::Hz_3200.bits()).contains(&code) {
            return self.reject(Error::InvalidArgument);
        }

        self.write_register(Register::BW_RATE, code)
    }

    pub fn is_measuring(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(MEASURE)
    }

    pub fn set_measure(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(MEASURE, on)
    }

    /// Link activity and inactivity so each is only detected after the
    /// other.
    pub fn set_link(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(LINK, on)
    }

    /// Drop into sleep automatically on inactivity. Needs link set.
    pub fn set_auto_sleep(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(AUTO_SLEEP, on)
    }

    pub fn set_sleep(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(SLEEP, on)
    }

    pub fn set_wakeup(&mut self, wakeup: Wakeup) -> AdxlResult<(), T> {
        self.write_field(WAKEUP, wakeup as u8)
    }

    // Data format

    pub fn range(&mut self) -> AdxlResult<Range, T> {
        let code = self.read_field(RANGE)?;
        Range::try_from(code).or_else(|_| self.reject(Error::InvalidRange))
    }

    pub fn set_range(&mut self, range: Range) -> AdxlResult<(), T> {
        self.write_field(RANGE, range.bits())?;
        self.update_gains()
    }

    /// Set the range from a g value: 2, 4, 8 or 16.
    pub fn set_range_g(&mut self, g: u8) -> AdxlResult<(), T> {
        match Range::from_g(g) {
            Some(range) => self.set_range(range),
            None => self.reject(Error::InvalidRange),
        }
    }

    pub fn is_full_resolution(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(FULL_RES)
    }

    /// Full resolution keeps 3.9 mg/LSB at every range; otherwise samples
    /// are 10 bits wide.
    pub fn set_full_resolution(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(FULL_RES, on)?;
        self.update_gains()
    }

    pub fn justify(&mut self) -> AdxlResult<Justify, T> {
        Ok(match self.read_field(JUSTIFY)? {
            0 => Justify::Right,
            _ => Justify::Left,
        })
    }

    /// Sample alignment. Recomputes the gain table so `read_acceleration`
    /// stays in g.
    pub fn set_justify(&mut self, justify: Justify) -> AdxlResult<(), T> {
        self.write_field(JUSTIFY, justify as u8)?;
        self.update_gains()
    }

    pub fn interrupt_polarity(&mut self) -> AdxlResult<InterruptPolarity, T> {
        Ok(InterruptPolarity::from_bit(self.read_field(INT_INVERT)?))
    }

    pub fn set_interrupt_polarity(&mut self, polarity: InterruptPolarity) -> AdxlResult<(), T> {
        self.write_field(INT_INVERT, polarity as u8)
    }

    pub fn set_self_test(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(SELF_TEST, on)
    }

    /// Three-wire (`true`) or four-wire SPI.
    pub fn set_spi_3wire(&mut self, on: bool) -> AdxlResult<(), T> {
        self.write_flag(SPI_3WIRE, on)
    }

    // FIFO

    /// Watermark `samples` is clamped to 31.
    pub fn set_fifo_ctl(
        &mut self,
        mode: FifoMode,
        trigger: InterruptPin,
        samples: u8,
    ) -> AdxlResult<(), T> {
        let mut value = FIFO_MODE.insert(0, mode as u8);
        value = FIFO_TRIGGER.insert(value, trigger as u8);
        value = FIFO_SAMPLES.insert(value, samples.min(31));
        self.write_register(Register::FIFO_CTL, value)
    }

    pub fn fifo_mode(&mut self) -> AdxlResult<FifoMode, T> {
        let code = self.read_field(FIFO_MODE)?;
        FifoMode::try_from(code).or_else(|_| self.reject(Error::InvalidArgument))
    }

    /// Number of samples waiting in the FIFO.
    pub fn fifo_entries(&mut self) -> AdxlResult<u8, T> {
        self.read_field(FIFO_ENTRIES)
    }

    pub fn is_fifo_triggered(&mut self) -> AdxlResult<bool, T> {
        self.read_flag(FIFO_TRIG)
    }

    // Interrupts

    /// Raw `INT_SOURCE` byte; test it with [`triggered`]. Reading clears
    /// the latched events.
    pub fn interrupt_source_bits(&mut self) -> AdxlResult<u8, T> {
        self.read_register(Register::INT_SOURCE)
    }

    pub fn interrupt_source(&mut self) -> AdxlResult<InterruptSource, T> {
        Ok(InterruptSource::from_bits(self.interrupt_source_bits()?))
    }

    pub fn is_interrupt_enabled(&mut self, interrupt: Interrupt) -> AdxlResult<bool, T> {
        self.read_flag(interrupt.enable_field())
    }

    pub fn set_interrupt(&mut self, interrupt: Interrupt, on: bool) -> AdxlResult<(), T> {
        self.write_flag(interrupt.enable_field(), on)
    }

    pub fn interrupt_mapping(&mut self, interrupt: Interrupt) -> AdxlResult<InterruptPin, T> {
        Ok(InterruptPin::from_bit(self.read_field(interrupt.map_field())?))
    }

    pub fn set_interrupt_mapping(
        &mut self,
        interrupt: Interrupt,
        pin: InterruptPin,
    ) -> AdxlResult<(), T> {
        self.write_field(interrupt.map_field(), pin as u8)
    }

    pub fn activity_interrupt(&mut self, on: bool) -> AdxlResult<(), T> {
        self.set_interrupt(Interrupt::Activity, on)
    }

    pub fn inactivity_interrupt(&mut self, on: bool) -> AdxlResult<(), T> {
        self.set_interrupt(Interrupt::Inactivity, on)
    }

    pub fn free_fall_interrupt(&mut self, on: bool) -> AdxlResult<(), T> {
        self.set_interrupt(Interrupt::FreeFall, on)
    }

    pub fn single_tap_interrupt(&mut self, on: bool) -> AdxlResult<(), T> {
        self.set_interrupt(Interrupt::SingleTap, on)
    }

    pub fn double_tap_interrupt(&mut self, on: bool) -> AdxlResult<(), T> {
        self.set_interrupt(Interrupt::DoubleTap, on)
    }
}

fn tap_axis_field(axis: Axis) -> Field {
    [TAP_X_EN, TAP_Y_EN, TAP_Z_EN][axis.index()]
}

impl<T> RawAccelerometer<I16x3> for Adxl345<T>
where
    T: Transport,
{
    type Error = Error<T::BusError, T::PinError>;

    /// Get raw acceleration data from the accelerometer.
    fn accel_raw(&mut self) -> Result<I16x3, AccelerometerError<Self::Error>> {
        Ok(self.read_sample()?)
    }
}

impl<T> Accelerometer for Adxl345<T>
where
    T: Transport,
{
    type Error = Error<T::BusError, T::PinError>;

    /// Get normalized ±g reading from the accelerometer.
    fn accel_norm(&mut self) -> Result<F32x3, AccelerometerError<Self::Error>> {
        Ok(self.read_acceleration()?)
    }

    /// Get the sample rate of the accelerometer data.
    fn sample_rate(&mut self) -> Result<f32, AccelerometerError<Self::Error>> {
        Ok(self.rate_hz()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_table() {
        assert_eq!(gain(true, Range::G16, Justify::Right), SCALE_G_PER_LSB);
        assert_eq!(gain(false, Range::G2, Justify::Right), SCALE_G_PER_LSB);
        assert_eq!(gain(false, Range::G4, Justify::Right), SCALE_G_PER_LSB * 2.0);
        assert_eq!(gain(false, Range::G16, Justify::Right), SCALE_G_PER_LSB * 8.0);
    }

    #[test]
    fn left_justified_gain_undoes_alignment() {
        assert_eq!(resolution_bits(false, Range::G16), 10);
        assert_eq!(resolution_bits(true, Range::G16), 13);
        assert_eq!(gain(false, Range::G2, Justify::Left), SCALE_G_PER_LSB / 64.0);
        assert_eq!(gain(true, Range::G4, Justify::Left), SCALE_G_PER_LSB / 32.0);
        assert_eq!(gain(true, Range::G16, Justify::Left), SCALE_G_PER_LSB / 8.0);
        assert_eq!(gain(false, Range::G8, Justify::Left), SCALE_G_PER_LSB * 4.0 / 64.0);
    }

    #[test]
    fn error_codes() {
        let bus: Error<(), ()> = Error::Bus(());
        assert_eq!(bus.code(), ErrorCode::ReadError);
        assert_eq!(Error::<(), ()>::InvalidRange.code(), ErrorCode::BadArgument);
        assert_eq!(Error::<(), ()>::WriteToReadOnly.code(), ErrorCode::BadArgument);
    }
}
