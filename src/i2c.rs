use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::register::SlaveAddr;
use crate::{Error, Transport, MAX_WRITE_LEN};

/// I²C binding for the `ADXL345`.
pub struct I2cInterface<I2C> {
    /// Underlying I²C device
    i2c: I2C,

    /// Current I²C slave address
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    pub fn new(i2c: I2C, address: SlaveAddr) -> Self {
        Self::with_address(i2c, address.addr())
    }

    /// Use a raw 7-bit address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        I2cInterface { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I²C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Transport for I2cInterface<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
    E: Debug,
{
    type BusError = E;
    type PinError = core::convert::Infallible;

    /// Register address followed by the payload, in one transaction.
    fn write_bytes(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> Result<(), Error<Self::BusError, Self::PinError>> {
        if data.len() > MAX_WRITE_LEN {
            return Err(Error::InvalidArgument);
        }

        let mut frame = [0u8; MAX_WRITE_LEN + 1];
        frame[0] = address;
        frame[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &frame[..=data.len()])
            .map_err(Error::Bus)
    }

    /// Register address, repeated start, then `buf.len()` bytes back.
    fn read_bytes(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<usize, Error<Self::BusError, Self::PinError>> {
        self.i2c
            .write_read(self.address, &[address], buf)
            .map_err(Error::Bus)
            .and(Ok(buf.len()))
    }
}
