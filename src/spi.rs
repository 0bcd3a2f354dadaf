use core::fmt::Debug;

use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::OutputPin;

use crate::{Error, Transport};

/// Read/write bit of the SPI address byte.
const READ: u8 = 0x80;
/// Multi-byte bit of the SPI address byte.
const MULTI_BYTE: u8 = 0x40;

/// Four-wire SPI binding for the `ADXL345` (SPI mode 3).
pub struct SpiInterface<SPI, CS> {
    /// Underlying SPI device
    spi: SPI,
    /// Active-low chip-select pin
    cs: CS,
}

impl<SPI, CS, ESPI, ECS> SpiInterface<SPI, CS>
where
    SPI: Write<u8, Error = ESPI> + Transfer<u8, Error = ESPI>,
    CS: OutputPin<Error = ECS>,
    ESPI: Debug,
    ECS: Debug,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        SpiInterface { spi, cs }
    }

    /// Give back the SPI peripheral and the chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Run `f` with chip select asserted. Chip select is released again
    /// whether or not the bus transfer succeeded; if both fail, the bus
    /// error is returned.
    fn selected<F>(&mut self, f: F) -> Result<(), Error<ESPI, ECS>>
    where
        F: FnOnce(&mut SPI) -> Result<(), ESPI>,
    {
        self.cs.set_low().map_err(Error::Pin)?;
        let res = f(&mut self.spi).map_err(Error::Bus);
        let released = self.cs.set_high().map_err(Error::Pin);
        // A bus error outranks a failed release.
        res.and(released)
    }
}

fn command(address: u8, len: usize) -> u8 {
    if len > 1 {
        address | MULTI_BYTE
    } else {
        address
    }
}

impl<SPI, CS, ESPI, ECS> Transport for SpiInterface<SPI, CS>
where
    SPI: Write<u8, Error = ESPI> + Transfer<u8, Error = ESPI>,
    CS: OutputPin<Error = ECS>,
    ESPI: Debug,
    ECS: Debug,
{
    type BusError = ESPI;
    type PinError = ECS;

    fn write_bytes(&mut self, address: u8, data: &[u8]) -> Result<(), Error<ESPI, ECS>> {
        let cmd = command(address, data.len());
        self.selected(|spi| spi.write(&[cmd]).and_then(|_| spi.write(data)))
    }

    fn read_bytes(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Error<ESPI, ECS>> {
        let len = buf.len();
        let cmd = command(address, len) | READ;
        for byte in buf.iter_mut() {
            *byte = 0;
        }

        self.selected(|spi| spi.write(&[cmd]).and_then(|_| spi.transfer(buf).map(|_| ())))?;
        Ok(len)
    }
}
