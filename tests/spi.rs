use adxl345::{Adxl345, Error, ErrorCode, SpiInterface};
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTrans};
use embedded_hal_mock::spi::{Mock as SpiMock, Transaction as SpiTrans};

fn cs_cycles(count: usize) -> Vec<PinTrans> {
    (0..count)
        .flat_map(|_| vec![PinTrans::set(PinState::Low), PinTrans::set(PinState::High)])
        .collect()
}

#[test]
fn single_register_read_sets_read_bit() {
    let mut spi = SpiMock::new(&[SpiTrans::write(vec![0x80]), SpiTrans::transfer(vec![0], vec![0xE5])]);
    let mut cs = PinMock::new(&cs_cycles(1));
    let mut adxl = Adxl345::new(SpiInterface::new(spi.clone(), cs.clone()));

    assert_eq!(adxl.device_id().unwrap(), 0xE5);
    spi.done();
    cs.done();
}

#[test]
fn sample_read_uses_multi_byte_burst() {
    let mut spi = SpiMock::new(&[
        SpiTrans::write(vec![0x32 | 0x80 | 0x40]),
        SpiTrans::transfer(vec![0; 6], vec![0x10, 0x00, 0x20, 0x00, 0x30, 0x00]),
    ]);
    let mut cs = PinMock::new(&cs_cycles(1));
    let mut adxl = Adxl345::new(SpiInterface::new(spi.clone(), cs.clone()));

    let sample = adxl.read_sample().unwrap();
    assert_eq!((sample.x, sample.y, sample.z), (16, 32, 48));
    spi.done();
    cs.done();
}

#[test]
fn field_write_is_read_modify_write() {
    let mut spi = SpiMock::new(&[
        SpiTrans::write(vec![0x2C | 0x80]),
        SpiTrans::transfer(vec![0], vec![0x0A]),
        SpiTrans::write(vec![0x2C]),
        SpiTrans::write(vec![0x1A]),
    ]);
    let mut cs = PinMock::new(&cs_cycles(2));
    let mut adxl = Adxl345::new(SpiInterface::new(spi.clone(), cs.clone()));

    adxl.set_low_power(true).unwrap();
    spi.done();
    cs.done();
}

#[test]
fn burst_write_sets_multi_byte_bit() {
    let mut spi = SpiMock::new(&[
        SpiTrans::write(vec![0x1E | 0x40]),
        SpiTrans::write(vec![0x01, 0x02, 0x03]),
    ]);
    let mut cs = PinMock::new(&cs_cycles(1));
    let mut adxl = Adxl345::new(SpiInterface::new(spi.clone(), cs.clone()));

    adxl.set_axis_offsets(1, 2, 3).unwrap();
    spi.done();
    cs.done();
}

/// SPI bus whose every transfer fails.
struct BrokenSpi;

#[derive(Debug)]
struct BusFault;

impl Write<u8> for BrokenSpi {
    type Error = BusFault;

    fn write(&mut self, _words: &[u8]) -> Result<(), BusFault> {
        Err(BusFault)
    }
}

impl Transfer<u8> for BrokenSpi {
    type Error = BusFault;

    fn transfer<'w>(&mut self, _words: &'w mut [u8]) -> Result<&'w [u8], BusFault> {
        Err(BusFault)
    }
}

#[test]
fn chip_select_released_on_bus_error() {
    let mut cs = PinMock::new(&cs_cycles(2));
    let mut adxl = Adxl345::new(SpiInterface::new(BrokenSpi, cs.clone()));

    assert!(matches!(adxl.read_sample(), Err(Error::Bus(BusFault))));
    assert!(adxl.is_error());
    assert_eq!(adxl.error_code(), ErrorCode::ReadError);

    assert!(matches!(adxl.set_tap_threshold(0x10), Err(Error::Bus(BusFault))));
    cs.done();
}

/// Chip select that can be asserted but never released.
struct StuckPin;

#[derive(Debug, PartialEq)]
struct PinFault;

impl OutputPin for StuckPin {
    type Error = PinFault;

    fn set_low(&mut self) -> Result<(), PinFault> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }
}

#[test]
fn bus_error_outranks_release_failure() {
    let mut adxl = Adxl345::new(SpiInterface::new(BrokenSpi, StuckPin));
    assert!(matches!(adxl.device_id(), Err(Error::Bus(BusFault))));
}

#[test]
fn release_failure_reported_after_clean_transfer() {
    let mut spi = SpiMock::new(&[SpiTrans::write(vec![0x80]), SpiTrans::transfer(vec![0], vec![0xE5])]);
    let mut adxl = Adxl345::new(SpiInterface::new(spi.clone(), StuckPin));

    assert!(matches!(adxl.device_id(), Err(Error::Pin(PinFault))));
    assert_eq!(adxl.error_code(), ErrorCode::ReadError);
    spi.done();
}
