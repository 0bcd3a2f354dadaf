use adxl345::{Adxl345, Error, ErrorCode, Transport};

/// Register file that always delivers one byte less than asked for.
struct TruncatingBus {
    registers: [u8; 0x3A],
}

impl Transport for TruncatingBus {
    type BusError = ();
    type PinError = ();

    fn write_bytes(&mut self, address: u8, data: &[u8]) -> Result<(), Error<(), ()>> {
        let start = address as usize;
        self.registers[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn read_bytes(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Error<(), ()>> {
        let n = buf.len() - 1;
        let start = address as usize;
        buf[..n].copy_from_slice(&self.registers[start..start + n]);
        Ok(n)
    }
}

#[test]
fn short_read_is_a_read_error() {
    let mut adxl = Adxl345::new(TruncatingBus { registers: [0; 0x3A] });

    assert!(matches!(adxl.read_sample(), Err(Error::ShortRead(5))));
    assert!(adxl.is_error());
    assert_eq!(adxl.error_code(), ErrorCode::ReadError);

    adxl.set_axis_offsets(1, 2, 3).unwrap();
    assert!(!adxl.is_error());
    assert_eq!(adxl.error_code(), ErrorCode::NoError);
}
