#![allow(non_camel_case_types)]

use num_enum::TryFromPrimitive;

/// Value of the `DEVID` register.
pub const DEVICE_ID: u8 = 0xE5;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    DEVID           = 0x00,
    THRESH_TAP      = 0x1D,
    OFSX            = 0x1E,
    OFSY            = 0x1F,
    OFSZ            = 0x20,
    DUR             = 0x21,
    LATENT          = 0x22,
    WINDOW          = 0x23,
    THRESH_ACT      = 0x24,
    THRESH_INACT    = 0x25,
    TIME_INACT      = 0x26,
    ACT_INACT_CTL   = 0x27,
    THRESH_FF       = 0x28,
    TIME_FF         = 0x29,
    TAP_AXES        = 0x2A,
    ACT_TAP_STATUS  = 0x2B,
    BW_RATE         = 0x2C,
    POWER_CTL       = 0x2D,
    INT_ENABLE      = 0x2E,
    INT_MAP         = 0x2F,
    INT_SOURCE      = 0x30,
    DATA_FORMAT     = 0x31,
    DATAX0          = 0x32,
    DATAX1          = 0x33,
    DATAY0          = 0x34,
    DATAY1          = 0x35,
    DATAZ0          = 0x36,
    DATAZ1          = 0x37,
    FIFO_CTL        = 0x38,
    FIFO_STATUS     = 0x39,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }

    pub fn read_only(self) -> bool {
        match self {
            Register::DEVID |
            Register::ACT_TAP_STATUS |
            Register::INT_SOURCE |
            Register::DATAX0 |
            Register::DATAX1 |
            Register::DATAY0 |
            Register::DATAY1 |
            Register::DATAZ0 |
            Register::DATAZ1 |
            Register::FIFO_STATUS => true,
            _ => false,
        }
    }
}

/// A bit field inside a single register byte: `width` bits starting at
/// bit `shift`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub register: Register,
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(register: Register, shift: u8, width: u8) -> Self {
        Field {
            register,
            shift,
            width,
        }
    }

    /// A field spanning the whole register.
    pub const fn byte(register: Register) -> Self {
        Self::new(register, 0, 8)
    }

    /// Single bit at position `bit`.
    pub const fn bit(register: Register, bit: u8) -> Self {
        Self::new(register, bit, 1)
    }

    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    pub const fn is_whole_register(self) -> bool {
        self.width == 8
    }

    /// Pull this field's value out of a register byte.
    pub const fn extract(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }

    /// Replace this field inside `byte`, leaving every other bit alone.
    /// Bits of `value` beyond the field width are dropped.
    pub const fn insert(self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

// THRESH_TAP .. TIME_FF are plain 8-bit values.
pub const TAP_THRESHOLD: Field = Field::byte(Register::THRESH_TAP);
pub const TAP_DURATION: Field = Field::byte(Register::DUR);
pub const TAP_LATENCY: Field = Field::byte(Register::LATENT);
pub const TAP_WINDOW: Field = Field::byte(Register::WINDOW);
pub const ACTIVITY_THRESHOLD: Field = Field::byte(Register::THRESH_ACT);
pub const INACTIVITY_THRESHOLD: Field = Field::byte(Register::THRESH_INACT);
pub const INACTIVITY_TIME: Field = Field::byte(Register::TIME_INACT);
pub const FREE_FALL_THRESHOLD: Field = Field::byte(Register::THRESH_FF);
pub const FREE_FALL_TIME: Field = Field::byte(Register::TIME_FF);

// ACT_INACT_CTL
pub const ACT_AC_COUPLED: Field = Field::bit(Register::ACT_INACT_CTL, 7);
pub const ACT_X_EN: Field = Field::bit(Register::ACT_INACT_CTL, 6);
pub const ACT_Y_EN: Field = Field::bit(Register::ACT_INACT_CTL, 5);
pub const ACT_Z_EN: Field = Field::bit(Register::ACT_INACT_CTL, 4);
pub const INACT_AC_COUPLED: Field = Field::bit(Register::ACT_INACT_CTL, 3);
pub const INACT_X_EN: Field = Field::bit(Register::ACT_INACT_CTL, 2);
pub const INACT_Y_EN: Field = Field::bit(Register::ACT_INACT_CTL, 1);
pub const INACT_Z_EN: Field = Field::bit(Register::ACT_INACT_CTL, 0);

// TAP_AXES
pub const TAP_SUPPRESS: Field = Field::bit(Register::TAP_AXES, 3);
pub const TAP_X_EN: Field = Field::bit(Register::TAP_AXES, 2);
pub const TAP_Y_EN: Field = Field::bit(Register::TAP_AXES, 1);
pub const TAP_Z_EN: Field = Field::bit(Register::TAP_AXES, 0);

// ACT_TAP_STATUS
pub const ACT_X_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 6);
pub const ACT_Y_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 5);
pub const ACT_Z_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 4);
pub const ASLEEP: Field = Field::bit(Register::ACT_TAP_STATUS, 3);
pub const TAP_X_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 2);
pub const TAP_Y_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 1);
pub const TAP_Z_SRC: Field = Field::bit(Register::ACT_TAP_STATUS, 0);

// BW_RATE
pub const LOW_POWER: Field = Field::bit(Register::BW_RATE, 4);
pub const RATE: Field = Field::new(Register::BW_RATE, 0, 4);

// POWER_CTL
pub const LINK: Field = Field::bit(Register::POWER_CTL, 5);
pub const AUTO_SLEEP: Field = Field::bit(Register::POWER_CTL, 4);
pub const MEASURE: Field = Field::bit(Register::POWER_CTL, 3);
pub const SLEEP: Field = Field::bit(Register::POWER_CTL, 2);
pub const WAKEUP: Field = Field::new(Register::POWER_CTL, 0, 2);

// DATA_FORMAT
pub const SELF_TEST: Field = Field::bit(Register::DATA_FORMAT, 7);
pub const SPI_3WIRE: Field = Field::bit(Register::DATA_FORMAT, 6);
pub const INT_INVERT: Field = Field::bit(Register::DATA_FORMAT, 5);
pub const FULL_RES: Field = Field::bit(Register::DATA_FORMAT, 3);
pub const JUSTIFY: Field = Field::bit(Register::DATA_FORMAT, 2);
pub const RANGE: Field = Field::new(Register::DATA_FORMAT, 0, 2);

// FIFO_CTL
pub const FIFO_MODE: Field = Field::new(Register::FIFO_CTL, 6, 2);
pub const FIFO_TRIGGER: Field = Field::bit(Register::FIFO_CTL, 5);
pub const FIFO_SAMPLES: Field = Field::new(Register::FIFO_CTL, 0, 5);

// FIFO_STATUS
pub const FIFO_TRIG: Field = Field::bit(Register::FIFO_STATUS, 7);
pub const FIFO_ENTRIES: Field = Field::new(Register::FIFO_STATUS, 0, 6);

/// I²C slave address, selected by the level of the SDO/ALT ADDRESS pin.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SlaveAddr {
    /// SDO pulled low.
    Default = 0x53,
    /// SDO pulled high.
    Alternate = 0x1D,
}

impl SlaveAddr {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl Default for SlaveAddr {
    fn default() -> Self {
        SlaveAddr::Default
    }
}

/// Output data rate, `BW_RATE` bits 3:0. The bandwidth is half the rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataRate {
    Hz_3200 = 0b1111,
    Hz_1600 = 0b1110,
    Hz_800  = 0b1101,
    Hz_400  = 0b1100,
    Hz_200  = 0b1011,
    Hz_100  = 0b1010,
    Hz_50   = 0b1001,
    Hz_25   = 0b1000,
    Hz_12_5 = 0b0111,
    Hz_6_25 = 0b0110,
    Hz_3_13 = 0b0101,
    Hz_1_56 = 0b0100,
    Hz_0_78 = 0b0011,
    Hz_0_39 = 0b0010,
    Hz_0_20 = 0b0001,
    Hz_0_10 = 0b0000,
}

impl DataRate {
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Output rate in Hz: 6.25 Hz doubled or halved once per code step
    /// away from `0b0110`.
    pub fn sample_rate(self) -> f32 {
        libm::ldexpf(6.25, self.bits() as i32 - 6)
    }
}

impl Default for DataRate {
    fn default() -> Self {
        DataRate::Hz_100
    }
}

/// Measurement range, `DATA_FORMAT` bits 1:0.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    G16 = 0b11,
    G8  = 0b10,
    G4  = 0b01,
    G2  = 0b00,
}

impl Range {
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Full-scale value in g.
    pub fn g(self) -> u8 {
        2 << self.bits()
    }

    pub fn from_g(g: u8) -> Option<Self> {
        match g {
            2 => Some(Range::G2),
            4 => Some(Range::G4),
            8 => Some(Range::G8),
            16 => Some(Range::G16),
            _ => None,
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::G2
    }
}

/// Sample alignment, `DATA_FORMAT` bit 2.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Justify {
    Right = 0,
    Left  = 1,
}

impl Default for Justify {
    fn default() -> Self {
        Justify::Right
    }
}

/// Reading frequency while asleep, `POWER_CTL` bits 1:0.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Wakeup {
    Hz_8 = 0b00,
    Hz_4 = 0b01,
    Hz_2 = 0b10,
    Hz_1 = 0b11,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoMode {
    Bypass  = 0b00,
    Fifo    = 0b01,
    Stream  = 0b10,
    Trigger = 0b11,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::TryFrom;

    #[test]
    fn field_masks() {
        assert_eq!(MEASURE.mask(), 0b0000_1000);
        assert_eq!(RATE.mask(), 0b0000_1111);
        assert_eq!(FIFO_MODE.mask(), 0b1100_0000);
        assert_eq!(FIFO_ENTRIES.mask(), 0b0011_1111);
        assert_eq!(TAP_THRESHOLD.mask(), 0xFF);
    }

    #[test]
    fn insert_then_extract_keeps_other_bits() {
        let original = 0b1010_0101;
        for value in 0..4 {
            let byte = RANGE.insert(original, value);
            assert_eq!(RANGE.extract(byte), value);
            assert_eq!(byte & !RANGE.mask(), original & !RANGE.mask());
        }

        let byte = FIFO_SAMPLES.insert(0b1110_0000, 0b1_0110);
        assert_eq!(byte, 0b1111_0110);
        assert_eq!(FIFO_SAMPLES.extract(byte), 0b1_0110);
    }

    #[test]
    fn single_bit_set_and_clear_restores_byte() {
        let original = 0b0000_1010;
        let set = LOW_POWER.insert(original, 1);
        assert_eq!(set, 0b0001_1010);
        assert_eq!(LOW_POWER.insert(set, 0), original);
    }

    #[test]
    fn oversized_value_is_truncated_to_field() {
        assert_eq!(WAKEUP.insert(0b1111_0000, 0xFF), 0b1111_0011);
    }

    #[test]
    fn data_rate_codes() {
        assert_eq!(DataRate::Hz_100.sample_rate(), 100.0);
        assert_eq!(DataRate::Hz_3200.sample_rate(), 3200.0);
        assert_eq!(DataRate::Hz_6_25.sample_rate(), 6.25);
        assert_eq!(DataRate::try_from(0b1101).unwrap(), DataRate::Hz_800);
    }

    #[test]
    fn range_from_g() {
        assert_eq!(Range::from_g(8), Some(Range::G8));
        assert_eq!(Range::from_g(3), None);
        assert_eq!(Range::G16.g(), 16);
        assert_eq!(Range::try_from(0b01).unwrap(), Range::G4);
    }

    #[test]
    fn read_only_registers() {
        assert!(Register::INT_SOURCE.read_only());
        assert!(Register::DATAX0.read_only());
        assert!(!Register::POWER_CTL.read_only());
    }
}
