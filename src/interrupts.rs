use crate::register::*;

/// Interrupt sources, named after their bit in `INT_ENABLE`, `INT_MAP` and
/// `INT_SOURCE`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Interrupt {
    DataReady  = 7,
    SingleTap  = 6,
    DoubleTap  = 5,
    Activity   = 4,
    Inactivity = 3,
    FreeFall   = 2,
    Watermark  = 1,
    Overrun    = 0,
}

impl Interrupt {
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u8 {
        1 << self.bit()
    }

    pub fn enable_field(self) -> Field {
        Field::bit(Register::INT_ENABLE, self.bit())
    }

    pub fn map_field(self) -> Field {
        Field::bit(Register::INT_MAP, self.bit())
    }
}

/// Output pin an interrupt is routed to. A cleared `INT_MAP` bit selects
/// INT1.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptPin {
    Int1 = 0,
    Int2 = 1,
}

impl InterruptPin {
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            InterruptPin::Int1
        } else {
            InterruptPin::Int2
        }
    }
}

/// Level of the INT pins when asserted, `DATA_FORMAT` `INT_INVERT` bit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptPolarity {
    ActiveHigh = 0,
    ActiveLow  = 1,
}

impl InterruptPolarity {
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            InterruptPolarity::ActiveHigh
        } else {
            InterruptPolarity::ActiveLow
        }
    }
}

/// Test `mask` against an `INT_SOURCE` value read earlier. No bus access.
pub fn triggered(interrupts: u8, mask: u8) -> bool {
    interrupts & mask != 0
}

/// Decoded `INT_SOURCE` register.
///
/// Reading `INT_SOURCE` clears the latched event bits on the chip, so every
/// flag is decoded from the same read.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource {
    pub data_ready: bool,
    pub single_tap: bool,
    pub double_tap: bool,
    pub activity: bool,
    pub inactivity: bool,
    pub free_fall: bool,
    pub watermark: bool,
    pub overrun: bool,
}

impl InterruptSource {
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            data_ready: bits & (1 << 7) != 0,
            single_tap: bits & (1 << 6) != 0,
            double_tap: bits & (1 << 5) != 0,
            activity: bits & (1 << 4) != 0,
            inactivity: bits & (1 << 3) != 0,
            free_fall: bits & (1 << 2) != 0,
            watermark: bits & (1 << 1) != 0,
            overrun: bits & 1 != 0,
        }
    }

    pub const fn bits(self) -> u8 {
        (self.data_ready as u8) << 7
            | (self.single_tap as u8) << 6
            | (self.double_tap as u8) << 5
            | (self.activity as u8) << 4
            | (self.inactivity as u8) << 3
            | (self.free_fall as u8) << 2
            | (self.watermark as u8) << 1
            | (self.overrun as u8)
    }

    pub fn contains(self, interrupt: Interrupt) -> bool {
        triggered(self.bits(), interrupt.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggered_tests_the_mask() {
        assert!(triggered(0b0000_0100, 0x04));
        assert!(!triggered(0b0000_0100, 0x02));
        assert!(triggered(0b0001_0000, Interrupt::Activity.mask()));
        assert!(!triggered(0, 0xFF));
    }

    #[test]
    fn source_decoding() {
        let source = InterruptSource::from_bits(0b1001_0100);
        assert!(source.data_ready);
        assert!(source.activity);
        assert!(source.free_fall);
        assert!(!source.single_tap);
        assert!(!source.overrun);
        assert_eq!(source.bits(), 0b1001_0100);
        assert!(source.contains(Interrupt::FreeFall));
        assert!(!source.contains(Interrupt::Inactivity));
    }

    #[test]
    fn interrupt_fields() {
        assert_eq!(Interrupt::SingleTap.mask(), 0b0100_0000);
        assert_eq!(Interrupt::Overrun.enable_field().mask(), 0b0000_0001);
        assert_eq!(Interrupt::DoubleTap.map_field().register, Register::INT_MAP);
    }
}
