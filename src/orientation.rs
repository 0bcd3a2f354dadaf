//! Roll and pitch from a single acceleration vector, R-xyz rotation order.

use core::f32::consts::PI;

use libm::{atan2f, sqrtf};

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Tilt angles in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RollPitch {
    pub roll: f32,
    pub pitch: f32,
}

/// Compute roll and pitch (degrees) from an acceleration vector in any
/// consistent unit.
///
/// `roll = atan2(y, sqrt(x² + z²))`, `pitch = atan2(-x, sqrt(y² + z²))`.
/// At `x = y = z = 0` both angles come out as 0, which carries no
/// orientation information.
pub fn roll_pitch(x: f32, y: f32, z: f32) -> RollPitch {
    let roll = atan2f(y, sqrtf(x * x + z * z)) * RAD_TO_DEG;
    let pitch = atan2f(-x, sqrtf(y * y + z * z)) * RAD_TO_DEG;

    RollPitch { roll, pitch }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn level() {
        let rp = roll_pitch(0.0, 0.0, 100.0);
        assert!(close(rp.roll, 0.0));
        assert!(close(rp.pitch, 0.0));
    }

    #[test]
    fn rolled_onto_y() {
        let rp = roll_pitch(0.0, 100.0, 0.0);
        assert!(close(rp.roll, 90.0));
        assert!(close(rp.pitch, 0.0));
    }

    #[test]
    fn pitch_sign_follows_negative_x() {
        let rp = roll_pitch(100.0, 0.0, 100.0);
        assert!(close(rp.pitch, -45.0));
        assert!(close(rp.roll, 0.0));

        let rp = roll_pitch(-100.0, 0.0, 100.0);
        assert!(close(rp.pitch, 45.0));
    }
}
