//! Motor modes and servo enable states.

use crate::registers::{MOTOR_INVERT, MOTOR_MODE_MASK, MOTOR_PENDING, MOTOR_RESET};

/// Operating mode of a motor channel (low two bits of the mode register).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MotorMode {
    /// Power control; zero speed lets the motor float.
    PowerFloat = 0,
    /// Power control; zero speed brakes the motor.
    PowerBrake = 1,
    /// Closed-loop speed control using the encoder.
    SpeedControl = 2,
    /// Run to the target encoder position.
    SlewToPosition = 3,
}

impl MotorMode {
    /// Mode for a raw value in 0–3, `None` otherwise.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(MotorMode::PowerFloat),
            1 => Some(MotorMode::PowerBrake),
            2 => Some(MotorMode::SpeedControl),
            3 => Some(MotorMode::SlewToPosition),
            _ => None,
        }
    }

    /// Mode encoded in the low two bits of a mode register byte.
    pub(crate) fn from_register(byte: u8) -> Self {
        match byte & MOTOR_MODE_MASK {
            0 => MotorMode::PowerFloat,
            1 => MotorMode::PowerBrake,
            2 => MotorMode::SpeedControl,
            _ => MotorMode::SlewToPosition,
        }
    }
}

impl From<MotorMode> for u8 {
    fn from(mode: MotorMode) -> u8 {
        mode as u8
    }
}

/// Flag bits written alongside the mode of a motor channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorModeFlags {
    /// Reverse the motor's direction.
    pub invert: bool,
    /// Hold the new command until the start flag is written.
    pub pending: bool,
    /// Reset the channel, including its encoder count.
    pub reset: bool,
}

impl MotorModeFlags {
    /// Pack the flags and a validated mode into a mode register byte.
    pub(crate) fn pack(self, mode: MotorMode) -> u8 {
        let mut byte = u8::from(mode);
        if self.invert {
            byte |= MOTOR_INVERT;
        }
        if self.pending {
            byte |= MOTOR_PENDING;
        }
        if self.reset {
            byte |= MOTOR_RESET;
        }
        byte
    }
}

/// Requested change to one servo's pulse enable bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoState {
    /// Leave the bit as it is.
    Keep,
    /// Stop generating pulses.
    Disable,
    /// Start generating pulses.
    Enable,
}

impl ServoState {
    /// `-1` keeps, `0` disables, `1` enables; anything else is `None`.
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(ServoState::Keep),
            0 => Some(ServoState::Disable),
            1 => Some(ServoState::Enable),
            _ => None,
        }
    }

    /// Apply this state to bit `bit` of an enable mask.
    pub(crate) fn apply(self, mask: u8, bit: usize) -> u8 {
        match self {
            ServoState::Keep => mask,
            ServoState::Disable => mask & !(1 << bit),
            ServoState::Enable => mask | (1 << bit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_bits_rejects_out_of_range() {
        assert_eq!(MotorMode::from_bits(3), Some(MotorMode::SlewToPosition));
        assert_eq!(MotorMode::from_bits(4), None);
        assert_eq!(MotorMode::from_bits(0xFF), None);
    }

    #[test]
    fn mode_from_register_ignores_flag_bits() {
        assert_eq!(MotorMode::from_register(0x80 | 0x10 | 0x02), MotorMode::SpeedControl);
        assert_eq!(MotorMode::from_register(0x0C), MotorMode::PowerFloat);
    }

    #[test]
    fn flags_pack_into_mode_byte() {
        let flags = MotorModeFlags {
            invert: true,
            pending: false,
            reset: true,
        };
        assert_eq!(flags.pack(MotorMode::SlewToPosition), 0x17);
        assert_eq!(MotorModeFlags::default().pack(MotorMode::PowerBrake), 0x01);

        let all = MotorModeFlags {
            invert: true,
            pending: true,
            reset: true,
        };
        assert_eq!(all.pack(MotorMode::PowerFloat), 0x1C);
    }

    #[test]
    fn servo_state_applies_per_bit() {
        assert_eq!(ServoState::Keep.apply(0b1010, 1), 0b1010);
        assert_eq!(ServoState::Disable.apply(0b1010, 1), 0b1000);
        assert_eq!(ServoState::Enable.apply(0b1010, 0), 0b1011);
        // Bits above the four channels survive.
        assert_eq!(ServoState::Disable.apply(0xF0 | 0b0001, 0), 0xF0);
    }

    #[test]
    fn servo_state_from_i8() {
        assert_eq!(ServoState::from_i8(-1), Some(ServoState::Keep));
        assert_eq!(ServoState::from_i8(2), None);
        assert_eq!(ServoState::from_i8(-2), None);
    }
}
