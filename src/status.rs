//! Values read back from the controller.

use heapless::String;

use crate::modes::MotorMode;
use crate::registers::{
    BATTERY_MV_PER_UNIT, IDENTITY_LEN, MOTOR_BUSY, MOTOR_INVERT, MOTOR_PENDING,
    STATUS_BATTERY_LOW, STATUS_FAULT,
};

/// Identity strings reported by the controller.
///
/// A genuine board reports a version of the form `"Vn.m    "`, manufacturer
/// `"HiTechnc"` and type `"M4S4cont"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerInfo {
    pub version: String<IDENTITY_LEN>,
    pub manufacturer: String<IDENTITY_LEN>,
    pub controller_type: String<IDENTITY_LEN>,
}

impl ControllerInfo {
    /// Whether the identity matches a HiTechnic Matrix controller.
    ///
    /// Nothing in the driver enforces this; it is offered for callers that
    /// want to verify what is on the bus.
    pub fn is_matrix_controller(&self) -> bool {
        self.manufacturer.as_str() == "HiTechnc" && self.controller_type.as_str() == "M4S4cont"
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControllerInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ControllerInfo(version={=str}, manufacturer={=str}, type={=str})",
            self.version.as_str(),
            self.manufacturer.as_str(),
            self.controller_type.as_str(),
        )
    }
}

/// Interpret a raw identity block as ASCII. Non-ASCII bytes become `'?'`.
pub(crate) fn ascii_string(bytes: &[u8; IDENTITY_LEN]) -> String<IDENTITY_LEN> {
    let mut out = String::new();
    for &b in bytes {
        let c = if b.is_ascii() { b as char } else { '?' };
        // Each char is one byte, so eight always fit.
        let _ = out.push(c);
    }
    out
}

/// Global fault and battery state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerStatus {
    pub battery_low: bool,
    pub fault: bool,
    /// Raw battery level, 40 mV per unit.
    pub battery_level: u8,
}

impl ControllerStatus {
    pub(crate) fn from_registers(status: u8, battery_level: u8) -> Self {
        Self {
            battery_low: status & STATUS_BATTERY_LOW != 0,
            fault: status & STATUS_FAULT != 0,
            battery_level,
        }
    }

    /// Battery voltage in millivolts.
    pub fn battery_millivolts(&self) -> u16 {
        u16::from(self.battery_level) * BATTERY_MV_PER_UNIT
    }
}

/// Snapshot of one motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorStatus {
    /// Encoder count.
    pub position: i32,
    /// Slew-to-position target.
    pub target: i32,
    pub speed: i8,
    /// Set while a slew to position has not reached its target.
    pub busy: bool,
    pub invert: bool,
    pub pending: bool,
    pub mode: MotorMode,
}

impl MotorStatus {
    pub(crate) fn new(position: i32, target: i32, speed: i8, mode_register: u8) -> Self {
        Self {
            position,
            target,
            speed,
            busy: mode_register & MOTOR_BUSY != 0,
            invert: mode_register & MOTOR_INVERT != 0,
            pending: mode_register & MOTOR_PENDING != 0,
            mode: MotorMode::from_register(mode_register),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bits_decode() {
        let s = ControllerStatus::from_registers(0x01, 230);
        assert!(s.fault);
        assert!(!s.battery_low);
        assert_eq!(s.battery_level, 230);

        let s = ControllerStatus::from_registers(0x02, 0);
        assert!(!s.fault);
        assert!(s.battery_low);

        let s = ControllerStatus::from_registers(0xFC, 0);
        assert!(!s.fault);
        assert!(!s.battery_low);
    }

    #[test]
    fn battery_millivolts_scales_by_40() {
        assert_eq!(ControllerStatus::from_registers(0, 230).battery_millivolts(), 9200);
        assert_eq!(ControllerStatus::from_registers(0, 255).battery_millivolts(), 10200);
    }

    #[test]
    fn motor_status_decodes_mode_register() {
        let m = MotorStatus::new(10, -20, -5, 0x80 | 0x10 | 0x03);
        assert!(m.busy);
        assert!(m.invert);
        assert!(!m.pending);
        assert_eq!(m.mode, MotorMode::SlewToPosition);

        let m = MotorStatus::new(0, 0, 0, 0x08 | 0x01);
        assert!(!m.busy);
        assert!(m.pending);
        assert_eq!(m.mode, MotorMode::PowerBrake);
    }

    #[test]
    fn ascii_identity_strings() {
        assert_eq!(ascii_string(b"HiTechnc").as_str(), "HiTechnc");
        assert_eq!(ascii_string(b"V1.2    ").as_str(), "V1.2    ");
        assert_eq!(ascii_string(&[b'A', 0xFF, b'B', 0, 0, 0, 0, 0]).as_str(), "A?B\0\0\0\0\0");
    }

    #[test]
    fn identity_check() {
        let info = ControllerInfo {
            version: ascii_string(b"V2.1    "),
            manufacturer: ascii_string(b"HiTechnc"),
            controller_type: ascii_string(b"M4S4cont"),
        };
        assert!(info.is_matrix_controller());

        let other = ControllerInfo {
            controller_type: ascii_string(b"NxtServo"),
            ..info
        };
        assert!(!other.is_matrix_controller());
    }
}
