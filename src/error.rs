//! Error types for the Matrix controller driver.

use core::fmt;

/// Errors that can occur when driving the Matrix controller.
///
/// Every variant other than [`Bus`](ControllerError::Bus) is an argument
/// validation failure, reported before any bus transaction is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError<E> {
    /// Underlying bus error, passed through unchanged.
    Bus(E),

    /// Channel number out of range (must be 1–4).
    InvalidChannel { channel: u8 },

    /// A register value outside its accepted range.
    ValueOutOfRange {
        field: &'static str,
        value: i16,
        min: i16,
        max: i16,
    },

    /// Servo state list does not have exactly one entry per channel.
    InvalidServoCount { len: usize },

    /// Servo state entry not in {-1, 0, 1}.
    InvalidServoState { index: usize, value: i8 },

    /// Motor mode not in 0–3.
    InvalidMode { mode: u8 },
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for ControllerError<E> {
    fn from(error: E) -> Self {
        ControllerError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ControllerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControllerError::Bus(e) => write!(f, "Bus error: {:?}", e),
            ControllerError::InvalidChannel { channel } => {
                write!(f, "Invalid channel {} (must be 1-4)", channel)
            }
            ControllerError::ValueOutOfRange { field, value, min, max } => write!(
                f,
                "{} {} out of range (must be {} to {})",
                field, value, min, max
            ),
            ControllerError::InvalidServoCount { len } => {
                write!(f, "Expected exactly 4 servo states, got {}", len)
            }
            ControllerError::InvalidServoState { index, value } => write!(
                f,
                "Servo state at index {} is {} (must be -1, 0 or 1)",
                index, value
            ),
            ControllerError::InvalidMode { mode } => {
                write!(f, "Invalid motor mode {} (must be 0-3)", mode)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ControllerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ControllerError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            ControllerError::InvalidChannel { channel } => {
                defmt::write!(f, "Invalid channel {}", channel)
            }
            ControllerError::ValueOutOfRange { field, value, min, max } => {
                defmt::write!(f, "{} {} out of range [{}, {}]", field, value, min, max)
            }
            ControllerError::InvalidServoCount { len } => {
                defmt::write!(f, "Invalid servo count {}", len)
            }
            ControllerError::InvalidServoState { index, value } => {
                defmt::write!(f, "Invalid servo state {} at index {}", value, index)
            }
            ControllerError::InvalidMode { mode } => defmt::write!(f, "Invalid motor mode {}", mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_constraint() {
        let err: ControllerError<()> = ControllerError::ValueOutOfRange {
            field: "timeout",
            value: 256,
            min: -1,
            max: 255,
        };
        assert_eq!(err.to_string(), "timeout 256 out of range (must be -1 to 255)");

        let err: ControllerError<()> = ControllerError::InvalidChannel { channel: 5 };
        assert_eq!(err.to_string(), "Invalid channel 5 (must be 1-4)");
    }

    #[test]
    fn bus_errors_convert_with_question_mark() {
        fn fails() -> Result<(), ControllerError<&'static str>> {
            Err::<(), _>("nack")?;
            Ok(())
        }
        assert_eq!(fails(), Err(ControllerError::Bus("nack")));
    }
}
