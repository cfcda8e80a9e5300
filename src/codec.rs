//! Two's-complement conversion between host integers and register bytes.
//!
//! The controller stores signed quantities (motor speed) as a raw byte in
//! 8-bit two's complement.

/// Encode a signed value into its register byte.
///
/// Non-negative values pass through unchanged; negative values map to
/// `256 + value`.
pub fn encode_i8(value: i8) -> u8 {
    value as u8
}

/// Decode a register byte into a signed value.
///
/// Bytes with the high bit set are negative: `b - 256`.
pub fn decode_i8(byte: u8) -> i8 {
    if byte & 0x80 == 0 {
        byte as i8
    } else {
        (i16::from(byte) - 256) as i8
    }
}
