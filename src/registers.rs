//! Register map of the HiTechnic Matrix controller.
//!
//! All registers are single-byte offsets into the controller's address
//! space. Servo and motor channels each own a small block of registers
//! starting at a per-channel base address.

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Firmware version string, 8 ASCII bytes (`"Vn.m    "`).
pub const VERSION: u8 = 0x00;

/// Manufacturer string, 8 ASCII bytes (`"HiTechnc"`).
pub const MANUFACTURER: u8 = 0x08;

/// Controller type string, 8 ASCII bytes (`"M4S4cont"`).
pub const CONTROLLER_TYPE: u8 = 0x10;

/// Length of each identity string block.
pub const IDENTITY_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Global control and status
// ---------------------------------------------------------------------------

/// Status flags. Bit 0 is the fault flag, bit 1 is battery low.
pub const STATUS: u8 = 0x41;

/// Automatic shutdown timeout in seconds.
pub const TIMEOUT: u8 = 0x42;

/// Battery level in units of 40 mV.
pub const BATTERY: u8 = 0x43;

/// Writing 1 latches all pending motor commands at once.
pub const START_FLAG: u8 = 0x44;

/// Servo pulse enable bitmask, bit `n` for servo channel `n + 1`.
pub const SERVO_ENABLE: u8 = 0x45;

pub const STATUS_FAULT: u8 = 0x01;
pub const STATUS_BATTERY_LOW: u8 = 0x02;

/// Battery register resolution.
pub const BATTERY_MV_PER_UNIT: u16 = 40;

// ---------------------------------------------------------------------------
// Channel blocks
// ---------------------------------------------------------------------------

/// Number of servo channels and of motor channels on the board.
pub const CHANNEL_COUNT: usize = 4;

/// Base register per servo channel; speed at `+0`, target at `+1`.
pub const SERVO_REGISTERS: [u8; CHANNEL_COUNT] = [0x46, 0x48, 0x50, 0x52];

pub const SERVO_SPEED_OFFSET: u8 = 0;
pub const SERVO_TARGET_OFFSET: u8 = 1;

/// Base register per motor channel.
pub const MOTOR_REGISTERS: [u8; CHANNEL_COUNT] = [0x4E, 0x58, 0x62, 0x6C];

/// Encoder position, 4 bytes big-endian.
pub const MOTOR_POSITION_OFFSET: u8 = 0;
/// Slew target, 4 bytes big-endian.
pub const MOTOR_TARGET_OFFSET: u8 = 4;
/// Signed speed as reported in the status readback.
pub const MOTOR_SPEED_READ_OFFSET: u8 = 5;
/// Signed speed command.
pub const MOTOR_SPEED_OFFSET: u8 = 8;
/// Mode byte: busy, invert, pending, reset and the 2-bit mode.
pub const MOTOR_MODE_OFFSET: u8 = 9;

pub const MOTOR_BUSY: u8 = 0x80;
pub const MOTOR_INVERT: u8 = 0x10;
pub const MOTOR_PENDING: u8 = 0x08;
pub const MOTOR_RESET: u8 = 0x04;
pub const MOTOR_MODE_MASK: u8 = 0x03;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of the Matrix controller.
pub const DEFAULT_ADDRESS: u8 = 0x08;
