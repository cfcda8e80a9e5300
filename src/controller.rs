//! High-level interface for the HiTechnic Matrix controller.
//!
//! [`MatrixController`] wraps the low-level register driver with argument
//! validation and channel-specific register addressing. Every method
//! validates its arguments before touching the bus, so a rejected call
//! performs no I/O at all.

use crate::bus::SmBus;
use crate::codec::{decode_i8, encode_i8};
use crate::driver::RegisterDriver;
use crate::error::ControllerError;
use crate::modes::{MotorMode, MotorModeFlags, ServoState};
use crate::registers::{
    BATTERY, CHANNEL_COUNT, CONTROLLER_TYPE, DEFAULT_ADDRESS, IDENTITY_LEN, MANUFACTURER,
    MOTOR_MODE_OFFSET, MOTOR_POSITION_OFFSET, MOTOR_REGISTERS, MOTOR_SPEED_OFFSET,
    MOTOR_SPEED_READ_OFFSET, MOTOR_TARGET_OFFSET, SERVO_ENABLE, SERVO_REGISTERS,
    SERVO_SPEED_OFFSET, SERVO_TARGET_OFFSET, START_FLAG, STATUS, TIMEOUT, VERSION,
};
use crate::status::{ascii_string, ControllerInfo, ControllerStatus, MotorStatus};

/// Value accepted by the "set or query" registers to mean "query only".
const QUERY: i16 = -1;

const MAX_SERVO_TARGET: i16 = 250;
const MAX_MOTOR_SPEED: i8 = 100;

/// Blocking driver for the HiTechnic Matrix motor/servo controller.
///
/// Channels are numbered 1–4 as printed on the board. Operations are single
/// synchronous transactions (or short fixed sequences of them); nothing is
/// cached and nothing is retried. Multi-step operations such as
/// [`set_servos`](Self::set_servos) are not atomic on the bus, so callers
/// sharing one bus across threads must serialise access themselves.
///
/// # Example
///
/// ```no_run
/// use matrix_driver::{I2cBus, MatrixController, MotorMode, MotorModeFlags};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut matrix = MatrixController::with_default_address(I2cBus::new(i2c));
///
/// matrix.set_timeout(20).unwrap();
/// matrix.set_motor_mode(1, MotorModeFlags::default(), MotorMode::SpeedControl).unwrap();
/// matrix.set_motor_speed(1, -40).unwrap();
/// matrix.start_motors().unwrap();
/// # }
/// ```
pub struct MatrixController<B> {
    driver: RegisterDriver<B>,
}

impl<B> MatrixController<B>
where
    B: SmBus,
{
    /// Create a controller for the device at `address` on `bus`.
    ///
    /// No bus traffic is generated. Pass `&mut bus` to keep ownership of
    /// the bus with the caller.
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(bus, address),
        }
    }

    /// Create a controller at [`DEFAULT_ADDRESS`].
    pub fn with_default_address(bus: B) -> Self {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// 7-bit device address this controller talks to.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Give back the bus.
    pub fn release(self) -> B {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Identity and status
    // -----------------------------------------------------------------------

    /// Read the version, manufacturer and controller type strings.
    ///
    /// Useful to verify that a Matrix controller answers at this address,
    /// see [`ControllerInfo::is_matrix_controller`].
    pub fn get_info(&mut self) -> Result<ControllerInfo, ControllerError<B::Error>> {
        let version = self.read_identity(VERSION)?;
        let manufacturer = self.read_identity(MANUFACTURER)?;
        let controller_type = self.read_identity(CONTROLLER_TYPE)?;

        Ok(ControllerInfo {
            version,
            manufacturer,
            controller_type,
        })
    }

    /// Read the fault and battery-low flags and the battery level.
    pub fn get_status(&mut self) -> Result<ControllerStatus, ControllerError<B::Error>> {
        let status = self.driver.read_u8(STATUS)?;
        let battery_level = self.driver.read_u8(BATTERY)?;
        Ok(ControllerStatus::from_registers(status, battery_level))
    }

    // -----------------------------------------------------------------------
    // Global control
    // -----------------------------------------------------------------------

    /// Set the automatic shutdown timeout and return the register value.
    ///
    /// # Arguments
    /// * `seconds` — New timeout (0–255), or `-1` to only read it back
    ///
    /// # Errors
    /// * [`ControllerError::ValueOutOfRange`] if `seconds` is outside −1–255
    /// * [`ControllerError::Bus`] on communication failure
    pub fn set_timeout(&mut self, seconds: i16) -> Result<u8, ControllerError<B::Error>> {
        Self::check_range("timeout", seconds, QUERY, u8::MAX.into())?;
        self.write_or_query(TIMEOUT, seconds)
    }

    /// Latch all pending motor commands so they take effect together.
    pub fn start_motors(&mut self) -> Result<(), ControllerError<B::Error>> {
        self.driver.write_u8(START_FLAG, 1)
    }

    // -----------------------------------------------------------------------
    // Servos
    // -----------------------------------------------------------------------

    /// Enable or disable servo pulse generation per channel.
    ///
    /// `states[i]` applies to servo channel `i + 1`: `-1` leaves it
    /// unchanged, `0` disables it, `1` enables it. The enable mask is
    /// read, modified bit by bit and written back, so untouched channels
    /// keep their current state.
    ///
    /// # Returns
    /// The enable state of each channel as read back after the write.
    ///
    /// # Errors
    /// * [`ControllerError::InvalidServoCount`] unless `states.len() == 4`
    /// * [`ControllerError::InvalidServoState`] naming the first bad entry
    /// * [`ControllerError::Bus`] on communication failure
    pub fn set_servos(
        &mut self,
        states: &[i8],
    ) -> Result<[bool; CHANNEL_COUNT], ControllerError<B::Error>> {
        if states.len() != CHANNEL_COUNT {
            debug!("rejected {=usize} servo states", states.len());
            return Err(ControllerError::InvalidServoCount { len: states.len() });
        }

        let mut parsed = [ServoState::Keep; CHANNEL_COUNT];
        for (index, (&value, slot)) in states.iter().zip(parsed.iter_mut()).enumerate() {
            *slot = ServoState::from_i8(value).ok_or_else(|| {
                debug!("rejected servo state {=i8} at index {=usize}", value, index);
                ControllerError::InvalidServoState { index, value }
            })?;
        }

        let mut mask = self.driver.read_u8(SERVO_ENABLE)?;
        for (bit, state) in parsed.iter().enumerate() {
            mask = state.apply(mask, bit);
        }
        self.driver.write_u8(SERVO_ENABLE, mask)?;

        let mask = self.driver.read_u8(SERVO_ENABLE)?;
        let mut enabled = [false; CHANNEL_COUNT];
        for (bit, on) in enabled.iter_mut().enumerate() {
            *on = mask & (1 << bit) != 0;
        }
        Ok(enabled)
    }

    /// Set a servo's step rate and return the register value.
    ///
    /// Zero moves the servo to a new target immediately; a non-zero value
    /// steps it once every `10 * speed` milliseconds.
    ///
    /// # Arguments
    /// * `channel` — Servo channel (1–4)
    /// * `speed` — New speed (0–255), or `-1` to only read it back
    pub fn set_servo_speed(
        &mut self,
        channel: u8,
        speed: i16,
    ) -> Result<u8, ControllerError<B::Error>> {
        let index = Self::check_channel(channel)?;
        Self::check_range("servo speed", speed, QUERY, u8::MAX.into())?;
        self.write_or_query(SERVO_REGISTERS[index] + SERVO_SPEED_OFFSET, speed)
    }

    /// Set a servo's target position and return the register value.
    ///
    /// 0–250 spans pulse widths of 0.75 ms to 2.25 ms.
    ///
    /// # Arguments
    /// * `channel` — Servo channel (1–4)
    /// * `position` — New target (0–250), or `-1` to only read it back
    pub fn set_servo_target(
        &mut self,
        channel: u8,
        position: i16,
    ) -> Result<u8, ControllerError<B::Error>> {
        let index = Self::check_channel(channel)?;
        Self::check_range("servo target", position, QUERY, MAX_SERVO_TARGET)?;
        self.write_or_query(SERVO_REGISTERS[index] + SERVO_TARGET_OFFSET, position)
    }

    // -----------------------------------------------------------------------
    // Motors
    // -----------------------------------------------------------------------

    /// Read encoder position, target, speed and mode flags of a motor.
    ///
    /// # Arguments
    /// * `channel` — Motor channel (1–4)
    pub fn get_motor_status(
        &mut self,
        channel: u8,
    ) -> Result<MotorStatus, ControllerError<B::Error>> {
        let base = MOTOR_REGISTERS[Self::check_channel(channel)?];

        let position = self.driver.read_i32(base + MOTOR_POSITION_OFFSET)?;
        let target = self.driver.read_i32(base + MOTOR_TARGET_OFFSET)?;
        let speed = decode_i8(self.driver.read_u8(base + MOTOR_SPEED_READ_OFFSET)?);
        let mode = self.driver.read_u8(base + MOTOR_MODE_OFFSET)?;

        Ok(MotorStatus::new(position, target, speed, mode))
    }

    /// Read the status of all four motors, channel 1 first.
    ///
    /// Returns the first error encountered; no partial results.
    pub fn get_all_motor_statuses(
        &mut self,
    ) -> Result<[MotorStatus; CHANNEL_COUNT], ControllerError<B::Error>> {
        Ok([
            self.get_motor_status(1)?,
            self.get_motor_status(2)?,
            self.get_motor_status(3)?,
            self.get_motor_status(4)?,
        ])
    }

    /// Configure a motor channel's mode and flags.
    ///
    /// Accepts either a [`MotorMode`] or a raw mode number.
    ///
    /// # Errors
    /// * [`ControllerError::InvalidChannel`] if `channel` is outside 1–4
    /// * [`ControllerError::InvalidMode`] if a raw `mode` is above 3
    /// * [`ControllerError::Bus`] on communication failure
    pub fn set_motor_mode(
        &mut self,
        channel: u8,
        flags: MotorModeFlags,
        mode: impl Into<u8>,
    ) -> Result<(), ControllerError<B::Error>> {
        let index = Self::check_channel(channel)?;
        let mode = mode.into();
        let mode = MotorMode::from_bits(mode).ok_or_else(|| {
            debug!("rejected motor mode {=u8}", mode);
            ControllerError::InvalidMode { mode }
        })?;

        self.driver
            .write_u8(MOTOR_REGISTERS[index] + MOTOR_MODE_OFFSET, flags.pack(mode))
    }

    /// Command a motor's speed, −100 (full reverse) to 100 (full forward).
    ///
    /// With the pending flag set on the channel, the speed only takes effect
    /// on the next [`start_motors`](Self::start_motors).
    pub fn set_motor_speed(
        &mut self,
        channel: u8,
        speed: i8,
    ) -> Result<(), ControllerError<B::Error>> {
        let index = Self::check_channel(channel)?;
        Self::check_range(
            "motor speed",
            speed.into(),
            (-MAX_MOTOR_SPEED).into(),
            MAX_MOTOR_SPEED.into(),
        )?;

        self.driver
            .write_u8(MOTOR_REGISTERS[index] + MOTOR_SPEED_OFFSET, encode_i8(speed))
    }

    /// Set every motor's speed to zero, then latch with the start flag.
    pub fn stop_all_motors(&mut self) -> Result<(), ControllerError<B::Error>> {
        for channel in 1..=CHANNEL_COUNT as u8 {
            self.set_motor_speed(channel, 0)?;
        }
        self.start_motors()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn read_identity(
        &mut self,
        register: u8,
    ) -> Result<heapless::String<IDENTITY_LEN>, ControllerError<B::Error>> {
        let mut buf = [0u8; IDENTITY_LEN];
        self.driver.read_block(register, &mut buf)?;
        Ok(ascii_string(&buf))
    }

    /// Write `value` unless it is the query marker, then read the register.
    /// `value` must already be range-checked to −1–255.
    fn write_or_query(
        &mut self,
        register: u8,
        value: i16,
    ) -> Result<u8, ControllerError<B::Error>> {
        if value != QUERY {
            self.driver.write_u8(register, value as u8)?;
        }
        self.driver.read_u8(register)
    }

    /// Map a 1-based channel number to its register table index.
    fn check_channel(channel: u8) -> Result<usize, ControllerError<B::Error>> {
        if (1..=CHANNEL_COUNT as u8).contains(&channel) {
            Ok(usize::from(channel - 1))
        } else {
            debug!("rejected channel {=u8}", channel);
            Err(ControllerError::InvalidChannel { channel })
        }
    }

    fn check_range(
        field: &'static str,
        value: i16,
        min: i16,
        max: i16,
    ) -> Result<(), ControllerError<B::Error>> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            debug!("rejected {=str} {=i16}", field, value);
            Err(ControllerError::ValueOutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}
