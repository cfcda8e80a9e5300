//! Byte-oriented register bus used by the controller.
//!
//! The controller only needs three primitives, all addressed by
//! `(device address, register)`. [`SmBus`] captures exactly those, and
//! [`I2cBus`] provides them on top of any blocking `embedded-hal` I2C
//! implementation.
//!
//! Arbitration, clock stretching and transport retries are the bus
//! implementation's concern; errors it reports are passed through unchanged.

use embedded_hal::i2c::I2c;

/// Addressed byte and block register access.
pub trait SmBus {
    /// Transport error reported by the bus.
    type Error;

    /// Read one byte from `register` of the device at `address`.
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error>;

    /// Write one byte to `register` of the device at `address`.
    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read `buffer.len()` consecutive bytes starting at `register`.
    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;
}

// Lets a controller borrow a caller-owned bus instead of taking it.
impl<B: SmBus + ?Sized> SmBus for &mut B {
    type Error = B::Error;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        (**self).read_byte(address, register)
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_byte(address, register, value)
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).read_block(address, register, buffer)
    }
}

/// [`SmBus`] adapter over a blocking `embedded-hal` I2C peripheral.
///
/// Reads are issued as a register-address write followed by a repeated-start
/// read (`write_read`); byte writes send `[register, value]` in a single
/// write transaction.
///
/// # Example
///
/// ```no_run
/// use matrix_driver::{I2cBus, MatrixController, DEFAULT_ADDRESS};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut controller = MatrixController::new(I2cBus::new(i2c), DEFAULT_ADDRESS);
/// let status = controller.get_status().unwrap();
/// # }
/// ```
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C>
where
    I2C: I2c,
{
    /// Wrap an I2C peripheral. Pass `&mut i2c` to keep ownership.
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the wrapped peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> SmBus for I2cBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[register, value])
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buffer)
    }
}
