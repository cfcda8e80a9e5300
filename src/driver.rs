//! Low-level register driver.
//!
//! Binds a [`SmBus`] to the controller's device address and provides the
//! typed read/write helpers the high-level API is built from. Every helper
//! is exactly one bus transaction.
//!
//! Crate-private; consumers use
//! [`MatrixController`](crate::MatrixController) instead.

use crate::bus::SmBus;
use crate::error::ControllerError;

/// Register-level access to one device on the bus.
pub(crate) struct RegisterDriver<B> {
    bus: B,
    address: u8,
}

impl<B> RegisterDriver<B>
where
    B: SmBus,
{
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> B {
        self.bus
    }

    // -----------------------------------------------------------------------
    // Single-byte registers
    // -----------------------------------------------------------------------

    pub fn read_u8(&mut self, register: u8) -> Result<u8, ControllerError<B::Error>> {
        let value = self.bus.read_byte(self.address, register)?;
        trace!("read  0x{=u8:x}[0x{=u8:x}] = 0x{=u8:x}", self.address, register, value);
        Ok(value)
    }

    pub fn write_u8(&mut self, register: u8, value: u8) -> Result<(), ControllerError<B::Error>> {
        trace!("write 0x{=u8:x}[0x{=u8:x}] = 0x{=u8:x}", self.address, register, value);
        self.bus.write_byte(self.address, register, value)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Block registers
    // -----------------------------------------------------------------------

    /// Fill `buffer` from consecutive registers starting at `register`.
    pub fn read_block(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), ControllerError<B::Error>> {
        self.bus.read_block(self.address, register, buffer)?;
        trace!(
            "read  0x{=u8:x}[0x{=u8:x}..+{=usize}] = {=[u8]:x}",
            self.address,
            register,
            buffer.len(),
            &*buffer,
        );
        Ok(())
    }

    /// Read a 32-bit signed integer stored big-endian over four registers.
    pub fn read_i32(&mut self, register: u8) -> Result<i32, ControllerError<B::Error>> {
        let mut buf = [0u8; 4];
        self.read_block(register, &mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }
}
