//! Register-level bus access.
//!
//! The composer never talks to an I2C peripheral directly. Everything goes
//! through [`BusTransaction`], which keeps the rendering logic testable on the
//! host and lets the firmware decide how the bus is shared.

use embedded_hal::i2c::{Error as _, I2c};

use crate::error::BusError;

/// Register read/write primitives for devices on a shared bus.
///
/// 16-bit values are transferred low byte first, matching the PWM driver's
/// register layout with auto-increment enabled.
pub trait BusTransaction {
    /// Read a single register.
    fn read8(&mut self, device: u8, register: u8) -> Result<u8, BusError>;

    /// Read two consecutive registers as a little-endian word.
    fn read16(&mut self, device: u8, register: u8) -> Result<u16, BusError>;

    /// Write a single register.
    fn write8(&mut self, device: u8, register: u8, value: u8) -> Result<(), BusError>;

    /// Write two consecutive registers as a little-endian word.
    fn write16(&mut self, device: u8, register: u8, value: u16) -> Result<(), BusError>;
}

impl<T: BusTransaction + ?Sized> BusTransaction for &mut T {
    fn read8(&mut self, device: u8, register: u8) -> Result<u8, BusError> {
        (**self).read8(device, register)
    }

    fn read16(&mut self, device: u8, register: u8) -> Result<u16, BusError> {
        (**self).read16(device, register)
    }

    fn write8(&mut self, device: u8, register: u8, value: u8) -> Result<(), BusError> {
        (**self).write8(device, register, value)
    }

    fn write16(&mut self, device: u8, register: u8, value: u16) -> Result<(), BusError> {
        (**self).write16(device, register, value)
    }
}

/// [`BusTransaction`] over any blocking `embedded-hal` I2C bus.
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cBus<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the underlying bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> BusTransaction for I2cBus<I2C> {
    fn read8(&mut self, device: u8, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(device, &[register], &mut buf)
            .map_err(|e| BusError::new(device, register, e.kind()))?;
        Ok(buf[0])
    }

    fn read16(&mut self, device: u8, register: u8) -> Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(device, &[register], &mut buf)
            .map_err(|e| BusError::new(device, register, e.kind()))?;
        Ok(u16::from_le_bytes(buf))
    }

    fn write8(&mut self, device: u8, register: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(device, &[register, value])
            .map_err(|e| BusError::new(device, register, e.kind()))
    }

    fn write16(&mut self, device: u8, register: u8, value: u16) -> Result<(), BusError> {
        let [low, high] = value.to_le_bytes();
        self.i2c
            .write(device, &[register, low, high])
            .map_err(|e| BusError::new(device, register, e.kind()))
    }
}
