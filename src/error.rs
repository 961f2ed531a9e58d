//! Error types shared by the composer.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

/// A bus transaction failed (no acknowledgment, arbitration loss, short transfer...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError {
    /// 7-bit address of the device that was addressed.
    pub device: u8,
    /// Register the transaction targeted.
    pub register: u8,
    /// What went wrong on the bus.
    pub kind: ErrorKind,
}

impl BusError {
    pub const fn new(device: u8, register: u8, kind: ErrorKind) -> Self {
        Self {
            device,
            register,
            kind,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bus error at device 0x{:02X}, register 0x{:02X}: {}",
            self.device, self.register, self.kind
        )
    }
}

impl core::error::Error for BusError {}

/// Strip id outside of the supported `1..=2` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStripId(pub u8);

impl fmt::Display for InvalidStripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strip id {}", self.0)
    }
}

impl core::error::Error for InvalidStripId {}

/// Any error the composer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Bus(BusError),
    InvalidStripId(InvalidStripId),
}

impl From<BusError> for Error {
    fn from(error: BusError) -> Self {
        Self::Bus(error)
    }
}

impl From<InvalidStripId> for Error {
    fn from(error: InvalidStripId) -> Self {
        Self::InvalidStripId(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(error) => fmt::Display::fmt(error, f),
            Self::InvalidStripId(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl core::error::Error for Error {}
