//! Register dump for bring-up and debugging.
//!
//! Not used by rendering. Reads the whole register block of the driver and
//! formats it one register per line.

use core::fmt;
use core::ops::RangeInclusive;

use heapless::Vec;

use crate::bus::BusTransaction;
use crate::error::BusError;
use crate::registers::{
    self, ALL_LED_ON_L, LED_STRIDE, LED0_ON_L, LED15_OFF_H, MODE1, TEST_MODE,
};

const LOW_BLOCK: RangeInclusive<u8> = MODE1..=LED15_OFF_H;
const HIGH_BLOCK: RangeInclusive<u8> = ALL_LED_ON_L..=TEST_MODE;

/// Number of registers covered by a dump.
pub const DUMP_LEN: usize =
    (LED15_OFF_H - MODE1) as usize + 1 + (TEST_MODE - ALL_LED_ON_L) as usize + 1;

/// Formats a byte as `0bxxxx_xxxx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bits(pub u8);

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:04b}_{:04b}", self.0 >> 4, self.0 & 0x0F)
    }
}

/// One register read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterEntry {
    pub register: u8,
    pub value: Result<u8, BusError>,
}

/// Snapshot of the driver register block.
#[derive(Clone, Debug)]
pub struct RegisterDump {
    address: u8,
    entries: Vec<RegisterEntry, DUMP_LEN>,
}

impl RegisterDump {
    /// Read every register of the driver at `address`.
    ///
    /// A failed read is recorded in its entry and the dump carries on.
    pub fn read<B: BusTransaction>(bus: &mut B, address: u8) -> Self {
        let entries = LOW_BLOCK
            .chain(HIGH_BLOCK)
            .map(|register| RegisterEntry {
                register,
                value: bus.read8(address, register),
            })
            .collect();
        Self { address, entries }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub fn entries(&self) -> &[RegisterEntry] {
        &self.entries
    }

    /// Value of a register, if it was part of the dump and read fine.
    pub fn value(&self, register: u8) -> Option<u8> {
        self.entries
            .iter()
            .find(|entry| entry.register == register)
            .and_then(|entry| entry.value.ok())
    }

    /// Number of registers that could not be read.
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|entry| entry.value.is_err()).count()
    }

    /// Print the dump to the console.
    #[cfg(feature = "esp32-log")]
    pub fn log(&self) {
        esp_println::println!("{}", self);
    }
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PCA9685 @ 0x{:02X}", self.address)?;
        for entry in &self.entries {
            write!(f, "0x{:02X} ", entry.register)?;
            match registers::name(entry.register) {
                Some(name) => write!(f, "{name:<13}")?,
                None => write!(f, "{:<13}", LedRegister(entry.register))?,
            }
            match entry.value {
                Ok(value) => writeln!(f, " {} (0x{:02X})", Bits(value), value)?,
                Err(error) => writeln!(f, " <{}>", error.kind)?,
            }
        }
        Ok(())
    }
}

/// Names a per-channel register, e.g. `LED3_OFF_L`.
struct LedRegister(u8);

impl fmt::Display for LedRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.0 - LED0_ON_L;
        let part = match offset % LED_STRIDE {
            0 => "ON_L",
            1 => "ON_H",
            2 => "OFF_L",
            _ => "OFF_H",
        };
        // Padding is applied to the whole name
        let mut name: heapless::String<16> = heapless::String::new();
        fmt::Write::write_fmt(&mut name, format_args!("LED{}_{}", offset / LED_STRIDE, part))?;
        f.pad(&name)
    }
}
