//! Channel writes.
//!
//! Converts an 8-bit color level and an 8-bit brightness into a 12-bit duty
//! cycle and pushes it into one output's ON/OFF register quartet.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bus::BusTransaction;
use crate::channel_map::ChannelRegisterSet;
use crate::error::BusError;
use crate::registers::PWM_MAX;

const LEVEL_MAX: u32 = 255;

/// 12-bit duty for a color level scaled by brightness.
///
/// `round(color * brightness / 255 * 4095 / 255)`, rounded half up with
/// integer math only.
#[inline]
pub const fn duty_cycle(color: u8, brightness: u8) -> u16 {
    const DIVISOR: u32 = LEVEL_MAX * LEVEL_MAX;
    let scaled = color as u32 * brightness as u32 * PWM_MAX as u32;
    #[allow(clippy::cast_possible_truncation)]
    let duty = ((scaled + DIVISOR / 2) / DIVISOR) as u16;
    duty
}

/// ON/OFF counter pair written into an output's registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterPattern {
    pub on: u16,
    pub off: u16,
}

impl RegisterPattern {
    /// Pattern used by the startup blanking (both counters at zero).
    pub const BLANK: Self = Self { on: 0, off: 0 };

    /// Pattern used for regular channel updates.
    ///
    /// The OFF counter is pinned at the full count and the duty goes into ON.
    /// With MODE2.INVRT set this lights the LED for `duty` ticks per period.
    pub const fn duty(duty: u16) -> Self {
        Self { on: duty, off: PWM_MAX }
    }

    /// Register values in ON_L, ON_H, OFF_L, OFF_H order.
    pub const fn bytes(self) -> [u8; 4] {
        let [on_l, on_h] = self.on.to_le_bytes();
        let [off_l, off_h] = self.off.to_le_bytes();
        [on_l, on_h, off_l, off_h]
    }
}

/// Writes duty cycles into a single driver.
#[derive(Debug, Clone, Copy)]
pub struct PwmChannelWriter {
    address: u8,
}

impl PwmChannelWriter {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Drive one output at `color` scaled by `brightness`.
    ///
    /// Issues four register writes. All of them are attempted even if an
    /// earlier one fails, the first failure is returned. No retries.
    pub fn apply<B: BusTransaction>(
        &self,
        bus: &mut B,
        registers: ChannelRegisterSet,
        color: u8,
        brightness: u8,
    ) -> Result<(), BusError> {
        let duty = duty_cycle(color, brightness);
        #[cfg(feature = "esp32-log")]
        println!(
            "[PwmChannelWriter.apply] reg 0x{:02X}: color {} brightness {} -> duty {}",
            registers.on_l, color, brightness, duty
        );
        self.write_pattern(bus, registers, RegisterPattern::duty(duty))
    }

    /// Write a raw ON/OFF pattern into an output's registers.
    pub fn write_pattern<B: BusTransaction>(
        &self,
        bus: &mut B,
        registers: ChannelRegisterSet,
        pattern: RegisterPattern,
    ) -> Result<(), BusError> {
        let [on_l, on_h, off_l, off_h] = pattern.bytes();
        let writes = [
            (registers.on_l, on_l),
            (registers.on_h, on_h),
            (registers.off_l, off_l),
            (registers.off_h, off_h),
        ];

        let mut first_error = None;
        for (register, value) in writes {
            if let Err(error) = bus.write8(self.address, register, value) {
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
