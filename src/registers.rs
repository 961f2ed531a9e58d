//! PCA9685 register block.
//!
//! Addresses and mode bits of the 16-channel, 12-bit PWM driver.

/// Default 7-bit bus address (all address pins low).
pub const DEFAULT_ADDRESS: u8 = 0x40;

pub const MODE1: u8 = 0x00;
pub const MODE2: u8 = 0x01;
pub const SUBADR1: u8 = 0x02;
pub const SUBADR2: u8 = 0x03;
pub const SUBADR3: u8 = 0x04;
pub const ALLCALLADR: u8 = 0x05;

/// First per-channel register, channel `n` starts at `LED0_ON_L + 4 * n`.
pub const LED0_ON_L: u8 = 0x06;
/// Registers per channel (ON_L, ON_H, OFF_L, OFF_H).
pub const LED_STRIDE: u8 = 4;
/// Number of PWM outputs on the driver.
pub const CHANNEL_COUNT: u8 = 16;
/// Last per-channel register (LED15_OFF_H).
pub const LED15_OFF_H: u8 = 0x45;

pub const ALL_LED_ON_L: u8 = 0xFA;
pub const ALL_LED_ON_H: u8 = 0xFB;
pub const ALL_LED_OFF_L: u8 = 0xFC;
pub const ALL_LED_OFF_H: u8 = 0xFD;
pub const PRE_SCALE: u8 = 0xFE;
pub const TEST_MODE: u8 = 0xFF;

// MODE1 bits
pub const MODE1_RESTART: u8 = 0x80;
pub const MODE1_EXTCLK: u8 = 0x40;
pub const MODE1_AI: u8 = 0x20;
pub const MODE1_SLEEP: u8 = 0x10;
pub const MODE1_ALLCALL: u8 = 0x01;

// MODE2 bits
pub const MODE2_INVRT: u8 = 0x10;
pub const MODE2_OCH: u8 = 0x08;
pub const MODE2_OUTDRV: u8 = 0x04;

/// Internal oscillator frequency.
pub const OSCILLATOR_HZ: u32 = 25_000_000;
/// Full 12-bit count.
pub const PWM_MAX: u16 = 4095;

pub const PRESCALE_MIN: u8 = 0x03;
pub const PRESCALE_MAX: u8 = 0xFF;

/// Human readable name of a register, if it has a fixed role.
pub const fn name(register: u8) -> Option<&'static str> {
    Some(match register {
        MODE1 => "MODE1",
        MODE2 => "MODE2",
        SUBADR1 => "SUBADR1",
        SUBADR2 => "SUBADR2",
        SUBADR3 => "SUBADR3",
        ALLCALLADR => "ALLCALLADR",
        ALL_LED_ON_L => "ALL_LED_ON_L",
        ALL_LED_ON_H => "ALL_LED_ON_H",
        ALL_LED_OFF_L => "ALL_LED_OFF_L",
        ALL_LED_OFF_H => "ALL_LED_OFF_H",
        PRE_SCALE => "PRE_SCALE",
        TEST_MODE => "TestMode",
        _ => return None,
    })
}
