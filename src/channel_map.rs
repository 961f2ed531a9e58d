//! Strip/color to PWM output mapping.
//!
//! The board interleaves the two strips on the driver outputs, so the mapping
//! is a fixed table rather than arithmetic. Keep it in sync with the schematic.

use crate::error::InvalidStripId;
use crate::registers::{LED_STRIDE, LED0_ON_L};

/// Number of strips on the board.
pub const STRIP_COUNT: usize = 2;

/// One of the two physical strips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StripId {
    First = 1,
    Second = 2,
}

impl StripId {
    pub const ALL: [Self; STRIP_COUNT] = [Self::First, Self::Second];

    pub const fn from_raw(value: u8) -> Result<Self, InvalidStripId> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(InvalidStripId(value)),
        }
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Zero-based slot for per-strip arrays.
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for StripId {
    type Error = InvalidStripId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_raw(value)
    }
}

/// Drivable color component of a strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChannel {
    ColdWhite,
    WarmWhite,
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [Self; 5] = [
        Self::ColdWhite,
        Self::WarmWhite,
        Self::Red,
        Self::Green,
        Self::Blue,
    ];
}

/// Registers that control a single PWM output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRegisterSet {
    pub on_l: u8,
    pub on_h: u8,
    pub off_l: u8,
    pub off_h: u8,
}

impl ChannelRegisterSet {
    /// Registers of driver output `output`.
    pub const fn for_output(output: u8) -> Self {
        let base = LED0_ON_L + LED_STRIDE * output;
        Self {
            on_l: base,
            on_h: base + 1,
            off_l: base + 2,
            off_h: base + 3,
        }
    }
}

/// Driver outputs wired to a strip.
#[derive(Clone, Copy, Debug)]
struct StripWiring {
    cold_white: u8,
    warm_white: u8,
    red: u8,
    green: u8,
    blue: u8,
}

impl StripWiring {
    const fn output(&self, channel: ColorChannel) -> u8 {
        match channel {
            ColorChannel::ColdWhite => self.cold_white,
            ColorChannel::WarmWhite => self.warm_white,
            ColorChannel::Red => self.red,
            ColorChannel::Green => self.green,
            ColorChannel::Blue => self.blue,
        }
    }
}

const WIRING: [StripWiring; STRIP_COUNT] = [
    StripWiring {
        cold_white: 3,
        red: 5,
        green: 6,
        blue: 4,
        warm_white: 7,
    },
    StripWiring {
        cold_white: 8,
        red: 10,
        green: 11,
        blue: 9,
        warm_white: 12,
    },
];

/// Driver output index for a strip channel.
pub const fn output_index(strip: StripId, channel: ColorChannel) -> u8 {
    WIRING[strip.index()].output(channel)
}

/// Register set for a typed strip id.
pub const fn registers(strip: StripId, channel: ColorChannel) -> ChannelRegisterSet {
    ChannelRegisterSet::for_output(output_index(strip, channel))
}

/// Resolve the register set for a raw strip id.
///
/// Only strips `1` and `2` exist, anything else is rejected.
pub const fn resolve(
    strip_id: u8,
    channel: ColorChannel,
) -> Result<ChannelRegisterSet, InvalidStripId> {
    match StripId::from_raw(strip_id) {
        Ok(strip) => Ok(registers(strip, channel)),
        Err(error) => Err(error),
    }
}
