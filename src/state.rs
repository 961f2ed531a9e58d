use smart_leds::RGB8;

use crate::effect::EffectMode;

/// Requested state of one strip.
///
/// Filled in by the messaging layer, which is responsible for range checks.
/// The engine only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripTargetState {
    pub power: bool,
    pub brightness: u8,
    pub cold_white: u8,
    pub warm_white: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub effect: EffectMode,
}

impl StripTargetState {
    /// All channels off, effect `None`.
    pub const OFF: Self = Self {
        power: false,
        brightness: 0,
        cold_white: 0,
        warm_white: 0,
        red: 0,
        green: 0,
        blue: 0,
        effect: EffectMode::None,
    };

    /// RGB part of the target.
    pub const fn color(&self) -> RGB8 {
        RGB8 {
            r: self.red,
            g: self.green,
            b: self.blue,
        }
    }

    pub const fn set_color(&mut self, color: RGB8) {
        self.red = color.r;
        self.green = color.g;
        self.blue = color.b;
    }
}

/// Last target that was rendered to hardware.
///
/// Only used to detect changes, never to interpolate.
pub type RetainedSnapshot = StripTargetState;
