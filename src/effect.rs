//! Effect modes selectable per strip.
//!
//! Only [`EffectMode::None`] drives the outputs. The others are accepted from
//! the network and stored, but render as no-ops until their animations exist.

const EFFECT_NAME_NONE: &str = "none";
const EFFECT_NAME_ALARM: &str = "alarm";
const EFFECT_NAME_MUSIC: &str = "music";
const EFFECT_NAME_SLEEP: &str = "sleep";
const EFFECT_NAME_WEEKEND: &str = "weekend";
const EFFECT_NAME_RGB: &str = "rgb";
const EFFECT_NAME_CW: &str = "cw";
const EFFECT_NAME_WW: &str = "ww";
const EFFECT_NAME_RGBCW: &str = "rgbcw";
const EFFECT_NAME_RGBWW: &str = "rgbww";
const EFFECT_NAME_CWWW: &str = "cwww";

const EFFECT_ID_NONE: u8 = 0;
const EFFECT_ID_ALARM: u8 = 1;
const EFFECT_ID_MUSIC: u8 = 2;
const EFFECT_ID_SLEEP: u8 = 3;
const EFFECT_ID_WEEKEND: u8 = 4;
const EFFECT_ID_RGB: u8 = 5;
const EFFECT_ID_CW: u8 = 6;
const EFFECT_ID_WW: u8 = 7;
const EFFECT_ID_RGBCW: u8 = 8;
const EFFECT_ID_RGBWW: u8 = 9;
const EFFECT_ID_CWWW: u8 = 10;

/// Known effect modes that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectMode {
    /// Direct passthrough of the target levels.
    #[default]
    None = EFFECT_ID_NONE,
    Alarm = EFFECT_ID_ALARM,
    Music = EFFECT_ID_MUSIC,
    Sleep = EFFECT_ID_SLEEP,
    Weekend = EFFECT_ID_WEEKEND,
    Rgb = EFFECT_ID_RGB,
    Cw = EFFECT_ID_CW,
    Ww = EFFECT_ID_WW,
    RgbCw = EFFECT_ID_RGBCW,
    RgbWw = EFFECT_ID_RGBWW,
    CwWw = EFFECT_ID_CWWW,
}

impl EffectMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_NONE => Self::None,
            EFFECT_ID_ALARM => Self::Alarm,
            EFFECT_ID_MUSIC => Self::Music,
            EFFECT_ID_SLEEP => Self::Sleep,
            EFFECT_ID_WEEKEND => Self::Weekend,
            EFFECT_ID_RGB => Self::Rgb,
            EFFECT_ID_CW => Self::Cw,
            EFFECT_ID_WW => Self::Ww,
            EFFECT_ID_RGBCW => Self::RgbCw,
            EFFECT_ID_RGBWW => Self::RgbWw,
            EFFECT_ID_CWWW => Self::CwWw,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => EFFECT_NAME_NONE,
            Self::Alarm => EFFECT_NAME_ALARM,
            Self::Music => EFFECT_NAME_MUSIC,
            Self::Sleep => EFFECT_NAME_SLEEP,
            Self::Weekend => EFFECT_NAME_WEEKEND,
            Self::Rgb => EFFECT_NAME_RGB,
            Self::Cw => EFFECT_NAME_CW,
            Self::Ww => EFFECT_NAME_WW,
            Self::RgbCw => EFFECT_NAME_RGBCW,
            Self::RgbWw => EFFECT_NAME_RGBWW,
            Self::CwWw => EFFECT_NAME_CWWW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_NONE => Some(Self::None),
            EFFECT_NAME_ALARM => Some(Self::Alarm),
            EFFECT_NAME_MUSIC => Some(Self::Music),
            EFFECT_NAME_SLEEP => Some(Self::Sleep),
            EFFECT_NAME_WEEKEND => Some(Self::Weekend),
            EFFECT_NAME_RGB => Some(Self::Rgb),
            EFFECT_NAME_CW => Some(Self::Cw),
            EFFECT_NAME_WW => Some(Self::Ww),
            EFFECT_NAME_RGBCW => Some(Self::RgbCw),
            EFFECT_NAME_RGBWW => Some(Self::RgbWw),
            EFFECT_NAME_CWWW => Some(Self::CwWw),
            _ => None,
        }
    }

    /// Whether the mode has a channel mapping yet.
    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::None)
    }
}
