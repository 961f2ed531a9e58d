//! Intent processing.
//!
//! The messaging layer does not touch strip state directly. It posts
//! [`LightIntent`]s, and the polling loop merges them into the per-strip
//! targets before rendering.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Consumer, EventQueue, Producer};
use crate::channel_map::{STRIP_COUNT, StripId};
use crate::color::{Rgb, white_balance};
use crate::effect::EffectMode;
use crate::error::InvalidStripId;
use crate::state::StripTargetState;

/// Partial update of one strip; `None` fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripIntent {
    /// Raw strip id as received from the network.
    pub strip: u8,
    pub power: Option<bool>,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    pub cold_white: Option<u8>,
    pub warm_white: Option<u8>,
    /// White balance in kelvin, used when no explicit white levels are given.
    pub color_temperature: Option<u16>,
    pub effect: Option<EffectMode>,
}

impl StripIntent {
    pub const fn for_strip(strip: u8) -> Self {
        Self {
            strip,
            power: None,
            brightness: None,
            color: None,
            cold_white: None,
            warm_white: None,
            color_temperature: None,
            effect: None,
        }
    }

    /// Merge the intent into a target state.
    pub fn apply_to(&self, target: &mut StripTargetState) {
        if let Some(power) = self.power {
            target.power = power;
        }
        if let Some(brightness) = self.brightness {
            target.brightness = brightness;
        }
        if let Some(color) = self.color {
            target.set_color(color);
        }

        if self.cold_white.is_none() && self.warm_white.is_none() {
            if let Some(kelvin) = self.color_temperature {
                let (cold, warm) = white_balance(kelvin);
                target.cold_white = cold;
                target.warm_white = warm;
            }
        } else {
            if let Some(cold) = self.cold_white {
                target.cold_white = cold;
            }
            if let Some(warm) = self.warm_white {
                target.warm_white = warm;
            }
        }

        if let Some(effect) = self.effect {
            target.effect = effect;
        }
    }
}

/// Requests accepted by the light controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightIntent {
    /// Change one strip.
    Strip(StripIntent),
    /// Switch both strips on or off at once.
    PowerAll(bool),
}

/// Counters from one drain of the intent queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentStats {
    pub applied: u8,
    pub rejected: u8,
    /// Last strip id that was rejected, if any.
    pub last_rejected: Option<InvalidStripId>,
}

pub type IntentQueue<const SIZE: usize> = EventQueue<LightIntent, SIZE>;
pub type IntentSender<'a, const SIZE: usize> = Producer<'a, LightIntent, SIZE>;
pub type IntentReceiver<'a, const SIZE: usize> = Consumer<'a, LightIntent, SIZE>;

/// Drains intents into strip targets.
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply all pending intents to `targets` without blocking.
    ///
    /// Intents addressed to unknown strips are dropped and counted.
    pub fn process_pending(
        &mut self,
        targets: &mut [StripTargetState; STRIP_COUNT],
    ) -> IntentStats {
        let mut stats = IntentStats::default();

        for intent in self.intents.drain() {
            match intent {
                LightIntent::Strip(strip_intent) => match StripId::from_raw(strip_intent.strip) {
                    Ok(strip) => {
                        strip_intent.apply_to(&mut targets[strip.index()]);
                        stats.applied = stats.applied.saturating_add(1);
                    }
                    Err(error) => {
                        #[cfg(feature = "esp32-log")]
                        println!("[IntentProcessor.process_pending] dropped: {}", error);
                        stats.rejected = stats.rejected.saturating_add(1);
                        stats.last_rejected = Some(error);
                    }
                },
                LightIntent::PowerAll(power) => {
                    for target in targets.iter_mut() {
                        target.power = power;
                    }
                    stats.applied = stats.applied.saturating_add(1);
                }
            }
        }

        stats
    }
}
