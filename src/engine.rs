//! Strip effect engine.
//!
//! Turns per-strip target states into channel writes. Each strip keeps a
//! snapshot of what was last rendered; a target equal to the snapshot costs
//! no bus traffic at all, so the engine can be polled every cycle.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bus::BusTransaction;
use crate::channel_map::{ColorChannel, STRIP_COUNT, StripId, registers};
use crate::effect::EffectMode;
use crate::error::{BusError, InvalidStripId};
use crate::pwm::PwmChannelWriter;
use crate::state::{RetainedSnapshot, StripTargetState};

/// Channels driven by the `None` effect, in write order.
///
/// Warm white is not part of it.
const DIRECT_CHANNELS: [ColorChannel; 4] = [
    ColorChannel::Red,
    ColorChannel::Green,
    ColorChannel::Blue,
    ColorChannel::ColdWhite,
];

/// Outcome of rendering one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderResult {
    /// Target matched the snapshot, nothing was written.
    Unchanged,
    /// Target was rendered and the snapshot updated.
    Applied,
    /// Target was rendered but some channel writes failed.
    /// The snapshot is updated anyway.
    PartialFailure {
        /// Number of channels with at least one failed write.
        failed_channels: u8,
        /// First bus error seen during the pass.
        error: BusError,
    },
}

impl RenderResult {
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Collects channel failures during a render pass.
#[derive(Debug, Default)]
struct PassErrors {
    failed_channels: u8,
    first: Option<BusError>,
}

impl PassErrors {
    fn record(&mut self, result: Result<(), BusError>) {
        if let Err(error) = result {
            self.failed_channels += 1;
            self.first.get_or_insert(error);
        }
    }

    fn into_result(self) -> RenderResult {
        match self.first {
            Some(error) => RenderResult::PartialFailure {
                failed_channels: self.failed_channels,
                error,
            },
            None => RenderResult::Applied,
        }
    }
}

/// Renders both strips of a board through one PWM driver.
///
/// The engine keeps one [`RetainedSnapshot`] per strip and compares every
/// target against it before touching the bus:
/// - an equal target is skipped without any transaction
/// - a changed target with effect `None` drives red, green, blue and cold
///   white, scaled by brightness (or zero when the strip is off)
/// - any other effect only updates the snapshot
///
/// Bus failures never abort a pass. Every channel is still written, and the
/// snapshot is committed even when some writes failed.
#[derive(Debug, Clone)]
pub struct StripEffectEngine {
    writer: PwmChannelWriter,
    snapshots: [RetainedSnapshot; STRIP_COUNT],
}

impl StripEffectEngine {
    /// Create an engine for the driver at `address`.
    ///
    /// Snapshots start all off, which matches the driver after blanking.
    pub const fn new(address: u8) -> Self {
        Self {
            writer: PwmChannelWriter::new(address),
            snapshots: [StripTargetState::OFF; STRIP_COUNT],
        }
    }

    /// Last rendered state of a strip.
    pub fn snapshot(&self, strip_id: u8) -> Result<&RetainedSnapshot, InvalidStripId> {
        let strip = StripId::from_raw(strip_id)?;
        Ok(&self.snapshots[strip.index()])
    }

    /// Render a strip if its target differs from the last rendered one.
    ///
    /// Unknown strip ids are rejected before anything touches the bus.
    pub fn render_strip<B: BusTransaction>(
        &mut self,
        bus: &mut B,
        strip_id: u8,
        target: &StripTargetState,
    ) -> Result<RenderResult, InvalidStripId> {
        let strip = StripId::from_raw(strip_id)?;
        Ok(self.render(bus, strip, target))
    }

    /// Typed variant of [`Self::render_strip`].
    pub fn render<B: BusTransaction>(
        &mut self,
        bus: &mut B,
        strip: StripId,
        target: &StripTargetState,
    ) -> RenderResult {
        let snapshot = &mut self.snapshots[strip.index()];
        if *snapshot == *target {
            return RenderResult::Unchanged;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[StripEffectEngine.render] strip {}: {:?} -> {:?}",
            strip.raw(),
            snapshot,
            target
        );

        let mut errors = PassErrors::default();
        match target.effect {
            EffectMode::None => {
                let brightness = if target.power { target.brightness } else { 0 };
                for channel in DIRECT_CHANNELS {
                    let level = channel_level(target, channel);
                    errors.record(self.writer.apply(
                        bus,
                        registers(strip, channel),
                        level,
                        brightness,
                    ));
                }
            }
            EffectMode::Alarm
            | EffectMode::Music
            | EffectMode::Sleep
            | EffectMode::Weekend
            | EffectMode::Rgb
            | EffectMode::Cw
            | EffectMode::Ww
            | EffectMode::RgbCw
            | EffectMode::RgbWw
            | EffectMode::CwWw => {
                // Not animated yet, the target is only recorded
            }
        }

        *snapshot = *target;

        let result = errors.into_result();
        #[cfg(feature = "esp32-log")]
        if let RenderResult::PartialFailure { error, .. } = result {
            println!("[StripEffectEngine.render] strip {}: {}", strip.raw(), error);
        }
        result
    }
}

const fn channel_level(target: &StripTargetState, channel: ColorChannel) -> u8 {
    match channel {
        ColorChannel::ColdWhite => target.cold_white,
        ColorChannel::WarmWhite => target.warm_white,
        ColorChannel::Red => target.red,
        ColorChannel::Green => target.green,
        ColorChannel::Blue => target.blue,
    }
}
