//! Light controller.
//!
//! Composition root of the firmware side: owns the bus, the driver
//! initializer, the effect engine, and the per-strip targets. Producers only
//! reach it through the intent and sensor queues.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bus::BusTransaction;
use crate::channel_map::{STRIP_COUNT, StripId};
use crate::diagnostics::RegisterDump;
use crate::driver_init::{DriverInitializer, InitConfig, InitStatus};
use crate::engine::{RenderResult, StripEffectEngine};
use crate::error::{BusError, InvalidStripId};
use crate::intent::{IntentProcessor, IntentReceiver, IntentStats};
use crate::registers::DEFAULT_ADDRESS;
use crate::sensors::{SensorReceiver, SensorState};
use crate::state::{RetainedSnapshot, StripTargetState};

/// Default interval between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Configuration for the light controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Bus address of the PWM driver.
    pub address: u8,
    /// Power-on sequence settings.
    pub init: InitConfig,
    /// Interval used by the poll scheduler.
    pub poll_interval: Duration,
}

impl ControllerConfig {
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            init: InitConfig::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub const fn with_init(mut self, init: InitConfig) -> Self {
        self.init = init;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Render outcome per strip, indexed by `StripId::index`.
    pub strips: [RenderResult; STRIP_COUNT],
    pub intents: IntentStats,
    /// Sensor state after draining the queue.
    pub sensors: SensorState,
    /// Whether any sensor value changed during this poll.
    pub sensors_changed: bool,
}

impl PollReport {
    pub const fn strip(&self, strip: StripId) -> RenderResult {
        self.strips[strip.index()]
    }

    /// Whether any strip was written to during this poll.
    pub fn rendered(&self) -> bool {
        self.strips.iter().any(|result| !result.is_unchanged())
    }
}

/// Owns the PWM driver and renders both strips from queued intents.
///
/// Typical lifecycle:
/// 1. [`LightController::new`] with the bus and the receiving ends of the
///    intent and sensor queues
/// 2. [`LightController::start`] once, retried until it succeeds
/// 3. [`LightController::poll`] on every cycle, usually through a
///    [`PollScheduler`](crate::PollScheduler)
///
/// Polls before a successful start drain the queues and update the targets,
/// but leave the driver untouched. The targets are rendered on the first
/// poll after the driver is configured.
pub struct LightController<'a, B, const INTENTS: usize, const SENSORS: usize> {
    bus: B,
    address: u8,
    poll_interval: Duration,

    initializer: DriverInitializer,
    engine: StripEffectEngine,
    targets: [StripTargetState; STRIP_COUNT],

    intents: IntentProcessor<'a, INTENTS>,
    sensor_events: SensorReceiver<'a, SENSORS>,
    sensors: SensorState,
}

impl<'a, B, const INTENTS: usize, const SENSORS: usize> LightController<'a, B, INTENTS, SENSORS>
where
    B: BusTransaction,
{
    pub fn new(
        bus: B,
        intents: IntentReceiver<'a, INTENTS>,
        sensor_events: SensorReceiver<'a, SENSORS>,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            bus,
            address: config.address,
            poll_interval: config.poll_interval,
            initializer: DriverInitializer::new(config.address, config.init),
            engine: StripEffectEngine::new(config.address),
            targets: [StripTargetState::OFF; STRIP_COUNT],
            intents: IntentProcessor::new(intents),
            sensor_events,
            sensors: SensorState::default(),
        }
    }

    /// Run the driver power-on sequence.
    ///
    /// Safe to call again after a failure; once it succeeded it is a no-op.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<InitStatus, BusError> {
        self.initializer.initialize(&mut self.bus, delay)
    }

    pub const fn is_started(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// One polling cycle.
    ///
    /// Drains the sensor and intent queues, then renders both strips. Bus
    /// failures are reported, never fatal.
    ///
    /// Until [`Self::start`] has succeeded the driver runs with its reset
    /// prescaler and output polarity, so nothing is rendered and both strips
    /// report [`RenderResult::Unchanged`].
    pub fn poll(&mut self) -> PollReport {
        let mut sensors_changed = false;
        for event in self.sensor_events.drain() {
            sensors_changed |= self.sensors.update(event);
        }

        let intents = self.intents.process_pending(&mut self.targets);

        let mut strips = [RenderResult::Unchanged; STRIP_COUNT];
        if !self.is_started() {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.poll] driver not started, skipping render");
            return PollReport {
                strips,
                intents,
                sensors: self.sensors,
                sensors_changed,
            };
        }

        for strip in StripId::ALL {
            let target = self.targets[strip.index()];
            strips[strip.index()] = self.engine.render(&mut self.bus, strip, &target);
        }

        #[cfg(feature = "esp32-log")]
        if intents.rejected > 0 {
            println!("[LightController.poll] {} intents rejected", intents.rejected);
        }

        PollReport {
            strips,
            intents,
            sensors: self.sensors,
            sensors_changed,
        }
    }

    /// Current targets, indexed by `StripId::index`.
    pub const fn targets(&self) -> &[StripTargetState; STRIP_COUNT] {
        &self.targets
    }

    /// Target of a single strip.
    pub fn target(&self, strip_id: u8) -> Result<&StripTargetState, InvalidStripId> {
        let strip = StripId::from_raw(strip_id)?;
        Ok(&self.targets[strip.index()])
    }

    /// Replace the target of a strip directly, bypassing the intent queue.
    ///
    /// Rendered on the next poll.
    pub fn set_target(
        &mut self,
        strip_id: u8,
        target: StripTargetState,
    ) -> Result<(), InvalidStripId> {
        let strip = StripId::from_raw(strip_id)?;
        self.targets[strip.index()] = target;
        Ok(())
    }

    /// Last state rendered to a strip.
    pub fn snapshot(&self, strip_id: u8) -> Result<&RetainedSnapshot, InvalidStripId> {
        self.engine.snapshot(strip_id)
    }

    pub const fn sensors(&self) -> SensorState {
        self.sensors
    }

    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Read the whole register block of the driver.
    pub fn dump_registers(&mut self) -> RegisterDump {
        RegisterDump::read(&mut self.bus, self.address)
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.bus
    }
}
