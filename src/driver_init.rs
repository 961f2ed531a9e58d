//! One-shot power-on sequence for the PWM driver.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bus::BusTransaction;
use crate::channel_map::ChannelRegisterSet;
use crate::error::BusError;
use crate::pwm::{PwmChannelWriter, RegisterPattern};
use crate::registers::{
    ALL_LED_OFF_H, ALL_LED_OFF_L, ALL_LED_ON_H, ALL_LED_ON_L, MODE1, MODE1_AI, MODE1_RESTART,
    MODE1_SLEEP, MODE2, MODE2_INVRT, MODE2_OUTDRV, OSCILLATOR_HZ, PRE_SCALE, PRESCALE_MAX,
    PRESCALE_MIN,
};

/// Shortest wait after reset or wake-up allowed by the datasheet.
pub const MIN_OSCILLATOR_DELAY: Duration = Duration::from_micros(500);

/// Default PWM frequency for the strips.
pub const DEFAULT_PWM_FREQUENCY_HZ: u16 = 1000;

/// Default wait after the soft reset.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(1000);

const ALL_LEDS: ChannelRegisterSet = ChannelRegisterSet {
    on_l: ALL_LED_ON_L,
    on_h: ALL_LED_ON_H,
    off_l: ALL_LED_OFF_L,
    off_h: ALL_LED_OFF_H,
};

/// Configuration of the power-on sequence.
#[derive(Debug, Clone, Copy)]
pub struct InitConfig {
    /// Output PWM frequency.
    pub pwm_frequency_hz: u16,
    /// Wait after soft reset, never shorter than [`MIN_OSCILLATOR_DELAY`].
    pub reset_delay: Duration,
}

impl InitConfig {
    pub const fn new() -> Self {
        Self {
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }

    #[must_use]
    pub const fn with_pwm_frequency(mut self, hz: u16) -> Self {
        self.pwm_frequency_hz = hz;
        self
    }

    #[must_use]
    pub const fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`DriverInitializer::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// The sequence ran to completion.
    Initialized,
    /// The driver was already initialized, nothing was sent.
    AlreadyInitialized,
}

/// Prescaler value for a PWM frequency.
///
/// `round(osc / (4096 * hz)) - 1`, clamped to the range the driver accepts.
pub const fn prescale_for(hz: u16) -> u8 {
    let hz = if hz == 0 { 1 } else { hz as u32 };
    let period_ticks = 4096 * hz;
    let rounded = (OSCILLATOR_HZ + period_ticks / 2) / period_ticks;
    let prescale = rounded.saturating_sub(1);
    if prescale < PRESCALE_MIN as u32 {
        PRESCALE_MIN
    } else if prescale > PRESCALE_MAX as u32 {
        PRESCALE_MAX
    } else {
        #[allow(clippy::cast_possible_truncation)]
        let prescale = prescale as u8;
        prescale
    }
}

/// Brings the driver from power-on into the state the engine expects.
///
/// The sequence runs at most once; later calls are no-ops.
#[derive(Debug)]
pub struct DriverInitializer {
    address: u8,
    config: InitConfig,
    initialized: bool,
}

impl DriverInitializer {
    pub const fn new(address: u8, config: InitConfig) -> Self {
        Self {
            address,
            config,
            initialized: false,
        }
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the power-on sequence.
    ///
    /// Stops at the first failed write and leaves the latch open so the
    /// caller can try again.
    pub fn initialize<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<InitStatus, BusError>
    where
        B: BusTransaction,
        D: DelayNs,
    {
        if self.initialized {
            return Ok(InitStatus::AlreadyInitialized);
        }

        let address = self.address;
        #[cfg(feature = "esp32-log")]
        println!("[DriverInitializer.initialize] resetting driver at 0x{:02X}", address);

        bus.write8(address, MODE1, MODE1_RESTART)?;
        wait(delay, self.config.reset_delay);

        PwmChannelWriter::new(address).write_pattern(bus, ALL_LEDS, RegisterPattern::BLANK)?;

        // Prescaler can only be written while the oscillator is off
        bus.write8(address, MODE1, MODE1_SLEEP | MODE1_AI)?;
        let prescale = prescale_for(self.config.pwm_frequency_hz);
        bus.write8(address, PRE_SCALE, prescale)?;
        bus.write8(address, MODE1, MODE1_AI)?;
        wait(delay, MIN_OSCILLATOR_DELAY);

        bus.write8(address, MODE2, MODE2_OUTDRV | MODE2_INVRT)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[DriverInitializer.initialize] {} Hz, prescale {}",
            self.config.pwm_frequency_hz, prescale
        );

        self.initialized = true;
        Ok(InitStatus::Initialized)
    }
}

fn wait<D: DelayNs>(delay: &mut D, duration: Duration) {
    let duration = if duration < MIN_OSCILLATOR_DELAY {
        MIN_OSCILLATOR_DELAY
    } else {
        duration
    };
    #[allow(clippy::cast_possible_truncation)]
    delay.delay_us(duration.as_micros() as u32);
}
