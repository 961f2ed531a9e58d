#![no_std]

pub mod bus;
pub mod channel;
pub mod channel_map;
pub mod color;
pub mod controller;
pub mod diagnostics;
pub mod driver_init;
pub mod effect;
pub mod engine;
pub mod error;
pub mod intent;
pub mod poll_scheduler;
pub mod pwm;
pub mod registers;
pub mod sensors;
pub mod state;

pub use bus::{BusTransaction, I2cBus};
pub use channel::{EventQueue, QueueFull};
pub use channel_map::{ChannelRegisterSet, ColorChannel, StripId, resolve};
pub use controller::{ControllerConfig, LightController, PollReport};
pub use diagnostics::{Bits, RegisterDump};
pub use driver_init::{DriverInitializer, InitConfig, InitStatus};
pub use effect::EffectMode;
pub use engine::{RenderResult, StripEffectEngine};
pub use error::{BusError, Error, InvalidStripId};
pub use intent::{
    IntentProcessor, IntentQueue, IntentReceiver, IntentSender, LightIntent, StripIntent,
};
pub use poll_scheduler::{PollScheduler, PollTiming};
pub use pwm::{PwmChannelWriter, RegisterPattern, duty_cycle};
pub use sensors::{
    PowerReading, SensorEvent, SensorQueue, SensorReceiver, SensorSender, SensorState,
};
pub use state::{RetainedSnapshot, StripTargetState};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
