//! Sensor events.
//!
//! The motion sensor and the power monitor are debounced and sampled
//! elsewhere. They post [`SensorEvent`]s and the polling loop folds them into
//! a [`SensorState`] that the messaging layer can publish.

use crate::channel::{Consumer, EventQueue, Producer};

/// One sample of the power monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerReading {
    pub bus_millivolts: u16,
    pub current_milliamps: i16,
    pub power_milliwatts: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEvent {
    /// Debounced motion sensor edge.
    Motion { detected: bool },
    Power(PowerReading),
}

/// Latest known sensor values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorState {
    pub motion: bool,
    pub power: Option<PowerReading>,
}

impl SensorState {
    /// Fold an event into the state, returns whether anything changed.
    pub fn update(&mut self, event: SensorEvent) -> bool {
        let previous = *self;
        match event {
            SensorEvent::Motion { detected } => self.motion = detected,
            SensorEvent::Power(reading) => self.power = Some(reading),
        }
        previous != *self
    }
}

pub type SensorQueue<const SIZE: usize> = EventQueue<SensorEvent, SIZE>;
pub type SensorSender<'a, const SIZE: usize> = Producer<'a, SensorEvent, SIZE>;
pub type SensorReceiver<'a, const SIZE: usize> = Consumer<'a, SensorEvent, SIZE>;
