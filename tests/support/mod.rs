#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use myrtio_pwm_composer::{BusError, BusTransaction, ChannelRegisterSet};

/// Register-level fake of the PWM driver that records every write
pub struct RecordingBus {
    pub registers: [u8; 256],
    pub writes: Vec<(u8, u8, u8)>,
    pub reads: usize,
    /// Writes to these registers fail with a NACK
    pub failing_writes: Vec<u8>,
    /// Reads of these registers fail with a NACK
    pub failing_reads: Vec<u8>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            writes: Vec::new(),
            reads: 0,
            failing_writes: Vec::new(),
            failing_reads: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.writes.clear();
        self.reads = 0;
    }

    /// Duty stored in the ON counter of a channel
    pub fn on_count(&self, set: ChannelRegisterSet) -> u16 {
        u16::from_le_bytes([
            self.registers[set.on_l as usize],
            self.registers[set.on_h as usize],
        ])
    }

    pub fn off_count(&self, set: ChannelRegisterSet) -> u16 {
        u16::from_le_bytes([
            self.registers[set.off_l as usize],
            self.registers[set.off_h as usize],
        ])
    }

    /// Whether any write touched one of the channel's registers
    pub fn touched(&self, set: ChannelRegisterSet) -> bool {
        self.writes.iter().any(|&(_, register, _)| {
            register == set.on_l
                || register == set.on_h
                || register == set.off_l
                || register == set.off_h
        })
    }

    fn nack(device: u8, register: u8) -> BusError {
        BusError::new(
            device,
            register,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
        )
    }
}

impl BusTransaction for RecordingBus {
    fn read8(&mut self, device: u8, register: u8) -> Result<u8, BusError> {
        self.reads += 1;
        if self.failing_reads.contains(&register) {
            return Err(Self::nack(device, register));
        }
        Ok(self.registers[register as usize])
    }

    fn read16(&mut self, device: u8, register: u8) -> Result<u16, BusError> {
        let low = self.read8(device, register)?;
        let high = self.read8(device, register.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    fn write8(&mut self, device: u8, register: u8, value: u8) -> Result<(), BusError> {
        self.writes.push((device, register, value));
        if self.failing_writes.contains(&register) {
            return Err(Self::nack(device, register));
        }
        self.registers[register as usize] = value;
        Ok(())
    }

    fn write16(&mut self, device: u8, register: u8, value: u16) -> Result<(), BusError> {
        let [low, high] = value.to_le_bytes();
        self.write8(device, register, low)?;
        self.write8(device, register.wrapping_add(1), high)
    }
}

/// Delay that only records how long it was asked to wait
#[derive(Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ns(&self) -> u64 {
        self.calls.iter().map(|&ns| u64::from(ns)).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns);
    }
}
