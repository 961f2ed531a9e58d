//! Poll pacing.
//!
//! Keeps the controller running at a fixed interval without owning a timer.
//! The caller sleeps for the returned duration between ticks.

use embassy_time::{Duration, Instant};

use crate::bus::BusTransaction;
use crate::controller::{LightController, PollReport};

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct PollTiming {
    /// What the controller did this cycle.
    pub report: PollReport,
    /// When the next poll is due.
    pub next_deadline: Instant,
    /// How long to wait until then (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Runs [`LightController::poll`] at a fixed interval.
///
/// ```ignore
/// let mut scheduler = PollScheduler::new(controller);
///
/// loop {
///     let timing = scheduler.tick(Instant::now());
///     Timer::after(timing.sleep_duration).await;
/// }
/// ```
pub struct PollScheduler<'a, B, const INTENTS: usize, const SENSORS: usize> {
    controller: LightController<'a, B, INTENTS, SENSORS>,
    next_poll: Instant,
    interval: Duration,
}

impl<'a, B, const INTENTS: usize, const SENSORS: usize> PollScheduler<'a, B, INTENTS, SENSORS>
where
    B: BusTransaction,
{
    /// Use the controller's configured poll interval.
    pub fn new(controller: LightController<'a, B, INTENTS, SENSORS>) -> Self {
        let interval = controller.poll_interval();
        Self::with_interval(controller, interval)
    }

    pub fn with_interval(
        controller: LightController<'a, B, INTENTS, SENSORS>,
        interval: Duration,
    ) -> Self {
        Self {
            controller,
            next_poll: Instant::from_millis(0),
            interval,
        }
    }

    /// Poll once and compute the next deadline.
    ///
    /// After a stall longer than two intervals the schedule restarts from
    /// `now` instead of firing a burst of catch-up polls.
    pub fn tick(&mut self, now: Instant) -> PollTiming {
        let max_drift = self.interval * 2;
        if now > self.next_poll + max_drift {
            self.next_poll = now;
        }

        let report = self.controller.poll();

        self.next_poll += self.interval;
        let sleep_duration = if self.next_poll > now {
            self.next_poll - now
        } else {
            Duration::from_ticks(0)
        };

        PollTiming {
            report,
            next_deadline: self.next_poll,
            sleep_duration,
        }
    }

    pub const fn controller(&self) -> &LightController<'a, B, INTENTS, SENSORS> {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut LightController<'a, B, INTENTS, SENSORS> {
        &mut self.controller
    }

    pub fn into_controller(self) -> LightController<'a, B, INTENTS, SENSORS> {
        self.controller
    }
}
