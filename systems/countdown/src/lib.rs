#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Display countdown driver.
//!
//! The driver only decrements the value shown to the player. It never decides
//! when a phase ends; the cycle scheduler keeps its own clock.

use std::time::Duration;

use generator_defence_core::{Command, Event};

/// Interval at which the displayed countdown is decremented.
pub const COUNTDOWN_CADENCE: Duration = Duration::from_millis(100);

/// Pure system that converts elapsed time into fixed-size countdown steps.
#[derive(Debug)]
pub struct Countdown {
    cadence: Duration,
    accumulator: Duration,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_CADENCE)
    }
}

impl Countdown {
    /// Creates a driver stepping at the provided cadence.
    #[must_use]
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes world events and emits `AdvanceCountdown` once per elapsed
    /// cadence while the displayed value is above zero.
    pub fn handle(&mut self, events: &[Event], displayed: Duration, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::RunRestarted => self.accumulator = Duration::ZERO,
                _ => {}
            }
        }

        if self.cadence.is_zero() {
            self.accumulator = Duration::ZERO;
            return;
        }

        let mut steps = 0u32;
        while self.accumulator >= self.cadence {
            self.accumulator -= self.cadence;
            steps = steps.saturating_add(1);
        }
        if steps == 0 || displayed.is_zero() {
            return;
        }

        let elapsed = self.cadence.saturating_mul(steps);
        log::debug!("countdown advanced by {elapsed:?} from {displayed:?}");
        out.push(Command::AdvanceCountdown { elapsed });
    }
}
