#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Periodic generator poll that raises the generators-destroyed loss signal.

use std::time::Duration;

use generator_defence_core::{Command, Event, GeneratorView};

/// Interval between two generator polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Pure system that inspects the generator set on a fixed cadence.
///
/// The first poll happens on the first tick; later polls follow every
/// [`POLL_INTERVAL`] of elapsed time.
#[derive(Debug)]
pub struct GeneratorWatch {
    interval: Duration,
    until_poll: Duration,
    declared: bool,
}

impl Default for GeneratorWatch {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

impl GeneratorWatch {
    /// Creates a watch polling at the provided interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            until_poll: Duration::ZERO,
            declared: false,
        }
    }

    /// Reports whether the loss signal has been raised during the current run.
    #[must_use]
    pub fn has_declared(&self) -> bool {
        self.declared
    }

    /// Consumes world events and emits `DeclareGeneratorsDestroyed` the first
    /// time a poll finds every generator destroyed.
    pub fn handle(&mut self, events: &[Event], generators: &GeneratorView, out: &mut Vec<Command>) {
        let mut ticked = false;
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    ticked = true;
                    elapsed = elapsed.saturating_add(*dt);
                }
                Event::RunRestarted => {
                    self.declared = false;
                    self.until_poll = Duration::ZERO;
                }
                _ => {}
            }
        }

        if !ticked {
            return;
        }
        self.until_poll = self.until_poll.saturating_sub(elapsed);
        if !self.until_poll.is_zero() {
            return;
        }
        self.until_poll = self.interval;
        self.poll(generators, out);
    }

    fn poll(&mut self, generators: &GeneratorView, out: &mut Vec<Command>) {
        if self.declared || !generators.all_destroyed() {
            return;
        }
        self.declared = true;
        log::warn!("all {} generators destroyed", generators.len());
        out.push(Command::DeclareGeneratorsDestroyed);
    }
}
