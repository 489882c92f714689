#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic threat spawner that turns commanded wave quotas into
//! individual spawn commands.

use std::{collections::BTreeMap, time::Duration};

use generator_defence_core::{Command, Event, SpawnerId};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    ///
    /// Every spawner paces itself at `spawn_interval` plus a deterministic
    /// stagger of up to half the interval derived from the seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SpawnQueue {
    pending: u32,
    interval: Duration,
    accumulator: Duration,
}

/// Pure system that emits one spawn command per elapsed interval until every
/// commanded quota has been produced.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    rng_state: u64,
    queues: BTreeMap<SpawnerId, SpawnQueue>,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            rng_state: config.rng_seed,
            queues: BTreeMap::new(),
        }
    }

    /// Number of hostiles the spawner still has to produce.
    #[must_use]
    pub fn pending(&self, spawner: SpawnerId) -> u32 {
        self.queues.get(&spawner).map_or(0, |queue| queue.pending)
    }

    /// Consumes world events to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::WaveCommanded { spawner, quota } => self.enqueue(*spawner, *quota),
                Event::LossDeclared { .. } | Event::RunRestarted => self.queues.clear(),
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                _ => {}
            }
        }

        if accumulated.is_zero() {
            return;
        }

        for (spawner, queue) in &mut self.queues {
            if queue.pending == 0 {
                continue;
            }

            queue.accumulator = queue.accumulator.saturating_add(accumulated);
            let spawn_attempts = resolve_spawn_attempts(queue);
            for _ in 0..spawn_attempts {
                out.push(Command::SpawnEnemy { spawner: *spawner });
            }
        }
    }

    fn enqueue(&mut self, spawner: SpawnerId, quota: u32) {
        if quota == 0 {
            return;
        }

        let interval = match self.queues.get(&spawner) {
            Some(queue) => queue.interval,
            None => self.staggered_interval(),
        };
        let queue = self.queues.entry(spawner).or_insert(SpawnQueue {
            pending: 0,
            interval,
            accumulator: Duration::ZERO,
        });
        queue.pending = queue.pending.saturating_add(quota);
        log::debug!(
            "{spawner} queued {quota} hostiles every {:?} ({} pending)",
            queue.interval,
            queue.pending
        );
    }

    fn staggered_interval(&mut self) -> Duration {
        let half_millis = u64::try_from(self.spawn_interval.as_millis() / 2).unwrap_or(u64::MAX);
        if half_millis == 0 {
            return self.spawn_interval;
        }
        let jitter = self.advance_rng() % (half_millis + 1);
        self.spawn_interval
            .saturating_add(Duration::from_millis(jitter))
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

fn resolve_spawn_attempts(queue: &mut SpawnQueue) -> u32 {
    if queue.interval.is_zero() {
        let attempts = queue.pending;
        queue.pending = 0;
        queue.accumulator = Duration::ZERO;
        return attempts;
    }

    let mut attempts = 0;
    while queue.pending > 0 && queue.accumulator >= queue.interval {
        queue.accumulator -= queue.interval;
        queue.pending -= 1;
        attempts += 1;
    }

    if queue.pending == 0 {
        queue.accumulator = Duration::ZERO;
    }
    attempts
}
