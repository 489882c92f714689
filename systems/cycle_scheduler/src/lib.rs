#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cycle scheduler that drives the session through alternating build and
//! combat phases.
//!
//! The scheduler is an explicit state machine advanced by
//! [`Event::TimeAdvanced`]. Every cycle walks the same sequence:
//!
//! 1. build phase for the configured duration,
//! 2. a hidden grace interval before combat,
//! 3. combat, commanding every spawner with the cycle's quota,
//! 4. a wait until the live-enemy accumulator reaches zero,
//! 5. a hidden grace interval after the wave is cleared,
//! 6. cycle completion, escalation and either the next cycle or victory.
//!
//! Timed waits complete on the first tick at which their duration has fully
//! elapsed; surplus tick time is not carried into the following phase.
//! Observing [`Event::LossDeclared`] stops the scheduler for the rest of the
//! run so no scheduler-driven mode write can follow a loss.

use std::time::Duration;

use generator_defence_core::{Command, CycleConfig, Event, GameMode, SpawnerId};

/// Hidden interval between the end of the build phase and the start of combat.
pub const PRE_COMBAT_GRACE: Duration = Duration::from_secs(2);

/// Hidden interval between a cleared wave and the end of the cycle.
pub const POST_COMBAT_GRACE: Duration = Duration::from_secs(5);

/// Read-only inputs the scheduler consults while handling events.
#[derive(Clone, Copy, Debug)]
pub struct CycleView<'a> {
    /// Difficulty parameters of the current run.
    pub config: &'a CycleConfig,
    /// Escalated number of enemies each spawner receives from cycle two on.
    pub enemies_per_generator: u32,
    /// Live-enemy accumulator.
    pub live_enemies: u32,
    /// Spawners commanded at the start of every combat phase.
    pub spawners: &'a [SpawnerId],
}

/// Position of the scheduler within the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a run to start.
    Idle,
    /// Build phase of the provided cycle.
    Build {
        /// One-based cycle index.
        cycle: u32,
        /// Time left before the grace interval starts.
        remaining: Duration,
    },
    /// Hidden grace interval preceding combat.
    PreCombat {
        /// One-based cycle index.
        cycle: u32,
        /// Time left before combat starts.
        remaining: Duration,
    },
    /// Combat phase waiting for the live-enemy accumulator to reach zero.
    Combat {
        /// One-based cycle index.
        cycle: u32,
    },
    /// Hidden grace interval after the wave was cleared.
    PostCombat {
        /// One-based cycle index.
        cycle: u32,
        /// Time left before the cycle completes.
        remaining: Duration,
    },
    /// The run was won or interrupted by a loss.
    Concluded,
}

/// Pure system that turns elapsed time and the live-enemy accumulator into
/// phase transitions.
#[derive(Debug)]
pub struct CycleScheduler {
    phase: Phase,
}

impl Default for CycleScheduler {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl CycleScheduler {
    /// Creates a scheduler waiting for a run to start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position within the run.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consumes world events and emits the commands of every phase transition.
    pub fn handle(&mut self, events: &[Event], view: CycleView<'_>, out: &mut Vec<Command>) {
        let mut ticked = false;
        let mut elapsed = Duration::ZERO;

        for event in events {
            match event {
                Event::RunStarted { .. } => self.phase = begin_cycle(1, view.config, out),
                Event::RunRestarted => self.phase = Phase::Idle,
                Event::LossDeclared { cause } => {
                    if !matches!(self.phase, Phase::Idle | Phase::Concluded) {
                        log::info!("cycle scheduler interrupted by {cause:?}");
                    }
                    self.phase = Phase::Concluded;
                }
                Event::TimeAdvanced { dt } => {
                    ticked = true;
                    elapsed = elapsed.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if ticked {
            self.phase = step(self.phase, elapsed, view, out);
        }
    }
}

fn step(phase: Phase, elapsed: Duration, view: CycleView<'_>, out: &mut Vec<Command>) -> Phase {
    match phase {
        Phase::Idle | Phase::Concluded => phase,
        Phase::Build { cycle, remaining } => match wait(remaining, elapsed) {
            Some(remaining) => Phase::Build { cycle, remaining },
            None => {
                out.push(Command::SetCountdown {
                    remaining: Duration::ZERO,
                });
                Phase::PreCombat {
                    cycle,
                    remaining: PRE_COMBAT_GRACE,
                }
            }
        },
        Phase::PreCombat { cycle, remaining } => match wait(remaining, elapsed) {
            Some(remaining) => Phase::PreCombat { cycle, remaining },
            None => enter_combat(cycle, view, out),
        },
        Phase::Combat { cycle } => {
            if view.live_enemies > 0 {
                return phase;
            }
            log::info!("cycle {cycle} cleared");
            out.push(Command::SetCountdown {
                remaining: Duration::ZERO,
            });
            Phase::PostCombat {
                cycle,
                remaining: POST_COMBAT_GRACE,
            }
        }
        Phase::PostCombat { cycle, remaining } => match wait(remaining, elapsed) {
            Some(remaining) => Phase::PostCombat { cycle, remaining },
            None => complete_cycle(cycle, view.config, out),
        },
    }
}

/// Returns the time still left, or `None` once the wait has fully elapsed.
fn wait(remaining: Duration, elapsed: Duration) -> Option<Duration> {
    let left = remaining.saturating_sub(elapsed);
    (!left.is_zero()).then_some(left)
}

fn begin_cycle(cycle: u32, config: &CycleConfig, out: &mut Vec<Command>) -> Phase {
    let remaining = config.build_duration_for(cycle);
    log::debug!("cycle {cycle}: build phase for {remaining:?}");
    out.push(Command::BeginCycle { cycle });
    out.push(Command::SetGameMode {
        mode: GameMode::Build,
    });
    out.push(Command::SetCountdown { remaining });
    Phase::Build { cycle, remaining }
}

fn enter_combat(cycle: u32, view: CycleView<'_>, out: &mut Vec<Command>) -> Phase {
    out.push(Command::SetGameMode {
        mode: GameMode::Combat,
    });

    let quota = if cycle == 1 {
        view.config.wave_one_enemies()
    } else {
        view.enemies_per_generator
    };
    for spawner in view.spawners {
        out.push(Command::SpawnWave {
            spawner: *spawner,
            quota,
        });
    }
    log::info!(
        "cycle {cycle}: commanded {quota} enemies from each of {} spawners",
        view.spawners.len()
    );

    out.push(Command::SetCountdown {
        remaining: view.config.combat_timer().initial_countdown(),
    });
    Phase::Combat { cycle }
}

fn complete_cycle(cycle: u32, config: &CycleConfig, out: &mut Vec<Command>) -> Phase {
    out.push(Command::CompleteCycle { cycle });
    if cycle > 1 {
        out.push(Command::EscalateDifficulty);
    }

    if cycle >= config.total_cycles() {
        out.push(Command::DeclareVictory);
        return Phase::Concluded;
    }
    begin_cycle(cycle + 1, config, out)
}
