#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Generator Defence session.

mod level;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{ensure, Result};
use clap::Parser;
use generator_defence_core::RunOutcome;
use generator_defence_presentation::{Hud, HudBackend, HudOptions, LineHud};
use generator_defence_session::{Session, SpawningConfig};
use generator_defence_system_cycle_scheduler::Phase;
use generator_defence_world::query;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Command-line arguments for the headless simulation.
#[derive(Debug, Parser)]
#[command(name = "generator-defence", about = "Runs a headless Generator Defence session")]
struct CliArgs {
    /// TOML level file describing generators, spawners and cycles.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the number of cycles in the run.
    #[arg(long, value_name = "COUNT")]
    cycles: Option<u32>,
    /// Seed for spawner pacing and the simulated defenders.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Simulated frame length in milliseconds.
    #[arg(long = "tick-ms", default_value_t = 100)]
    tick_ms: u64,
    /// Base interval between two spawns of the same spawner, in milliseconds.
    #[arg(long = "spawn-interval-ms", default_value_t = 1_000)]
    spawn_interval_ms: u64,
    /// Probability that a live enemy is defeated on a given tick.
    #[arg(long = "defeat-chance", default_value_t = 0.35)]
    defeat_chance: f64,
    /// Simulated time after which the player dies.
    #[arg(long = "player-dies-at", value_name = "SECONDS")]
    player_dies_at: Option<f64>,
    /// Upper bound on simulated time.
    #[arg(long = "max-seconds", default_value_t = 900.0)]
    max_seconds: f64,
}

/// Entry point for the Generator Defence command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    ensure!(
        (0.0..=1.0).contains(&args.defeat_chance),
        "--defeat-chance must lie within 0..=1 (received {})",
        args.defeat_chance
    );
    ensure!(args.tick_ms > 0, "--tick-ms must be positive");
    let max_time = Duration::try_from_secs_f64(args.max_seconds)?;
    let death_time = args
        .player_dies_at
        .map(Duration::try_from_secs_f64)
        .transpose()?;

    let mut level = level::load_level(args.config.as_deref())?;
    level::apply_cycle_override(&mut level, args.cycles);

    let spawning = SpawningConfig::new(Duration::from_millis(args.spawn_interval_ms), args.seed);
    let mut session = Session::new(level, spawning)?;
    println!("{}", query::welcome_banner(session.world()));

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut hud = LineHud::new(io::stdout().lock());
    let tick = Duration::from_millis(args.tick_ms);
    let mut elapsed = Duration::ZERO;

    hud.present(&Hud::from_status(&session.status(), HudOptions::default()))?;
    while session.phase() != Phase::Concluded && elapsed < max_time {
        session.advance(tick);
        elapsed += tick;

        for enemy in query::enemies(session.world()) {
            if rng.gen_bool(args.defeat_chance) {
                session.defeat_enemy(enemy);
            }
        }
        if death_time.is_some_and(|at| elapsed >= at) && !session.status().player_dead {
            session.notify_player_died();
        }

        hud.present(&Hud::from_status(&session.status(), HudOptions::default()))?;
    }

    let status = session.status();
    let verdict = match status.outcome {
        RunOutcome::Won => "level complete",
        RunOutcome::LostGenerators => "game over: every generator was destroyed",
        RunOutcome::LostPlayer => "game over: the player died",
        RunOutcome::InProgress => "simulation time limit reached",
    };
    println!(
        "{verdict} after {:.1}s (cycle {}/{})",
        elapsed.as_secs_f64(),
        status.cycle,
        status.total_cycles
    );
    Ok(())
}
