#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Generator Defence.

mod enemies;
mod generators;
mod mode;

use std::time::Duration;

use generator_defence_core::{
    Command, CycleConfig, EnemyId, Event, GameMode, LossCause, RunOutcome, SpawnerId,
    WELCOME_BANNER,
};

use self::{enemies::EnemyRegistry, generators::GeneratorSet, mode::ModeState};

/// Run progress mutated through scheduler commands.
#[derive(Clone, Copy, Debug, Default)]
struct CycleState {
    cycle: u32,
    cycles_completed: u32,
    enemies_per_generator: u32,
    countdown: Duration,
    outcome: RunOutcome,
}

impl CycleState {
    fn fresh(config: &CycleConfig) -> Self {
        Self {
            enemies_per_generator: config.enemies_per_generator(),
            ..Self::default()
        }
    }
}

/// Represents the authoritative Generator Defence session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    mode: ModeState,
    config: CycleConfig,
    cycle: CycleState,
    live_enemies: u32,
    generators: GeneratorSet,
    spawners: Vec<SpawnerId>,
    enemies: EnemyRegistry,
    generators_destroyed: bool,
    player_dead: bool,
    input_enabled: bool,
    requested_scene: Option<u32>,
}

impl World {
    /// Creates a new world with the default cycle configuration and an empty level.
    #[must_use]
    pub fn new() -> Self {
        let config = CycleConfig::default();
        Self {
            banner: WELCOME_BANNER,
            mode: ModeState::default(),
            cycle: CycleState::fresh(&config),
            config,
            live_enemies: 0,
            generators: GeneratorSet::default(),
            spawners: Vec::new(),
            enemies: EnemyRegistry::new(),
            generators_destroyed: false,
            player_dead: false,
            input_enabled: true,
            requested_scene: None,
        }
    }

    fn reset_run(&mut self) {
        self.cycle = CycleState::fresh(&self.config);
        self.live_enemies = 0;
        self.enemies.clear();
        self.generators.restore();
        self.generators_destroyed = false;
        self.player_dead = false;
        self.input_enabled = true;
    }

    fn write_mode(&mut self, mode: GameMode, out_events: &mut Vec<Event>) {
        let from = self.mode.set_mode(mode);
        out_events.push(Event::GameModeChanged { from, to: mode });
    }

    fn declare_loss(&mut self, cause: LossCause, out_events: &mut Vec<Event>) {
        if self.cycle.outcome.is_lost() {
            log::debug!("ignored {cause:?}; run already lost as {:?}", self.cycle.outcome);
            return;
        }

        log::warn!("game over: {cause:?}");
        self.input_enabled = false;
        self.cycle.outcome = cause.outcome();
        out_events.push(Event::LossDeclared { cause });
        self.write_mode(GameMode::GameOver, out_events);
    }

    fn defeat_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.enemies.remove(enemy).is_none() {
            log::debug!("ignored defeat of unknown {enemy}");
            return;
        }

        debug_assert!(self.live_enemies > 0, "live-enemy accumulator underflow");
        match self.live_enemies.checked_sub(1) {
            Some(remaining) => self.live_enemies = remaining,
            None => log::error!("live-enemy accumulator underflow while defeating {enemy}"),
        }

        out_events.push(Event::EnemyDefeated {
            enemy,
            live_enemies: self.live_enemies,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLevel {
            generators,
            spawners,
        } => {
            world.generators = GeneratorSet::from_specs(&generators);
            world.spawners = spawners;
            out_events.push(Event::LevelConfigured {
                generators: world.generators.len(),
                spawners: world.spawners.len(),
            });
        }
        Command::ConfigureCycles { config } => {
            world.config = config;
            world.cycle = CycleState::fresh(&world.config);
        }
        Command::StartRun => {
            world.reset_run();
            log::info!("run started with {} cycles", world.config.total_cycles());
            out_events.push(Event::RunStarted {
                total_cycles: world.config.total_cycles(),
            });
        }
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::SetGameMode { mode } => world.write_mode(mode, out_events),
        Command::ToggleGameMode => {
            if !world.input_enabled {
                log::debug!("ignored mode toggle; player input is disabled");
                return;
            }
            if let Some(from) = world.mode.toggle() {
                out_events.push(Event::GameModeChanged {
                    from,
                    to: world.mode.current(),
                });
            }
        }
        Command::BeginCycle { cycle } => {
            world.cycle.cycle = cycle;
            world.live_enemies = 0;
            log::info!("begin cycle {cycle}/{}", world.config.total_cycles());
            out_events.push(Event::CycleBegan {
                cycle,
                total_cycles: world.config.total_cycles(),
            });
        }
        Command::SetCountdown { remaining } => {
            world.cycle.countdown = remaining;
            out_events.push(Event::CountdownChanged { remaining });
        }
        Command::AdvanceCountdown { elapsed } => {
            world.cycle.countdown = world.cycle.countdown.saturating_sub(elapsed);
        }
        Command::SpawnWave { spawner, quota } => {
            world.live_enemies = world.live_enemies.saturating_add(quota);
            log::debug!("{spawner} commanded to spawn {quota} enemies");
            out_events.push(Event::WaveCommanded { spawner, quota });
        }
        Command::SpawnEnemy { spawner } => {
            let enemy = world.enemies.spawn(spawner);
            out_events.push(Event::EnemySpawned { enemy, spawner });
        }
        Command::DefeatEnemy { enemy } => world.defeat_enemy(enemy, out_events),
        Command::CompleteCycle { cycle } => {
            world.cycle.cycles_completed = cycle;
            out_events.push(Event::CycleCompleted { cycle });
        }
        Command::EscalateDifficulty => {
            world.cycle.enemies_per_generator = world
                .cycle
                .enemies_per_generator
                .saturating_add(world.config.enemies_increase_per_cycle());
            out_events.push(Event::DifficultyEscalated {
                enemies_per_generator: world.cycle.enemies_per_generator,
            });
        }
        Command::DeclareVictory => {
            if world.cycle.outcome.is_concluded() {
                log::debug!(
                    "ignored victory; run already concluded as {:?}",
                    world.cycle.outcome
                );
                return;
            }

            log::info!("level complete after {} cycles", world.cycle.cycles_completed);
            world.cycle.outcome = RunOutcome::Won;
            out_events.push(Event::RunWon {
                cycles: world.cycle.cycles_completed,
            });
            world.write_mode(GameMode::LevelComplete, out_events);
        }
        Command::DamageGenerator { generator, amount } => {
            if let Some(current_health) = world.generators.damage(generator, amount) {
                out_events.push(Event::GeneratorDamaged {
                    generator,
                    current_health,
                });
            }
        }
        Command::DeclareGeneratorsDestroyed => {
            if !world.generators_destroyed {
                world.generators_destroyed = true;
                log::warn!("all generators destroyed; player has lost");
            }
            world.declare_loss(LossCause::GeneratorsDestroyed, out_events);
        }
        Command::NotifyPlayerDied => {
            if !world.player_dead {
                world.player_dead = true;
                log::warn!("player has died");
            }
            world.declare_loss(LossCause::PlayerDied, out_events);
        }
        Command::RequestSceneLoad { index } => {
            world.requested_scene = Some(index);
            out_events.push(Event::SceneLoadRequested { index });
        }
        Command::RestartRun => {
            world.reset_run();
            world.requested_scene = None;
            log::info!("run restarted");
            out_events.push(Event::RunRestarted);
            world.write_mode(GameMode::Idle, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use generator_defence_core::{
        CycleConfig, EnemyId, GameMode, GeneratorView, SessionStatus, SpawnerId,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current game mode.
    #[must_use]
    pub fn game_mode(world: &World) -> GameMode {
        world.mode.current()
    }

    /// Difficulty parameters of the current run.
    #[must_use]
    pub fn cycle_config(world: &World) -> &CycleConfig {
        &world.config
    }

    /// One-based index of the current cycle, zero before the run starts.
    #[must_use]
    pub fn cycle(world: &World) -> u32 {
        world.cycle.cycle
    }

    /// Enemies each spawner receives in the next escalated wave.
    #[must_use]
    pub fn enemies_per_generator(world: &World) -> u32 {
        world.cycle.enemies_per_generator
    }

    /// Value shown on the display countdown.
    #[must_use]
    pub fn countdown(world: &World) -> Duration {
        world.cycle.countdown
    }

    /// Live-enemy accumulator.
    #[must_use]
    pub fn live_enemies(world: &World) -> u32 {
        world.live_enemies
    }

    /// Spawners that receive wave quotas.
    #[must_use]
    pub fn spawners(world: &World) -> &[SpawnerId] {
        &world.spawners
    }

    /// Identifiers of every spawned hostile that has not been defeated.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemyId> {
        world.enemies.ids()
    }

    /// Captures a read-only view of the generator set.
    #[must_use]
    pub fn generator_view(world: &World) -> GeneratorView {
        world.generators.view()
    }

    /// Scene index most recently requested from the external scene loader.
    #[must_use]
    pub fn requested_scene(world: &World) -> Option<u32> {
        world.requested_scene
    }

    /// Captures everything presentation collaborators display.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        SessionStatus {
            mode: world.mode.current(),
            cycle: world.cycle.cycle,
            total_cycles: world.config.total_cycles(),
            countdown: world.cycle.countdown,
            live_enemies: world.live_enemies,
            enemies_per_generator: world.cycle.enemies_per_generator,
            outcome: world.cycle.outcome,
            generators_destroyed: world.generators_destroyed,
            player_dead: world.player_dead,
            input_enabled: world.input_enabled,
        }
    }
}
