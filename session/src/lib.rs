#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cooperative tick driver that owns the Generator Defence world and every
//! system mutating it.
//!
//! All game-state mutation happens on the caller's thread. Each entry point
//! applies one command to the world and then pumps the resulting events
//! through the systems in a fixed order (cycle scheduler, spawning, display
//! countdown, generator watch) until no system emits further commands.

use std::time::Duration;

use generator_defence_core::{
    Command, ConfigError, EnemyId, Event, GameMode, GeneratorId, SessionStatus,
};
use generator_defence_system_bootstrap::Bootstrap;
use generator_defence_system_countdown::Countdown;
use generator_defence_system_cycle_scheduler::{CycleScheduler, CycleView, Phase};
use generator_defence_system_generator_watch::GeneratorWatch;
use generator_defence_system_spawning::Spawning;
use generator_defence_world::{self as world, query, World};

pub use generator_defence_system_bootstrap::LevelConfig;
pub use generator_defence_system_spawning::Config as SpawningConfig;

/// Upper bound on pump rounds for a single entry point call.
const MAX_PUMP_ROUNDS: usize = 64;

/// A single Generator Defence play session.
#[derive(Debug)]
pub struct Session {
    world: World,
    bootstrap: Bootstrap,
    scheduler: CycleScheduler,
    spawning: Spawning,
    countdown: Countdown,
    generator_watch: GeneratorWatch,
    events: Vec<Event>,
}

impl Session {
    /// Validates the level and starts its first run.
    pub fn new(level: LevelConfig, spawning: SpawningConfig) -> Result<Self, ConfigError> {
        let bootstrap = Bootstrap;
        let commands = bootstrap.configure(&level)?;

        let mut session = Self {
            world: World::new(),
            bootstrap,
            scheduler: CycleScheduler::new(),
            spawning: Spawning::new(spawning),
            countdown: Countdown::default(),
            generator_watch: GeneratorWatch::default(),
            events: Vec::new(),
        };
        log::info!("{}", session.bootstrap.welcome_banner(&session.world));
        for command in commands {
            session.dispatch(command);
        }
        Ok(session)
    }

    /// Advances the session by the provided frame delta.
    pub fn advance(&mut self, dt: Duration) {
        self.begin_call();
        self.dispatch(Command::Tick { dt });
    }

    /// Flips between build and combat; ignored in terminal modes and once a
    /// loss has disabled player input.
    pub fn toggle_mode(&mut self) {
        self.begin_call();
        self.dispatch(Command::ToggleGameMode);
    }

    /// Writes the provided mode directly, bypassing the cycle scheduler.
    pub fn force_transition(&mut self, mode: GameMode) {
        self.begin_call();
        self.dispatch(Command::SetGameMode { mode });
    }

    /// Raises the player-death loss signal.
    pub fn notify_player_died(&mut self) {
        self.begin_call();
        self.dispatch(Command::NotifyPlayerDied);
    }

    /// Removes health from a generator.
    pub fn damage_generator(&mut self, generator: GeneratorId, amount: u32) {
        self.begin_call();
        self.dispatch(Command::DamageGenerator { generator, amount });
    }

    /// Reports that a spawned hostile was defeated.
    pub fn defeat_enemy(&mut self, enemy: EnemyId) {
        self.begin_call();
        self.dispatch(Command::DefeatEnemy { enemy });
    }

    /// Forwards a scene-load request to the external scene loader.
    pub fn request_scene_load(&mut self, index: u32) {
        self.begin_call();
        self.dispatch(Command::RequestSceneLoad { index });
    }

    /// Reinitializes every counter and flag and starts a fresh run of the
    /// same level.
    pub fn restart(&mut self) {
        self.begin_call();
        self.dispatch(Command::RestartRun);
        self.dispatch(Command::StartRun);
    }

    /// Captures everything presentation collaborators display.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        query::status(&self.world)
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Position of the cycle scheduler within the run.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    /// Events produced by the most recent entry point call.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn begin_call(&mut self) {
        self.events.clear();
    }

    fn dispatch(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.pump(events);
    }

    fn pump(&mut self, mut events: Vec<Event>) {
        let mut rounds = 0;
        while !events.is_empty() {
            rounds += 1;
            debug_assert!(rounds <= MAX_PUMP_ROUNDS, "session pump failed to settle");
            if rounds > MAX_PUMP_ROUNDS {
                log::error!(
                    "session pump still busy after {MAX_PUMP_ROUNDS} rounds; dropping {} events",
                    events.len()
                );
                return;
            }

            let mut commands = Vec::new();
            let view = CycleView {
                config: query::cycle_config(&self.world),
                enemies_per_generator: query::enemies_per_generator(&self.world),
                live_enemies: query::live_enemies(&self.world),
                spawners: query::spawners(&self.world),
            };
            self.scheduler.handle(&events, view, &mut commands);
            self.spawning.handle(&events, &mut commands);
            self.countdown
                .handle(&events, query::countdown(&self.world), &mut commands);
            self.generator_watch.handle(
                &events,
                &query::generator_view(&self.world),
                &mut commands,
            );

            self.events.append(&mut events);
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }
}
