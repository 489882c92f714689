#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Generator Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Generator Defence.";

/// Remaining countdown at or below which the timer is presented as urgent.
pub const URGENT_COUNTDOWN: Duration = Duration::from_secs(9);

/// Describes the active game mode of the session.
///
/// The declaration order defines the ordinal of each mode; [`GameMode::Idle`]
/// is ordinal zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// No cycle is running. Presentation deliberately shows no mode panel.
    #[default]
    Idle,
    /// Build phase where the player places defenses and no threats are active.
    Build,
    /// Combat phase where commanded waves attack the generators.
    Combat,
    /// Terminal mode entered after a loss.
    GameOver,
    /// Terminal mode entered after the final cycle was cleared.
    LevelComplete,
}

impl GameMode {
    const ORDERED: [Self; 5] = [
        Self::Idle,
        Self::Build,
        Self::Combat,
        Self::GameOver,
        Self::LevelComplete,
    ];

    /// Numeric position of the mode in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Build => 1,
            Self::Combat => 2,
            Self::GameOver => 3,
            Self::LevelComplete => 4,
        }
    }

    /// Resolves the mode stored at the provided ordinal, if any.
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ORDERED.get(usize::from(ordinal)).copied()
    }

    /// Reports whether the mode ends player interaction for the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::LevelComplete)
    }

    /// Mode reached by the restricted manual toggle.
    ///
    /// `Build` and `Combat` swap with each other and `Idle` advances to the
    /// next ordinal. Terminal modes are returned unchanged.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Build => Self::Combat,
            Self::Combat => Self::Build,
            Self::Idle => Self::from_ordinal(self.ordinal() + 1).unwrap_or(self),
            Self::GameOver | Self::LevelComplete => self,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "Idle",
            Self::Build => "Build",
            Self::Combat => "Combat",
            Self::GameOver => "GameOver",
            Self::LevelComplete => "LevelComplete",
        };
        f.write_str(label)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Establishes the generator set and the spawners available to the level.
    ConfigureLevel {
        /// Generators defended during the run.
        generators: Vec<GeneratorSpec>,
        /// Spawners that receive wave quotas at the start of each combat phase.
        spawners: Vec<SpawnerId>,
    },
    /// Installs the difficulty parameters used by the next run.
    ConfigureCycles {
        /// Parameters that remain fixed for the duration of the run.
        config: CycleConfig,
    },
    /// Starts a fresh run using the configured level and cycles.
    StartRun,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Unconditionally overwrites the current game mode.
    SetGameMode {
        /// Mode the world should activate.
        mode: GameMode,
    },
    /// Applies the restricted manual toggle to the current game mode.
    ToggleGameMode,
    /// Records the start of a cycle and resets the live-enemy accumulator.
    BeginCycle {
        /// One-based index of the cycle being started.
        cycle: u32,
    },
    /// Overwrites the display countdown.
    SetCountdown {
        /// Value shown on the countdown; zero hides the timer.
        remaining: Duration,
    },
    /// Decrements the display countdown, saturating at zero.
    AdvanceCountdown {
        /// Amount removed from the countdown.
        elapsed: Duration,
    },
    /// Commands a spawner to emit a quota of hostiles.
    SpawnWave {
        /// Spawner receiving the quota.
        spawner: SpawnerId,
        /// Number of hostiles the spawner must emit.
        quota: u32,
    },
    /// Requests that a spawner emit a single hostile into the level.
    SpawnEnemy {
        /// Spawner responsible for creating the hostile.
        spawner: SpawnerId,
    },
    /// Reports that a spawned hostile was defeated.
    DefeatEnemy {
        /// Identifier of the defeated hostile.
        enemy: EnemyId,
    },
    /// Marks the provided cycle as cleared.
    CompleteCycle {
        /// One-based index of the cleared cycle.
        cycle: u32,
    },
    /// Raises the enemies-per-generator level by the configured increment.
    EscalateDifficulty,
    /// Concludes the run as won.
    DeclareVictory,
    /// Removes health from a generator.
    DamageGenerator {
        /// Generator receiving the damage.
        generator: GeneratorId,
        /// Amount of health removed.
        amount: u32,
    },
    /// Raises the "all generators destroyed" loss signal.
    DeclareGeneratorsDestroyed,
    /// Raises the "player died" loss signal.
    NotifyPlayerDied,
    /// Asks the external scene loader to load the scene at the provided index.
    RequestSceneLoad {
        /// Build index of the requested scene.
        index: u32,
    },
    /// Reinitializes every counter and flag to its default.
    RestartRun,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of real time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the level's generators and spawners were configured.
    LevelConfigured {
        /// Number of generators in the set.
        generators: usize,
        /// Number of spawners available to waves.
        spawners: usize,
    },
    /// Announces that a run started.
    RunStarted {
        /// Number of cycles the run consists of.
        total_cycles: u32,
    },
    /// Announces that a cycle began.
    CycleBegan {
        /// One-based index of the cycle.
        cycle: u32,
        /// Number of cycles the run consists of.
        total_cycles: u32,
    },
    /// Announces that the game mode was written.
    GameModeChanged {
        /// Mode active before the write.
        from: GameMode,
        /// Mode active after the write.
        to: GameMode,
    },
    /// Reports that the display countdown was overwritten.
    CountdownChanged {
        /// Value now shown on the countdown.
        remaining: Duration,
    },
    /// Confirms that a spawner received a wave quota.
    WaveCommanded {
        /// Spawner that received the quota.
        spawner: SpawnerId,
        /// Number of hostiles the spawner must emit.
        quota: u32,
    },
    /// Confirms that a hostile was spawned.
    EnemySpawned {
        /// Identifier assigned to the hostile.
        enemy: EnemyId,
        /// Spawner that produced the hostile.
        spawner: SpawnerId,
    },
    /// Confirms that a hostile was defeated.
    EnemyDefeated {
        /// Identifier of the defeated hostile.
        enemy: EnemyId,
        /// Live-enemy accumulator after the defeat was counted.
        live_enemies: u32,
    },
    /// Announces that a cycle was cleared.
    CycleCompleted {
        /// One-based index of the cleared cycle.
        cycle: u32,
    },
    /// Reports the new difficulty level after an escalation.
    DifficultyEscalated {
        /// Enemies each spawner receives in subsequent waves.
        enemies_per_generator: u32,
    },
    /// Announces that the run was won.
    RunWon {
        /// Number of cycles that were cleared.
        cycles: u32,
    },
    /// Reports that a generator lost health.
    GeneratorDamaged {
        /// Generator that was damaged.
        generator: GeneratorId,
        /// Health remaining after the damage.
        current_health: i32,
    },
    /// Announces the authoritative game-over trigger. Emitted once per run.
    LossDeclared {
        /// Signal that caused the loss.
        cause: LossCause,
    },
    /// Forwards a scene-load request to the external scene loader.
    SceneLoadRequested {
        /// Build index of the requested scene.
        index: u32,
    },
    /// Announces that every counter and flag was reinitialized.
    RunRestarted,
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[doc = concat!("Creates a new ", $what, " identifier with the provided numeric value.")]
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            #[doc = concat!("Retrieves the numeric representation of the ", $what, " identifier.")]
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $what, self.0)
            }
        }
    };
}

identifier!(
    /// Unique identifier assigned to a defended generator.
    GeneratorId,
    "generator"
);
identifier!(
    /// Unique identifier assigned to a threat spawner.
    SpawnerId,
    "spawner"
);
identifier!(
    /// Unique identifier assigned to a spawned hostile.
    EnemyId,
    "enemy"
);

/// Static description of a generator established at level load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    /// Identifier of the generator.
    pub id: GeneratorId,
    /// Health the generator starts every run with.
    pub starting_health: i32,
}

impl GeneratorSpec {
    /// Creates a new generator description.
    #[must_use]
    pub const fn new(id: GeneratorId, starting_health: i32) -> Self {
        Self {
            id,
            starting_health,
        }
    }
}

/// Immutable representation of a generator's health used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSnapshot {
    /// Identifier of the generator.
    pub id: GeneratorId,
    /// Health currently remaining.
    pub current_health: i32,
    /// Health the generator started the run with.
    pub starting_health: i32,
}

impl GeneratorSnapshot {
    /// Reports whether the generator has no health left.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.current_health <= 0
    }
}

/// Read-only snapshot describing the health of every generator in the level.
#[derive(Clone, Debug, Default)]
pub struct GeneratorView {
    snapshots: Vec<GeneratorSnapshot>,
}

impl GeneratorView {
    /// Creates a new generator view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<GeneratorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured generator snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratorSnapshot> {
        self.snapshots.iter()
    }

    /// Number of generators in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the set contains no generators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of generators currently reporting non-positive health.
    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        let destroyed = self
            .snapshots
            .iter()
            .filter(|snapshot| snapshot.is_destroyed())
            .count();
        debug_assert!(destroyed <= self.snapshots.len());
        destroyed
    }

    /// Reports whether every generator reports non-positive health.
    ///
    /// An empty set never counts as destroyed; start-up validation rejects
    /// levels without generators.
    #[must_use]
    pub fn all_destroyed(&self) -> bool {
        !self.snapshots.is_empty() && self.destroyed_count() == self.snapshots.len()
    }
}

/// Policy describing what the countdown shows during combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatTimerPolicy {
    /// The countdown is zeroed; combat has no visible time pressure.
    #[default]
    Hidden,
    /// The countdown shows the provided duration. Display only, combat still
    /// ends when the live-enemy accumulator reaches zero.
    Display {
        /// Value written to the countdown when combat starts.
        #[serde(with = "seconds")]
        duration: Duration,
    },
}

impl CombatTimerPolicy {
    /// Countdown value written when a combat phase starts.
    #[must_use]
    pub const fn initial_countdown(self) -> Duration {
        match self {
            Self::Hidden => Duration::ZERO,
            Self::Display { duration } => duration,
        }
    }
}

/// Difficulty parameters that stay fixed for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CycleConfig {
    total_cycles: u32,
    enemies_per_generator: u32,
    enemies_increase_per_cycle: u32,
    wave_one_enemies: u32,
    #[serde(with = "seconds")]
    build_duration: Duration,
    #[serde(with = "seconds")]
    wave_one_build_duration: Duration,
    combat_timer: CombatTimerPolicy,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            total_cycles: 3,
            enemies_per_generator: 10,
            enemies_increase_per_cycle: 5,
            wave_one_enemies: 5,
            build_duration: Duration::from_secs(30),
            wave_one_build_duration: Duration::from_secs(30),
            combat_timer: CombatTimerPolicy::Hidden,
        }
    }
}

impl CycleConfig {
    /// Overrides the number of build/combat cycles in the run.
    #[must_use]
    pub const fn with_total_cycles(mut self, total_cycles: u32) -> Self {
        self.total_cycles = total_cycles;
        self
    }

    /// Overrides the base number of enemies each spawner emits from cycle two on.
    #[must_use]
    pub const fn with_enemies_per_generator(mut self, enemies_per_generator: u32) -> Self {
        self.enemies_per_generator = enemies_per_generator;
        self
    }

    /// Overrides the per-cycle increase applied to the enemies-per-generator level.
    #[must_use]
    pub const fn with_enemies_increase_per_cycle(mut self, increase: u32) -> Self {
        self.enemies_increase_per_cycle = increase;
        self
    }

    /// Overrides the number of enemies each spawner emits in the first wave.
    #[must_use]
    pub const fn with_wave_one_enemies(mut self, wave_one_enemies: u32) -> Self {
        self.wave_one_enemies = wave_one_enemies;
        self
    }

    /// Overrides the build-phase duration used from cycle two on.
    #[must_use]
    pub const fn with_build_duration(mut self, build_duration: Duration) -> Self {
        self.build_duration = build_duration;
        self
    }

    /// Overrides the build-phase duration of the first cycle.
    #[must_use]
    pub const fn with_wave_one_build_duration(mut self, duration: Duration) -> Self {
        self.wave_one_build_duration = duration;
        self
    }

    /// Overrides what the countdown shows during combat.
    #[must_use]
    pub const fn with_combat_timer(mut self, combat_timer: CombatTimerPolicy) -> Self {
        self.combat_timer = combat_timer;
        self
    }

    /// Number of build/combat cycles in the run.
    #[must_use]
    pub const fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    /// Base number of enemies each spawner emits from cycle two on.
    #[must_use]
    pub const fn enemies_per_generator(&self) -> u32 {
        self.enemies_per_generator
    }

    /// Increase applied to the enemies-per-generator level after each cycle past the first.
    #[must_use]
    pub const fn enemies_increase_per_cycle(&self) -> u32 {
        self.enemies_increase_per_cycle
    }

    /// Number of enemies each spawner emits in the first wave.
    #[must_use]
    pub const fn wave_one_enemies(&self) -> u32 {
        self.wave_one_enemies
    }

    /// Build-phase duration used from cycle two on.
    #[must_use]
    pub const fn build_duration(&self) -> Duration {
        self.build_duration
    }

    /// Build-phase duration of the first cycle.
    #[must_use]
    pub const fn wave_one_build_duration(&self) -> Duration {
        self.wave_one_build_duration
    }

    /// Countdown policy applied during combat.
    #[must_use]
    pub const fn combat_timer(&self) -> CombatTimerPolicy {
        self.combat_timer
    }

    /// Build-phase duration of the provided one-based cycle.
    #[must_use]
    pub const fn build_duration_for(&self, cycle: u32) -> Duration {
        if cycle == 1 {
            self.wave_one_build_duration
        } else {
            self.build_duration
        }
    }

    /// Rejects parameters that would produce a degenerate run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(())
    }
}

/// Progress of a run towards one of its terminal outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// The run has not concluded yet.
    #[default]
    InProgress,
    /// The final cycle was cleared.
    Won,
    /// Every generator was destroyed.
    LostGenerators,
    /// The player died.
    LostPlayer,
}

impl RunOutcome {
    /// Reports whether the run has concluded.
    #[must_use]
    pub const fn is_concluded(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Reports whether the run ended in a loss.
    #[must_use]
    pub const fn is_lost(self) -> bool {
        matches!(self, Self::LostGenerators | Self::LostPlayer)
    }
}

/// Signals that force the session into [`GameMode::GameOver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossCause {
    /// Every generator reported non-positive health at a poll.
    GeneratorsDestroyed,
    /// The player died.
    PlayerDied,
}

impl LossCause {
    /// Outcome recorded for a run lost to this cause.
    #[must_use]
    pub const fn outcome(self) -> RunOutcome {
        match self {
            Self::GeneratorsDestroyed => RunOutcome::LostGenerators,
            Self::PlayerDied => RunOutcome::LostPlayer,
        }
    }
}

/// Read-only snapshot of everything presentation collaborators display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    /// Current game mode.
    pub mode: GameMode,
    /// One-based index of the current cycle, zero before the run starts.
    pub cycle: u32,
    /// Number of cycles the run consists of.
    pub total_cycles: u32,
    /// Value shown on the display countdown.
    pub countdown: Duration,
    /// Live-enemy accumulator.
    pub live_enemies: u32,
    /// Enemies each spawner receives in the next escalated wave.
    pub enemies_per_generator: u32,
    /// Terminal outcome of the run, if reached.
    pub outcome: RunOutcome,
    /// Whether the "all generators destroyed" signal was raised.
    pub generators_destroyed: bool,
    /// Whether the "player died" signal was raised.
    pub player_dead: bool,
    /// Whether player input is still handled.
    pub input_enabled: bool,
}

impl SessionStatus {
    /// Reports whether the run was won.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        matches!(self.outcome, RunOutcome::Won)
    }
}

/// Configuration defects rejected when a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The run must consist of at least one cycle.
    #[error("a run requires at least one cycle")]
    ZeroCycles,
    /// The level must declare at least one generator.
    #[error("the level declares no generators")]
    NoGenerators,
    /// Two generators share the same identifier.
    #[error("{generator} is declared more than once")]
    DuplicateGenerator {
        /// Identifier that was declared twice.
        generator: GeneratorId,
    },
    /// Two spawners share the same identifier.
    #[error("{spawner} is declared more than once")]
    DuplicateSpawner {
        /// Identifier that was declared twice.
        spawner: SpawnerId,
    },
    /// A generator would start the run already destroyed.
    #[error("{generator} starts with non-positive health {health}")]
    NonPositiveHealth {
        /// Generator with the invalid starting health.
        generator: GeneratorId,
        /// Starting health that failed validation.
        health: i32,
    },
}

mod seconds {
    use std::time::Duration;

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{CombatTimerPolicy, ConfigError, CycleConfig, GameMode, GeneratorId, LossCause};
    use super::{GeneratorSnapshot, GeneratorView, RunOutcome};

    #[test]
    fn toggle_swaps_build_and_combat() {
        assert_eq!(GameMode::Build.toggled(), GameMode::Combat);
        assert_eq!(GameMode::Combat.toggled(), GameMode::Build);
    }

    #[test]
    fn toggle_advances_idle_to_next_ordinal() {
        assert_eq!(GameMode::Idle.ordinal(), 0);
        assert_eq!(GameMode::Idle.toggled(), GameMode::Build);
    }

    #[test]
    fn toggle_leaves_terminal_modes_untouched() {
        assert_eq!(GameMode::GameOver.toggled(), GameMode::GameOver);
        assert_eq!(GameMode::LevelComplete.toggled(), GameMode::LevelComplete);
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for ordinal in 0..5 {
            let mode = GameMode::from_ordinal(ordinal).expect("ordinal in range");
            assert_eq!(mode.ordinal(), ordinal);
        }
        assert_eq!(GameMode::from_ordinal(5), None);
    }

    #[test]
    fn only_game_over_and_level_complete_are_terminal() {
        assert!(!GameMode::Idle.is_terminal());
        assert!(!GameMode::Build.is_terminal());
        assert!(!GameMode::Combat.is_terminal());
        assert!(GameMode::GameOver.is_terminal());
        assert!(GameMode::LevelComplete.is_terminal());
    }

    #[test]
    fn first_cycle_uses_wave_one_build_duration() {
        let config = CycleConfig::default()
            .with_wave_one_build_duration(Duration::from_secs(45))
            .with_build_duration(Duration::from_secs(20));

        assert_eq!(config.build_duration_for(1), Duration::from_secs(45));
        assert_eq!(config.build_duration_for(2), Duration::from_secs(20));
        assert_eq!(config.build_duration_for(6), Duration::from_secs(20));
    }

    #[test]
    fn zero_cycles_fail_validation() {
        let config = CycleConfig::default().with_total_cycles(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCycles));
        assert_eq!(CycleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn combat_timer_policy_selects_initial_countdown() {
        assert_eq!(CombatTimerPolicy::Hidden.initial_countdown(), Duration::ZERO);
        let display = CombatTimerPolicy::Display {
            duration: Duration::from_secs(30),
        };
        assert_eq!(display.initial_countdown(), Duration::from_secs(30));
    }

    #[test]
    fn cycle_config_parses_from_toml_with_defaults() {
        let source = r#"
            total_cycles = 4
            wave_one_enemies = 2
            build_duration = 12.5
            combat_timer = { kind = "display", duration = 30 }
        "#;

        let config: CycleConfig = toml::from_str(source).expect("valid config");

        assert_eq!(config.total_cycles(), 4);
        assert_eq!(config.wave_one_enemies(), 2);
        assert_eq!(config.build_duration(), Duration::from_millis(12_500));
        assert_eq!(
            config.enemies_per_generator(),
            CycleConfig::default().enemies_per_generator()
        );
        assert_eq!(
            config.combat_timer(),
            CombatTimerPolicy::Display {
                duration: Duration::from_secs(30),
            }
        );
    }

    #[test]
    fn unknown_cycle_keys_are_rejected() {
        let result: Result<CycleConfig, _> = toml::from_str("total_cycle = 5");
        assert!(result.is_err());
    }

    #[test]
    fn negative_durations_are_rejected() {
        let result: Result<CycleConfig, _> = toml::from_str("build_duration = -1.0");
        assert!(result.is_err());
    }

    #[test]
    fn generator_snapshot_destroyed_at_zero_or_below() {
        let mut snapshot = GeneratorSnapshot {
            id: GeneratorId::new(1),
            current_health: 1,
            starting_health: 100,
        };
        assert!(!snapshot.is_destroyed());
        snapshot.current_health = 0;
        assert!(snapshot.is_destroyed());
        snapshot.current_health = -20;
        assert!(snapshot.is_destroyed());
    }

    #[test]
    fn generator_view_requires_every_member_destroyed() {
        let snapshot = |id, current_health| GeneratorSnapshot {
            id: GeneratorId::new(id),
            current_health,
            starting_health: 100,
        };

        let partial = GeneratorView::from_snapshots(vec![
            snapshot(0, 0),
            snapshot(1, -5),
            snapshot(2, 40),
        ]);
        assert_eq!(partial.destroyed_count(), 2);
        assert!(!partial.all_destroyed());

        let total = GeneratorView::from_snapshots(vec![
            snapshot(0, 0),
            snapshot(1, -5),
            snapshot(2, 0),
        ]);
        assert!(total.all_destroyed());

        assert!(!GeneratorView::default().all_destroyed());
    }

    #[test]
    fn loss_causes_map_to_outcomes() {
        assert_eq!(
            LossCause::GeneratorsDestroyed.outcome(),
            RunOutcome::LostGenerators
        );
        assert_eq!(LossCause::PlayerDied.outcome(), RunOutcome::LostPlayer);
        assert!(!RunOutcome::InProgress.is_concluded());
        assert!(RunOutcome::Won.is_concluded());
        assert!(!RunOutcome::Won.is_lost());
        assert!(RunOutcome::LostGenerators.is_lost());
        assert!(RunOutcome::LostPlayer.is_lost());
    }

    #[test]
    fn identifiers_display_with_kind() {
        assert_eq!(GeneratorId::new(3).to_string(), "generator#3");
    }
}
