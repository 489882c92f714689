#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that validates a level and prepares the commands
//! starting a Generator Defence run.

use std::collections::BTreeSet;

use generator_defence_core::{
    Command, ConfigError, CycleConfig, GeneratorId, GeneratorSpec, SpawnerId,
};
use generator_defence_world::{query, World};
use serde::{Deserialize, Serialize};

/// Static description of a level: what is defended, where threats come from
/// and how the cycles escalate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Generators the player defends.
    #[serde(default)]
    pub generators: Vec<GeneratorSpec>,
    /// Spawners commanded at the start of every combat phase.
    #[serde(default)]
    pub spawners: Vec<SpawnerId>,
    /// Difficulty parameters of the run.
    #[serde(default)]
    pub cycles: CycleConfig,
}

impl Default for LevelConfig {
    /// Three generators with 100 health each, guarded against two spawners.
    fn default() -> Self {
        Self {
            generators: (0..3)
                .map(|id| GeneratorSpec::new(GeneratorId::new(id), 100))
                .collect(),
            spawners: (0..2).map(SpawnerId::new).collect(),
            cycles: CycleConfig::default(),
        }
    }
}

/// Validates levels and greets the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Rejects levels that cannot produce a meaningful run.
    pub fn validate(&self, level: &LevelConfig) -> Result<(), ConfigError> {
        level.cycles.validate()?;

        if level.generators.is_empty() {
            return Err(ConfigError::NoGenerators);
        }

        let mut generators = BTreeSet::new();
        for spec in &level.generators {
            if !generators.insert(spec.id) {
                return Err(ConfigError::DuplicateGenerator { generator: spec.id });
            }
            if spec.starting_health <= 0 {
                return Err(ConfigError::NonPositiveHealth {
                    generator: spec.id,
                    health: spec.starting_health,
                });
            }
        }

        let mut spawners = BTreeSet::new();
        for spawner in &level.spawners {
            if !spawners.insert(*spawner) {
                return Err(ConfigError::DuplicateSpawner { spawner: *spawner });
            }
        }
        if spawners.is_empty() {
            log::warn!("level declares no spawners; every wave clears immediately");
        }

        Ok(())
    }

    /// Validates the level and returns the commands that configure it and
    /// start the first run.
    pub fn configure(&self, level: &LevelConfig) -> Result<Vec<Command>, ConfigError> {
        self.validate(level)?;
        log::info!(
            "configuring level with {} generators and {} spawners",
            level.generators.len(),
            level.spawners.len()
        );

        Ok(vec![
            Command::ConfigureLevel {
                generators: level.generators.clone(),
                spawners: level.spawners.clone(),
            },
            Command::ConfigureCycles {
                config: level.cycles,
            },
            Command::StartRun,
        ])
    }
}
