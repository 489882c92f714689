use std::time::Duration;

use generator_defence_core::{
    Command, CombatTimerPolicy, CycleConfig, Event, GameMode, GeneratorId, GeneratorSpec,
    RunOutcome, SpawnerId,
};
use generator_defence_system_cycle_scheduler::{CycleScheduler, CycleView, Phase};
use generator_defence_world::{self as world, query, World};
use proptest::prelude::*;

const STEP: Duration = Duration::from_millis(100);

/// Drives a world and a scheduler together, materialising every commanded
/// wave immediately so tests control exactly when hostiles are defeated.
struct Harness {
    world: World,
    scheduler: CycleScheduler,
    modes: Vec<GameMode>,
    waves: Vec<(u32, SpawnerId, u32)>,
    auto_defeat: bool,
}

impl Harness {
    fn new(config: CycleConfig, spawners: u32) -> Self {
        let mut harness = Self {
            world: World::new(),
            scheduler: CycleScheduler::new(),
            modes: Vec::new(),
            waves: Vec::new(),
            auto_defeat: true,
        };
        harness.dispatch(Command::ConfigureLevel {
            generators: vec![GeneratorSpec::new(GeneratorId::new(0), 100)],
            spawners: (0..spawners).map(SpawnerId::new).collect(),
        });
        harness.dispatch(Command::ConfigureCycles { config });
        harness.dispatch(Command::StartRun);
        harness
    }

    fn dispatch(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.pump(events);
    }

    fn pump(&mut self, mut events: Vec<Event>) {
        while !events.is_empty() {
            let mut commands = Vec::new();
            for event in &events {
                match event {
                    Event::GameModeChanged { to, .. } => self.modes.push(*to),
                    Event::WaveCommanded { spawner, quota } => {
                        self.waves.push((query::cycle(&self.world), *spawner, *quota));
                        for _ in 0..*quota {
                            commands.push(Command::SpawnEnemy { spawner: *spawner });
                        }
                    }
                    _ => {}
                }
            }

            let view = CycleView {
                config: query::cycle_config(&self.world),
                enemies_per_generator: query::enemies_per_generator(&self.world),
                live_enemies: query::live_enemies(&self.world),
                spawners: query::spawners(&self.world),
            };
            self.scheduler.handle(&events, view, &mut commands);

            events = Vec::new();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }

    fn tick(&mut self) {
        self.dispatch(Command::Tick { dt: STEP });
        if self.auto_defeat {
            self.defeat_all();
        }
    }

    fn defeat_all(&mut self) {
        for enemy in query::enemies(&self.world) {
            self.dispatch(Command::DefeatEnemy { enemy });
        }
    }

    fn run_to_conclusion(&mut self) {
        for _ in 0..100_000 {
            if self.scheduler.phase() == Phase::Concluded {
                return;
            }
            self.tick();
        }
        panic!("scheduler never concluded; stuck in {:?}", self.scheduler.phase());
    }

    fn quotas(&self) -> Vec<u32> {
        self.waves.iter().map(|(_, _, quota)| *quota).collect()
    }
}

fn quick_config(total_cycles: u32) -> CycleConfig {
    CycleConfig::default()
        .with_total_cycles(total_cycles)
        .with_build_duration(Duration::from_secs(1))
        .with_wave_one_build_duration(Duration::from_secs(1))
}

#[test]
fn modes_alternate_then_level_completes() {
    let mut harness = Harness::new(quick_config(3), 1);
    harness.run_to_conclusion();

    assert_eq!(
        harness.modes,
        vec![
            GameMode::Build,
            GameMode::Combat,
            GameMode::Build,
            GameMode::Combat,
            GameMode::Build,
            GameMode::Combat,
            GameMode::LevelComplete,
        ]
    );
    let status = query::status(&harness.world);
    assert_eq!(status.outcome, RunOutcome::Won);
    assert!(status.has_won());
}

#[test]
fn two_cycle_run_uses_wave_one_then_base_quota() {
    let config = quick_config(2)
        .with_wave_one_enemies(5)
        .with_enemies_per_generator(10)
        .with_enemies_increase_per_cycle(3);
    let mut harness = Harness::new(config, 1);
    harness.run_to_conclusion();

    assert_eq!(harness.quotas(), vec![5, 10]);
    assert_eq!(query::enemies_per_generator(&harness.world), 13);
    assert_eq!(query::game_mode(&harness.world), GameMode::LevelComplete);
}

#[test]
fn escalation_starts_after_second_cycle() {
    let config = quick_config(4)
        .with_wave_one_enemies(2)
        .with_enemies_per_generator(10)
        .with_enemies_increase_per_cycle(3);
    let mut harness = Harness::new(config, 1);
    harness.run_to_conclusion();

    assert_eq!(harness.quotas(), vec![2, 10, 13, 16]);
}

#[test]
fn every_spawner_receives_the_cycle_quota() {
    let config = quick_config(1).with_wave_one_enemies(5);
    let mut harness = Harness::new(config, 3);
    harness.auto_defeat = false;

    while !matches!(harness.scheduler.phase(), Phase::Combat { .. }) {
        harness.tick();
    }

    assert_eq!(
        harness.waves,
        vec![
            (1, SpawnerId::new(0), 5),
            (1, SpawnerId::new(1), 5),
            (1, SpawnerId::new(2), 5),
        ]
    );
    assert_eq!(query::live_enemies(&harness.world), 15);
}

#[test]
fn combat_starts_after_build_and_grace_interval() {
    let config = CycleConfig::default()
        .with_build_duration(Duration::from_secs(30))
        .with_wave_one_build_duration(Duration::from_secs(30));
    let mut harness = Harness::new(config, 1);
    harness.auto_defeat = false;
    assert_eq!(query::countdown(&harness.world), Duration::from_secs(30));

    for _ in 0..300 {
        harness.tick();
    }
    assert_eq!(
        harness.scheduler.phase(),
        Phase::PreCombat {
            cycle: 1,
            remaining: Duration::from_secs(2),
        }
    );
    assert_eq!(query::countdown(&harness.world), Duration::ZERO);
    assert_eq!(query::game_mode(&harness.world), GameMode::Build);

    for _ in 0..19 {
        harness.tick();
    }
    assert_eq!(query::game_mode(&harness.world), GameMode::Build);

    harness.tick();
    assert_eq!(query::game_mode(&harness.world), GameMode::Combat);
}

#[test]
fn combat_waits_until_every_enemy_is_defeated() {
    let config = quick_config(2).with_wave_one_enemies(3);
    let mut harness = Harness::new(config, 1);
    harness.auto_defeat = false;

    while !matches!(harness.scheduler.phase(), Phase::Combat { .. }) {
        harness.tick();
    }
    for _ in 0..1_000 {
        harness.tick();
    }
    assert_eq!(harness.scheduler.phase(), Phase::Combat { cycle: 1 });

    let enemies = query::enemies(&harness.world);
    for enemy in &enemies[..2] {
        harness.dispatch(Command::DefeatEnemy { enemy: *enemy });
    }
    harness.tick();
    assert_eq!(harness.scheduler.phase(), Phase::Combat { cycle: 1 });
    assert_eq!(query::live_enemies(&harness.world), 1);

    harness.dispatch(Command::DefeatEnemy { enemy: enemies[2] });
    harness.tick();
    assert_eq!(
        harness.scheduler.phase(),
        Phase::PostCombat {
            cycle: 1,
            remaining: Duration::from_secs(5),
        }
    );
    assert_eq!(query::game_mode(&harness.world), GameMode::Combat);

    for _ in 0..50 {
        harness.tick();
    }
    assert!(matches!(
        harness.scheduler.phase(),
        Phase::Build { cycle: 2, .. }
    ));
    assert_eq!(query::game_mode(&harness.world), GameMode::Build);
    assert_eq!(query::cycle(&harness.world), 2);
}

#[test]
fn wave_one_build_duration_applies_to_first_cycle_only() {
    let config = CycleConfig::default()
        .with_total_cycles(2)
        .with_wave_one_build_duration(Duration::from_secs(1))
        .with_build_duration(Duration::from_secs(4));
    let mut harness = Harness::new(config, 1);
    assert_eq!(query::countdown(&harness.world), Duration::from_secs(1));

    while !matches!(harness.scheduler.phase(), Phase::Build { cycle: 2, .. }) {
        harness.tick();
    }
    assert_eq!(query::countdown(&harness.world), Duration::from_secs(4));
}

#[test]
fn displayed_combat_timer_is_written_on_combat_entry() {
    let config = quick_config(1).with_combat_timer(CombatTimerPolicy::Display {
        duration: Duration::from_secs(45),
    });
    let mut harness = Harness::new(config, 1);
    harness.auto_defeat = false;

    while !matches!(harness.scheduler.phase(), Phase::Combat { .. }) {
        harness.tick();
    }
    assert_eq!(query::countdown(&harness.world), Duration::from_secs(45));
}

#[test]
fn loss_interrupts_the_cycle_sequence() {
    let mut harness = Harness::new(quick_config(3), 1);
    harness.tick();
    harness.dispatch(Command::NotifyPlayerDied);
    let modes_at_loss = harness.modes.len();

    for _ in 0..1_000 {
        harness.tick();
    }

    assert_eq!(harness.scheduler.phase(), Phase::Concluded);
    assert_eq!(harness.modes.len(), modes_at_loss);
    assert_eq!(query::game_mode(&harness.world), GameMode::GameOver);
    assert_eq!(query::status(&harness.world).outcome, RunOutcome::LostPlayer);
}

#[test]
fn restart_returns_scheduler_to_idle() {
    let mut harness = Harness::new(quick_config(2), 1);
    harness.tick();
    harness.dispatch(Command::RestartRun);

    assert_eq!(harness.scheduler.phase(), Phase::Idle);
    for _ in 0..100 {
        harness.tick();
    }
    assert_eq!(query::game_mode(&harness.world), GameMode::Idle);

    harness.dispatch(Command::StartRun);
    harness.run_to_conclusion();
    assert_eq!(query::game_mode(&harness.world), GameMode::LevelComplete);
}

proptest! {
    #[test]
    fn quotas_follow_escalation_formula(
        total_cycles in 1u32..5,
        wave_one in 0u32..6,
        base in 0u32..8,
        increase in 0u32..4,
        spawners in 0u32..3,
    ) {
        let config = quick_config(total_cycles)
            .with_wave_one_enemies(wave_one)
            .with_enemies_per_generator(base)
            .with_enemies_increase_per_cycle(increase);
        let mut harness = Harness::new(config, spawners);
        harness.run_to_conclusion();

        let mut expected_modes = Vec::new();
        for _ in 0..total_cycles {
            expected_modes.push(GameMode::Build);
            expected_modes.push(GameMode::Combat);
        }
        expected_modes.push(GameMode::LevelComplete);
        prop_assert_eq!(&harness.modes, &expected_modes);

        let mut expected_waves = Vec::new();
        for cycle in 1..=total_cycles {
            let quota = if cycle == 1 {
                wave_one
            } else {
                base + increase * (cycle - 2)
            };
            for spawner in 0..spawners {
                expected_waves.push((cycle, SpawnerId::new(spawner), quota));
            }
        }
        prop_assert_eq!(&harness.waves, &expected_waves);
        prop_assert_eq!(query::status(&harness.world).outcome, RunOutcome::Won);
    }
}
