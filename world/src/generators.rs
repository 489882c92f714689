//! Generator health bookkeeping.

use generator_defence_core::{GeneratorId, GeneratorSnapshot, GeneratorSpec, GeneratorView};

#[derive(Clone, Copy, Debug)]
struct Generator {
    id: GeneratorId,
    starting_health: i32,
    current_health: i32,
}

/// Fixed set of generators established when the level is configured.
#[derive(Clone, Debug, Default)]
pub(crate) struct GeneratorSet {
    entries: Vec<Generator>,
}

impl GeneratorSet {
    /// Creates a set where every generator starts at full health.
    pub(crate) fn from_specs(specs: &[GeneratorSpec]) -> Self {
        Self {
            entries: specs
                .iter()
                .map(|spec| Generator {
                    id: spec.id,
                    starting_health: spec.starting_health,
                    current_health: spec.starting_health,
                })
                .collect(),
        }
    }

    /// Number of generators in the set.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes health from a generator, returning the remaining health.
    ///
    /// Unknown identifiers are ignored.
    pub(crate) fn damage(&mut self, id: GeneratorId, amount: u32) -> Option<i32> {
        let generator = self.entries.iter_mut().find(|entry| entry.id == id)?;
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        generator.current_health = generator.current_health.saturating_sub(amount);
        Some(generator.current_health)
    }

    /// Restores every generator to its starting health.
    pub(crate) fn restore(&mut self) {
        for generator in &mut self.entries {
            generator.current_health = generator.starting_health;
        }
    }

    /// Captures a read-only view of every generator's health.
    pub(crate) fn view(&self) -> GeneratorView {
        GeneratorView::from_snapshots(
            self.entries
                .iter()
                .map(|generator| GeneratorSnapshot {
                    id: generator.id,
                    current_health: generator.current_health,
                    starting_health: generator.starting_health,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> GeneratorSet {
        GeneratorSet::from_specs(&[
            GeneratorSpec::new(GeneratorId::new(0), 100),
            GeneratorSpec::new(GeneratorId::new(1), 50),
        ])
    }

    #[test]
    fn damage_reduces_only_the_targeted_generator() {
        let mut generators = set();
        assert_eq!(generators.damage(GeneratorId::new(1), 30), Some(20));

        let view = generators.view();
        let healths: Vec<i32> = view.iter().map(|snapshot| snapshot.current_health).collect();
        assert_eq!(healths, vec![100, 20]);
    }

    #[test]
    fn damage_may_drive_health_below_zero() {
        let mut generators = set();
        assert_eq!(generators.damage(GeneratorId::new(1), 80), Some(-30));
        assert_eq!(generators.view().destroyed_count(), 1);
    }

    #[test]
    fn damage_ignores_unknown_generators() {
        let mut generators = set();
        assert_eq!(generators.damage(GeneratorId::new(9), 10), None);
        assert_eq!(generators.len(), 2);
    }

    #[test]
    fn restore_returns_generators_to_starting_health() {
        let mut generators = set();
        let _ = generators.damage(GeneratorId::new(0), 500);
        generators.restore();
        assert_eq!(generators.view().destroyed_count(), 0);
    }
}
