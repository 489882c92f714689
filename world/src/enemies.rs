//! Registry of spawned hostiles.

use std::collections::BTreeMap;

use generator_defence_core::{EnemyId, SpawnerId};

/// Registry that stores live hostiles and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct EnemyRegistry {
    entries: BTreeMap<EnemyId, SpawnerId>,
    next_enemy_id: EnemyId,
}

impl EnemyRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    /// Registers a hostile produced by the provided spawner.
    pub(crate) fn spawn(&mut self, spawner: SpawnerId) -> EnemyId {
        let enemy = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(enemy.get().wrapping_add(1));
        let _ = self.entries.insert(enemy, spawner);
        enemy
    }

    /// Removes a live hostile, returning the spawner that produced it.
    pub(crate) fn remove(&mut self, enemy: EnemyId) -> Option<SpawnerId> {
        self.entries.remove(&enemy)
    }

    /// Identifiers of every live hostile in ascending order.
    pub(crate) fn ids(&self) -> Vec<EnemyId> {
        self.entries.keys().copied().collect()
    }

    /// Forgets every hostile and resets identifier allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_enemy_id = EnemyId::new(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = EnemyRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_enemy_id.get(), 0);
    }

    #[test]
    fn spawn_allocates_sequential_identifiers() {
        let mut registry = EnemyRegistry::new();
        let first = registry.spawn(SpawnerId::new(4));
        let second = registry.spawn(SpawnerId::new(5));

        assert_eq!(first, EnemyId::new(0));
        assert_eq!(second, EnemyId::new(1));
        assert_eq!(registry.ids(), vec![first, second]);
    }

    #[test]
    fn remove_is_single_shot() {
        let mut registry = EnemyRegistry::new();
        let enemy = registry.spawn(SpawnerId::new(2));

        assert_eq!(registry.remove(enemy), Some(SpawnerId::new(2)));
        assert_eq!(registry.remove(enemy), None);
    }
}
