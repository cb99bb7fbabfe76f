//! Ordered entity store with an explicit growth policy

use super::{EntityId, EntityRole, SceneEntity, TrackedSlot};
use crate::foundation::math::{Transform, Vec3};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// A spawned entity together with the anchor it orbits
#[derive(Debug, Clone)]
pub struct SpawnRecord {
    pub(crate) entity: SceneEntity,
    anchor: Vec3,
}

impl SpawnRecord {
    /// The owned entity
    pub fn entity(&self) -> &SceneEntity {
        &self.entity
    }

    /// Fixed anchor sampled at spawn time
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }
}

/// What to do when a spawn would exceed `max_spawned`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LimitAction {
    /// Drop the oldest spawned entity to make room
    #[default]
    EvictOldest,
    /// Refuse the new spawn
    SkipSpawn,
}

/// Growth policy for spawned entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnLimit {
    /// Upper bound on live spawned entities; `None` grows without bound
    pub max_spawned: Option<usize>,
    /// Behaviour once the bound is reached
    pub on_limit: LimitAction,
}

impl Default for SpawnLimit {
    fn default() -> Self {
        Self {
            max_spawned: Some(256),
            on_limit: LimitAction::EvictOldest,
        }
    }
}

impl SpawnLimit {
    /// No bound on spawned entities
    pub fn unbounded() -> Self {
        Self {
            max_spawned: None,
            on_limit: LimitAction::EvictOldest,
        }
    }
}

/// Result of inserting a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Entity added
    Inserted(EntityId),
    /// Entity added after evicting the oldest spawned entity
    InsertedWithEviction {
        /// New entity
        inserted: EntityId,
        /// Entity removed to make room
        evicted: EntityId,
    },
    /// The store is full and the policy refuses new spawns
    Refused,
}

/// Ordered collection of the tracked pair followed by spawned entities
#[derive(Debug)]
pub struct EntityStore {
    next_id: u64,
    tracked: [SceneEntity; 2],
    spawned: VecDeque<SpawnRecord>,
    limit: SpawnLimit,
}

impl EntityStore {
    /// Create a store holding the two tracked entities
    pub fn new(
        geometry: Arc<Geometry>,
        primary: Transform,
        secondary: Transform,
        limit: SpawnLimit,
    ) -> Self {
        let primary = SceneEntity::new(
            EntityId::new(0),
            Arc::clone(&geometry),
            primary,
            EntityRole::Tracked(TrackedSlot::Primary),
            true,
        );
        let secondary = SceneEntity::new(
            EntityId::new(1),
            geometry,
            secondary,
            EntityRole::Tracked(TrackedSlot::Secondary),
            true,
        );

        Self {
            next_id: 2,
            tracked: [primary, secondary],
            spawned: VecDeque::new(),
            limit,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// One of the tracked entities
    pub fn tracked(&self, slot: TrackedSlot) -> &SceneEntity {
        &self.tracked[slot_index(slot)]
    }

    pub(crate) fn tracked_mut(&mut self, slot: TrackedSlot) -> &mut SceneEntity {
        &mut self.tracked[slot_index(slot)]
    }

    /// The tracked pair in (primary, secondary) order
    pub fn tracked_pair(&self) -> (&SceneEntity, &SceneEntity) {
        (&self.tracked[0], &self.tracked[1])
    }

    /// Geometry shared by the tracked pair
    pub fn shared_geometry(&self) -> &Arc<Geometry> {
        self.tracked[0].geometry()
    }

    /// Spawned records, oldest first
    pub fn spawned(&self) -> impl Iterator<Item = &SpawnRecord> {
        self.spawned.iter()
    }

    pub(crate) fn spawned_mut(&mut self) -> impl Iterator<Item = &mut SpawnRecord> {
        self.spawned.iter_mut()
    }

    /// Number of live spawned entities
    pub fn spawned_len(&self) -> usize {
        self.spawned.len()
    }

    /// Total number of entities
    pub fn len(&self) -> usize {
        self.tracked.len() + self.spawned.len()
    }

    /// Always false; the tracked pair is never removed
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Growth policy in effect
    pub fn limit(&self) -> SpawnLimit {
        self.limit
    }

    /// All entities: tracked first, then spawned oldest first
    pub fn entities(&self) -> impl Iterator<Item = &SceneEntity> {
        self.tracked
            .iter()
            .chain(self.spawned.iter().map(|record| &record.entity))
    }

    /// Look up an entity by id
    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities().find(|entity| entity.id() == id)
    }

    /// Insert a spawned entity, hidden until its first animation update
    pub fn insert_spawned(&mut self, geometry: Arc<Geometry>, anchor: Vec3) -> InsertOutcome {
        let full = self
            .limit
            .max_spawned
            .is_some_and(|max| self.spawned.len() >= max);

        let evicted = if full {
            match self.limit.on_limit {
                LimitAction::SkipSpawn => return InsertOutcome::Refused,
                LimitAction::EvictOldest => self.spawned.pop_front().map(|record| record.entity.id()),
            }
        } else {
            None
        };

        let id = self.allocate_id();
        let entity = SceneEntity::new(
            id,
            geometry,
            Transform::from_position(anchor),
            EntityRole::Spawned,
            false,
        );
        self.spawned.push_back(SpawnRecord { entity, anchor });

        match evicted {
            Some(evicted) => InsertOutcome::InsertedWithEviction { inserted: id, evicted },
            None => InsertOutcome::Inserted(id),
        }
    }
}

const fn slot_index(slot: TrackedSlot) -> usize {
    match slot {
        TrackedSlot::Primary => 0,
        TrackedSlot::Secondary => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(limit: SpawnLimit) -> EntityStore {
        let geometry = Arc::new(Geometry::sphere(0.5, 8, 8).unwrap());
        EntityStore::new(
            geometry,
            Transform::from_position(Vec3::new(-1.5, 0.0, 0.0)),
            Transform::from_position(Vec3::new(-1.5, 2.0, 0.0)),
            limit,
        )
    }

    #[test]
    fn test_tracked_pair_created() {
        let store = store(SpawnLimit::default());
        let (primary, secondary) = store.tracked_pair();

        assert_eq!(store.len(), 2);
        assert_eq!(primary.role(), EntityRole::Tracked(TrackedSlot::Primary));
        assert_eq!(secondary.role(), EntityRole::Tracked(TrackedSlot::Secondary));
        assert!(primary.is_visible() && secondary.is_visible());
        assert!(Arc::ptr_eq(primary.geometry(), secondary.geometry()));
    }

    #[test]
    fn test_spawned_starts_hidden_and_shares_geometry() {
        let mut store = store(SpawnLimit::default());
        let geometry = Arc::clone(store.shared_geometry());
        let outcome = store.insert_spawned(geometry, Vec3::new(1.0, 2.0, 3.0));

        let InsertOutcome::Inserted(id) = outcome else {
            panic!("expected plain insert, got {outcome:?}");
        };
        let record = store.spawned().next().unwrap();
        assert_eq!(record.entity().id(), id);
        assert!(!record.entity().is_visible());
        assert_eq!(record.anchor(), Vec3::new(1.0, 2.0, 3.0));
        assert!(Arc::ptr_eq(record.entity().geometry(), store.shared_geometry()));
        assert_eq!(store.get(id).map(SceneEntity::id), Some(id));
    }

    #[test]
    fn test_entities_ordered_tracked_then_spawned() {
        let mut store = store(SpawnLimit::unbounded());
        for x in [0.0, 1.0, 2.0] {
            let geometry = Arc::clone(store.shared_geometry());
            store.insert_spawned(geometry, Vec3::new(x, 0.0, 0.0));
        }

        let ids: Vec<u64> = store.entities().map(|e| e.id().id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_evict_oldest_keeps_ids_unique() {
        let mut store = store(SpawnLimit {
            max_spawned: Some(2),
            on_limit: LimitAction::EvictOldest,
        });
        for _ in 0..2 {
            let geometry = Arc::clone(store.shared_geometry());
            store.insert_spawned(geometry, Vec3::zeros());
        }

        let geometry = Arc::clone(store.shared_geometry());
        let outcome = store.insert_spawned(geometry, Vec3::zeros());
        assert_eq!(
            outcome,
            InsertOutcome::InsertedWithEviction {
                inserted: EntityId::new(4),
                evicted: EntityId::new(2),
            }
        );
        assert_eq!(store.spawned_len(), 2);
        assert!(store.get(EntityId::new(2)).is_none());
        assert!(store.tracked(TrackedSlot::Primary).is_visible());
    }

    #[test]
    fn test_skip_spawn_refuses_when_full() {
        let mut store = store(SpawnLimit {
            max_spawned: Some(1),
            on_limit: LimitAction::SkipSpawn,
        });
        let geometry = Arc::clone(store.shared_geometry());
        store.insert_spawned(geometry, Vec3::zeros());

        let geometry = Arc::clone(store.shared_geometry());
        assert_eq!(store.insert_spawned(geometry, Vec3::zeros()), InsertOutcome::Refused);
        assert_eq!(store.spawned_len(), 1);

        // Refusal does not burn an id
        let ids: Vec<u64> = store.entities().map(|e| e.id().id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
