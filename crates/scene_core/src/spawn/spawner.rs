//! Spawner for anchored orbiting entities

use super::RandomSource;
use crate::ecs::{EntityId, EntityStore, InsertOutcome, SpawnLimit};
use crate::error::SceneError;
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Spawn settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Anchors are sampled per axis from `[-anchor_extent, anchor_extent]`
    pub anchor_extent: f32,
    /// Growth policy for the entity store
    pub limit: SpawnLimit,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            anchor_extent: 2.5,
            limit: SpawnLimit::default(),
        }
    }
}

/// What a single spawner invocation did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    /// A new entity was inserted
    Spawned {
        /// New entity
        entity: EntityId,
        /// Its anchor
        anchor: Vec3,
    },
    /// A new entity was inserted after the oldest one was evicted
    SpawnedWithEviction {
        /// New entity
        entity: EntityId,
        /// Its anchor
        anchor: Vec3,
        /// Entity removed to make room
        evicted: EntityId,
    },
    /// The store is full and refuses new entities
    Refused {
        /// Anchor that was sampled for the refused spawn
        anchor: Vec3,
    },
}

impl SpawnOutcome {
    /// Id of the new entity, if one was created
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Spawned { entity, .. } | Self::SpawnedWithEviction { entity, .. } => Some(*entity),
            Self::Refused { .. } => None,
        }
    }
}

/// Creates hidden entities at random anchors
#[derive(Debug)]
pub struct Spawner<R: RandomSource> {
    source: R,
    anchor_extent: f32,
    invocations: u64,
}

impl<R: RandomSource> Spawner<R> {
    /// Create a spawner drawing anchors from `source`
    pub fn new(source: R, anchor_extent: f32) -> Self {
        Self {
            source,
            anchor_extent: anchor_extent.abs(),
            invocations: 0,
        }
    }

    /// Number of times [`Spawner::spawn`] has run
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Access the random source
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Sample one anchor, one draw per axis
    pub fn sample_anchor(&mut self) -> Result<Vec3, SceneError> {
        let extent = self.anchor_extent;
        Ok(Vec3::new(
            self.source.uniform(-extent, extent)?,
            self.source.uniform(-extent, extent)?,
            self.source.uniform(-extent, extent)?,
        ))
    }

    /// Spawn one entity sharing the tracked geometry into `store`
    pub fn spawn(&mut self, store: &mut EntityStore) -> Result<SpawnOutcome, SceneError> {
        self.invocations += 1;
        let anchor = self.sample_anchor()?;
        let geometry = Arc::clone(store.shared_geometry());

        let outcome = match store.insert_spawned(geometry, anchor) {
            InsertOutcome::Inserted(entity) => {
                log::info!(
                    "Spawned entity {} at anchor ({:.3}, {:.3}, {:.3}); {} spawned total",
                    entity, anchor.x, anchor.y, anchor.z, store.spawned_len()
                );
                SpawnOutcome::Spawned { entity, anchor }
            }
            InsertOutcome::InsertedWithEviction { inserted, evicted } => {
                log::info!(
                    "Spawned entity {} at anchor ({:.3}, {:.3}, {:.3}); evicted {} to stay within limit",
                    inserted, anchor.x, anchor.y, anchor.z, evicted
                );
                SpawnOutcome::SpawnedWithEviction { entity: inserted, anchor, evicted }
            }
            InsertOutcome::Refused => {
                log::warn!(
                    "Spawn refused: store holds {} spawned entities (limit reached)",
                    store.spawned_len()
                );
                SpawnOutcome::Refused { anchor }
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::LimitAction;
    use crate::foundation::math::Transform;
    use crate::geometry::Geometry;
    use crate::spawn::{RngSource, ScriptedSource};

    fn store(limit: SpawnLimit) -> EntityStore {
        EntityStore::new(
            Arc::new(Geometry::sphere(0.5, 8, 8).unwrap()),
            Transform::from_position(Vec3::new(-1.5, 0.0, 0.0)),
            Transform::from_position(Vec3::new(-1.5, 2.0, 0.0)),
            limit,
        )
    }

    #[test]
    fn test_anchor_within_bounds() {
        let mut spawner = Spawner::new(RngSource::seeded(99), 2.5);
        let mut store = store(SpawnLimit::unbounded());

        for _ in 0..200 {
            spawner.spawn(&mut store).unwrap();
        }
        assert_eq!(store.spawned_len(), 200);
        for record in store.spawned() {
            assert!(record.anchor().iter().all(|c| (-2.5..=2.5).contains(c)));
        }
    }

    #[test]
    fn test_scripted_anchor_and_hidden_entity() {
        let mut spawner = Spawner::new(ScriptedSource::new([0.0, 0.5, 1.0]), 2.5);
        let mut store = store(SpawnLimit::default());

        let outcome = spawner.spawn(&mut store).unwrap();
        assert_eq!(
            outcome,
            SpawnOutcome::Spawned {
                entity: EntityId::new(2),
                anchor: Vec3::new(-2.5, 0.0, 2.5),
            }
        );
        let record = store.spawned().next().unwrap();
        assert!(!record.entity().is_visible());
        assert!(Arc::ptr_eq(record.entity().geometry(), store.shared_geometry()));
    }

    #[test]
    fn test_exhausted_source_propagates() {
        let mut spawner = Spawner::new(ScriptedSource::new([0.2, 0.4]), 2.5);
        let mut store = store(SpawnLimit::default());

        let result = spawner.spawn(&mut store);
        assert!(matches!(result, Err(SceneError::RandomSourceExhausted { draws: 2 })));
        assert_eq!(store.spawned_len(), 0);
        assert_eq!(spawner.invocations(), 1);
    }

    #[test]
    fn test_limit_outcomes() {
        let mut spawner = Spawner::new(RngSource::seeded(3), 2.5);
        let mut evicting = store(SpawnLimit { max_spawned: Some(1), on_limit: LimitAction::EvictOldest });
        spawner.spawn(&mut evicting).unwrap();
        let outcome = spawner.spawn(&mut evicting).unwrap();
        assert!(matches!(
            outcome,
            SpawnOutcome::SpawnedWithEviction { evicted, .. } if evicted == EntityId::new(2)
        ));

        let mut refusing = store(SpawnLimit { max_spawned: Some(1), on_limit: LimitAction::SkipSpawn });
        spawner.spawn(&mut refusing).unwrap();
        let outcome = spawner.spawn(&mut refusing).unwrap();
        assert!(matches!(outcome, SpawnOutcome::Refused { .. }));
        assert_eq!(outcome.entity(), None);
        assert_eq!(spawner.invocations(), 4);
    }
}
