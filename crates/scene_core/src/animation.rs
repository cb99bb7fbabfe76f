//! Procedural animation driven by elapsed time
//!
//! Every transform is a pure function of the elapsed seconds, the entity's
//! role and (for spawned entities) its anchor, so frames can be replayed
//! exactly from a list of time stamps.

use crate::ecs::{EntityRole, EntityStore, SceneEntity, SpawnRecord, TrackedSlot};
use crate::foundation::math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Animation rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Primary spin about X in radians per second
    pub spin_rate_x: f32,
    /// Primary spin about Y in radians per second
    pub spin_rate_y: f32,
    /// Radius of the (sin t, cos t) orbit
    pub orbit_radius: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_rate_x: 0.15,
            spin_rate_y: 0.1,
            orbit_radius: 1.0,
        }
    }
}

/// Maps (entity, elapsed seconds) to the entity's transform for that frame
#[derive(Debug, Clone, Default)]
pub struct Animator {
    config: AnimationConfig,
}

impl Animator {
    /// Create an animator with the given rates
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// Rates in use
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Offset along the orbit at `elapsed`
    pub fn orbit_offset(&self, elapsed: f32) -> Vec3 {
        Vec3::new(elapsed.sin(), elapsed.cos(), 0.0) * self.config.orbit_radius
    }

    /// Transform of a tracked entity at `elapsed`
    ///
    /// The primary spins in place. The secondary follows the orbit in X and
    /// Y and keeps its Z. Spawned entities need their anchor, see
    /// [`Animator::animate_spawned`]; passed here they come back unchanged.
    pub fn animate_tracked(&self, entity: &SceneEntity, elapsed: f32) -> Transform {
        let mut transform = entity.transform;
        match entity.role() {
            EntityRole::Tracked(TrackedSlot::Primary) => {
                transform.rotation.x = elapsed * self.config.spin_rate_x;
                transform.rotation.y = elapsed * self.config.spin_rate_y;
            }
            EntityRole::Tracked(TrackedSlot::Secondary) => {
                let offset = self.orbit_offset(elapsed);
                transform.position.x = offset.x;
                transform.position.y = offset.y;
            }
            EntityRole::Spawned => {}
        }
        transform
    }

    /// Transform of a spawned entity: its anchor plus the orbit offset
    pub fn animate_spawned(&self, record: &SpawnRecord, elapsed: f32) -> Transform {
        let mut transform = record.entity().transform;
        transform.position = record.anchor() + self.orbit_offset(elapsed);
        transform
    }

    /// Animate every entity in store order and reveal spawned entities
    pub fn animate_store(&self, store: &mut EntityStore, elapsed: f32) {
        for slot in [TrackedSlot::Primary, TrackedSlot::Secondary] {
            let entity = store.tracked_mut(slot);
            let next = self.animate_tracked(entity, elapsed);
            entity.transform = next;
        }

        for record in store.spawned_mut() {
            let next = self.animate_spawned(record, elapsed);
            record.entity.transform = next;
            record.entity.set_visible(true);
        }
    }
}
