//! Entity storage for the scene
//!
//! Two tracked entities live for the whole run; spawned entities are added by
//! the spawner and owned by their [`SpawnRecord`].

pub mod entity;
pub mod store;

pub use entity::{EntityId, EntityRole, SceneEntity, TrackedSlot};
pub use store::{EntityStore, InsertOutcome, LimitAction, SpawnLimit, SpawnRecord};
