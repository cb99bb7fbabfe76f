//! World-space AABB overlap between two entities

use super::Aabb;
use crate::ecs::SceneEntity;
use crate::error::SceneError;

/// World-space bounding box of an entity's geometry under its current transform
pub fn world_aabb(entity: &SceneEntity) -> Result<Aabb, SceneError> {
    let local = entity
        .geometry()
        .bounding_box()
        .map_err(|source| SceneError::InvalidGeometry {
            entity: entity.id(),
            source,
        })?;
    Ok(local.transformed(&entity.transform.to_matrix()))
}

/// True when the world-space boxes of `a` and `b` overlap on all three axes
pub fn intersects(a: &SceneEntity, b: &SceneEntity) -> Result<bool, SceneError> {
    Ok(world_aabb(a)?.intersects(&world_aabb(b)?))
}
