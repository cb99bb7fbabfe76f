//! Entity implementation

use crate::foundation::math::Transform;
use crate::geometry::Geometry;
use std::fmt;
use std::sync::Arc;

/// Entity identifier
///
/// Allocated from a monotonically increasing counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new entity id with the given value
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the two tracked entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedSlot {
    /// Static sphere that spins in place
    Primary,
    /// Sphere orbiting in the XY plane
    Secondary,
}

/// Role an entity plays in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRole {
    /// One of the overlap-tested pair; created at startup, never destroyed
    Tracked(TrackedSlot),
    /// Created at runtime on an overlap start
    Spawned,
}

/// An animated entity with a world transform
#[derive(Debug, Clone)]
pub struct SceneEntity {
    id: EntityId,
    geometry: Arc<Geometry>,
    /// World transform, written by the animator each frame
    pub transform: Transform,
    visible: bool,
    role: EntityRole,
}

impl SceneEntity {
    pub(crate) fn new(
        id: EntityId,
        geometry: Arc<Geometry>,
        transform: Transform,
        role: EntityRole,
        visible: bool,
    ) -> Self {
        Self {
            id,
            geometry,
            transform,
            visible,
            role,
        }
    }

    /// Entity id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Shared shape data
    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// Role in the scene
    pub fn role(&self) -> EntityRole {
        self.role
    }

    /// Whether the renderer should draw this entity
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
