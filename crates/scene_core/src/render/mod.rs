//! # Render hand-off
//!
//! The scene core does not draw anything. Once per tick the frame loop hands
//! an ordered view of the entity store to a [`RenderSink`], which owns the
//! actual display. Sinks must cope with the store growing between calls and
//! draw only entities that report themselves visible.

use crate::ecs::{EntityId, EntityRole, SceneEntity};
use crate::foundation::math::Vec3;

/// Ordered entities for one displayed frame
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Index of the tick producing this frame
    pub frame_index: u64,
    /// Clock reading for the tick (seconds)
    pub elapsed: f32,
    /// Tracked entities first, then spawned oldest first
    pub entities: Vec<&'a SceneEntity>,
}

impl<'a> RenderFrame<'a> {
    /// Entities the sink should draw
    pub fn visible(&self) -> impl Iterator<Item = &'a SceneEntity> + '_ {
        self.entities.iter().copied().filter(|entity| entity.is_visible())
    }
}

/// Display collaborator called once per tick
pub trait RenderSink {
    /// Present one frame
    fn display(&mut self, frame: &RenderFrame<'_>);
}

/// Headless sink that reports each frame through the logger
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    /// Create a new log renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogRenderer {
    fn display(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        if log::log_enabled!(log::Level::Trace) {
            for entity in frame.visible() {
                let p = entity.transform.position;
                log::trace!(
                    "frame {} draw {} {:?} at ({:.3}, {:.3}, {:.3})",
                    frame.frame_index, entity.id(), entity.role(), p.x, p.y, p.z
                );
            }
        }
        log::trace!(
            "frame {} presented {} of {} entities",
            frame.frame_index,
            frame.visible().count(),
            frame.entities.len()
        );
    }
}

/// Copy of the render-relevant state of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    /// Entity id
    pub id: EntityId,
    /// Role in the scene
    pub role: EntityRole,
    /// World position
    pub position: Vec3,
    /// Euler rotation
    pub rotation: Vec3,
    /// Visibility flag at hand-off
    pub visible: bool,
}

/// Recorded frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Index of the tick
    pub frame_index: u64,
    /// Clock reading for the tick
    pub elapsed: f32,
    /// Every entity handed over, in order
    pub entities: Vec<EntitySnapshot>,
}

impl FrameSnapshot {
    /// Snapshots of entities that were visible
    pub fn visible(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities.iter().filter(|entity| entity.visible)
    }
}

/// Sink that keeps a copy of every frame it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<FrameSnapshot>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded frames
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// Most recent frame
    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }
}

impl RenderSink for RecordingRenderer {
    fn display(&mut self, frame: &RenderFrame<'_>) {
        self.frames.push(FrameSnapshot {
            frame_index: frame.frame_index,
            elapsed: frame.elapsed,
            entities: frame
                .entities
                .iter()
                .map(|entity| EntitySnapshot {
                    id: entity.id(),
                    role: entity.role(),
                    position: entity.transform.position,
                    rotation: entity.transform.rotation,
                    visible: entity.is_visible(),
                })
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{EntityStore, SpawnLimit, TrackedSlot};
    use crate::foundation::math::Transform;
    use crate::geometry::Geometry;
    use std::sync::Arc;

    fn store_with_hidden_spawn() -> EntityStore {
        let mut store = EntityStore::new(
            Arc::new(Geometry::sphere(0.5, 8, 8).unwrap()),
            Transform::from_position(Vec3::new(-1.5, 0.0, 0.0)),
            Transform::from_position(Vec3::new(-1.5, 2.0, 0.0)),
            SpawnLimit::default(),
        );
        let geometry = Arc::clone(store.shared_geometry());
        store.insert_spawned(geometry, Vec3::zeros());
        store
    }

    #[test]
    fn test_visible_filters_hidden_entities() {
        let store = store_with_hidden_spawn();
        let frame = RenderFrame {
            frame_index: 0,
            elapsed: 0.0,
            entities: store.entities().collect(),
        };

        assert_eq!(frame.entities.len(), 3);
        assert_eq!(frame.visible().count(), 2);
    }

    #[test]
    fn test_recording_renderer_copies_frames() {
        let store = store_with_hidden_spawn();
        let mut renderer = RecordingRenderer::new();
        renderer.display(&RenderFrame {
            frame_index: 4,
            elapsed: 1.5,
            entities: store.entities().collect(),
        });

        let snapshot = renderer.last().unwrap();
        assert_eq!(snapshot.frame_index, 4);
        assert_eq!(snapshot.entities.len(), 3);
        assert_eq!(snapshot.entities[0].role, EntityRole::Tracked(TrackedSlot::Primary));
        assert_eq!(snapshot.visible().count(), 2);
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let store = store_with_hidden_spawn();
        let mut renderer = LogRenderer::new();
        for frame_index in 0..3 {
            renderer.display(&RenderFrame {
                frame_index,
                elapsed: 0.0,
                entities: store.entities().collect(),
            });
        }
        assert_eq!(renderer.frames(), 3);
    }
}
