use super::Config;
use crate::animation::AnimationConfig;
use crate::error::SceneError;
use crate::events::EventQueue;
use crate::foundation::logging::LoggingConfig;
use crate::foundation::math::Vec3;
use crate::geometry::Geometry;
use crate::spawn::SpawnConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shared sphere geometry parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Sphere radius
    pub radius: f32,
    /// Segments around the equator
    pub width_segments: u32,
    /// Segments from pole to pole
    pub height_segments: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            width_segments: 64,
            height_segments: 64,
        }
    }
}

/// Everything needed to build an overlap scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Geometry shared by every entity
    pub geometry: SphereConfig,
    /// Initial position of the primary tracked entity
    pub primary_position: Vec3,
    /// Initial position of the secondary tracked entity
    pub secondary_position: Vec3,
    /// Animation rates
    pub animation: AnimationConfig,
    /// Spawner settings
    pub spawn: SpawnConfig,
    /// Seed for reproducible spawning; entropy when unset
    pub seed: Option<u64>,
    /// Target frames per second for the scheduler
    pub frame_rate: f32,
    /// Stop after this many frames when set
    pub frame_limit: Option<u64>,
    /// Undrained events kept before the oldest are dropped
    pub event_capacity: usize,
    /// Logger settings
    pub logging: LoggingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            geometry: SphereConfig::default(),
            primary_position: Vec3::new(-1.5, 0.0, 0.0),
            secondary_position: Vec3::new(-1.5, 2.0, 0.0),
            animation: AnimationConfig::default(),
            spawn: SpawnConfig::default(),
            seed: None,
            frame_rate: 60.0,
            frame_limit: None,
            event_capacity: EventQueue::DEFAULT_CAPACITY,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |msg: &str| Err(SceneError::InvalidConfig(msg.to_string()));

        let sphere = &self.geometry;
        Geometry::check_sphere(sphere.radius, sphere.width_segments, sphere.height_segments)
            .map_err(|e| SceneError::InvalidConfig(format!("geometry: {e}")))?;
        if !(self.spawn.anchor_extent.is_finite() && self.spawn.anchor_extent >= 0.0) {
            return invalid("spawn.anchor_extent must not be negative");
        }
        if self.spawn.limit.max_spawned == Some(0) {
            return invalid("spawn.limit.max_spawned must be at least 1");
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return invalid("frame_rate must be positive");
        }
        if Duration::try_from_secs_f32(self.frame_rate.recip()).is_err() {
            return invalid("frame_rate is too small for a representable frame period");
        }
        if self.event_capacity == 0 {
            return invalid("event_capacity must be at least 1");
        }
        if !(self.primary_position.iter().chain(self.secondary_position.iter()).all(|c| c.is_finite())) {
            return invalid("tracked positions must be finite");
        }
        Ok(())
    }
}
