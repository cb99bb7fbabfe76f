//! Error types for the scene core
//!
//! Loop-level failures surface as [`SceneError`] from `tick()`. Per-entity
//! geometry failures are isolated by the frame loop and only reported.

use crate::config::ConfigError;
use crate::ecs::EntityId;
use thiserror::Error;

/// Errors produced while building shape data or deriving its bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Geometry has no vertex data to bound
    #[error("geometry has no vertices")]
    Empty,

    /// A vertex position is NaN or infinite
    #[error("vertex {index} has a non-finite position")]
    NonFinite {
        /// Index of the offending vertex
        index: usize,
    },

    /// Generator parameters are out of range
    #[error("invalid geometry parameters: {0}")]
    InvalidParameters(String),
}

/// Scene-level errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Bounding box computation failed for an entity
    #[error("invalid geometry on entity {entity}: {source}")]
    InvalidGeometry {
        /// Entity whose geometry could not be bounded
        entity: EntityId,
        /// Underlying geometry failure
        #[source]
        source: GeometryError,
    },

    /// A bounded random source ran out of samples
    #[error("random source exhausted after {draws} draws")]
    RandomSourceExhausted {
        /// Number of successful draws before exhaustion
        draws: u64,
    },

    /// The clock could not be read
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),
}
