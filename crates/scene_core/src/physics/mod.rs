//! Physics module for overlap detection
//!
//! Bounding volumes live in model space next to the geometry they bound and
//! are transformed into world space only when a test runs.

pub mod aabb;
pub mod overlap;

pub use aabb::Aabb;
pub use overlap::{intersects, world_aabb};
