//! Overlap-triggered spawning
//!
//! The random source is injected so spawn anchors are reproducible under a
//! fixed seed or a scripted sample list.

pub mod random;
pub mod spawner;

pub use random::{RandomSource, RngSource, ScriptedSource};
pub use spawner::{SpawnConfig, SpawnOutcome, Spawner};
