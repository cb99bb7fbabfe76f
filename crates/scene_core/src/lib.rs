//! # Scene Core
//!
//! A frame-driven scene with two tracked spheres, edge-triggered AABB
//! overlap detection and overlap-triggered spawning.
//!
//! ## Features
//!
//! - **Procedural animation**: closed-form transforms from elapsed time
//! - **Overlap detection**: world-space AABB tests between the tracked pair
//! - **Edge-triggered spawning**: one anchored orbiter per started overlap
//! - **Injected time and randomness**: reproducible runs under test
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::default();
//!     let mut scene = OverlapScene::new(&config, SystemClock::start_new(), RngSource::seeded(7))?;
//!     let mut renderer = LogRenderer::new();
//!
//!     FixedRateScheduler::new(config.frame_rate)
//!         .with_frame_limit(Some(600))
//!         .run(&mut scene, &mut renderer, |scene, _| {
//!             for timed in scene.drain_events() {
//!                 log::info!("{:?}", timed.event);
//!             }
//!         })?;
//!     Ok(())
//! }
//! ```

pub mod foundation;
pub mod geometry;
pub mod physics;
pub mod ecs;
pub mod animation;
pub mod overlap;
pub mod spawn;
pub mod events;
pub mod render;
pub mod config;
pub mod scene;

mod error;

pub use error::{GeometryError, SceneError};

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        GeometryError, SceneError,
        animation::{AnimationConfig, Animator},
        config::{Config, ConfigFormat, SceneConfig, SphereConfig},
        ecs::{EntityId, EntityRole, EntityStore, LimitAction, SceneEntity, SpawnLimit, TrackedSlot},
        events::{SceneEvent, TimedEvent},
        foundation::{
            logging::LoggingConfig,
            math::{Mat4, Transform, Vec3},
            time::{Clock, FrameTimer, ManualClock, SystemClock},
        },
        geometry::Geometry,
        overlap::{OverlapState, OverlapTransition},
        physics::Aabb,
        render::{LogRenderer, RecordingRenderer, RenderFrame, RenderSink},
        scene::{FixedRateScheduler, FrameReport, FrameScheduler, OverlapScene},
        spawn::{RandomSource, RngSource, ScriptedSource, SpawnConfig, SpawnOutcome, Spawner},
    };
}
