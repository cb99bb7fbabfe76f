//! # Overlap scene
//!
//! Owns the entity store and drives one frame per [`OverlapScene::tick`]:
//!
//! 1. read the clock
//! 2. animate every entity
//! 3. test the tracked pair for overlap and step the state machine
//! 4. on a started overlap run the spawner exactly once
//! 5. hand the ordered entities to the render sink
//!
//! Clock and randomness are injected so a run can be replayed exactly.

mod scheduler;


pub use scheduler::{FixedRateScheduler, FrameScheduler};

use crate::animation::Animator;
use crate::config::SceneConfig;
use crate::ecs::{EntityStore, SceneEntity};
use crate::error::SceneError;
use crate::events::{EventQueue, SceneEvent, TimedEvent};
use crate::foundation::math::Transform;
use crate::foundation::time::{Clock, FrameTimer};
use crate::geometry::Geometry;
use crate::overlap::{OverlapState, OverlapTransition};
use crate::physics;
use crate::render::{RenderFrame, RenderSink};
use crate::spawn::{RandomSource, SpawnOutcome, Spawner};
use std::sync::Arc;

/// Summary of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of this tick, starting at zero
    pub frame_index: u64,
    /// Clock reading used for the tick (seconds)
    pub elapsed: f32,
    /// Overlap result; `None` when the tracked geometry could not be bounded
    pub intersects: Option<bool>,
    /// State machine transition taken this tick
    pub transition: OverlapTransition,
    /// What the spawner did, if it ran
    pub spawn: Option<SpawnOutcome>,
    /// Entities handed to the render sink
    pub rendered: usize,
    /// Entities left out because their geometry failed
    pub skipped: usize,
}

/// Frame loop over two tracked entities and their spawned companions
#[derive(Debug)]
pub struct OverlapScene<C: Clock, R: RandomSource> {
    clock: C,
    store: EntityStore,
    animator: Animator,
    spawner: Spawner<R>,
    overlap: OverlapState,
    events: EventQueue,
    timer: FrameTimer,
    last_elapsed: Option<f32>,
    frame_index: u64,
}

impl<C: Clock, R: RandomSource> OverlapScene<C, R> {
    /// Build the scene described by `config`
    pub fn new(config: &SceneConfig, clock: C, random: R) -> Result<Self, SceneError> {
        config.validate()?;

        let sphere = &config.geometry;
        let geometry = Geometry::sphere(sphere.radius, sphere.width_segments, sphere.height_segments)
            .map_err(|e| SceneError::InvalidConfig(e.to_string()))?;

        let store = EntityStore::new(
            Arc::new(geometry),
            Transform::from_position(config.primary_position),
            Transform::from_position(config.secondary_position),
            config.spawn.limit,
        );

        log::debug!(
            "Scene created: sphere r={} ({}x{} segments), spawn limit {:?}",
            sphere.radius, sphere.width_segments, sphere.height_segments, config.spawn.limit
        );

        let mut scene = Self::from_parts(
            store,
            Animator::new(config.animation),
            Spawner::new(random, config.spawn.anchor_extent),
            clock,
        );
        scene.events = EventQueue::with_capacity(config.event_capacity);
        Ok(scene)
    }

    /// Assemble a scene from prepared parts
    pub fn from_parts(store: EntityStore, animator: Animator, spawner: Spawner<R>, clock: C) -> Self {
        Self {
            clock,
            store,
            animator,
            spawner,
            overlap: OverlapState::default(),
            events: EventQueue::new(),
            timer: FrameTimer::new(),
            last_elapsed: None,
            frame_index: 0,
        }
    }

    /// Advance one frame and hand the result to `renderer`
    ///
    /// Clock failures and random source exhaustion abort the tick with an
    /// error and leave the overlap state and frame index untouched. Geometry
    /// failures are isolated: they are reported as events and the affected
    /// entities are left out of the render hand-off.
    pub fn tick(&mut self, renderer: &mut dyn RenderSink) -> Result<FrameReport, SceneError> {
        let elapsed = self.read_clock()?;
        let frame_index = self.frame_index;

        self.animator.animate_store(&mut self.store, elapsed);

        let (primary, secondary) = self.store.tracked_pair();
        let intersects = match physics::intersects(primary, secondary) {
            Ok(hit) => Some(hit),
            Err(e) => {
                log::warn!("Frame {frame_index}: overlap test skipped: {e}");
                None
            }
        };

        let (next, transition) = match intersects {
            Some(hit) => self.overlap.step(hit),
            None => (self.overlap, OverlapTransition::Unchanged),
        };

        // A failed spawn returns before the transition is committed.
        let spawn = match transition {
            OverlapTransition::Started => Some(self.spawner.spawn(&mut self.store)?),
            OverlapTransition::Finished | OverlapTransition::Unchanged => None,
        };
        self.overlap = next;

        match transition {
            OverlapTransition::Started => {
                log::info!("start overlap");
                self.events.push(frame_index, elapsed, SceneEvent::OverlapStarted);
            }
            OverlapTransition::Finished => {
                log::info!("finish overlap");
                self.events.push(frame_index, elapsed, SceneEvent::OverlapFinished);
            }
            OverlapTransition::Unchanged => {}
        }
        if let Some(outcome) = spawn {
            self.record_spawn(frame_index, elapsed, outcome);
        }

        let (rendered, skipped) = self.present(renderer, frame_index, elapsed);

        self.timer.record(elapsed);
        self.frame_index += 1;

        log::debug!(
            "Frame {frame_index} t={elapsed:.3}s intersects={intersects:?} {transition:?} rendered={rendered} skipped={skipped}"
        );

        Ok(FrameReport {
            frame_index,
            elapsed,
            intersects,
            transition,
            spawn,
            rendered,
            skipped,
        })
    }

    fn read_clock(&mut self) -> Result<f32, SceneError> {
        let reading = self.clock.elapsed_secs()?;
        let elapsed = match self.last_elapsed {
            Some(last) if reading < last => {
                log::warn!("Clock went backwards ({reading:.6}s < {last:.6}s), holding previous reading");
                last
            }
            _ => reading,
        };
        self.last_elapsed = Some(elapsed);
        Ok(elapsed)
    }

    fn record_spawn(&mut self, frame: u64, elapsed: f32, outcome: SpawnOutcome) {
        match outcome {
            SpawnOutcome::Spawned { entity, anchor } => {
                self.events.push(frame, elapsed, SceneEvent::EntitySpawned { entity, anchor });
            }
            SpawnOutcome::SpawnedWithEviction { entity, anchor, evicted } => {
                self.events.push(frame, elapsed, SceneEvent::EntityEvicted { entity: evicted });
                self.events.push(frame, elapsed, SceneEvent::EntitySpawned { entity, anchor });
            }
            SpawnOutcome::Refused { .. } => {
                self.events.push(frame, elapsed, SceneEvent::SpawnRefused);
            }
        }
    }

    fn present(&mut self, renderer: &mut dyn RenderSink, frame_index: u64, elapsed: f32) -> (usize, usize) {
        let mut entities: Vec<&SceneEntity> = Vec::with_capacity(self.store.len());
        let mut skipped = 0;

        for entity in self.store.entities() {
            match entity.geometry().bounding_box() {
                Ok(_) => entities.push(entity),
                Err(e) => {
                    log::warn!("Frame {frame_index}: entity {} left out of render: {e}", entity.id());
                    self.events.push(
                        frame_index,
                        elapsed,
                        SceneEvent::RenderSkipped {
                            entity: entity.id(),
                            reason: e.to_string(),
                        },
                    );
                    skipped += 1;
                }
            }
        }

        let rendered = entities.len();
        renderer.display(&RenderFrame {
            frame_index,
            elapsed,
            entities,
        });
        (rendered, skipped)
    }

    /// Entity store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Current overlap state
    pub fn overlap_state(&self) -> OverlapState {
        self.overlap
    }

    /// Pending events
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        self.events.drain()
    }

    /// Number of ticks completed
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Frame statistics
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Spawner, for invocation counts and the random source
    pub fn spawner(&self) -> &Spawner<R> {
        &self.spawner
    }

    /// Mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
