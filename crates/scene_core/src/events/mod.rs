//! Scene notifications
//!
//! The frame loop records what happened during a tick here; the embedder
//! drains the queue whenever it likes. Nothing in the core reacts to these
//! events, they exist for observers only.

use crate::ecs::EntityId;
use crate::foundation::math::Vec3;
use std::collections::VecDeque;

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// The tracked pair began to overlap
    OverlapStarted,
    /// The tracked pair stopped overlapping
    OverlapFinished,
    /// A spawned entity was added
    EntitySpawned {
        /// New entity
        entity: EntityId,
        /// Its anchor
        anchor: Vec3,
    },
    /// A spawned entity was dropped by the growth policy
    EntityEvicted {
        /// Removed entity
        entity: EntityId,
    },
    /// A spawn was refused by the growth policy
    SpawnRefused,
    /// An entity was left out of this tick's render hand-off
    RenderSkipped {
        /// Skipped entity
        entity: EntityId,
        /// Why its geometry could not be used
        reason: String,
    },
}

/// Event stamped with the frame it happened in
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Frame index
    pub frame: u64,
    /// Clock reading for the frame (seconds)
    pub elapsed: f32,
    /// What happened
    pub event: SceneEvent,
}

/// Bounded FIFO of events awaiting the embedder
///
/// Once `capacity` events are queued the oldest is dropped for each new one;
/// [`EventQueue::dropped`] counts the losses.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<TimedEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl EventQueue {
    /// Capacity used by [`EventQueue::new`]
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create an empty queue with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue holding at most `capacity` events (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    /// Append an event, dropping the oldest when full
    pub fn push(&mut self, frame: u64, elapsed: f32, event: SceneEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.dropped += 1;
            if self.dropped == 1 {
                log::warn!("Event queue full ({} events), dropping oldest; drain it to keep history", self.capacity);
            }
        }
        self.events.push_back(TimedEvent { frame, elapsed, event });
    }

    /// Maximum number of queued events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events discarded because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<TimedEvent> {
        self.events.drain(..).collect()
    }

    /// Iterate over queued events without removing them
    pub fn iter(&self) -> impl Iterator<Item = &TimedEvent> {
        self.events.iter()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count queued events matching a predicate
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&SceneEvent) -> bool,
    {
        self.events.iter().filter(|timed| predicate(&timed.event)).count()
    }
}
