//! Edge-triggered overlap state machine
//!
//! The state is owned by the frame loop and threaded through [`OverlapState::step`];
//! only changes of state produce a transition.

/// Whether the tracked pair currently overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapState {
    /// Boxes are apart
    #[default]
    Separated,
    /// Boxes overlap
    Overlapping,
}

/// Change produced by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapTransition {
    /// Separated -> Overlapping; the spawner runs once
    Started,
    /// Overlapping -> Separated; a finish notification is emitted
    Finished,
    /// Same state as the previous frame
    Unchanged,
}

impl OverlapState {
    /// True in the `Overlapping` state
    pub const fn is_overlapping(self) -> bool {
        matches!(self, Self::Overlapping)
    }

    /// Feed this frame's intersection result
    #[must_use]
    pub const fn step(self, intersects: bool) -> (Self, OverlapTransition) {
        match (self, intersects) {
            (Self::Separated, true) => (Self::Overlapping, OverlapTransition::Started),
            (Self::Overlapping, false) => (Self::Separated, OverlapTransition::Finished),
            (state, _) => (state, OverlapTransition::Unchanged),
        }
    }
}
