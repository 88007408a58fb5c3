//! Exercise stage and the caller-owned counting state

use std::fmt;

use serde::Serialize;

/// Coarse phase of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Up,
    Down,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Up => f.write_str("up"),
            Stage::Down => f.write_str("down"),
        }
    }
}

/// Persistent counting state for one tracking session
///
/// Owned by the frame-processing context and mutated in place by
/// [`RepCounter::update`](crate::RepCounter::update). The rep count never
/// decreases except through [`ExerciseState::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExerciseState {
    stage: Stage,
    rep_count: u32,
}

impl ExerciseState {
    /// Fresh session state: `Up`, zero reps
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Start over, on exercise switch or session restart
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read-only copy for display
    pub fn snapshot(&self) -> ExerciseSnapshot {
        ExerciseSnapshot {
            stage: self.stage,
            rep_count: self.rep_count,
        }
    }

    pub(crate) fn descend(&mut self) {
        self.stage = Stage::Down;
    }

    pub(crate) fn complete_rep(&mut self) {
        self.stage = Stage::Up;
        self.rep_count = self.rep_count.saturating_add(1);
    }
}

/// Immutable view of [`ExerciseState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExerciseSnapshot {
    pub stage: Stage,
    pub rep_count: u32,
}
