//! Rep counter - shared hysteresis stage machine

use repsense_core::{AngleSet, PoseResult};
use tracing::{debug, info, trace};

use crate::{ExerciseConfig, ExerciseState, Stage};

/// Outcome of feeding one frame to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A required angle was missing; state untouched
    Skipped,
    /// No threshold crossed jointly, or already in the target stage
    Unchanged,
    /// Up → Down
    Descended,
    /// Down → Up, rep counted
    Completed,
}

/// Applies one exercise's thresholds to a stream of angle sets.
///
/// The counter itself holds no per-session state; the caller owns the
/// [`ExerciseState`] and passes it in on every frame.
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: ExerciseConfig,
}

impl RepCounter {
    pub fn new(config: ExerciseConfig) -> PoseResult<Self> {
        config.validate()?;
        Ok(RepCounter { config })
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Advance `state` by one frame of angles.
    ///
    /// Both joints must be below the down threshold to enter `Down`, and both
    /// above the up threshold to return to `Up`. Only the Down → Up edge
    /// counts a rep. If either joint angle is invalid the frame is ignored.
    pub fn update(&self, angles: &AngleSet, state: &mut ExerciseState) -> Transition {
        let [first, second] = self.config.joints;
        let (Some(a), Some(b)) = (angles.valid(first), angles.valid(second)) else {
            trace!(exercise = %self.config.name, "required angle missing, frame skipped");
            return Transition::Skipped;
        };

        let down = self.config.down_threshold;
        let up = self.config.up_threshold;

        if a < down && b < down {
            if state.stage() == Stage::Down {
                return Transition::Unchanged;
            }
            state.descend();
            debug!(exercise = %self.config.name, a, b, "stage down");
            Transition::Descended
        } else if a > up && b > up {
            if state.stage() != Stage::Down {
                return Transition::Unchanged;
            }
            state.complete_rep();
            info!(
                exercise = %self.config.name,
                reps = state.rep_count(),
                "rep completed"
            );
            Transition::Completed
        } else {
            Transition::Unchanged
        }
    }
}
