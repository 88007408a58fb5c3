//! Rep scenarios - scripted movement replayed through a tracking session

use repsense_counter::Transition;
use repsense_runtime::{FrameStatus, SessionStats, TrackingSession};

use crate::{PoseSynthesizer, PoseTarget};

/// Which joints move during the scenario
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Elbows flex, legs stay straight
    Arms,
    /// Knees flex, arms stay straight
    Legs,
}

/// A scripted set of repetitions
#[derive(Clone, Debug)]
pub struct RepScenario {
    pub movement: Movement,
    pub reps: u32,
    /// Frames spent moving from top to bottom (and again bottom to top)
    pub frames_per_phase: u32,
    /// Angle at the top of each rep
    pub top: f32,
    /// Angle at the bottom of each rep
    pub bottom: f32,
}

impl RepScenario {
    /// Full-range push-ups
    pub fn push_ups(reps: u32) -> Self {
        RepScenario {
            movement: Movement::Arms,
            reps,
            frames_per_phase: 15,
            top: 170.0,
            bottom: 70.0,
        }
    }

    /// Full-range squats
    pub fn squats(reps: u32) -> Self {
        RepScenario {
            movement: Movement::Legs,
            reps,
            frames_per_phase: 20,
            top: 175.0,
            bottom: 90.0,
        }
    }

    /// Shallow reps that never leave the given band
    pub fn partial(movement: Movement, reps: u32, top: f32, bottom: f32) -> Self {
        RepScenario {
            movement,
            reps,
            frames_per_phase: 10,
            top,
            bottom,
        }
    }

    /// Per-frame target angles for the whole scenario
    pub fn targets(&self) -> Vec<PoseTarget> {
        let steps = self.frames_per_phase.max(1);
        let mut angles = vec![self.top];

        for _ in 0..self.reps {
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                angles.push(self.top + (self.bottom - self.top) * t);
            }
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                angles.push(self.bottom + (self.top - self.bottom) * t);
            }
        }

        let rest = PoseTarget::extended();
        angles
            .into_iter()
            .map(|angle| match self.movement {
                Movement::Arms => PoseTarget::new(angle, rest.knee),
                Movement::Legs => PoseTarget::new(rest.elbow, angle),
            })
            .collect()
    }

    /// Replay the scenario through `session`
    pub fn run(
        &self,
        session: &mut TrackingSession,
        synth: &mut PoseSynthesizer,
    ) -> ScenarioResult {
        let mut result = ScenarioResult::default();

        for target in self.targets() {
            let report = session.process_frame(&synth.frame(target));
            match report.status {
                FrameStatus::Tracked => {}
                FrameStatus::NoDetection => result.dropped += 1,
                FrameStatus::Skipped => result.truncated += 1,
            }
            if report.transition == Transition::Completed {
                result.completions += 1;
            }
            if report.snapshot.rep_count < result.counted {
                result.regressions += 1;
            }
            result.counted = report.snapshot.rep_count;
        }

        result.stats = session.stats().clone();
        result
    }
}

/// What a scenario run observed
#[derive(Clone, Debug, Default)]
pub struct ScenarioResult {
    /// Final rep count
    pub counted: u32,
    /// Completed transitions seen in frame reports
    pub completions: u32,
    /// Frames where the count went down
    pub regressions: u32,
    pub dropped: u32,
    pub truncated: u32,
    pub stats: SessionStats,
}
