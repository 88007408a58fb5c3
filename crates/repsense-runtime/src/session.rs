//! Tracking session - runtime loop implementation

use repsense_core::{AngleSet, LandmarkSet, PoseResult, RawLandmark};
use repsense_counter::{
    ExerciseCatalogue, ExerciseConfig, ExerciseSnapshot, ExerciseState, RepCounter, Transition,
};
use repsense_pose::{compute_angles, select_landmarks};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::SnapshotHandle;

/// How a frame was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    /// Pose found and fed to the counter
    Tracked,
    /// Empty detection list
    NoDetection,
    /// Malformed detection list, dropped
    Skipped,
}

/// Per-frame output for the rendering side
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub status: FrameStatus,
    pub landmarks: LandmarkSet,
    pub angles: AngleSet,
    #[serde(skip)]
    pub transition: Transition,
    pub snapshot: ExerciseSnapshot,
}

/// Frame and rep totals since the session started or was last restarted
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub tracked: u64,
    pub no_detection: u64,
    pub skipped: u64,
    /// Reps completed across every exercise tracked so far. Unlike the
    /// snapshot count this survives an exercise switch; only `restart`
    /// clears it.
    pub reps: u64,
}

/// Single-subject tracking session
///
/// Owns the counting state for one exercise. Call [`process_frame`] once per
/// incoming frame from a single thread; hand [`snapshot_handle`] clones to
/// anything that only needs to display progress.
///
/// [`process_frame`]: TrackingSession::process_frame
/// [`snapshot_handle`]: TrackingSession::snapshot_handle
pub struct TrackingSession {
    counter: RepCounter,
    state: ExerciseState,
    catalogue: ExerciseCatalogue,
    snapshot: SnapshotHandle,
    stats: SessionStats,
}

impl TrackingSession {
    /// Create a session counting the given exercise
    pub fn new(config: ExerciseConfig) -> PoseResult<Self> {
        let mut catalogue = ExerciseCatalogue::builtin();
        catalogue.register(config.clone())?;
        Self::build(catalogue, config)
    }

    /// Create a session for a named exercise from a catalogue
    pub fn with_catalogue(catalogue: ExerciseCatalogue, exercise: &str) -> PoseResult<Self> {
        let config = catalogue.get(exercise)?.clone();
        Self::build(catalogue, config)
    }

    fn build(catalogue: ExerciseCatalogue, config: ExerciseConfig) -> PoseResult<Self> {
        let counter = RepCounter::new(config)?;
        let state = ExerciseState::new();
        info!(exercise = %counter.config().name, "tracking session started");

        Ok(TrackingSession {
            counter,
            snapshot: SnapshotHandle::new(state.snapshot()),
            state,
            catalogue,
            stats: SessionStats::default(),
        })
    }

    /// Run one frame through the pipeline.
    ///
    /// Never fails: an empty frame reports `NoDetection`, a malformed one is
    /// logged and reported as `Skipped`, and in both cases the counting state
    /// is left untouched.
    pub fn process_frame(&mut self, raw: &[RawLandmark]) -> FrameReport {
        self.stats.frames += 1;

        let landmarks = match select_landmarks(raw) {
            Ok(landmarks) => landmarks,
            Err(e) => {
                warn!(frame = self.stats.frames, error = %e, "dropping malformed frame");
                self.stats.skipped += 1;
                return self.report(
                    FrameStatus::Skipped,
                    LandmarkSet::empty(),
                    AngleSet::invalid(),
                    Transition::Skipped,
                );
            }
        };

        let angles = compute_angles(&landmarks);

        if landmarks.is_empty() {
            self.stats.no_detection += 1;
            return self.report(
                FrameStatus::NoDetection,
                landmarks,
                angles,
                Transition::Skipped,
            );
        }

        let transition = self.counter.update(&angles, &mut self.state);
        self.stats.tracked += 1;
        if transition == Transition::Completed {
            self.stats.reps += 1;
        }
        self.snapshot.publish(self.state.snapshot());

        self.report(FrameStatus::Tracked, landmarks, angles, transition)
    }

    fn report(
        &self,
        status: FrameStatus,
        landmarks: LandmarkSet,
        angles: AngleSet,
        transition: Transition,
    ) -> FrameReport {
        FrameReport {
            status,
            landmarks,
            angles,
            transition,
            snapshot: self.state.snapshot(),
        }
    }

    /// Switch to a different exercise, starting the count over.
    ///
    /// Session statistics keep running; see [`SessionStats::reps`].
    pub fn switch_exercise(&mut self, config: ExerciseConfig) -> PoseResult<()> {
        self.catalogue.register(config.clone())?;
        self.counter = RepCounter::new(config)?;
        self.reset_state();
        info!(exercise = %self.counter.config().name, "switched exercise");
        Ok(())
    }

    /// Switch to a catalogue exercise by name
    pub fn switch_to(&mut self, exercise: &str) -> PoseResult<()> {
        let config = self.catalogue.get(exercise)?.clone();
        self.switch_exercise(config)
    }

    /// Restart the session: zero the count and the statistics
    pub fn restart(&mut self) {
        self.reset_state();
        self.stats = SessionStats::default();
        debug!(exercise = %self.counter.config().name, "session restarted");
    }

    fn reset_state(&mut self) {
        self.state.reset();
        self.snapshot.publish(self.state.snapshot());
    }

    pub fn exercise(&self) -> &ExerciseConfig {
        self.counter.config()
    }

    pub fn catalogue(&self) -> &ExerciseCatalogue {
        &self.catalogue
    }

    pub fn snapshot(&self) -> ExerciseSnapshot {
        self.state.snapshot()
    }

    /// Cloneable read-only handle for display threads
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::arms_frame;
    use proptest::prelude::*;
    use repsense_core::{JointAngle, INVALID_ANGLE, REQUIRED_LANDMARKS};
    use repsense_counter::Stage;

    fn push_up_session() -> TrackingSession {
        TrackingSession::new(ExerciseConfig::push_up()).unwrap()
    }

    #[test]
    fn test_arms_frame_geometry() {
        let mut session = push_up_session();
        let report = session.process_frame(&arms_frame(75.0));
        let angle = report.angles.valid(JointAngle::LeftElbow).unwrap();
        assert!((angle - 75.0).abs() < 0.01, "got {angle}");
    }

    #[test]
    fn test_counts_reps_across_frames() {
        let mut session = push_up_session();
        for _ in 0..3 {
            session.process_frame(&arms_frame(170.0));
            session.process_frame(&arms_frame(70.0));
            session.process_frame(&arms_frame(170.0));
        }

        assert_eq!(session.snapshot().rep_count, 3);
        assert_eq!(session.snapshot().stage, Stage::Up);
        assert_eq!(session.stats().reps, 3);
        assert_eq!(session.stats().tracked, 9);
    }

    #[test]
    fn test_empty_frame_is_no_detection() {
        let mut session = push_up_session();
        session.process_frame(&arms_frame(70.0));

        let report = session.process_frame(&[]);
        assert_eq!(report.status, FrameStatus::NoDetection);
        assert!(report.landmarks.is_empty());
        assert!(report.angles.iter().all(|(_, a)| a == INVALID_ANGLE));
        assert_eq!(report.snapshot.stage, Stage::Down);
        assert_eq!(session.stats().no_detection, 1);
    }

    #[test]
    fn test_short_frame_is_skipped_without_touching_state() {
        let mut session = push_up_session();
        session.process_frame(&arms_frame(70.0));

        let short = vec![RawLandmark::new(0.5, 0.5, 0.0); 20];
        let report = session.process_frame(&short);
        assert_eq!(report.status, FrameStatus::Skipped);
        assert_eq!(report.transition, Transition::Skipped);
        assert_eq!(session.snapshot().stage, Stage::Down);
        assert_eq!(session.stats().skipped, 1);

        session.process_frame(&arms_frame(170.0));
        assert_eq!(session.snapshot().rep_count, 1);
    }

    #[test]
    fn test_snapshot_handle_follows_session() {
        let mut session = push_up_session();
        let handle = session.snapshot_handle();

        session.process_frame(&arms_frame(70.0));
        assert_eq!(handle.load().stage, Stage::Down);
        session.process_frame(&arms_frame(170.0));
        assert_eq!(handle.load().rep_count, 1);

        session.restart();
        assert_eq!(handle.load(), ExerciseSnapshot::default());
        assert_eq!(session.stats(), &SessionStats::default());
    }

    #[test]
    fn test_switch_exercise_resets_count() {
        let mut session = push_up_session();
        session.process_frame(&arms_frame(70.0));
        session.process_frame(&arms_frame(170.0));
        assert_eq!(session.snapshot().rep_count, 1);

        session.switch_to("squat").unwrap();
        assert_eq!(session.exercise().name, "squat");
        assert_eq!(session.snapshot().rep_count, 0);

        assert!(session.switch_to("burpee").is_err());
        assert_eq!(session.exercise().name, "squat");
    }

    #[test]
    fn test_stats_reps_span_exercise_switches() {
        let mut session = push_up_session();
        for _ in 0..2 {
            session.process_frame(&arms_frame(70.0));
            session.process_frame(&arms_frame(170.0));
        }
        session.switch_to("squat").unwrap();
        assert_eq!(session.snapshot().rep_count, 0);
        assert_eq!(session.stats().reps, 2);

        session.switch_to("pushup").unwrap();
        session.process_frame(&arms_frame(70.0));
        session.process_frame(&arms_frame(170.0));
        assert_eq!(session.snapshot().rep_count, 1);
        assert_eq!(session.stats().reps, 3);

        session.restart();
        assert_eq!(session.stats().reps, 0);
    }

    #[test]
    fn test_custom_exercise_registered() {
        let config = ExerciseConfig::new(
            "curl",
            [JointAngle::LeftElbow, JointAngle::RightElbow],
            60.0,
            150.0,
        );
        let mut session = TrackingSession::new(config).unwrap();
        assert!(session.catalogue().get("curl").is_ok());

        // 75 degrees is not deep enough for this exercise
        session.process_frame(&arms_frame(75.0));
        assert_eq!(session.snapshot().stage, Stage::Up);
        session.process_frame(&arms_frame(50.0));
        assert_eq!(session.snapshot().stage, Stage::Down);
    }

    #[test]
    fn test_report_serializes_for_overlay() {
        let mut session = push_up_session();
        let report = session.process_frame(&arms_frame(70.0));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "tracked");
        assert_eq!(value["snapshot"]["stage"], "down");
        assert!(value["landmarks"]["left_wrist"].is_object());
    }

    proptest! {
        #[test]
        fn prop_malformed_frames_never_disturb_state(
            len in 1usize..REQUIRED_LANDMARKS,
            coord in 0.0f32..1.0,
        ) {
            let mut session = push_up_session();
            session.process_frame(&arms_frame(70.0));
            let before = session.snapshot();

            let frame = vec![RawLandmark::new(coord, coord, 0.0); len];
            let report = session.process_frame(&frame);

            prop_assert_eq!(report.status, FrameStatus::Skipped);
            prop_assert_eq!(session.snapshot(), before);
            prop_assert_eq!(session.snapshot_handle().load(), before);
        }
    }
}
