//! Exercise definitions - joint pair plus hysteresis thresholds

use std::collections::BTreeMap;

use repsense_core::{JointAngle, PoseError, PoseResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One countable exercise
///
/// A rep starts when both joints drop below `down_threshold` and completes
/// when both rise above `up_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    pub name: String,
    pub joints: [JointAngle; 2],
    /// Degrees; both joints below this enters `Down`
    pub down_threshold: f32,
    /// Degrees; both joints above this returns to `Up` and counts the rep
    pub up_threshold: f32,
}

impl ExerciseConfig {
    pub fn new(
        name: impl Into<String>,
        joints: [JointAngle; 2],
        down_threshold: f32,
        up_threshold: f32,
    ) -> Self {
        ExerciseConfig {
            name: name.into(),
            joints,
            down_threshold,
            up_threshold,
        }
    }

    /// Elbow-driven push-up
    pub fn push_up() -> Self {
        Self::new(
            "pushup",
            [JointAngle::LeftElbow, JointAngle::RightElbow],
            90.0,
            130.0,
        )
    }

    /// Knee-driven squat
    pub fn squat() -> Self {
        Self::new(
            "squat",
            [JointAngle::LeftKnee, JointAngle::RightKnee],
            110.0,
            160.0,
        )
    }

    /// Reject thresholds that leave no hysteresis band.
    pub fn validate(&self) -> PoseResult<()> {
        if self.name.trim().is_empty() {
            return Err(PoseError::Config("exercise name is empty".into()));
        }

        let (down, up) = (self.down_threshold, self.up_threshold);
        if !down.is_finite() || !up.is_finite() || down >= up {
            return Err(PoseError::InvalidThresholds { down, up });
        }

        Ok(())
    }

    /// Width of the hysteresis band in degrees
    pub fn band(&self) -> f32 {
        self.up_threshold - self.down_threshold
    }
}

/// Named exercise registry
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalogue {
    exercises: BTreeMap<String, ExerciseConfig>,
}

impl ExerciseCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue with the push-up and squat presets
    pub fn builtin() -> Self {
        let mut catalogue = Self::new();
        for config in [ExerciseConfig::push_up(), ExerciseConfig::squat()] {
            catalogue.exercises.insert(config.name.clone(), config);
        }
        catalogue
    }

    /// Load a JSON array of exercise definitions
    pub fn from_json(json: &str) -> PoseResult<Self> {
        let configs: Vec<ExerciseConfig> =
            serde_json::from_str(json).map_err(|e| PoseError::Config(e.to_string()))?;

        let mut catalogue = Self::new();
        for config in configs {
            catalogue.register(config)?;
        }
        Ok(catalogue)
    }

    /// Add or replace an exercise
    pub fn register(&mut self, config: ExerciseConfig) -> PoseResult<()> {
        config.validate()?;
        debug!(
            exercise = %config.name,
            down = config.down_threshold,
            up = config.up_threshold,
            "registered exercise"
        );
        self.exercises.insert(config.name.clone(), config);
        Ok(())
    }

    /// Merge another catalogue in, its entries winning on name clashes
    pub fn extend(&mut self, other: ExerciseCatalogue) {
        self.exercises.extend(other.exercises);
    }

    pub fn get(&self, name: &str) -> PoseResult<&ExerciseConfig> {
        self.exercises
            .get(name)
            .ok_or_else(|| PoseError::UnknownExercise(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exercises.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
