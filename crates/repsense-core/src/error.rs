//! Error types for the RepSense pipeline

use thiserror::Error;

/// Pipeline errors
///
/// An empty detection list is not an error (it is "no pose detected"), and a
/// single missing landmark is not an error either (that joint's angle becomes
/// the invalid sentinel). Only malformed input and bad configuration land here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    // Input errors
    #[error("Invalid landmark input: expected at least {expected} landmarks, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    #[error("Unknown body part: {0}")]
    UnknownBodyPart(String),

    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    // Configuration errors
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid thresholds: down {down} must be below up {up}")]
    InvalidThresholds { down: f32, up: f32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for RepSense operations
pub type PoseResult<T> = Result<T, PoseError>;
