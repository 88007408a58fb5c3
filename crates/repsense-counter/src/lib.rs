//! RepSense Counter - repetition counting from joint angles
//!
//! One shared stage machine drives every exercise. An exercise is only data:
//! a pair of joints and a (down, up) threshold pair. The gap between the two
//! thresholds is the hysteresis band that keeps angle noise near a single
//! value from producing extra reps.

pub mod stage;
pub mod exercise;
pub mod counter;

pub use stage::*;
pub use exercise::*;
pub use counter::*;
