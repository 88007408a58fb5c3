//! RepSense Pose - per-frame landmark and angle extraction
//!
//! Raw detections → [`select_landmarks`] → [`compute_angles`].
//! Every function here is pure; nothing is carried between frames.

pub mod selector;
pub mod angle;
pub mod aggregate;

pub use selector::*;
pub use angle::*;
pub use aggregate::*;
