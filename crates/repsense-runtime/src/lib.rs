//! RepSense Runtime - frame loop around the pose pipeline
//!
//! Each incoming frame runs through four stages:
//! 1. Select named landmarks from raw detections
//! 2. Compute the joint angle catalogue
//! 3. Advance the exercise stage machine
//! 4. Publish a read-only snapshot for display
//!
//! No stage blocks and no stage fails the session: malformed frames are
//! logged and skipped, leaving the counting state as it was.

pub mod replay;
pub mod session;
pub mod snapshot;
pub mod telemetry;

#[cfg(test)]
mod fixtures;

pub use replay::*;
pub use session::*;
pub use snapshot::*;
pub use telemetry::*;
