//! RepSense Test Harness - synthetic pose streams
//!
//! This crate provides:
//! - A pose synthesizer that emits full model-ordered frames for target
//!   elbow and knee angles
//! - Seeded coordinate jitter, dropped frames and truncated frames
//! - Rep scenarios replayed through a tracking session

pub mod synth;
pub mod scenario;

pub use synth::*;
pub use scenario::*;
