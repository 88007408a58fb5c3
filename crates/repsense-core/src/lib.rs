//! RepSense Core - Fundamental types for pose-driven rep counting
//!
//! This crate defines the values that flow through the per-frame pipeline:
//! - Raw detections and the fixed body-part index schema
//! - Landmark sets (body part → landmark)
//! - Joint catalogue and angle sets (joint → degrees, or the invalid sentinel)
//! - Error taxonomy

pub mod landmark;
pub mod joint;
pub mod error;

pub use landmark::*;
pub use joint::*;
pub use error::*;
