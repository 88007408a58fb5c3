//! Joint angle at a vertex from three landmarks
//!
//! Angles are measured on the 2-D image projection (x, y). Depth is too noisy
//! from a single camera to be worth mixing in.

use repsense_core::{RawLandmark, INVALID_ANGLE};

/// Unsigned angle at `b` formed by `a` and `c`, in degrees within `[0, 180]`.
pub fn angle_between(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    let radians = (c.1 - b.1).atan2(c.0 - b.0) - (a.1 - b.1).atan2(a.0 - b.0);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Angle at vertex `b` between distal `a` and proximal `c`.
///
/// Returns [`INVALID_ANGLE`] if any point is missing; callers must check for
/// the sentinel before using the value.
pub fn calculate_angle(
    a: Option<&RawLandmark>,
    b: Option<&RawLandmark>,
    c: Option<&RawLandmark>,
) -> f32 {
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) => angle_between(a.xy(), b.xy(), c.xy()),
        _ => INVALID_ANGLE,
    }
}
