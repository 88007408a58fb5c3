//! Synthetic frames shared by the unit tests

use repsense_core::{BodyPart, RawLandmark, POSE_LANDMARK_COUNT};

/// Full frame with both arms bent to roughly `elbow` degrees.
/// Shoulders above elbows, forearms rotated away from the upper arm.
pub(crate) fn arms_frame(elbow: f32) -> Vec<RawLandmark> {
    let mut raw = vec![RawLandmark::new(0.5, 0.5, 0.0); POSE_LANDMARK_COUNT];
    let theta = elbow.to_radians();
    for (shoulder, elbow_part, wrist, x) in [
        (BodyPart::LeftShoulder, BodyPart::LeftElbow, BodyPart::LeftWrist, 0.6),
        (BodyPart::RightShoulder, BodyPart::RightElbow, BodyPart::RightWrist, 0.4),
    ] {
        raw[shoulder.index()] = RawLandmark::new(x, 0.3, 0.0);
        raw[elbow_part.index()] = RawLandmark::new(x, 0.45, 0.0);
        // Upper arm points up (-y) from the elbow; rotate by theta
        raw[wrist.index()] =
            RawLandmark::new(x + 0.15 * theta.sin(), 0.45 - 0.15 * theta.cos(), 0.0);
    }
    raw
}
