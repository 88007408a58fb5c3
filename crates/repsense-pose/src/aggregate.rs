//! Angle aggregation across the joint catalogue

use repsense_core::{AngleSet, JointAngle, LandmarkSet, INVALID_ANGLE};
use tracing::trace;

use crate::calculate_angle;

/// Compute every catalogue joint angle for one frame.
///
/// An empty landmark set yields a full set of sentinels, not an empty
/// mapping. Otherwise each joint is computed independently: a missing
/// landmark only invalidates the joints that need it.
pub fn compute_angles(landmarks: &LandmarkSet) -> AngleSet {
    let mut angles = AngleSet::invalid();
    if landmarks.is_empty() {
        return angles;
    }

    for &joint in JointAngle::all() {
        let (distal, vertex, proximal) = joint.landmarks();
        let angle = calculate_angle(
            landmarks.get(distal),
            landmarks.get(vertex),
            landmarks.get(proximal),
        );
        if angle == INVALID_ANGLE {
            trace!(%joint, "missing landmark, angle left invalid");
        }
        angles.set(joint, angle);
    }

    angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use repsense_core::{BodyPart, RawLandmark};

    fn lm(x: f32, y: f32) -> RawLandmark {
        RawLandmark::new(x, y, 0.0)
    }

    /// Standing figure: straight arms hanging down, straight legs
    fn standing() -> LandmarkSet {
        let mut set = LandmarkSet::empty();
        set.insert(BodyPart::Nose, lm(0.5, 0.1));
        set.insert(BodyPart::LeftShoulder, lm(0.6, 0.2));
        set.insert(BodyPart::RightShoulder, lm(0.4, 0.2));
        set.insert(BodyPart::LeftElbow, lm(0.6, 0.35));
        set.insert(BodyPart::RightElbow, lm(0.4, 0.35));
        set.insert(BodyPart::LeftWrist, lm(0.6, 0.5));
        set.insert(BodyPart::RightWrist, lm(0.4, 0.5));
        set.insert(BodyPart::LeftHip, lm(0.55, 0.5));
        set.insert(BodyPart::RightHip, lm(0.45, 0.5));
        set.insert(BodyPart::LeftKnee, lm(0.55, 0.7));
        set.insert(BodyPart::RightKnee, lm(0.45, 0.7));
        set.insert(BodyPart::LeftAnkle, lm(0.55, 0.9));
        set.insert(BodyPart::RightAnkle, lm(0.45, 0.9));
        set
    }

    #[test]
    fn test_empty_landmarks_give_all_sentinels() {
        let angles = compute_angles(&LandmarkSet::empty());
        assert_eq!(angles.iter().count(), JointAngle::COUNT);
        for (joint, angle) in angles.iter() {
            assert_eq!(angle, INVALID_ANGLE, "{joint}");
        }
    }

    #[test]
    fn test_standing_pose_is_straight() {
        let angles = compute_angles(&standing());
        for joint in [
            JointAngle::LeftElbow,
            JointAngle::RightElbow,
            JointAngle::LeftKnee,
            JointAngle::RightKnee,
        ] {
            let angle = angles.valid(joint).unwrap();
            assert!((angle - 180.0).abs() < 0.01, "{joint}: {angle}");
        }
        for joint in [JointAngle::LeftHip, JointAngle::RightHip] {
            let angle = angles.valid(joint).unwrap();
            assert!(angle > 150.0, "{joint}: {angle}");
        }
    }

    #[test]
    fn test_bent_elbow() {
        let mut set = standing();
        // Forearm swung horizontal
        set.insert(BodyPart::LeftWrist, lm(0.75, 0.35));
        let angles = compute_angles(&set);
        let angle = angles.valid(JointAngle::LeftElbow).unwrap();
        assert!((angle - 90.0).abs() < 0.01, "got {angle}");
    }

    #[test]
    fn test_missing_landmark_degrades_single_joint() {
        let mut set = standing();
        set.remove(BodyPart::LeftWrist);
        let angles = compute_angles(&set);

        assert_eq!(angles.get(JointAngle::LeftElbow), INVALID_ANGLE);
        assert!(angles.valid(JointAngle::RightElbow).is_some());
        assert!(angles.valid(JointAngle::LeftKnee).is_some());
        assert!(angles.valid(JointAngle::LeftHip).is_some());
    }

    #[test]
    fn test_shared_landmark_invalidates_dependents() {
        let mut set = standing();
        set.remove(BodyPart::LeftKnee);
        let angles = compute_angles(&set);

        assert_eq!(angles.get(JointAngle::LeftKnee), INVALID_ANGLE);
        assert_eq!(angles.get(JointAngle::LeftHip), INVALID_ANGLE);
        assert!(angles.valid(JointAngle::LeftElbow).is_some());
    }
}
