//! Joint catalogue and per-frame angle sets

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{BodyPart, PoseError};

/// Angle value reported when any defining landmark is missing
pub const INVALID_ANGLE: f32 = -1.0;

/// Joint whose angle is computed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointAngle {
    LeftElbow,
    RightElbow,
    LeftKnee,
    RightKnee,
    LeftHip,
    RightHip,
}

impl JointAngle {
    pub const COUNT: usize = 6;

    /// All joints in order
    pub fn all() -> &'static [JointAngle] {
        &[
            JointAngle::LeftElbow,
            JointAngle::RightElbow,
            JointAngle::LeftKnee,
            JointAngle::RightKnee,
            JointAngle::LeftHip,
            JointAngle::RightHip,
        ]
    }

    /// Defining landmarks as (distal, vertex, proximal)
    pub fn landmarks(self) -> (BodyPart, BodyPart, BodyPart) {
        use BodyPart::*;

        match self {
            JointAngle::LeftElbow => (LeftWrist, LeftElbow, LeftShoulder),
            JointAngle::RightElbow => (RightWrist, RightElbow, RightShoulder),
            JointAngle::LeftKnee => (LeftHip, LeftKnee, LeftAnkle),
            JointAngle::RightKnee => (RightHip, RightKnee, RightAnkle),
            JointAngle::LeftHip => (LeftShoulder, LeftHip, LeftKnee),
            JointAngle::RightHip => (RightShoulder, RightHip, RightKnee),
        }
    }

    /// Vertex landmark, where an overlay would place the angle label
    pub fn vertex(self) -> BodyPart {
        self.landmarks().1
    }

    pub fn name(self) -> &'static str {
        match self {
            JointAngle::LeftElbow => "left_elbow",
            JointAngle::RightElbow => "right_elbow",
            JointAngle::LeftKnee => "left_knee",
            JointAngle::RightKnee => "right_knee",
            JointAngle::LeftHip => "left_hip",
            JointAngle::RightHip => "right_hip",
        }
    }
}

impl fmt::Display for JointAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointAngle {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointAngle::all()
            .iter()
            .copied()
            .find(|joint| joint.name() == s)
            .ok_or_else(|| PoseError::UnknownJoint(s.to_string()))
    }
}

/// Returns true if `angle` is a usable joint angle in `[0, 180]`
#[inline]
pub fn is_valid_angle(angle: f32) -> bool {
    angle.is_finite() && (0.0..=180.0).contains(&angle)
}

/// Joint → angle in degrees for one frame
///
/// Always holds an entry for every joint in the catalogue. Joints that could
/// not be computed hold [`INVALID_ANGLE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSet {
    angles: [f32; JointAngle::COUNT],
}

impl Default for AngleSet {
    fn default() -> Self {
        Self::invalid()
    }
}

impl AngleSet {
    /// Every joint set to the invalid sentinel
    pub fn invalid() -> Self {
        AngleSet {
            angles: [INVALID_ANGLE; JointAngle::COUNT],
        }
    }

    /// Raw value for a joint, possibly the sentinel
    #[inline]
    pub fn get(&self, joint: JointAngle) -> f32 {
        self.angles[joint as usize]
    }

    #[inline]
    pub fn set(&mut self, joint: JointAngle, angle: f32) {
        self.angles[joint as usize] = angle;
    }

    /// Angle for a joint, or `None` when it is the sentinel or out of range
    pub fn valid(&self, joint: JointAngle) -> Option<f32> {
        let angle = self.get(joint);
        is_valid_angle(angle).then_some(angle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointAngle, f32)> + '_ {
        JointAngle::all().iter().map(move |j| (*j, self.get(*j)))
    }

    /// Joints with a usable angle
    pub fn iter_valid(&self) -> impl Iterator<Item = (JointAngle, f32)> + '_ {
        self.iter().filter(|(_, angle)| is_valid_angle(*angle))
    }

    pub fn is_all_invalid(&self) -> bool {
        self.iter_valid().next().is_none()
    }
}

impl Serialize for AngleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(JointAngle::COUNT))?;
        for (joint, angle) in self.iter() {
            map.serialize_entry(joint.name(), &angle)?;
        }
        map.end()
    }
}
