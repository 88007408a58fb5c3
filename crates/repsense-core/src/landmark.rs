//! Landmarks - raw detections and the named body-part schema
//!
//! The upstream pose model emits 33 points per frame in a fixed anatomical
//! order. Only the positions in [`BODY_PART_INDEX`] are consumed; reordering
//! the model output silently breaks selection, so the table is the single
//! place the schema lives.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::PoseError;

/// Number of points emitted per pose by the upstream model
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Minimum sequence length that covers every catalogue index
pub const REQUIRED_LANDMARKS: usize = 29;

/// A single detected point
///
/// `x` and `y` are normalized to `[0, 1]` relative to the frame, `z` is
/// relative depth. Confidence scores are optional because some model builds
/// leave them undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub visibility: Option<f32>,
    #[serde(default)]
    pub presence: Option<f32>,
}

impl RawLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
            presence: None,
        }
    }

    pub fn with_confidence(mut self, visibility: f32, presence: f32) -> Self {
        self.visibility = Some(visibility);
        self.presence = Some(presence);
        self
    }

    /// 2-D projection used for angle computation
    #[inline]
    pub fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Named body part tracked by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyPart {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// Body part → positional index in the model output.
///
/// Entries are in `BodyPart` declaration order, so `BODY_PART_INDEX[part as usize]`
/// is the entry for `part`.
pub const BODY_PART_INDEX: [(BodyPart, usize); BodyPart::COUNT] = [
    (BodyPart::Nose, 0),
    (BodyPart::LeftShoulder, 11),
    (BodyPart::RightShoulder, 12),
    (BodyPart::LeftElbow, 13),
    (BodyPart::RightElbow, 14),
    (BodyPart::LeftWrist, 15),
    (BodyPart::RightWrist, 16),
    (BodyPart::LeftHip, 23),
    (BodyPart::RightHip, 24),
    (BodyPart::LeftKnee, 25),
    (BodyPart::RightKnee, 26),
    (BodyPart::LeftAnkle, 27),
    (BodyPart::RightAnkle, 28),
];

impl BodyPart {
    /// Number of catalogue entries
    pub const COUNT: usize = 13;

    /// All body parts in order
    pub fn all() -> &'static [BodyPart] {
        &[
            BodyPart::Nose,
            BodyPart::LeftShoulder,
            BodyPart::RightShoulder,
            BodyPart::LeftElbow,
            BodyPart::RightElbow,
            BodyPart::LeftWrist,
            BodyPart::RightWrist,
            BodyPart::LeftHip,
            BodyPart::RightHip,
            BodyPart::LeftKnee,
            BodyPart::RightKnee,
            BodyPart::LeftAnkle,
            BodyPart::RightAnkle,
        ]
    }

    /// Positional index of this part in the raw detection sequence
    #[inline]
    pub fn index(self) -> usize {
        BODY_PART_INDEX[self as usize].1
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftElbow => "left_elbow",
            BodyPart::RightElbow => "right_elbow",
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
            BodyPart::LeftKnee => "left_knee",
            BodyPart::RightKnee => "right_knee",
            BodyPart::LeftAnkle => "left_ankle",
            BodyPart::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyPart {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::all()
            .iter()
            .copied()
            .find(|part| part.name() == s)
            .ok_or_else(|| PoseError::UnknownBodyPart(s.to_string()))
    }
}

/// Segments of the overlay skeleton, as pairs of body parts
pub const SKELETON: [(BodyPart, BodyPart); 12] = [
    (BodyPart::LeftWrist, BodyPart::LeftElbow),
    (BodyPart::LeftElbow, BodyPart::LeftShoulder),
    (BodyPart::LeftShoulder, BodyPart::LeftHip),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::LeftShoulder, BodyPart::RightShoulder),
    (BodyPart::LeftHip, BodyPart::RightHip),
    (BodyPart::RightShoulder, BodyPart::RightHip),
    (BodyPart::RightShoulder, BodyPart::RightElbow),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
];

/// Body part → landmark for one frame
///
/// Built fresh every frame. An empty set means no pose was detected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LandmarkSet {
    slots: [Option<RawLandmark>; BodyPart::COUNT],
}

impl LandmarkSet {
    /// Set with no landmarks ("no pose detected")
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn get(&self, part: BodyPart) -> Option<&RawLandmark> {
        self.slots[part as usize].as_ref()
    }

    pub fn insert(&mut self, part: BodyPart, landmark: RawLandmark) {
        self.slots[part as usize] = Some(landmark);
    }

    pub fn remove(&mut self, part: BodyPart) -> Option<RawLandmark> {
        self.slots[part as usize].take()
    }

    /// Iterate over populated slots
    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &RawLandmark)> {
        BodyPart::all()
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(part, slot)| slot.as_ref().map(|l| (*part, l)))
    }

    /// Skeleton segments whose endpoints are both present
    pub fn segments(&self) -> impl Iterator<Item = (&RawLandmark, &RawLandmark)> {
        SKELETON
            .iter()
            .filter_map(|(a, b)| Some((self.get(*a)?, self.get(*b)?)))
    }
}

impl Serialize for LandmarkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (part, landmark) in self.iter() {
            map.serialize_entry(part.name(), landmark)?;
        }
        map.end()
    }
}
