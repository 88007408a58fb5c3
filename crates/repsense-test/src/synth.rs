//! Pose synthesizer - model-ordered frames for chosen joint angles
//!
//! Builds a front-facing figure in normalized image coordinates. Elbows and
//! knees are bent by rotating the distal segment away from the proximal one,
//! so the computed 2-D angle equals the requested angle before noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use repsense_core::{BodyPart, RawLandmark, POSE_LANDMARK_COUNT, REQUIRED_LANDMARKS};

const SEGMENT: f32 = 0.15;

/// Frame corruption settings
#[derive(Clone, Debug)]
pub struct NoiseConfig {
    /// Standard deviation of coordinate jitter (normalized units)
    pub jitter: f32,
    /// Probability a frame comes back with no detection
    pub drop_rate: f64,
    /// Probability a frame is truncated below the required length
    pub truncate_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            jitter: 0.0,
            drop_rate: 0.0,
            truncate_rate: 0.0,
        }
    }
}

impl NoiseConfig {
    /// Clean frames
    pub fn none() -> Self {
        Self::default()
    }

    /// Typical webcam tracking noise
    pub fn moderate() -> Self {
        NoiseConfig {
            jitter: 0.002,
            drop_rate: 0.05,
            truncate_rate: 0.02,
        }
    }

    /// Shaky tracking with frequent gaps
    pub fn harsh() -> Self {
        NoiseConfig {
            jitter: 0.004,
            drop_rate: 0.2,
            truncate_rate: 0.1,
        }
    }
}

/// Target joint angles for one synthetic frame, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseTarget {
    pub elbow: f32,
    pub knee: f32,
}

impl PoseTarget {
    pub fn new(elbow: f32, knee: f32) -> Self {
        Self { elbow, knee }
    }

    /// Straight arms and legs
    pub fn extended() -> Self {
        Self::new(175.0, 175.0)
    }
}

/// Seeded frame generator
pub struct PoseSynthesizer {
    rng: StdRng,
    noise: NoiseConfig,
}

impl PoseSynthesizer {
    pub fn new(seed: u64, noise: NoiseConfig) -> Self {
        PoseSynthesizer {
            rng: StdRng::seed_from_u64(seed),
            noise,
        }
    }

    /// Frame with exact geometry, no noise applied
    pub fn clean_frame(target: PoseTarget) -> Vec<RawLandmark> {
        // Unused model points sit mid-frame with low confidence
        let filler = RawLandmark::new(0.5, 0.5, 0.0).with_confidence(0.1, 0.1);
        let mut frame = vec![filler; POSE_LANDMARK_COUNT];

        let mut put = |part: BodyPart, x: f32, y: f32| {
            frame[part.index()] = RawLandmark::new(x, y, 0.0).with_confidence(0.95, 0.99);
        };

        put(BodyPart::Nose, 0.5, 0.15);

        let elbow = target.elbow.to_radians();
        let knee = target.knee.to_radians();
        for (side, x) in [(Side::Left, 0.6), (Side::Right, 0.4)] {
            let (shoulder, elbow_part, wrist, hip, knee_part, ankle) = side.parts();
            // Distal segment rotated from "straight up" by the joint angle
            put(shoulder, x, 0.3);
            put(elbow_part, x, 0.3 + SEGMENT);
            put(wrist, x + SEGMENT * elbow.sin(), 0.3 + SEGMENT - SEGMENT * elbow.cos());

            let hip_x = 0.5 + (x - 0.5) * 0.5;
            put(hip, hip_x, 0.55);
            put(knee_part, hip_x, 0.55 + SEGMENT);
            put(ankle, hip_x + SEGMENT * knee.sin(), 0.55 + SEGMENT - SEGMENT * knee.cos());
        }

        frame
    }

    /// Frame with jitter, drops and truncation applied
    pub fn frame(&mut self, target: PoseTarget) -> Vec<RawLandmark> {
        if self.rng.gen_bool(self.noise.drop_rate) {
            return Vec::new();
        }

        let mut frame = Self::clean_frame(target);

        if self.noise.jitter > 0.0 {
            for landmark in &mut frame {
                landmark.x += self.gaussian(self.noise.jitter);
                landmark.y += self.gaussian(self.noise.jitter);
            }
        }

        if self.rng.gen_bool(self.noise.truncate_rate) {
            let len = self.rng.gen_range(1..REQUIRED_LANDMARKS);
            frame.truncate(len);
        }

        frame
    }

    /// Box-Muller normal sample
    fn gaussian(&mut self, stddev: f32) -> f32 {
        let u1: f32 = self.rng.gen_range(f32::EPSILON..1.0);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        stddev * z
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn parts(self) -> (BodyPart, BodyPart, BodyPart, BodyPart, BodyPart, BodyPart) {
        use BodyPart::*;

        match self {
            Side::Left => (LeftShoulder, LeftElbow, LeftWrist, LeftHip, LeftKnee, LeftAnkle),
            Side::Right => (RightShoulder, RightElbow, RightWrist, RightHip, RightKnee, RightAnkle),
        }
    }
}
