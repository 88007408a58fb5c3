//! Landmark selection - flat detection list to named body parts

use repsense_core::{
    LandmarkSet, PoseError, PoseResult, RawLandmark, BODY_PART_INDEX, REQUIRED_LANDMARKS,
};

/// Map the model's positional output onto the body-part catalogue.
///
/// An empty input is a valid "no pose detected" frame and yields an empty
/// set. A non-empty input too short to cover every catalogue index is
/// rejected instead of being padded with defaults.
pub fn select_landmarks(raw: &[RawLandmark]) -> PoseResult<LandmarkSet> {
    if raw.is_empty() {
        return Ok(LandmarkSet::empty());
    }

    if raw.len() < REQUIRED_LANDMARKS {
        return Err(PoseError::InvalidInput {
            expected: REQUIRED_LANDMARKS,
            actual: raw.len(),
        });
    }

    let mut set = LandmarkSet::empty();
    for &(part, index) in BODY_PART_INDEX.iter() {
        set.insert(part, raw[index]);
    }

    Ok(set)
}
