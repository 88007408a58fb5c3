//! Recorded stream replay
//!
//! A recording is JSON lines: one frame per line, each an array of landmark
//! objects `{x, y, z, visibility, presence}` in model order. A blank line is a
//! frame with no detection. A line that does not parse is logged and dropped;
//! the replay carries on with the next one.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use repsense_core::{PoseError, RawLandmark};
use repsense_counter::{ExerciseCatalogue, Transition};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{FrameStatus, TrackingSession};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid catalogue {}", .path.display())]
    Catalogue {
        path: PathBuf,
        #[source]
        source: PoseError,
    },

    #[error("Failed to read frame line {line}")]
    Line {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Line accounting for one replay
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Lines read, including unparseable ones
    pub lines: u64,
    /// Lines handed to the session as frames
    pub frames: u64,
    /// Lines dropped because they were not a landmark array
    pub unparseable: u64,
}

/// Built-in exercises, with definitions from `path` merged over them.
pub fn load_catalogue(path: Option<&Path>) -> Result<ExerciseCatalogue, ReplayError> {
    let mut catalogue = ExerciseCatalogue::builtin();
    if let Some(path) = path {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extra = ExerciseCatalogue::from_json(&json).map_err(|source| {
            ReplayError::Catalogue {
                path: path.to_path_buf(),
                source,
            }
        })?;
        catalogue.extend(extra);
    }
    Ok(catalogue)
}

/// Feed every frame in `reader` through `session`.
///
/// Only an I/O failure on the reader stops the replay.
pub fn replay<R: BufRead>(
    reader: R,
    session: &mut TrackingSession,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| ReplayError::Line {
            line: line_no,
            source,
        })?;
        summary.lines += 1;

        let frame: Vec<RawLandmark> = if line.trim().is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str(&line) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(line = line_no, error = %e, "unparseable frame, skipping");
                    summary.unparseable += 1;
                    continue;
                }
            }
        };

        let report = session.process_frame(&frame);
        summary.frames += 1;
        if report.transition == Transition::Completed {
            info!(line = line_no, reps = report.snapshot.rep_count, "rep");
        } else if report.status == FrameStatus::Skipped {
            warn!(line = line_no, landmarks = frame.len(), "frame skipped");
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::arms_frame;
    use repsense_counter::{ExerciseConfig, Stage};
    use std::io::Cursor;

    fn line(elbow: f32) -> String {
        serde_json::to_string(&arms_frame(elbow)).unwrap()
    }

    fn push_up_session() -> TrackingSession {
        TrackingSession::new(ExerciseConfig::push_up()).unwrap()
    }

    #[test]
    fn test_blank_line_is_no_detection() {
        let mut session = push_up_session();
        let input = format!("{}\n\n   \n{}\n", line(70.0), line(170.0));

        let summary = replay(Cursor::new(input), &mut session).unwrap();

        assert_eq!(summary.lines, 4);
        assert_eq!(summary.frames, 4);
        assert_eq!(session.stats().no_detection, 2);
        assert_eq!(session.stats().tracked, 2);
        assert_eq!(session.snapshot().rep_count, 1);
    }

    #[test]
    fn test_unparseable_line_skipped_and_counting_continues() {
        let mut session = push_up_session();
        let input = [
            line(170.0),
            line(70.0),
            "{not json".to_string(),
            r#"{"x": 0.5}"#.to_string(),
            line(170.0),
            line(70.0),
            line(170.0),
        ]
        .join("\n");

        let summary = replay(Cursor::new(input), &mut session).unwrap();

        assert_eq!(summary.unparseable, 2);
        assert_eq!(summary.frames, 5);
        assert_eq!(session.stats().frames, 5);
        assert_eq!(session.snapshot().rep_count, 2);
        assert_eq!(session.snapshot().stage, Stage::Up);
    }

    #[test]
    fn test_short_frame_line_is_skipped() {
        let mut session = push_up_session();
        let mut short = arms_frame(70.0);
        short.truncate(10);
        let input = format!("{}\n", serde_json::to_string(&short).unwrap());

        let summary = replay(Cursor::new(input), &mut session).unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(session.stats().skipped, 1);
        assert_eq!(session.snapshot().stage, Stage::Up);
    }

    #[test]
    fn test_catalogue_file_overrides_builtin() {
        let path = std::env::temp_dir().join(format!(
            "repsense-catalogue-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"name": "squat", "joints": ["left_knee", "right_knee"],
                 "down_threshold": 80.0, "up_threshold": 150.0}]"#,
        )
        .unwrap();

        let catalogue = load_catalogue(Some(&path));
        std::fs::remove_file(&path).unwrap();
        let catalogue = catalogue.unwrap();

        let squat = catalogue.get("squat").unwrap();
        assert_eq!(squat.down_threshold, 80.0);
        assert_eq!(squat.up_threshold, 150.0);
        assert_eq!(catalogue.get("pushup").unwrap(), &ExerciseConfig::push_up());
    }

    #[test]
    fn test_catalogue_errors() {
        assert_eq!(load_catalogue(None).unwrap().len(), 2);

        let missing = std::env::temp_dir().join("repsense-no-such-catalogue.json");
        assert!(matches!(
            load_catalogue(Some(&missing)),
            Err(ReplayError::Read { .. })
        ));

        let path = std::env::temp_dir().join(format!(
            "repsense-inverted-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"name": "squat", "joints": ["left_knee", "right_knee"],
                 "down_threshold": 160.0, "up_threshold": 110.0}]"#,
        )
        .unwrap();
        let result = load_catalogue(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(ReplayError::Catalogue {
                source: PoseError::InvalidThresholds { .. },
                ..
            })
        ));
    }
}
