use thiserror::Error;

use crate::phase::Phase;

/// Construction-time validation failures for a scenario.
///
/// Once an engine is built nothing in the per-tick path can fail; every
/// runtime value is clamped instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoryError {
    #[error("loop duration must be at least one second")]
    ZeroLoopDuration,
    #[error("phase thresholds must be strictly increasing ({previous} then {next})")]
    UnorderedThresholds { previous: u32, next: u32 },
    #[error("phase {next:?} follows {previous:?} and would regress the narrative")]
    RegressingPhase { previous: Phase, next: Phase },
    #[error("incident window opens at {window_start}s, before the incident phase ({phase_start}s)")]
    IncidentBeforePhase { window_start: u32, phase_start: u32 },
    #[error("metric `{key}` has no target rules")]
    EmptyRules { key: &'static str },
    #[error("metric `{key}` declares min {min} above max {max}")]
    InvertedRange { key: &'static str, min: f64, max: f64 },
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
    #[error("invalid route: {0}")]
    Route(#[from] PathError),
}

/// Errors raised while parsing SVG path data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,
    #[error("path must start with a moveto command, found `{0}`")]
    MissingMoveTo(char),
    #[error("unsupported path command `{0}`")]
    UnsupportedCommand(char),
    #[error("expected a number at byte {0}")]
    ExpectedNumber(usize),
    #[error("unexpected number at byte {0}")]
    UnexpectedNumber(usize),
    #[error("path has zero length")]
    ZeroLength,
}

/// Rejected operator submissions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LogError {
    #[error("message is empty")]
    EmptyMessage,
}
