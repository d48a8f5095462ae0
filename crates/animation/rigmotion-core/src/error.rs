//! Error types for motion construction and playback.

use serde::{Deserialize, Serialize};

/// Errors raised while building motions or driving playback.
///
/// Construction errors (malformed curves, bad tags, bad metadata) are fatal for
/// the asset being built. Audio errors returned from an update are recoverable:
/// the tick still evaluated every curve.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// Curve data that cannot describe a contiguous segment chain
    #[error("Malformed curve '{curve}': {reason}")]
    MalformedCurve { curve: String, reason: String },

    /// Segment tag outside the four known interpolation kinds
    #[error("Unknown segment tag {tag} in curve '{curve}'")]
    UnknownSegmentTag { curve: String, tag: f64 },

    /// Curve target string that is not Model, PartOpacity or Parameter
    #[error("Unknown curve target: {target}")]
    UnknownTarget { target: String },

    /// Motion-level metadata out of range
    #[error("Invalid motion: {reason}")]
    InvalidMotion { reason: String },

    /// Motion JSON could not be decoded
    #[error("Motion parse error: {reason}")]
    Parse { reason: String },

    /// Audio cue file extension is not a supported format
    #[error("Unsupported audio format: {path}")]
    UnsupportedAudioFormat { path: String },

    /// Audio cue failed to load, play or stop
    #[error("Audio cue '{cue}' failed: {reason}")]
    Audio { cue: String, reason: String },

    /// No motions registered under the requested group
    #[error("Motion group not found: {group}")]
    GroupNotFound { group: String },

    /// Motion index past the end of its group
    #[error("Motion index {index} out of range for group '{group}' ({len} motions)")]
    MotionIndexOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    /// Configuration value out of range
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        MotionError::Parse {
            reason: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, MotionError>;
