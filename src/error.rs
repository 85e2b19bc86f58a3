//! Error taxonomy for the ripple pipeline.
//!
//! Precondition violations fail fast at the call site. Missing audio capture is
//! reported once at startup and the pipeline keeps running on a silent buffer.

use thiserror::Error;

/// Errors produced by the ripple pipeline
#[derive(Debug, Error)]
pub enum RippleError {
    /// Loudness estimation was asked to reduce a frame with no samples
    #[error("cannot estimate loudness of an empty audio frame")]
    EmptyFrame,

    /// Ripple history buffers need at least one slot
    #[error("ripple buffer capacity must be > 0, got {0}")]
    InvalidCapacity(usize),

    /// Per-point attribute array does not line up with the point field
    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A configuration struct failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed line in an imported vertex list
    #[error("vertex list line {line}: {message}")]
    Import { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable input device, or the capture stream could not be started
    #[error("audio capture unavailable: {0}")]
    AudioUnavailable(String),

    /// GPU surface, adapter or device setup failed
    #[error("render setup failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, RippleError>;
