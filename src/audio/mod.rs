//! Microphone capture and loudness estimation.
//!
//! The capture callback assembles fixed-size frames, reduces each one to a
//! loudness sample, and writes it into the ripple history.

mod capture;
mod frames;
mod loudness;

// Re-export public types
pub use capture::{AudioCapture, LoudnessTap};
pub use frames::FrameAssembler;
pub use loudness::{mean_abs, normalize_byte_sample, normalize_byte_samples, rms, LoudnessPolicy};
