//! Ripplefield library - audio-reactive particle field
//!
//! Microphone loudness goes into a circular history; every point of the field
//! reads that history at a depth set by its distance from the center, so sound
//! spreads outward as a ripple.

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod field;
pub mod params;
pub mod rendering;
pub mod ripple;
pub mod visualizer;

pub use error::{Result, RippleError};
