//! Parameter definitions with documented units and defaults.
//!
//! Every tunable of the pipeline lives here:
//! - Audio capture block size and loudness policy
//! - Field layout and ripple mapping gains
//! - Camera follow and rendering settings

mod audio;
mod camera;
mod field;
mod render;

// Re-export all types
pub use audio::{audio_constants, CaptureConfig, ChannelMix};
pub use camera::CameraFollow;
pub use field::{FieldLayout, MappingTargets, RadialOrigin, RippleMapping};
pub use render::RenderConfig;
