//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::warn;

use crate::audio::LoudnessPolicy;
use crate::params::{
    CameraFollow, CaptureConfig, ChannelMix, FieldLayout, MappingTargets, RadialOrigin,
    RippleMapping,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ripplefield")]
#[command(about = "Audio-reactive particle field driven by the microphone", long_about = None)]
pub struct Args {
    /// Ripple history capacity (slots)
    #[arg(long, value_name = "SLOTS", default_value_t = 200)]
    pub capacity: usize,

    /// Grid points along X
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Grid points along Z
    #[arg(long, default_value_t = 50)]
    pub depth: usize,

    /// Distance between grid points (world units)
    #[arg(long, default_value_t = 100.0)]
    pub spacing: f32,

    /// Scale of every point before the first frame
    #[arg(long, default_value_t = 1.0)]
    pub initial_scale: f32,

    /// Vertex list (`x,y,z` per line) placed ahead of the grid
    #[arg(long, value_name = "PATH")]
    pub vertices: Option<PathBuf>,

    /// Loudness policy: mean-abs (default), rms
    #[arg(long, default_value = "mean-abs")]
    pub policy: String,

    /// Samples per loudness estimate
    #[arg(long, value_name = "SAMPLES", default_value_t = 1024)]
    pub block_size: usize,

    /// Multi-channel downmix: average (default), first
    #[arg(long, default_value = "average")]
    pub channel_mix: String,

    /// Radial origin: grid-center (default), rest-position
    #[arg(long, default_value = "grid-center")]
    pub origin: String,

    /// Attributes driven by the ripple: both (default), displacement, scale
    #[arg(long, default_value = "both")]
    pub targets: String,

    /// History slots per unit of radial distance
    #[arg(long, default_value_t = 3)]
    pub offset_scale: i64,

    /// World units per unit of radial distance (rest-position origin)
    #[arg(long, default_value_t = 1.0)]
    pub distance_unit: f32,

    /// Displacement per unit loudness
    #[arg(long, default_value_t = 100.0)]
    pub displacement_gain: f32,

    /// Sprite scale per unit loudness
    #[arg(long, default_value_t = 300.0)]
    pub scale_gain: f32,

    /// Camera follow smoothing (fraction of remaining distance per frame)
    #[arg(long, default_value_t = 0.05)]
    pub smoothing: f32,
}

impl Args {
    /// Capture configuration from command-line arguments
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            block_size: self.block_size,
            policy: parse_policy(&self.policy),
            channel_mix: parse_channel_mix(&self.channel_mix),
        }
    }

    /// Field layout from command-line arguments
    pub fn field_layout(&self) -> FieldLayout {
        FieldLayout {
            width: self.width,
            depth: self.depth,
            spacing: self.spacing,
            initial_scale: self.initial_scale,
            vertex_file: self.vertices.clone(),
        }
    }

    /// Ripple mapping from command-line arguments
    pub fn ripple_mapping(&self) -> RippleMapping {
        RippleMapping {
            capacity: self.capacity,
            offset_scale: self.offset_scale,
            distance_unit: self.distance_unit,
            origin: parse_origin(&self.origin),
            targets: parse_targets(&self.targets),
            displacement_gain: self.displacement_gain,
            scale_gain: self.scale_gain,
        }
    }

    /// Camera follow starting half a grid depth back from the origin
    pub fn camera_follow(&self) -> CameraFollow {
        CameraFollow {
            smoothing: self.smoothing,
            start_distance: (self.depth as f32 * self.spacing) / 2.0,
            ..Default::default()
        }
    }
}

fn parse_policy(value: &str) -> LoudnessPolicy {
    match value.to_lowercase().as_str() {
        "mean-abs" | "mean" => LoudnessPolicy::MeanAbs,
        "rms" => LoudnessPolicy::Rms,
        other => {
            warn!("Unknown loudness policy '{}', using mean-abs", other);
            LoudnessPolicy::MeanAbs
        }
    }
}

fn parse_channel_mix(value: &str) -> ChannelMix {
    match value.to_lowercase().as_str() {
        "average" => ChannelMix::Average,
        "first" => ChannelMix::First,
        other => {
            warn!("Unknown channel mix '{}', using average", other);
            ChannelMix::Average
        }
    }
}

fn parse_origin(value: &str) -> RadialOrigin {
    match value.to_lowercase().as_str() {
        "grid-center" => RadialOrigin::GridCenter,
        "rest-position" => RadialOrigin::RestPosition,
        other => {
            warn!("Unknown radial origin '{}', using grid-center", other);
            RadialOrigin::GridCenter
        }
    }
}

fn parse_targets(value: &str) -> MappingTargets {
    match value.to_lowercase().as_str() {
        "both" => MappingTargets::Both,
        "displacement" => MappingTargets::Displacement,
        "scale" => MappingTargets::Scale,
        other => {
            warn!("Unknown mapping targets '{}', using both", other);
            MappingTargets::Both
        }
    }
}
