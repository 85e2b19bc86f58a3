//! Audio capture configuration and constants.

use crate::audio::LoudnessPolicy;
use crate::error::{Result, RippleError};

/// How interleaved multi-channel input is reduced to one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMix {
    /// Arithmetic mean of all channels in a sample frame
    #[default]
    Average,

    /// Keep only the first channel
    First,
}

/// Microphone capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Samples per audio frame handed to the loudness estimator
    /// Reference deployment: 1024 (analyser time-domain window)
    pub block_size: usize,

    /// Reduction of one frame to one loudness sample
    pub policy: LoudnessPolicy,

    /// Multi-channel downmix strategy
    pub channel_mix: ChannelMix,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            block_size: audio_constants::BLOCK_SIZE,
            policy: LoudnessPolicy::MeanAbs,
            channel_mix: ChannelMix::Average,
        }
    }
}

impl CaptureConfig {
    /// Validate configuration (block size must be non-zero)
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(RippleError::InvalidConfig(
                "capture block size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audio constants
pub mod audio_constants {
    /// Capture block size (samples per loudness estimate)
    /// 1024 samples = 23ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 1024;

    /// Midpoint of the unsigned byte sample domain (silence)
    pub const BYTE_MIDPOINT: f32 = 128.0;
}
