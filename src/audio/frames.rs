//! Fixed-size audio frame assembly.
//!
//! Capture callbacks deliver interleaved buffers of whatever size the driver
//! picks. The assembler downmixes them to mono and hands out exact
//! `block_size` frames, carrying leftovers into the next callback.

use crate::error::{Result, RippleError};
use crate::params::ChannelMix;

/// Accumulates interleaved capture buffers into fixed-size mono frames
pub struct FrameAssembler {
    block_size: usize,
    channels: usize,
    mix: ChannelMix,
    pending: Vec<f32>,
}

impl FrameAssembler {
    /// Create an assembler for `channels`-wide interleaved input
    ///
    /// # Errors
    /// `RippleError::InvalidConfig` if `block_size` or `channels` is 0.
    pub fn new(block_size: usize, channels: usize, mix: ChannelMix) -> Result<Self> {
        if block_size == 0 {
            return Err(RippleError::InvalidConfig(
                "capture block size must be > 0".to_string(),
            ));
        }
        if channels == 0 {
            return Err(RippleError::InvalidConfig(
                "capture channel count must be > 0".to_string(),
            ));
        }
        Ok(Self {
            block_size,
            channels,
            mix,
            pending: Vec::with_capacity(block_size),
        })
    }

    /// Samples buffered towards the next frame
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Feed one interleaved buffer, calling `on_frame` once per completed frame
    ///
    /// A trailing partial sample frame (fewer than `channels` values) is dropped.
    pub fn push_interleaved<F>(&mut self, samples: &[f32], mut on_frame: F)
    where
        F: FnMut(&[f32]),
    {
        for sample_frame in samples.chunks_exact(self.channels) {
            let mono = match self.mix {
                ChannelMix::First => sample_frame[0],
                ChannelMix::Average => sample_frame.iter().sum::<f32>() / self.channels as f32,
            };
            self.pending.push(mono);

            if self.pending.len() == self.block_size {
                on_frame(&self.pending);
                self.pending.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_span_callbacks() {
        let mut assembler = FrameAssembler::new(4, 1, ChannelMix::Average).unwrap();
        let mut frames: Vec<Vec<f32>> = Vec::new();

        assembler.push_interleaved(&[1.0, 2.0, 3.0], |f| frames.push(f.to_vec()));
        assert!(frames.is_empty());
        assert_eq!(assembler.pending(), 3);

        assembler.push_interleaved(&[4.0, 5.0, 6.0, 7.0, 8.0, 9.0], |f| {
            frames.push(f.to_vec())
        });
        assert_eq!(
            frames,
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]
        );
        assert_eq!(assembler.pending(), 1);
    }

    #[test]
    fn test_stereo_average_downmix() {
        let mut assembler = FrameAssembler::new(2, 2, ChannelMix::Average).unwrap();
        let mut frames = Vec::new();

        assembler.push_interleaved(&[1.0, -1.0, 0.5, 0.25], |f| frames.push(f.to_vec()));
        assert_eq!(frames, vec![vec![0.0, 0.375]]);
    }

    #[test]
    fn test_stereo_first_channel() {
        let mut assembler = FrameAssembler::new(2, 2, ChannelMix::First).unwrap();
        let mut frames = Vec::new();

        assembler.push_interleaved(&[1.0, -1.0, 0.5, 0.25], |f| frames.push(f.to_vec()));
        assert_eq!(frames, vec![vec![1.0, 0.5]]);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(matches!(
            FrameAssembler::new(0, 1, ChannelMix::Average),
            Err(RippleError::InvalidConfig(_))
        ));
        assert!(matches!(
            FrameAssembler::new(4, 0, ChannelMix::Average),
            Err(RippleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_sample_frame_dropped() {
        let mut assembler = FrameAssembler::new(8, 2, ChannelMix::Average).unwrap();
        assembler.push_interleaved(&[1.0, 1.0, 1.0], |_| {});
        assert_eq!(assembler.pending(), 1);
    }
}
