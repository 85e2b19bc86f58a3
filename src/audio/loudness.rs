//! Loudness estimation: one scalar per audio frame.

use crate::error::{Result, RippleError};
use crate::params::audio_constants::BYTE_MIDPOINT;

/// Reduction of an audio frame to a single non-negative loudness value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoudnessPolicy {
    /// Mean of absolute sample values
    #[default]
    MeanAbs,

    /// Root of the mean of squared sample values
    Rms,
}

impl LoudnessPolicy {
    /// Estimate the loudness of `frame`
    ///
    /// # Errors
    /// `RippleError::EmptyFrame` if `frame` has no samples.
    pub fn estimate(self, frame: &[f32]) -> Result<f32> {
        match self {
            Self::MeanAbs => mean_abs(frame),
            Self::Rms => rms(frame),
        }
    }
}

/// Arithmetic mean of absolute sample values
pub fn mean_abs(frame: &[f32]) -> Result<f32> {
    if frame.is_empty() {
        return Err(RippleError::EmptyFrame);
    }
    let sum: f32 = frame.iter().map(|s| s.abs()).sum();
    Ok(sum / frame.len() as f32)
}

/// Root-mean-square of the frame
pub fn rms(frame: &[f32]) -> Result<f32> {
    if frame.is_empty() {
        return Err(RippleError::EmptyFrame);
    }
    let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
    Ok((sum_sq / frame.len() as f32).sqrt())
}

/// Map one unsigned byte sample (128 = silence) to [-1, 1)
#[inline]
pub fn normalize_byte_sample(value: u8) -> f32 {
    (value as f32 - BYTE_MIDPOINT) / BYTE_MIDPOINT
}

/// Normalize byte-domain samples into `out`, replacing its contents
pub fn normalize_byte_samples(bytes: &[u8], out: &mut Vec<f32>) {
    out.clear();
    out.extend(bytes.iter().copied().map(normalize_byte_sample));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rms_of_three_four() {
        let value = LoudnessPolicy::Rms.estimate(&[3.0, 4.0]).unwrap();
        assert!((value - 12.5_f32.sqrt()).abs() < 1e-6);
        assert!((value - 3.5355).abs() < 1e-4);
    }

    #[test]
    fn test_mean_abs_ignores_sign() {
        let value = LoudnessPolicy::MeanAbs.estimate(&[-0.5, 0.5, -1.0, 0.0]).unwrap();
        assert!((value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silence_is_zero() {
        let silence = [0.0_f32; 1024];
        assert_eq!(LoudnessPolicy::MeanAbs.estimate(&silence).unwrap(), 0.0);
        assert_eq!(LoudnessPolicy::Rms.estimate(&silence).unwrap(), 0.0);
    }

    #[test]
    fn test_single_sample_frame() {
        assert_eq!(LoudnessPolicy::MeanAbs.estimate(&[-0.25]).unwrap(), 0.25);
        assert_eq!(LoudnessPolicy::Rms.estimate(&[-0.25]).unwrap(), 0.25);
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        assert!(matches!(
            LoudnessPolicy::MeanAbs.estimate(&[]),
            Err(RippleError::EmptyFrame)
        ));
        assert!(matches!(
            LoudnessPolicy::Rms.estimate(&[]),
            Err(RippleError::EmptyFrame)
        ));
    }

    #[test]
    fn test_byte_normalization() {
        assert_eq!(normalize_byte_sample(128), 0.0);
        assert_eq!(normalize_byte_sample(0), -1.0);
        assert_eq!(normalize_byte_sample(192), 0.5);

        let mut out = vec![9.0; 3];
        normalize_byte_samples(&[128, 64], &mut out);
        assert_eq!(out, vec![0.0, -0.5]);
    }

    #[test]
    fn test_normalized_byte_silence_estimates_zero() {
        let mut frame = Vec::new();
        normalize_byte_samples(&[128; 64], &mut frame);
        assert_eq!(LoudnessPolicy::Rms.estimate(&frame).unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_estimate_non_negative_and_deterministic(
            frame in prop::collection::vec(-1.0f32..=1.0, 1..2048),
        ) {
            for policy in [LoudnessPolicy::MeanAbs, LoudnessPolicy::Rms] {
                let first = policy.estimate(&frame).unwrap();
                let second = policy.estimate(&frame).unwrap();
                prop_assert!(first >= 0.0);
                prop_assert_eq!(first.to_bits(), second.to_bits());
            }
        }

        #[test]
        fn prop_rms_bounds_mean_abs(frame in prop::collection::vec(-1.0f32..=1.0, 1..512)) {
            let mean = mean_abs(&frame).unwrap();
            let root = rms(&frame).unwrap();
            prop_assert!(root + 1e-5 >= mean);
        }
    }
}
