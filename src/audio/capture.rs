//! Live microphone capture feeding the ripple history.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SizedSample, StreamConfig};
use log::{error, info};

use super::frames::FrameAssembler;
use super::loudness::{normalize_byte_samples, LoudnessPolicy};
use crate::error::{Result, RippleError};
use crate::params::CaptureConfig;
use crate::ripple::RippleWriter;

/// Capture-side pipeline: frame assembly, loudness estimate, history write
///
/// Performs exactly one estimate and one write per completed frame.
pub struct LoudnessTap {
    assembler: FrameAssembler,
    policy: LoudnessPolicy,
    writer: RippleWriter,
}

impl LoudnessTap {
    /// # Errors
    /// `RippleError::InvalidConfig` for a zero block size or channel count.
    pub fn new(config: &CaptureConfig, channels: usize, writer: RippleWriter) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            assembler: FrameAssembler::new(config.block_size, channels, config.channel_mix)?,
            policy: config.policy,
            writer,
        })
    }

    /// Feed interleaved normalized samples from one capture callback
    pub fn push(&mut self, samples: &[f32]) {
        let policy = self.policy;
        let writer = &mut self.writer;
        self.assembler.push_interleaved(samples, |frame| {
            // Frames are never empty: the assembler rejects a zero block size
            match policy.estimate(frame) {
                Ok(level) => writer.write(level),
                Err(e) => error!("Loudness estimate failed: {}", e),
            }
        });
    }
}

/// Running microphone capture (stream stops when dropped)
pub struct AudioCapture {
    /// Audio input stream (kept alive)
    _stream: cpal::Stream,

    pub device_name: String,
    pub sample_rate_hz: u32,
    pub channels: u16,
}

impl AudioCapture {
    /// Open the default input device and start writing loudness into `writer`
    ///
    /// # Errors
    /// `RippleError::AudioUnavailable` if there is no input device or the stream
    /// cannot be built or started. Callers should keep rendering: the ripple
    /// history simply stays silent.
    pub fn start(config: &CaptureConfig, writer: RippleWriter) -> Result<Self> {
        config.validate()?;

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| RippleError::AudioUnavailable("no input device found".to_string()))?;

        let supported = device.default_input_config().map_err(|e| {
            RippleError::AudioUnavailable(format!("failed to get input config: {}", e))
        })?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let sample_format = supported.sample_format();
        let stream_config: StreamConfig = supported.into();
        let channels = stream_config.channels;
        let sample_rate_hz = stream_config.sample_rate.0;

        info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device_name, sample_rate_hz, channels, sample_format
        );

        let tap = LoudnessTap::new(config, channels as usize, writer)?;
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, tap),
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, tap),
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, tap),
            SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, tap),
            SampleFormat::U8 => build_byte_stream(&device, &stream_config, tap),
            other => Err(RippleError::AudioUnavailable(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }?;

        stream.play().map_err(|e| {
            RippleError::AudioUnavailable(format!("failed to start input stream: {}", e))
        })?;

        Ok(Self {
            _stream: stream,
            device_name,
            sample_rate_hz,
            channels,
        })
    }
}

/// Build an input stream for a format cpal can convert to normalized f32
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut tap: LoudnessTap,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: cpal::FromSample<T>,
{
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                scratch.clear();
                scratch.extend(data.iter().map(|&s| -> f32 { cpal::Sample::from_sample(s) }));
                tap.push(&scratch);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| RippleError::AudioUnavailable(format!("failed to build input stream: {}", e)))
}

/// Build an input stream for unsigned byte samples (128 = silence)
fn build_byte_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    mut tap: LoudnessTap,
) -> Result<cpal::Stream> {
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_input_stream(
            config,
            move |data: &[u8], _: &cpal::InputCallbackInfo| {
                normalize_byte_samples(data, &mut scratch);
                tap.push(&scratch);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| RippleError::AudioUnavailable(format!("failed to build input stream: {}", e)))
}
