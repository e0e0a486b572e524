use std::{io::Read, path::Path};

use hound::WavReader;
use thiserror::Error;
use transport::SampleRate;

use crate::streamer::{Frame, SizedStreamer, Streamer};

#[derive(Error, Debug)]
pub enum WavError {
    #[error("failed to decode WAV data: {0}")]
    Decode(#[from] hound::Error),

    #[error("only mono or stereo WAVs are supported, got {0} channels")]
    UnsupportedChannels(u16),

    #[error("unsupported sample width: {0} bits")]
    UnsupportedBitDepth(u16),
}

/// `WavStreamer` is an in-memory, stereo-normalized PCM buffer decoded from a `.wav` file.
///
/// Supports:
/// - Mono and Stereo files (mono is duplicated into both channels)
/// - 8/16/24/32-bit integer or 32-bit float samples (converted to `f32`)
///
/// Does NOT support:
/// - More than 2 channels
/// - Resampling; callers crossfading several files must keep them at one rate
///
/// # Example
/// ```no_run
/// use crossfade_engine::streamer::WavStreamer;
///
/// let wav = WavStreamer::from_file("assets/wav/piano.wav").unwrap();
/// println!("{} frames at {}", wav.frames(), wav.sample_rate());
/// ```
#[derive(Debug)]
pub struct WavStreamer {
    /// file name
    name: String,
    sample_rate: SampleRate,
    /// Decoded stereo frames
    samples: Vec<Frame>,
    /// Current read position (frame index)
    position: usize,
}

impl WavStreamer {
    fn from_reader<R: Read>(reader: WavReader<R>, name: &str) -> Result<Self, WavError> {
        let spec = reader.spec();
        if spec.channels == 0 || spec.channels > 2 {
            return Err(WavError::UnsupportedChannels(spec.channels));
        }

        let samples = Self::decode_pcm_samples(reader)?;
        Ok(Self {
            name: name.to_owned(),
            sample_rate: SampleRate::new(spec.sample_rate),
            samples,
            position: 0,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WavError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let reader = WavReader::open(path)?;
        Self::from_reader(reader, &name)
    }

    pub fn from_stream<R: Read>(stream: R) -> Result<Self, WavError> {
        let reader = WavReader::new(stream)?;
        Self::from_reader(reader, "stream")
    }

    fn decode_pcm_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<Frame>, WavError> {
        let spec = reader.spec();
        let raw_samples = match spec.sample_format {
            hound::SampleFormat::Int => {
                let scale = match spec.bits_per_sample {
                    bits @ 8..=32 => (1u64 << (bits - 1)) as f32,
                    bits => return Err(WavError::UnsupportedBitDepth(bits)),
                };
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()?
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<Vec<f32>, _>>()?,
        };

        Ok(Self::interleave_channels(&raw_samples, spec.channels))
    }

    /// Converts raw f32 samples into stereo `(L, R)` frames.
    /// Mono is duplicated into both channels.
    fn interleave_channels(samples: &[f32], channels: u16) -> Vec<Frame> {
        if channels == 1 {
            samples.iter().map(|&s| (s, s)).collect()
        } else {
            samples
                .chunks_exact(2)
                .map(|chunk| (chunk[0], chunk[1]))
                .collect()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    #[cfg(test)]
    pub fn from_raw_samples(samples: Vec<Frame>, sample_rate: u32) -> Self {
        Self {
            name: "raw-samples.wav".to_owned(),
            sample_rate: SampleRate::new(sample_rate),
            samples,
            position: 0,
        }
    }
}

impl Streamer for WavStreamer {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if self.position >= self.samples.len() {
            return (0, false);
        }

        let end = (self.position + buffer.len()).min(self.samples.len());
        let n = end - self.position;
        buffer[..n].copy_from_slice(&self.samples[self.position..end]);
        self.position = end;
        (n, true)
    }
}

impl SizedStreamer for WavStreamer {
    fn len(&self) -> u64 {
        self.samples.len() as u64
    }
}
