use thiserror::Error;

use crate::streamer::{Frame, Streamer};

pub mod cpal_dm;

#[derive(Error, Clone, Debug)]
pub enum AudioDeviceError {
    #[error("no default output device")]
    DeviceNotFound,
    #[error("failed to build output stream: {0}")]
    StreamBuildFailed(String),
    #[error("failed to start output stream: {0}")]
    StreamStartFailed(String),
}

/// Output buffer handed over by the device, in its native sample format.
#[derive(Debug)]
pub enum AudioSourceBufferKind<'a> {
    F32(&'a mut [f32]),
    I16(&'a mut [i16]),
    U16(&'a mut [u16]),
}

impl<'a> From<&'a mut [f32]> for AudioSourceBufferKind<'a> {
    fn from(data: &'a mut [f32]) -> Self {
        Self::F32(data)
    }
}

impl<'a> From<&'a mut [i16]> for AudioSourceBufferKind<'a> {
    fn from(data: &'a mut [i16]) -> Self {
        Self::I16(data)
    }
}

impl<'a> From<&'a mut [u16]> for AudioSourceBufferKind<'a> {
    fn from(data: &'a mut [u16]) -> Self {
        Self::U16(data)
    }
}

/// Something a device callback can pull interleaved samples from.
pub trait AudioSource: Send {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>, channels: usize);
}

pub trait AudioDeviceManager {
    fn start_output_stream(
        &mut self,
        audio_source: Box<dyn AudioSource>,
    ) -> Result<(), AudioDeviceError>;
}

/// Feeds a [`Streamer`] to an output device, padding with silence when it runs short.
#[derive(Debug)]
pub struct StreamerSource<S> {
    streamer: S,
    frames: Vec<Frame>,
    finished: bool,
}

impl<S: Streamer> StreamerSource<S> {
    pub const fn new(streamer: S) -> Self {
        Self {
            streamer,
            frames: Vec::new(),
            finished: false,
        }
    }

    /// True once the streamer has reported it is exhausted.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pulls `frame_count` frames, zero-filling whatever the streamer could not produce.
    fn pull(&mut self, frame_count: usize) -> &[Frame] {
        self.frames.clear();
        self.frames.resize(frame_count, (0.0, 0.0));

        let mut filled = 0;
        while filled < frame_count && !self.finished {
            let (n, live) = self.streamer.stream(&mut self.frames[filled..]);
            filled += n;
            if !live {
                log::debug!("output: source exhausted");
                self.finished = true;
            } else if n == 0 {
                break;
            }
        }

        &self.frames
    }

    fn write_interleaved<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: cpal::FromSample<f32>,
    {
        use cpal::Sample as _;

        if channels == 0 {
            return;
        }
        let frames = self.pull(data.len() / channels);

        for (out, &(l, r)) in data.chunks_exact_mut(channels).zip(frames) {
            if let [mono] = out {
                *mono = ((l + r) * 0.5).to_sample::<T>();
                continue;
            }
            for (channel, sample) in out.iter_mut().enumerate() {
                let raw = match channel {
                    0 => l,
                    1 => r,
                    _ => 0.0,
                };
                *sample = raw.to_sample::<T>();
            }
        }
    }
}

impl<S: Streamer> AudioSource for StreamerSource<S> {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>, channels: usize) {
        match buffer {
            AudioSourceBufferKind::F32(data) => self.write_interleaved(data, channels),
            AudioSourceBufferKind::I16(data) => self.write_interleaved(data, channels),
            AudioSourceBufferKind::U16(data) => self.write_interleaved(data, channels),
        }
    }
}
