use super::AudioDeviceManager;
use crate::device_manager::{AudioDeviceError, AudioSource, AudioSourceBufferKind};
use cpal::{
    OutputCallbackInfo,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use transport::SampleRate;

/// Plays an [`AudioSource`] on the default cpal output device.
pub struct CpalAudioDeviceManager {
    stream: Option<cpal::Stream>,
}

impl CpalAudioDeviceManager {
    pub const fn new() -> Self {
        Self { stream: None }
    }

    /// Sample rate the default output device runs at.
    pub fn default_sample_rate() -> Result<SampleRate, AudioDeviceError> {
        let (_, config) = Self::default_output()?;
        Ok(SampleRate::new(config.sample_rate().0))
    }

    fn default_output() -> Result<(cpal::Device, cpal::SupportedStreamConfig), AudioDeviceError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioDeviceError::DeviceNotFound)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))?;
        Ok((device, config))
    }

    /// Builds a stream whose callback hands the device buffer, typed as `T`, to `source`.
    fn open_stream<T>(
        device: &cpal::Device,
        config: &cpal::SupportedStreamConfig,
        mut source: Box<dyn AudioSource>,
    ) -> Result<cpal::Stream, AudioDeviceError>
    where
        T: cpal::SizedSample,
        for<'a> AudioSourceBufferKind<'a>: From<&'a mut [T]>,
    {
        let channels = usize::from(config.channels());
        let data_cb = move |data: &mut [T], _: &OutputCallbackInfo| {
            source.fill_buffer(data.into(), channels);
        };
        let error_cb = |err| log::warn!("output stream error: {err}");

        device
            .build_output_stream(&config.config(), data_cb, error_cb, None)
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))
    }
}

impl Default for CpalAudioDeviceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpalAudioDeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalAudioDeviceManager")
            .field("playing", &self.stream.is_some())
            .finish()
    }
}

impl AudioDeviceManager for CpalAudioDeviceManager {
    fn start_output_stream(
        &mut self,
        audio_source: Box<dyn AudioSource>,
    ) -> Result<(), AudioDeviceError> {
        let (device, config) = Self::default_output()?;
        let format = config.sample_format();
        log::info!(
            "output: {} channels at {} Hz, {format:?}",
            config.channels(),
            config.sample_rate().0,
        );

        let stream = match format {
            cpal::SampleFormat::F32 => Self::open_stream::<f32>(&device, &config, audio_source),
            cpal::SampleFormat::I16 => Self::open_stream::<i16>(&device, &config, audio_source),
            cpal::SampleFormat::U16 => Self::open_stream::<u16>(&device, &config, audio_source),
            other => Err(AudioDeviceError::StreamBuildFailed(format!(
                "unsupported sample format '{other}'"
            ))),
        }?;

        stream
            .play()
            .map_err(|e| AudioDeviceError::StreamStartFailed(e.to_string()))?;

        self.stream = Some(stream);
        Ok(())
    }
}
