use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Wav(#[from] crate::streamer::wav::WavError),

    #[error(transparent)]
    Device(#[from] crate::device_manager::AudioDeviceError),

    #[error("loading {}: {source}", path.display())]
    Load {
        path: PathBuf,
        source: crate::streamer::wav::WavError,
    },

    #[error("nothing to crossfade")]
    NoInput,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
