pub mod composer;
pub mod config;
pub mod constants;
pub mod device_manager;
pub mod envelope;
pub mod error;
pub mod mixer;
pub mod streamer;

pub use composer::{Crossfade, compose, compose_wav_files};
pub use config::FadeOptions;
pub use error::{Error, Result};
pub use streamer::{Frame, SizedStreamer, Streamer};
pub use transport::SampleRate;
