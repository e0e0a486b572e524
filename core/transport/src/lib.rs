pub mod sample_rate;
pub mod timeline;

pub use sample_rate::SampleRate;
pub use timeline::FrameSpan;
