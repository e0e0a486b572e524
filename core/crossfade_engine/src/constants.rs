pub const AUDIO_SAMPLE_EPSILON: f32 = 1e-6;

/// Silence the composite mix starts from, so an empty composition still yields a short run.
pub const SEED_SILENCE_FRAMES: u64 = 1000;

pub const DEFAULT_FADE_SECS: u64 = 9;
pub const DEFAULT_TARGET_GAIN: f32 = 1.0;
