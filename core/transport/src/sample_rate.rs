use std::{fmt, time::Duration};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Number of frames per second shared by every stream on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleRate(u32);

impl SampleRate {
    pub const fn new(hz: u32) -> Self {
        Self(hz)
    }

    pub const fn hz(self) -> u32 {
        self.0
    }

    /// Number of whole frames that fit in `duration`. Partial frames are dropped.
    pub fn frames(self, duration: Duration) -> u64 {
        (duration.as_nanos() * u128::from(self.0) / NANOS_PER_SEC) as u64
    }

    /// Wall-clock length of `frames` frames.
    pub fn duration(self, frames: u64) -> Duration {
        if self.0 == 0 {
            return Duration::ZERO;
        }
        let nanos = u128::from(frames) * NANOS_PER_SEC / u128::from(self.0);
        Duration::from_nanos(nanos as u64)
    }
}

impl From<u32> for SampleRate {
    fn from(hz: u32) -> Self {
        Self(hz)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

#[cfg(test)]
mod sample_rate_tests {
    use super::*;

    #[test]
    fn test_default_fade_in_frames_at_cd_rate() {
        let rate = SampleRate::new(44100);
        assert_eq!(rate.frames(Duration::from_secs(9)), 396_900);
    }

    #[test]
    fn test_partial_frames_are_truncated() {
        let rate = SampleRate::new(1000);
        // 1.5 ms -> 1 whole frame
        assert_eq!(rate.frames(Duration::from_micros(1500)), 1);
        assert_eq!(rate.frames(Duration::ZERO), 0);
    }

    #[test]
    fn test_frames_to_duration() {
        let rate = SampleRate::new(48000);
        assert_eq!(rate.duration(48000), Duration::from_secs(1));
        assert_eq!(rate.duration(24000), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_rate_has_no_frames_and_no_duration() {
        let rate = SampleRate::new(0);
        assert_eq!(rate.frames(Duration::from_secs(3)), 0);
        assert_eq!(rate.duration(100), Duration::ZERO);
    }
}
