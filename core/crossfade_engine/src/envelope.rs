use log::debug;

use crate::streamer::{Frame, SizedStreamer, Streamer};

/// Where a stream's next frame falls relative to its fades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeRegion {
    FadeIn,
    Steady,
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeParams {
    /// Frames a fade ramp takes to complete (T). Zero disables ramping.
    pub fade_frames: u64,
    /// Gain between the fades. Values above 1.0 amplify.
    pub target_gain: f32,
}

impl FadeParams {
    pub const fn new(fade_frames: u64, target_gain: f32) -> Self {
        Self {
            fade_frames,
            target_gain,
        }
    }

    /// Gain change per frame along either ramp.
    pub fn slope(&self) -> f32 {
        if self.fade_frames == 0 {
            0.0
        } else {
            self.target_gain / self.fade_frames as f32
        }
    }
}

/// Per-stream progress counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamPosition {
    track_position: u64,
    fade_counter: u64,
}

impl StreamPosition {
    /// Frames consumed from the stream so far.
    pub const fn track_position(&self) -> u64 {
        self.track_position
    }

    /// Frames advanced inside the current fade segment.
    pub const fn fade_counter(&self) -> u64 {
        self.fade_counter
    }
}

/// Applies a linear fade-in / fade-out envelope to the frames of one stream.
///
/// With stream length `L` and fade length `T`, each frame is classified by the stream's
/// `track_position` before it is scaled:
/// - fade-out when `track_position >= L - T`: gain falls from the target towards 0
/// - fade-in when `track_position <= T` and the ramp has not passed the target: gain
///   rises from 0
/// - steady otherwise: gain is the target and the fade counter goes back to 0
///
/// Fade-out is checked first. For streams shorter than `2T` both conditions can hold for
/// the same frame and the fade-out ramp is the one applied.
#[derive(Debug)]
pub struct GainEnvelope<S> {
    /// index of the stream within its composition
    id: usize,
    inner: S,
    params: FadeParams,
    /// total frames the inner stream is expected to produce (L)
    len: u64,
    fade_out_start: u64,
    slope: f32,
    position: StreamPosition,
}

impl<S: SizedStreamer> GainEnvelope<S> {
    pub fn new(id: usize, inner: S, params: FadeParams) -> Self {
        let len = inner.len();
        Self::with_len(id, inner, len, params)
    }
}

impl<S: Streamer> GainEnvelope<S> {
    /// Wraps a streamer that cannot report its own length.
    pub fn with_len(id: usize, inner: S, len: u64, params: FadeParams) -> Self {
        Self {
            id,
            inner,
            params,
            len,
            fade_out_start: len.saturating_sub(params.fade_frames),
            slope: params.slope(),
            position: StreamPosition::default(),
        }
    }

    pub const fn id(&self) -> usize {
        self.id
    }

    pub const fn params(&self) -> FadeParams {
        self.params
    }

    pub const fn position(&self) -> StreamPosition {
        self.position
    }

    /// Region the next produced frame will be classified into.
    pub fn region(&self) -> FadeRegion {
        let StreamPosition {
            track_position,
            fade_counter,
        } = self.position;

        if self.params.fade_frames == 0 {
            FadeRegion::Steady
        } else if track_position >= self.fade_out_start {
            FadeRegion::FadeOut
        } else if track_position <= self.params.fade_frames
            && self.slope * fade_counter as f32 <= self.params.target_gain
        {
            FadeRegion::FadeIn
        } else {
            FadeRegion::Steady
        }
    }

    /// Gain for the current frame; advances the position by one frame.
    fn next_gain(&mut self) -> f32 {
        let fade_counter = self.position.fade_counter as f32;
        let target = self.params.target_gain;

        let gain = match self.region() {
            FadeRegion::FadeOut => {
                if self.position.track_position == self.fade_out_start {
                    debug!(
                        "stream {}: fading out over {} frames",
                        self.id, self.params.fade_frames
                    );
                }
                self.advance_fade();
                (target - self.slope * fade_counter).max(0.0)
            }
            FadeRegion::FadeIn => {
                self.advance_fade();
                self.slope * fade_counter
            }
            FadeRegion::Steady => {
                self.position.fade_counter = 0;
                target
            }
        };

        self.position.track_position += 1;
        gain
    }

    fn advance_fade(&mut self) {
        self.position.fade_counter = (self.position.fade_counter + 1).min(self.params.fade_frames);
    }
}

impl<S: Streamer> Streamer for GainEnvelope<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let (n, live) = self.inner.stream(buffer);

        if self.position.track_position == 0 && n > 0 {
            debug!(
                "stream {}: started, {} frames, {} fade frames, gain {}",
                self.id, self.len, self.params.fade_frames, self.params.target_gain
            );
        }

        for (l, r) in &mut buffer[..n] {
            let gain = self.next_gain();
            *l *= gain;
            *r *= gain;
        }

        (n, live)
    }
}

impl<S: Streamer> SizedStreamer for GainEnvelope<S> {
    fn len(&self) -> u64 {
        self.len
    }
}
