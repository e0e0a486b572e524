use std::path::Path;

use log::{debug, warn};
use transport::{FrameSpan, SampleRate};

use crate::{
    config::FadeOptions,
    constants::SEED_SILENCE_FRAMES,
    envelope::{FadeParams, GainEnvelope},
    error::{Error, Result},
    mixer::Mixer,
    streamer::{Delayed, Frame, Silence, SizedStreamer, Streamer, WavStreamer},
};

/// A set of streams laid out so that each one fades into the next.
///
/// Pulling from a `Crossfade` pulls from every stream that is currently on the timeline;
/// the only state it carries is what the per-stream envelopes own.
#[derive(Debug)]
pub struct Crossfade<'a> {
    mixer: Mixer<'a>,
    /// where each input stream sits on the output timeline, in input order
    spans: Vec<FrameSpan>,
    sample_rate: SampleRate,
    fade_frames: u64,
    len: u64,
}

impl Crossfade<'_> {
    pub fn spans(&self) -> &[FrameSpan] {
        &self.spans
    }

    /// Rate the fade duration was converted at.
    pub const fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Length of each fade ramp in frames.
    pub const fn fade_frames(&self) -> u64 {
        self.fade_frames
    }
}

impl Streamer for Crossfade<'_> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        self.mixer.stream(buffer)
    }
}

impl SizedStreamer for Crossfade<'_> {
    fn len(&self) -> u64 {
        self.len
    }
}

/// Start frame of every stream given their lengths, in order.
///
/// Each stream starts `fade_frames` before the sum of the lengths preceding it, floored
/// at 0. The first stream starts at frame 0. Positions advance by the input lengths, not
/// by where the previous stream was placed, so the second stream's fade-in runs under the
/// first one's fade-out while every later stream starts where its predecessor ends.
pub fn layout(lengths: impl IntoIterator<Item = u64>, fade_frames: u64) -> Vec<FrameSpan> {
    let mut position = 0u64;
    let mut last_fade = 0u64;

    lengths
        .into_iter()
        .map(|len| {
            let span = FrameSpan::new(position.saturating_sub(last_fade), len);
            position += len;
            last_fade = fade_frames;
            span
        })
        .collect()
}

/// Crossfades `streams` one into the next.
///
/// Every stream gets its own fade envelope of `options.fade_duration` (converted to frames
/// at `sample_rate`) and `options.target_gain`, and is delayed to the start frame
/// [`layout`] gives it. All streams must share `sample_rate` and channel layout; that is
/// not checked here.
///
/// With no streams the result is a short run of silence.
pub fn compose<'a, I, S>(
    sample_rate: SampleRate,
    options: &FadeOptions,
    streams: I,
) -> Crossfade<'a>
where
    I: IntoIterator<Item = S>,
    S: SizedStreamer + 'a,
{
    let fade_frames = sample_rate.frames(options.fade_duration);
    let params = FadeParams::new(fade_frames, options.target_gain);

    let streams: Vec<S> = streams.into_iter().collect();
    let spans = layout(streams.iter().map(SizedStreamer::len), fade_frames);

    let mut mixer = Mixer::new();
    mixer.add(Silence::new(SEED_SILENCE_FRAMES));

    for (id, (stream, span)) in streams.into_iter().zip(&spans).enumerate() {
        debug!(
            "crossfade: stream {id} ({} frames) starts at frame {}",
            span.len, span.start
        );
        let envelope = GainEnvelope::new(id, stream, params);
        mixer.add(Delayed::new(span.start, envelope));
    }

    let len = spans
        .iter()
        .map(FrameSpan::end)
        .fold(SEED_SILENCE_FRAMES, u64::max);

    debug!(
        "crossfade: {} streams at {sample_rate}, {fade_frames} fade frames, {len} frames total",
        spans.len()
    );

    Crossfade {
        mixer,
        spans,
        sample_rate,
        fade_frames,
        len,
    }
}

/// Decodes every file in `paths` and crossfades them in order.
///
/// The fade duration is measured at the first file's sample rate. Files at another rate
/// are logged and then played as if they matched.
pub fn compose_wav_files<P: AsRef<Path>>(
    paths: &[P],
    options: &FadeOptions,
) -> Result<Crossfade<'static>> {
    let tracks = paths
        .iter()
        .map(|path| {
            WavStreamer::from_file(path).map_err(|source| Error::Load {
                path: path.as_ref().to_path_buf(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let sample_rate = tracks
        .first()
        .map(WavStreamer::sample_rate)
        .ok_or(Error::NoInput)?;

    for track in &tracks {
        debug!("{}: {} frames at {}", track.name(), track.len(), track.sample_rate());
        if track.sample_rate() != sample_rate {
            warn!(
                "{} is at {}, not {sample_rate}; it will play at the wrong speed",
                track.name(),
                track.sample_rate()
            );
        }
    }

    Ok(compose(sample_rate, options, tracks))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        constants::AUDIO_SAMPLE_EPSILON,
        streamer::{Constant, WavStreamer, drain},
    };

    /// One frame per "second" keeps fade durations and frame counts interchangeable.
    const RATE: SampleRate = SampleRate::new(1);

    fn options(fade_frames: u64, gain: f32) -> FadeOptions {
        FadeOptions::new(Duration::from_secs(fade_frames), gain)
    }

    fn ones(len: u64) -> Constant {
        Constant::new((1.0, 1.0), len)
    }

    #[test]
    fn test_second_stream_starts_one_fade_before_first_ends() {
        let spans = layout([1000, 800], 100);
        assert_eq!(spans, [FrameSpan::new(0, 1000), FrameSpan::new(900, 800)]);
        assert_eq!(spans[0].overlap(&spans[1]), 100);
        assert_eq!(spans[1].end(), 1700);
    }

    #[test]
    fn test_layout_never_starts_before_zero() {
        let spans = layout([30, 50, 40], 100);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].start, 0); // 30 - 100 floored
        assert_eq!(spans[2].start, 0); // 80 - 100 floored
    }

    #[test]
    fn test_layout_of_many_streams_accumulates_lengths() {
        let spans = layout([100, 100, 100, 100], 10);
        let starts: Vec<u64> = spans.iter().map(|s| s.start).collect();
        assert_eq!(starts, [0, 90, 190, 290]);

        // starts follow the summed input lengths, so only the first pair overlaps
        let overlaps: Vec<u64> = spans.windows(2).map(|p| p[0].overlap(&p[1])).collect();
        assert_eq!(overlaps, [10, 0, 0]);
    }

    #[test]
    fn test_composite_length_and_spans() {
        let crossfade = compose(RATE, &options(100, 1.0), [ones(1000), ones(800)]);
        assert_eq!(crossfade.fade_frames(), 100);
        assert_eq!(crossfade.spans()[1].start, 900);
        assert_eq!(crossfade.len(), 1700);
    }

    #[test]
    fn test_two_streams_crossfade_sums_to_target_over_overlap() {
        let mut crossfade = compose(RATE, &options(100, 1.0), [ones(1000), ones(800)]);
        let frames = drain(&mut crossfade, 128);
        assert_eq!(frames.len(), 1700);

        // first stream fading in
        assert!(frames[0].0.abs() < AUDIO_SAMPLE_EPSILON);
        // first stream steady, second not started yet
        assert!((frames[500].0 - 1.0).abs() < AUDIO_SAMPLE_EPSILON);
        // in the overlap the fade-out and fade-in ramps add up to the target
        for (i, frame) in frames.iter().enumerate().take(1000).skip(900) {
            assert!((frame.0 - 1.0).abs() < 1e-4, "frame {i}: {}", frame.0);
            assert_eq!(frame.0, frame.1);
        }
        // second stream on its own, steady, then fading out
        assert!((frames[1300].0 - 1.0).abs() < AUDIO_SAMPLE_EPSILON);
        assert!(frames[1699].0 < 0.02);
    }

    #[test]
    fn test_target_gain_applies_to_every_stream() {
        let mut crossfade = compose(RATE, &options(10, 0.5), [ones(100), ones(100)]);
        let frames = drain(&mut crossfade, 64);
        assert_eq!(frames[50], (0.5, 0.5));
        assert_eq!(frames[150], (0.5, 0.5));
    }

    #[test]
    fn test_no_streams_yields_only_seed_silence() {
        let mut crossfade = compose(RATE, &FadeOptions::default(), Vec::<Constant>::new());
        assert_eq!(crossfade.len(), SEED_SILENCE_FRAMES);

        let frames = drain(&mut crossfade, 300);
        assert_eq!(frames.len() as u64, SEED_SILENCE_FRAMES);
        assert!(frames.iter().all(|f| *f == (0.0, 0.0)));

        let mut buffer = [(0.0, 0.0); 8];
        assert_eq!(crossfade.stream(&mut buffer), (0, false));
    }

    #[test]
    fn test_zero_fade_plays_streams_back_to_back() {
        let streams = [Constant::new((0.25, 0.25), 5), Constant::new((0.5, 0.5), 5)];
        let mut crossfade = compose(RATE, &options(0, 1.0), streams);
        assert_eq!(crossfade.spans()[1].start, 5);

        let frames = drain(&mut crossfade, 3);
        assert_eq!(frames[..10].iter().filter(|f| f.0 == 0.25).count(), 5);
        assert_eq!(frames[4], (0.25, 0.25));
        assert_eq!(frames[5], (0.5, 0.5));
    }

    #[test]
    fn test_fade_duration_is_converted_at_sample_rate() {
        let options = FadeOptions::new(Duration::from_millis(250), 1.0);
        let crossfade = compose(SampleRate::new(48000), &options, [ones(48000), ones(48000)]);
        assert_eq!(crossfade.fade_frames(), 12000);
        assert_eq!(crossfade.spans()[1].start, 36000);
    }

    #[test]
    fn test_borrowed_and_boxed_streams_compose_together() {
        let mut wav = WavStreamer::from_raw_samples(vec![(1.0, 1.0); 20], 1);
        let streams: Vec<Box<dyn SizedStreamer + '_>> =
            vec![Box::new(&mut wav), Box::new(ones(20))];

        let mut crossfade = compose(RATE, &options(5, 1.0), streams);
        assert_eq!(crossfade.len(), SEED_SILENCE_FRAMES);
        assert_eq!(crossfade.spans()[1].start, 15);
        drain(&mut crossfade, 16);
        drop(crossfade);

        let mut buffer = [(0.0, 0.0); 1];
        assert_eq!(wav.stream(&mut buffer), (0, false));
    }

    fn write_wav(name: &str, sample_rate: u32, samples: &[i16]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_wav_files_compose_at_first_file_rate() {
        let first = write_wav("compose-first.wav", 10, &[8192; 30]);
        let second = write_wav("compose-second.wav", 10, &[8192; 20]);

        let options = FadeOptions::new(Duration::from_millis(500), 1.0);
        let crossfade = compose_wav_files(&[&first, &second], &options).unwrap();
        assert_eq!(crossfade.sample_rate(), SampleRate::new(10));
        assert_eq!(crossfade.fade_frames(), 5);
        assert_eq!(crossfade.spans(), [FrameSpan::new(0, 30), FrameSpan::new(25, 20)]);

        std::fs::remove_file(first).unwrap();
        std::fs::remove_file(second).unwrap();
    }

    #[test]
    fn test_missing_wav_file_names_the_path() {
        let missing = std::env::temp_dir().join("no-such-crossfade-input.wav");
        let result = compose_wav_files(&[&missing], &FadeOptions::default());

        match result {
            Err(Error::Load { path, source }) => {
                assert_eq!(path, missing);
                assert!(matches!(source, crate::streamer::wav::WavError::Decode(_)));
            }
            other => panic!("expected a load error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_wav_files_is_an_error() {
        let result = compose_wav_files::<&str>(&[], &FadeOptions::default());
        assert!(matches!(result, Err(Error::NoInput)));
    }

    #[test]
    fn test_crossfades_nest() {
        let inner = compose(RATE, &options(10, 1.0), [ones(2000)]);
        assert_eq!(inner.len(), 2000);

        let mut outer = compose(RATE, &options(10, 1.0), [inner]);
        assert_eq!(outer.len(), 2000);
        assert_eq!(drain(&mut outer, 256).len(), 2000);
    }
}
