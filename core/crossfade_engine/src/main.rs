use std::{path::PathBuf, thread, time::Duration};

use clap::Parser;
use crossfade_engine::{
    FadeOptions, SizedStreamer, compose_wav_files,
    constants::{DEFAULT_FADE_SECS, DEFAULT_TARGET_GAIN},
    device_manager::{AudioDeviceManager, StreamerSource, cpal_dm::CpalAudioDeviceManager},
};
use log::{info, warn};

/// Plays WAV files back to back, crossfading each into the next.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// WAV files to play, in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Fade length in seconds
    #[arg(long, default_value_t = DEFAULT_FADE_SECS as f64)]
    fade: f64,

    /// Volume between fades (1.0 = unchanged)
    #[arg(long, default_value_t = DEFAULT_TARGET_GAIN)]
    gain: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crossfade_engine=info".into()),
        )
        .init();

    let args = Args::parse();
    let options = FadeOptions::from_secs(args.fade, args.gain)?;

    let crossfade = compose_wav_files(&args.files, &options)?;
    let sample_rate = crossfade.sample_rate();
    let playtime = sample_rate.duration(crossfade.len());
    info!(
        "playing {} tracks, {:.1}s fades, {:.1}s total",
        crossfade.spans().len(),
        options.fade_duration.as_secs_f64(),
        playtime.as_secs_f64()
    );

    match CpalAudioDeviceManager::default_sample_rate() {
        Ok(device_rate) if device_rate != sample_rate => {
            warn!("output device runs at {device_rate}, tracks are at {sample_rate}");
        }
        Ok(_) => {}
        Err(e) => warn!("could not query output device: {e}"),
    }

    let mut manager = CpalAudioDeviceManager::new();
    manager.start_output_stream(Box::new(StreamerSource::new(crossfade)))?;

    // keep main (and the stream) alive until the composite has played out
    thread::sleep(playtime + Duration::from_millis(250));
    info!("done");
    Ok(())
}
