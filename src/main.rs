// SPDX-License-Identifier: MPL-2.0
use checkpace::application::port::ProgressEvent;
use checkpace::config::{self, DEFAULT_CHECKPOINT_SECS, DEFAULT_REQUIRED_INPUTS};
use checkpace::domain::pacing::Segment;
use checkpace::error::{Error, Result};
use checkpace::infrastructure::{MediaScript, SimulatedMediaSource};
use checkpace::pacing::{AdvanceRequest, PacingDriver, PlaybackController, TransitionManager};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time;

struct Flags {
    config: Option<PathBuf>,
    checkpoint: f64,
    inputs: u32,
    duration: f64,
    click_ms: u64,
    speed: f64,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let arg_err = |e: pico_args::Error| Error::Config(e.to_string());

    let flags = Flags {
        config: args.opt_value_from_str("--config").map_err(arg_err)?,
        checkpoint: args
            .opt_value_from_str("--checkpoint")
            .map_err(arg_err)?
            .unwrap_or(DEFAULT_CHECKPOINT_SECS),
        inputs: args
            .opt_value_from_str("--inputs")
            .map_err(arg_err)?
            .unwrap_or(DEFAULT_REQUIRED_INPUTS),
        duration: args
            .opt_value_from_str("--duration")
            .map_err(arg_err)?
            .unwrap_or(30.0),
        click_ms: args
            .opt_value_from_str("--click-ms")
            .map_err(arg_err)?
            .unwrap_or(60),
        speed: args
            .opt_value_from_str("--speed")
            .map_err(arg_err)?
            .unwrap_or(4.0),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring extra arguments: {:?}", rest);
    }
    Ok(flags)
}

/// Moves the simulated clock along with real time, scaled by `speed`.
async fn run_clock(source: SimulatedMediaSource, speed: f64) {
    let frame = Duration::from_millis(10);
    let mut interval = time::interval(frame);
    loop {
        interval.tick().await;
        source.advance(frame.mul_f64(speed.max(0.1)));
    }
}

/// Clicks "advance" at a steady pace while the affordance is shown.
async fn run_viewer(
    mut progress: UnboundedReceiver<ProgressEvent>,
    clicks: UnboundedSender<AdvanceRequest>,
    click_every: Duration,
) {
    let mut awaiting = false;
    loop {
        if awaiting {
            tokio::select! {
                event = progress.recv() => match event {
                    Some(event) => awaiting = report(event, awaiting),
                    None => return,
                },
                _ = time::sleep(click_every) => {
                    if clicks.send(AdvanceRequest).is_err() {
                        return;
                    }
                }
            }
        } else {
            match progress.recv().await {
                Some(event) => awaiting = report(event, awaiting),
                None => return,
            }
        }
    }
}

fn report(event: ProgressEvent, awaiting: bool) -> bool {
    match event {
        ProgressEvent::Progress { accepted, required } if required > 0 => {
            log::info!("Progress {}/{}", accepted, required);
            awaiting
        }
        ProgressEvent::AwaitingInput(visible) => visible,
        ProgressEvent::StateChanged(state) => {
            log::debug!("State: {}", state);
            awaiting && !state.is_playing_continuously()
        }
        _ => awaiting,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = parse_flags()?;
    let settings = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let (source, notifications) = SimulatedMediaSource::new();
    source.set_call_log(false);
    source.add_media("intro", MediaScript::with_duration(Some(2.0)));
    source.add_media("lesson", MediaScript::with_duration(Some(flags.duration)));
    source.add_media("outro", MediaScript::with_duration(Some(2.0)));

    let playlist = vec![
        Segment::passthrough("intro"),
        Segment::paced("lesson", settings.pacing(flags.checkpoint, flags.inputs)),
        Segment::passthrough("outro"),
    ];

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let (clicks_tx, clicks_rx) = mpsc::unbounded_channel();

    let controller = PlaybackController::new(source.clone(), progress_tx, settings.tuning());
    let driver = PacingDriver::new(
        controller,
        TransitionManager::new(playlist),
        notifications,
        clicks_rx,
    );

    let clock = tokio::spawn(run_clock(source, flags.speed));
    let viewer = tokio::spawn(run_viewer(
        progress_rx,
        clicks_tx,
        Duration::from_millis(flags.click_ms),
    ));

    let outcome = driver.run().await;
    clock.abort();
    viewer.abort();

    let summary = outcome?;
    log::info!(
        "Played {} segments with {} inputs ({} auto-pauses)",
        summary.segments_completed,
        summary.inputs_accepted,
        summary.auto_pauses
    );
    Ok(())
}
