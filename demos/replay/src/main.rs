//! Posturai Replay Demo
//!
//! Replays a recorded keypoint stream through a SessionController at a
//! fixed cadence, logging each frame result, then prints the session
//! outcome as JSON.
//!
//! Usage: posturai-replay <recording.json> [--fps N] [--strict] [--json-logs] [--catalog FILE]
//!
//! Recording format:
//! { "width": 640, "height": 480, "exercise": "squat-modified",
//!   "frames": [ [ { "name": "left_hip", "x": 0.5, "y": 0.4, "score": 0.9 }, ... ], [], ... ] }
//! An empty frame means nobody was detected.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Duration;

use posturai_analysis::{ExerciseCatalog, FrameDimensions, FrameResult, RawJoint};
use posturai_core::NamedFrame;
use posturai_runtime::{
    init_logging, EngineConfig, FrameSource, LogFormat, PoseCandidate, PoseEstimator, ReadyState,
    RenderSink, SessionController, SessionOutcome, TickOutcome,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct Recording {
    width: f64,
    height: f64,
    exercise: String,
    frames: Vec<Vec<RawJoint>>,
}

struct Options {
    recording: String,
    fps: u32,
    strict: bool,
    json_logs: bool,
    catalog: Option<String>,
}

impl Options {
    fn parse() -> Result<Self, String> {
        let mut args = std::env::args().skip(1);
        let mut options = Options {
            recording: String::new(),
            fps: 30,
            strict: false,
            json_logs: false,
            catalog: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fps" => {
                    let value = args.next().ok_or("--fps needs a value")?;
                    options.fps = value
                        .parse()
                        .ok()
                        .filter(|fps| *fps > 0)
                        .ok_or_else(|| format!("invalid --fps: {}", value))?;
                }
                "--strict" => options.strict = true,
                "--json-logs" => options.json_logs = true,
                "--catalog" => options.catalog = Some(args.next().ok_or("--catalog needs a file")?),
                other if options.recording.is_empty() => options.recording = other.to_string(),
                other => return Err(format!("unexpected argument: {}", other)),
            }
        }

        if options.recording.is_empty() {
            return Err("usage: posturai-replay <recording.json> [--fps N] [--strict] [--json-logs] [--catalog FILE]".into());
        }
        Ok(options)
    }
}

/// Plays recorded frames back one per tick
struct ReplaySource {
    frames: VecDeque<Vec<RawJoint>>,
    dims: FrameDimensions,
}

impl FrameSource for ReplaySource {
    type Frame = Vec<RawJoint>;

    fn ready_state(&self) -> ReadyState {
        if self.frames.is_empty() {
            ReadyState::Metadata
        } else {
            ReadyState::EnoughData
        }
    }

    fn dimensions(&self) -> FrameDimensions {
        self.dims
    }

    fn current_frame(&mut self) -> Option<Vec<RawJoint>> {
        self.frames.pop_front()
    }
}

/// The recording already holds estimator output
struct RecordedEstimator;

impl PoseEstimator<Vec<RawJoint>> for RecordedEstimator {
    type Error = Infallible;

    fn is_ready(&self) -> bool {
        true
    }

    fn estimate(&mut self, frame: &Vec<RawJoint>) -> Result<Vec<PoseCandidate>, Infallible> {
        if frame.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![PoseCandidate::new(frame.clone())])
    }
}

struct LogSink {
    frame: u64,
}

impl RenderSink for LogSink {
    fn render(&mut self, named: &NamedFrame, result: &FrameResult) {
        self.frame += 1;
        let errors: Vec<&str> = result.errors.iter().map(|e| e.id.as_str()).collect();
        info!(
            frame = self.frame,
            joints = named.len(),
            score = result.score,
            angles = ?result.angles,
            ?errors,
            "frame"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse()?;
    init_logging(if options.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let recording: Recording = serde_json::from_str(&std::fs::read_to_string(&options.recording)?)?;
    let catalog = match &options.catalog {
        Some(path) => ExerciseCatalog::from_json(&std::fs::read_to_string(path)?)?,
        None => ExerciseCatalog::builtin(),
    };
    let config = if options.strict {
        EngineConfig::strict()
    } else {
        EngineConfig::default()
    };

    let mut session = SessionController::for_exercise(&catalog, &recording.exercise, config)?;
    let mut source = ReplaySource {
        frames: recording.frames.into(),
        dims: FrameDimensions::new(recording.width, recording.height),
    };
    let mut estimator = RecordedEstimator;
    let mut sink = LogSink { frame: 0 };

    info!(
        exercise = %recording.exercise,
        frames = source.frames.len(),
        fps = options.fps,
        "replaying recording"
    );

    // Recorded data is available immediately
    session.begin_initialization()?;
    session.mark_ready()?;
    session.start()?;

    let mut ticker = tokio::time::interval(Duration::from_secs(1) / options.fps);
    while !source.frames.is_empty() {
        ticker.tick().await;
        if let TickOutcome::Skipped(reason) = session.tick(&mut estimator, &mut source, &mut sink) {
            warn!(?reason, "tick skipped");
        }
    }

    let mut history: Vec<SessionOutcome> = Vec::new();
    let outcome = session.stop(&mut history)?;
    let stats = session.stats();
    info!(
        analyzed = stats.frames_analyzed,
        no_pose = stats.no_pose_frames,
        over_budget = stats.over_budget_frames,
        "replay complete"
    );

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
