//! Session Controller - the frame loop as an explicit state machine
//!
//! Idle → Initializing → Ready → Analyzing ⇄ Paused → Finished
//!
//! The controller owns the only cross-frame state (the smoother), so
//! independent sessions never share anything.

use std::fmt;
use std::time::{Duration, Instant, SystemTime};

use posturai_analysis::{
    normalize_keypoints, ExerciseCatalog, ExerciseRules, FrameDimensions, FrameResult, RawJoint,
    RuleEngine, TemporalSmoother,
};
use posturai_core::NamedFrame;
use tracing::{debug, info, trace, warn};

use crate::{
    EngineConfig, FrameSource, PoseEstimator, RenderSink, RuntimeError, RuntimeResult,
    SessionHistory, SessionOutcome,
};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No detector available yet
    Idle,
    /// Estimator and camera are being set up externally
    Initializing,
    /// Estimator and source available, not analysing
    Ready,
    Analyzing,
    Paused,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Initializing => "initializing",
            SessionState::Ready => "ready",
            SessionState::Analyzing => "analyzing",
            SessionState::Paused => "paused",
            SessionState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Operations that move a session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    BeginInitialization,
    MarkReady,
    Start,
    Pause,
    Resume,
    Stop,
    ProcessFrame,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionAction::BeginInitialization => "begin initialization",
            SessionAction::MarkReady => "mark ready",
            SessionAction::Start => "start",
            SessionAction::Pause => "pause",
            SessionAction::Resume => "resume",
            SessionAction::Stop => "stop",
            SessionAction::ProcessFrame => "process a frame",
        };
        f.write_str(name)
    }
}

/// Why a tick produced no analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    EstimatorNotReady,
    SourceNotReady,
    NoFrame,
    EstimatorFailed,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not analysing; nothing was touched
    Inactive,
    /// Nothing new upstream this tick
    Skipped(SkipReason),
    /// The estimator saw no body
    NoPose,
    Analyzed(FrameResult),
}

/// Status a host can show next to the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionStatus {
    Waiting,
    PoseDetected,
    NoPoseDetected,
    AnalysisFailed,
    Paused,
    Stopped,
}

/// Per-session counters
#[derive(Clone, Debug, Default)]
pub struct SessionStats {
    pub ticks: u64,
    pub frames_analyzed: u64,
    pub frames_skipped: u64,
    pub no_pose_frames: u64,
    pub over_budget_frames: u64,
    pub last_frame_duration: Duration,
}

/// Drives the per-frame pipeline for one exercise
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    exercise: ExerciseRules,
    config: EngineConfig,
    smoother: TemporalSmoother,
    rules: RuleEngine,
    /// Most recent frame result; becomes the outcome on stop
    latest: FrameResult,
    status: DetectionStatus,
    stats: SessionStats,
}

impl SessionController {
    /// Create an idle controller for `exercise`, rejecting an invalid
    /// configuration or rule table
    pub fn new(exercise: ExerciseRules, config: EngineConfig) -> RuntimeResult<Self> {
        config.validate()?;
        exercise.validate()?;

        Ok(SessionController {
            state: SessionState::Idle,
            smoother: TemporalSmoother::new(config.smoothing_alpha),
            rules: RuleEngine::new(config.confidence_threshold),
            exercise,
            config,
            latest: FrameResult::default(),
            status: DetectionStatus::Waiting,
            stats: SessionStats::default(),
        })
    }

    /// Create a controller for a catalog exercise
    pub fn for_exercise(
        catalog: &ExerciseCatalog,
        exercise_id: &str,
        config: EngineConfig,
    ) -> RuntimeResult<Self> {
        let exercise = catalog.require(exercise_id)?.clone();
        Self::new(exercise, config)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn exercise(&self) -> &ExerciseRules {
        &self.exercise
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Most recent frame result
    pub fn latest(&self) -> &FrameResult {
        &self.latest
    }

    pub fn status(&self) -> DetectionStatus {
        self.status
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Retained smoothing state, if any
    pub fn smoothing_state(&self) -> Option<&NamedFrame> {
        self.smoother.state()
    }

    fn transition(
        &mut self,
        action: SessionAction,
        allowed: &[SessionState],
        to: SessionState,
    ) -> RuntimeResult<SessionState> {
        let from = self.state;
        if !allowed.contains(&from) {
            return Err(RuntimeError::InvalidTransition { from, action });
        }
        info!(exercise = %self.exercise.id, %from, %to, "session transition");
        self.state = to;
        Ok(from)
    }

    /// Idle → Initializing
    pub fn begin_initialization(&mut self) -> RuntimeResult<()> {
        self.transition(
            SessionAction::BeginInitialization,
            &[SessionState::Idle],
            SessionState::Initializing,
        )?;
        Ok(())
    }

    /// Initializing → Ready, once estimator and source are available
    pub fn mark_ready(&mut self) -> RuntimeResult<()> {
        self.transition(
            SessionAction::MarkReady,
            &[SessionState::Initializing],
            SessionState::Ready,
        )?;
        Ok(())
    }

    /// Ready or Finished → Analyzing. Always starts from a clean smoother.
    pub fn start(&mut self) -> RuntimeResult<()> {
        self.transition(
            SessionAction::Start,
            &[SessionState::Ready, SessionState::Finished],
            SessionState::Analyzing,
        )?;
        self.smoother.reset();
        self.latest = FrameResult::default();
        self.stats = SessionStats::default();
        self.status = DetectionStatus::Waiting;
        Ok(())
    }

    /// Analyzing → Paused; smoothing state is kept
    pub fn pause(&mut self) -> RuntimeResult<()> {
        self.transition(
            SessionAction::Pause,
            &[SessionState::Analyzing],
            SessionState::Paused,
        )?;
        self.status = DetectionStatus::Paused;
        Ok(())
    }

    /// Paused → Analyzing, continuing from the retained smoothing state
    pub fn resume(&mut self) -> RuntimeResult<()> {
        self.transition(
            SessionAction::Resume,
            &[SessionState::Paused],
            SessionState::Analyzing,
        )?;
        self.status = DetectionStatus::Waiting;
        Ok(())
    }

    /// Analyzing or Paused → Finished.
    ///
    /// Discards the smoothing state, turns the latest frame result into
    /// the session outcome and hands it to `history`.
    pub fn stop<H: SessionHistory>(&mut self, history: &mut H) -> RuntimeResult<SessionOutcome> {
        self.stop_at(history, SystemTime::now())
    }

    /// `stop` with an explicit completion time
    pub fn stop_at<H: SessionHistory>(
        &mut self,
        history: &mut H,
        at: SystemTime,
    ) -> RuntimeResult<SessionOutcome> {
        self.transition(
            SessionAction::Stop,
            &[SessionState::Analyzing, SessionState::Paused],
            SessionState::Finished,
        )?;
        self.smoother.reset();
        self.status = DetectionStatus::Stopped;

        let outcome = SessionOutcome::from_result(&self.exercise, &self.latest, at);
        info!(
            exercise = %outcome.exercise_id,
            score = outcome.final_score,
            errors = outcome.errors.len(),
            frames = self.stats.frames_analyzed,
            "session finished"
        );
        history.record(&outcome);
        Ok(outcome)
    }

    /// Run one frame of already-estimated keypoints through the pipeline.
    ///
    /// For hosts that drive their own estimator. Only valid while analysing.
    pub fn process_keypoints(
        &mut self,
        keypoints: &[RawJoint],
        dims: FrameDimensions,
    ) -> RuntimeResult<(NamedFrame, FrameResult)> {
        if self.state != SessionState::Analyzing {
            return Err(RuntimeError::InvalidTransition {
                from: self.state,
                action: SessionAction::ProcessFrame,
            });
        }
        Ok(self.analyze(keypoints, dims))
    }

    fn analyze(&mut self, keypoints: &[RawJoint], dims: FrameDimensions) -> (NamedFrame, FrameResult) {
        let start = Instant::now();

        let named = normalize_keypoints(keypoints, dims);
        let smoothed = self.smoother.smooth(&named);
        let result = self.rules.evaluate(&smoothed, &self.exercise);

        let elapsed = start.elapsed();
        self.stats.last_frame_duration = elapsed;
        self.stats.frames_analyzed += 1;
        if elapsed > self.config.frame_budget {
            self.stats.over_budget_frames += 1;
            warn!(
                ?elapsed,
                budget = ?self.config.frame_budget,
                "frame analysis exceeded budget"
            );
        }

        debug!(
            score = result.score,
            errors = result.error_count(),
            joints = smoothed.len(),
            "frame analyzed"
        );

        self.latest = result.clone();
        self.status = DetectionStatus::PoseDetected;
        (smoothed, result)
    }

    fn skip(&mut self, reason: SkipReason) -> TickOutcome {
        self.stats.frames_skipped += 1;
        trace!(?reason, "tick skipped");
        TickOutcome::Skipped(reason)
    }

    /// Advance the loop by one scheduler tick.
    ///
    /// Upstream unavailability is never an error: the tick is skipped
    /// and the next one tries again.
    pub fn tick<S, E, R>(&mut self, estimator: &mut E, source: &mut S, sink: &mut R) -> TickOutcome
    where
        S: FrameSource,
        E: PoseEstimator<S::Frame>,
        R: RenderSink,
    {
        if self.state != SessionState::Analyzing {
            return TickOutcome::Inactive;
        }
        self.stats.ticks += 1;

        if !estimator.is_ready() {
            return self.skip(SkipReason::EstimatorNotReady);
        }
        if source.ready_state() < self.config.min_readiness {
            return self.skip(SkipReason::SourceNotReady);
        }
        let Some(frame) = source.current_frame() else {
            return self.skip(SkipReason::NoFrame);
        };

        let candidates = match estimator.estimate(&frame) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "pose estimation failed");
                self.status = DetectionStatus::AnalysisFailed;
                return self.skip(SkipReason::EstimatorFailed);
            }
        };

        let Some(pose) = candidates.into_iter().next() else {
            // Keep the score, clear what was measured
            self.stats.no_pose_frames += 1;
            self.latest.angles.clear();
            self.latest.errors.clear();
            self.status = DetectionStatus::NoPoseDetected;
            sink.render(&NamedFrame::new(), &self.latest);
            return TickOutcome::NoPose;
        };

        let (named, result) = self.analyze(&pose.keypoints, source.dimensions());
        sink.render(&named, &result);
        TickOutcome::Analyzed(result)
    }
}
