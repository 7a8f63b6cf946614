//! Collaborator interfaces - what the engine consumes and emits
//!
//! Pose estimation, capture and rendering live outside the engine. These
//! traits are the seams a host implements to plug them in.

use std::fmt;

use posturai_analysis::{FrameDimensions, FrameResult, RawJoint};
use posturai_core::NamedFrame;
use serde::{Deserialize, Serialize};

use crate::{ReadyState, SessionOutcome};

/// One detected body from the estimator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseCandidate {
    pub keypoints: Vec<RawJoint>,
    /// Whole-pose confidence, if the estimator reports one
    #[serde(default)]
    pub score: Option<f64>,
}

impl PoseCandidate {
    pub fn new(keypoints: Vec<RawJoint>) -> Self {
        Self {
            keypoints,
            score: None,
        }
    }
}

/// Source of frames (camera, video file, replay)
pub trait FrameSource {
    type Frame;

    /// How much data is currently available
    fn ready_state(&self) -> ReadyState;

    /// Current frame size in pixels
    fn dimensions(&self) -> FrameDimensions;

    /// The frame to analyse this tick, if any
    fn current_frame(&mut self) -> Option<Self::Frame>;
}

/// External pose estimator
pub trait PoseEstimator<F> {
    type Error: fmt::Display;

    /// Whether the model has finished loading
    fn is_ready(&self) -> bool;

    /// Zero or more pose candidates for `frame`
    fn estimate(&mut self, frame: &F) -> Result<Vec<PoseCandidate>, Self::Error>;
}

/// Receives per-frame output for display
pub trait RenderSink {
    fn render(&mut self, frame: &NamedFrame, result: &FrameResult);
}

/// Discards everything
impl RenderSink for () {
    fn render(&mut self, _frame: &NamedFrame, _result: &FrameResult) {}
}

/// Receives the outcome of each finished session for persistence
pub trait SessionHistory {
    fn record(&mut self, outcome: &SessionOutcome);
}

impl SessionHistory for () {
    fn record(&mut self, _outcome: &SessionOutcome) {}
}

impl SessionHistory for Vec<SessionOutcome> {
    fn record(&mut self, outcome: &SessionOutcome) {
        self.push(outcome.clone());
    }
}
