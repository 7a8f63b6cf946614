//! Simulated collaborators - scripted frame source, estimator and sinks

use std::collections::VecDeque;

use posturai_analysis::{FrameDimensions, FrameResult, RawJoint};
use posturai_core::NamedFrame;
use posturai_runtime::{FrameSource, PoseCandidate, PoseEstimator, ReadyState, RenderSink};
use thiserror::Error;

/// A frame as the simulated camera delivers it: the estimator's answer
/// is baked in.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatedFrame {
    /// One or more detected bodies
    Poses(Vec<PoseCandidate>),
    /// Nobody in view
    Empty,
    /// The estimator blows up on this frame
    Corrupt,
}

impl SimulatedFrame {
    /// A frame with exactly one body
    pub fn pose(keypoints: Vec<RawJoint>) -> Self {
        SimulatedFrame::Poses(vec![PoseCandidate::new(keypoints)])
    }
}

/// One scripted tick of the source
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Source reports insufficient data
    Buffering,
    /// Source is ready but has no new frame
    Idle,
    Frame(SimulatedFrame),
}

/// Frame source replaying a fixed script, one step per tick
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    dims: FrameDimensions,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(dims: FrameDimensions) -> Self {
        Self {
            steps: VecDeque::new(),
            dims,
            consumed: 0,
        }
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push_back(step);
        self
    }

    pub fn push_pose(&mut self, keypoints: Vec<RawJoint>) -> &mut Self {
        self.push(Step::Frame(SimulatedFrame::pose(keypoints)))
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Frames handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Drop a leading buffering step; the controller never pulls one
    pub fn skip_buffering(&mut self) {
        if matches!(self.steps.front(), Some(Step::Buffering)) {
            self.steps.pop_front();
        }
    }
}

impl FrameSource for ScriptedSource {
    type Frame = SimulatedFrame;

    fn ready_state(&self) -> ReadyState {
        match self.steps.front() {
            Some(Step::Buffering) | None => ReadyState::Metadata,
            Some(_) => ReadyState::EnoughData,
        }
    }

    fn dimensions(&self) -> FrameDimensions {
        self.dims
    }

    fn current_frame(&mut self) -> Option<SimulatedFrame> {
        match self.steps.pop_front()? {
            Step::Frame(frame) => {
                self.consumed += 1;
                Some(frame)
            }
            Step::Buffering | Step::Idle => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulatedError {
    #[error("Corrupt frame")]
    CorruptFrame,
}

/// Estimator that reads the answer off the simulated frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedEstimator {
    /// Number of calls before the model reports ready
    pub warmup: u32,
    pub calls: u32,
}

impl ScriptedEstimator {
    pub fn ready() -> Self {
        Self::default()
    }

    pub fn with_warmup(warmup: u32) -> Self {
        Self { warmup, calls: 0 }
    }

    /// Advance warm-up by one step
    pub fn warm(&mut self) {
        self.warmup = self.warmup.saturating_sub(1);
    }
}

impl PoseEstimator<SimulatedFrame> for ScriptedEstimator {
    type Error = SimulatedError;

    fn is_ready(&self) -> bool {
        self.warmup == 0
    }

    fn estimate(&mut self, frame: &SimulatedFrame) -> Result<Vec<PoseCandidate>, SimulatedError> {
        self.calls += 1;
        match frame {
            SimulatedFrame::Poses(poses) => Ok(poses.clone()),
            SimulatedFrame::Empty => Ok(Vec::new()),
            SimulatedFrame::Corrupt => Err(SimulatedError::CorruptFrame),
        }
    }
}

/// Render sink that keeps every frame it is given
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub frames: Vec<(NamedFrame, FrameResult)>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&(NamedFrame, FrameResult)> {
        self.frames.last()
    }

    pub fn scores(&self) -> Vec<u8> {
        self.frames.iter().map(|(_, result)| result.score).collect()
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &NamedFrame, result: &FrameResult) {
        self.frames.push((frame.clone(), result.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_script() {
        let mut source = ScriptedSource::new(FrameDimensions::new(640.0, 480.0));
        source
            .push(Step::Buffering)
            .push(Step::Idle)
            .push(Step::Frame(SimulatedFrame::Empty));

        assert_eq!(source.ready_state(), ReadyState::Metadata);
        source.skip_buffering();
        assert_eq!(source.ready_state(), ReadyState::EnoughData);
        assert_eq!(source.current_frame(), None);
        assert_eq!(source.current_frame(), Some(SimulatedFrame::Empty));
        assert_eq!(source.consumed(), 1);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_estimator_warmup() {
        let mut estimator = ScriptedEstimator::with_warmup(2);
        assert!(!estimator.is_ready());
        estimator.warm();
        estimator.warm();
        assert!(estimator.is_ready());
        assert_eq!(
            estimator.estimate(&SimulatedFrame::Corrupt),
            Err(SimulatedError::CorruptFrame)
        );
    }
}
