//! Engine configuration, fixed for the lifetime of a session

use std::time::Duration;

use posturai_analysis::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SMOOTHING_ALPHA};

use crate::ConfigError;

/// How much data a frame source has buffered, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadyState {
    /// Nothing known about the source yet
    Nothing,
    /// Dimensions known, no frame data
    Metadata,
    /// The current frame is decodable
    CurrentData,
    /// Current and at least the next frame are available
    FutureData,
    /// Enough data buffered to play through
    EnoughData,
}

/// Engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Weight of the newest observation in the smoother, (0, 1]
    pub smoothing_alpha: f64,
    /// Joints at or below this confidence are unusable, [0, 1)
    pub confidence_threshold: f64,
    /// Minimum source readiness before a frame is analysed
    pub min_readiness: ReadyState,
    /// Time allowed for one frame's analysis before a warning is logged
    pub frame_budget: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_readiness: ReadyState::CurrentData,
            // One frame at 30 fps
            frame_budget: Duration::from_millis(33),
        }
    }
}

impl EngineConfig {
    /// Stricter gating: higher confidence bar, fully buffered source
    pub fn strict() -> Self {
        EngineConfig {
            confidence_threshold: 0.3,
            min_readiness: ReadyState::EnoughData,
            ..Self::default()
        }
    }

    pub fn with_smoothing_alpha(mut self, alpha: f64) -> Self {
        self.smoothing_alpha = alpha;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::InvalidSmoothingAlpha(self.smoothing_alpha));
        }
        if !(0.0..1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::InvalidConfidenceThreshold(
                self.confidence_threshold,
            ));
        }
        if self.frame_budget.is_zero() {
            return Err(ConfigError::ZeroFrameBudget);
        }
        Ok(())
    }
}
