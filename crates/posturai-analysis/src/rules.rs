//! Rule Engine - exercise angle rules to posture errors and a score
//!
//! Rules are data. Every exercise goes through the same evaluation path;
//! adding an exercise means adding a rule table, not code.

use std::collections::{BTreeMap, HashSet};

use posturai_core::{NamedFrame, Side};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    joint_angle, score_for, select_side, CatalogError, CatalogResult, JointTriple,
    DEFAULT_CONFIDENCE_THRESHOLD, MAX_SCORE,
};

/// User-facing posture error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorDefinition {
    pub id: String,
    pub message: String,
}

impl ErrorDefinition {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Error reported when no side of a rule can be measured
    pub fn low_confidence() -> Self {
        Self::new(
            "low-confidence",
            "Position not visible enough, move closer or improve the lighting.",
        )
    }
}

/// Closed interval of acceptable angles, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, degrees: f64) -> bool {
        self.min <= degrees && degrees <= self.max
    }
}

/// One named angle an exercise checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointAngleRule {
    /// Semantic angle name (e.g. "knee")
    pub name: String,
    pub joints: JointTriple,
    pub range: AngleRange,
    /// Error emitted when the measured angle leaves `range`
    pub error: ErrorDefinition,
}

impl JointAngleRule {
    pub fn new(
        name: impl Into<String>,
        joints: JointTriple,
        range: AngleRange,
        error: ErrorDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            joints,
            range,
            error,
        }
    }
}

/// Rule table for one exercise, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRules {
    pub id: String,
    pub name: String,
    pub rules: Vec<JointAngleRule>,
    #[serde(default = "ErrorDefinition::low_confidence")]
    pub low_confidence: ErrorDefinition,
}

impl ExerciseRules {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules: Vec::new(),
            low_confidence: ErrorDefinition::low_confidence(),
        }
    }

    /// Append a rule (builder style)
    pub fn with_rule(mut self, rule: JointAngleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_low_confidence(mut self, error: ErrorDefinition) -> Self {
        self.low_confidence = error;
        self
    }

    /// Check every range lies within [0, 180] with min <= max, and that
    /// rule names are unique.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut names = HashSet::new();

        for rule in &self.rules {
            let AngleRange { min, max } = rule.range;
            // Written so that NaN bounds fail too
            if !(0.0 <= min && min <= max && max <= 180.0) {
                return Err(CatalogError::InvalidRange {
                    exercise: self.id.clone(),
                    rule: rule.name.clone(),
                    min,
                    max,
                });
            }
            if !names.insert(rule.name.as_str()) {
                return Err(CatalogError::DuplicateRule {
                    exercise: self.id.clone(),
                    rule: rule.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Result of analysing one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Measured angles, rounded to whole degrees
    pub angles: BTreeMap<String, u32>,
    /// Errors in rule-declaration order
    pub errors: Vec<ErrorDefinition>,
    /// Score in [0, 100]
    pub score: u8,
}

impl FrameResult {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Default for FrameResult {
    fn default() -> Self {
        Self {
            angles: BTreeMap::new(),
            errors: Vec::new(),
            score: MAX_SCORE,
        }
    }
}

/// What happened to a single rule on a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    /// Neither side had all three joints above the confidence threshold
    LowConfidence,
    /// The selected joints coincide; no angle exists
    Degenerate { side: Side },
    Within { side: Side, degrees: f64 },
    Violated { side: Side, degrees: f64 },
}

/// Evaluates exercise rule tables against smoothed frames
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    confidence_threshold: f64,
}

impl RuleEngine {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
        }
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Evaluate a single rule
    pub fn evaluate_rule(&self, frame: &NamedFrame, rule: &JointAngleRule) -> RuleOutcome {
        let Some(selection) = select_side(frame, &rule.joints, self.confidence_threshold) else {
            return RuleOutcome::LowConfidence;
        };
        let side = selection.side;

        match joint_angle(
            selection.proximal.position(),
            selection.vertex.position(),
            selection.distal.position(),
        ) {
            None => RuleOutcome::Degenerate { side },
            Some(degrees) if rule.range.contains(degrees) => RuleOutcome::Within { side, degrees },
            Some(degrees) => RuleOutcome::Violated { side, degrees },
        }
    }

    /// Evaluate every rule of `exercise` against `frame`.
    ///
    /// The tolerance check uses the unrounded angle; only the reported
    /// value is rounded.
    pub fn evaluate(&self, frame: &NamedFrame, exercise: &ExerciseRules) -> FrameResult {
        let mut angles = BTreeMap::new();
        let mut errors = Vec::new();

        for rule in &exercise.rules {
            let outcome = self.evaluate_rule(frame, rule);
            trace!(exercise = %exercise.id, rule = %rule.name, ?outcome, "rule evaluated");

            match outcome {
                RuleOutcome::LowConfidence => errors.push(exercise.low_confidence.clone()),
                RuleOutcome::Degenerate { .. } => {}
                RuleOutcome::Within { degrees, .. } => {
                    angles.insert(rule.name.clone(), degrees.round() as u32);
                }
                RuleOutcome::Violated { degrees, .. } => {
                    angles.insert(rule.name.clone(), degrees.round() as u32);
                    errors.push(rule.error.clone());
                }
            }
        }

        FrameResult {
            score: score_for(errors.len()),
            angles,
            errors,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
