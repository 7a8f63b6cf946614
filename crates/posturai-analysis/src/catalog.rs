//! Exercise catalog - the rule tables the engine knows about

use std::collections::HashSet;

use posturai_core::BodyPart::{Ankle, Elbow, Hip, Knee, Shoulder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AngleRange, ErrorDefinition, ExerciseRules, JointAngleRule, JointTriple};

/// Errors raised while loading or querying a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid range for {exercise}/{rule}: [{min}, {max}] must satisfy 0 <= min <= max <= 180")]
    InvalidRange {
        exercise: String,
        rule: String,
        min: f64,
        max: f64,
    },

    #[error("Duplicate rule {rule} in exercise {exercise}")]
    DuplicateRule { exercise: String, rule: String },

    #[error("Duplicate exercise: {0}")]
    DuplicateExercise(String),

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Set of exercises with their rule tables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    pub exercises: Vec<ExerciseRules>,
}

impl ExerciseCatalog {
    /// Build a catalog, rejecting invalid rule tables
    pub fn new(exercises: Vec<ExerciseRules>) -> CatalogResult<Self> {
        let catalog = Self { exercises };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let catalog: ExerciseCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let mut ids = HashSet::new();

        for exercise in &self.exercises {
            if !ids.insert(exercise.id.as_str()) {
                return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
            }

            exercise.validate()?;
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseRules> {
        self.exercises.iter().find(|exercise| exercise.id == id)
    }

    /// Like `get`, but an unknown id is an error
    pub fn require(&self, id: &str) -> CatalogResult<&ExerciseRules> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownExercise(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.exercises.iter().map(|exercise| exercise.id.as_str())
    }

    /// The exercises shipped with the application
    pub fn builtin() -> Self {
        let back_round = ErrorDefinition::new("back-round", "Your back is rounding forward.");

        Self {
            exercises: vec![
                ExerciseRules::new("squat-modified", "Modified squat")
                    .with_rule(JointAngleRule::new(
                        "knee",
                        JointTriple::new(Hip, Knee, Ankle),
                        AngleRange::new(90.0, 180.0),
                        ErrorDefinition::new(
                            "knees-in",
                            "Your knees are collapsing or the depth is incorrect.",
                        ),
                    ))
                    .with_rule(JointAngleRule::new(
                        "hip",
                        JointTriple::new(Shoulder, Hip, Knee),
                        AngleRange::new(120.0, 180.0),
                        back_round.clone(),
                    ))
                    .with_rule(JointAngleRule::new(
                        "back",
                        JointTriple::new(Shoulder, Hip, Ankle),
                        AngleRange::new(160.0, 180.0),
                        back_round,
                    )),
                ExerciseRules::new("glute-bridge", "Glute bridge").with_rule(JointAngleRule::new(
                    "hip",
                    JointTriple::new(Shoulder, Hip, Knee),
                    AngleRange::new(150.0, 180.0),
                    ErrorDefinition::new("over-arch", "Your back is arched too much."),
                )),
                ExerciseRules::new("plank-modified", "Modified plank").with_rule(
                    JointAngleRule::new(
                        "back",
                        JointTriple::new(Shoulder, Hip, Ankle),
                        AngleRange::new(170.0, 180.0),
                        ErrorDefinition::new("hips-sag", "Your hips are sagging too low."),
                    ),
                ),
                ExerciseRules::new("shoulder-rotation", "Shoulder rotation").with_rule(
                    JointAngleRule::new(
                        "shoulder",
                        JointTriple::new(Hip, Shoulder, Elbow),
                        AngleRange::new(0.0, 90.0),
                        ErrorDefinition::new(
                            "too-fast",
                            "Slow down, the movement should stay controlled.",
                        ),
                    ),
                ),
            ],
        }
    }
}
