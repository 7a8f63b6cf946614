//! Session outcome - the record emitted when a session finishes

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use posturai_analysis::{ErrorDefinition, ExerciseRules, FrameResult};
use serde::{Deserialize, Serialize};

/// How the session was run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Live camera analysis
    #[serde(rename = "cam")]
    Camera,
}

/// Final result of one session, shaped for a history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    /// Unix milliseconds at completion
    pub id: u64,
    pub exercise_id: String,
    pub exercise_name: String,
    pub mode: SessionMode,
    pub final_score: u8,
    pub angles: BTreeMap<String, u32>,
    pub errors: Vec<ErrorDefinition>,
    /// RFC 3339 timestamp
    pub completed_at: String,
}

impl SessionOutcome {
    /// Build the outcome from the last frame result of a session
    pub fn from_result(exercise: &ExerciseRules, result: &FrameResult, at: SystemTime) -> Self {
        let id = at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            id,
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            mode: SessionMode::Camera,
            final_score: result.score,
            angles: result.angles.clone(),
            errors: result.errors.clone(),
            completed_at: humantime::format_rfc3339_millis(at).to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
