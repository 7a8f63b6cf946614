//! Posturai Runtime - session orchestration around the analysis pipeline
//!
//! The SessionController is a pull-based state machine. A host scheduler
//! calls `tick` once per display/update cadence; each tick either skips
//! (nothing new upstream) or runs one frame through the pipeline:
//! 1. Check estimator and frame-source readiness
//! 2. Estimate pose on the current frame (first candidate only)
//! 3. Normalize keypoints to pixel space
//! 4. Smooth against the previous frame
//! 5. Evaluate exercise rules
//! 6. Score and hand the result to the render sink

pub mod config;
pub mod error;
pub mod interfaces;
pub mod outcome;
pub mod session;
pub mod telemetry;

pub use config::*;
pub use error::*;
pub use interfaces::*;
pub use outcome::*;
pub use session::*;
pub use telemetry::*;
