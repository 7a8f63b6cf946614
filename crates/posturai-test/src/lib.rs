//! Posturai Test Harness
//!
//! Simulated collaborators and synthetic skeletons for exercising the
//! engine without a camera or a model:
//! - ScriptedSource / ScriptedEstimator: replay a fixed sequence of ticks
//! - RecordingSink: capture everything the engine renders
//! - PoseBuilder / Jitter: synthetic side-view skeletons with sensor noise
//! - integration: end-to-end scenarios through the full tick loop

pub mod integration;
pub mod simulator;
pub mod skeleton;

pub use simulator::*;
pub use skeleton::*;
