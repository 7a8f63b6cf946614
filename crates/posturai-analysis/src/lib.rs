//! Posturai Analysis - the per-frame posture pipeline
//!
//! raw joints → normalize → smooth → (side selection + joint angle, per rule)
//! → rule evaluation → score
//!
//! Every stage is synchronous and allocation-light. The only state that
//! survives between frames is the smoother's previous frame.

pub mod angle;
pub mod catalog;
pub mod normalize;
pub mod rules;
pub mod scoring;
pub mod side;
pub mod smoothing;

pub use angle::*;
pub use catalog::*;
pub use normalize::*;
pub use rules::*;
pub use scoring::*;
pub use side::*;
pub use smoothing::*;
