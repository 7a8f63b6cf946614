//! Posturai Core - Fundamental types for posture analysis
//!
//! This crate defines the types shared by every stage of the engine:
//! - Canonical joint identifiers (JointName, JointKey) and body sides
//! - Per-frame joint observations and the NamedFrame that holds them
//! - 2D geometry primitives
//! - Error types for joint name resolution

pub mod error;
pub mod frame;
pub mod joint;

pub use error::*;
pub use frame::*;
pub use joint::*;
