//! Frame State - the joints observed in one video frame
//!
//! A NamedFrame is rebuilt every frame. Joints the estimator could not
//! locate are absent, never filled with placeholders.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{JointKey, JointName};

/// 2D position in pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to this point
    pub fn sub(&self, origin: &Point2D) -> Point2D {
        Point2D {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Exponential blend: `alpha` weights `self`, `1 - alpha` weights `previous`
    pub fn blend(&self, previous: &Point2D, alpha: f64) -> Point2D {
        Point2D {
            x: alpha * self.x + (1.0 - alpha) * previous.x,
            y: alpha * self.y + (1.0 - alpha) * previous.y,
        }
    }
}

/// A single estimator-reported landmark for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointObservation {
    pub name: JointKey,
    pub x: f64,
    pub y: f64,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
}

impl JointObservation {
    pub fn new(name: impl Into<JointKey>, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            confidence,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Copy of this observation moved to `position`
    pub fn with_position(&self, position: Point2D) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }
}

/// Mapping from joint key to its observation for the current frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedFrame {
    joints: BTreeMap<JointKey, JointObservation>,
}

impl NamedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an observation under its own name, replacing any previous entry
    pub fn insert(&mut self, observation: JointObservation) -> Option<JointObservation> {
        self.joints.insert(observation.name, observation)
    }

    pub fn contains(&self, key: JointKey) -> bool {
        self.joints.contains_key(&key)
    }

    /// Look up a canonical joint
    pub fn joint(&self, name: JointName) -> Option<&JointObservation> {
        self.joints.get(&JointKey::Canonical(name))
    }

    pub fn get(&self, key: &JointKey) -> Option<&JointObservation> {
        self.joints.get(key)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, JointKey, JointObservation> {
        self.joints.values()
    }

    /// Observations for canonical joints only
    pub fn canonical(&self) -> impl Iterator<Item = &JointObservation> {
        self.joints.values().filter(|obs| obs.name.is_canonical())
    }
}

impl FromIterator<JointObservation> for NamedFrame {
    fn from_iter<I: IntoIterator<Item = JointObservation>>(iter: I) -> Self {
        let mut frame = NamedFrame::new();
        for observation in iter {
            frame.insert(observation);
        }
        frame
    }
}

impl<'a> IntoIterator for &'a NamedFrame {
    type Item = &'a JointObservation;
    type IntoIter = btree_map::Values<'a, JointKey, JointObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.values()
    }
}
