//! Joint identifiers - the 17 canonical body landmarks
//!
//! The canonical order is the keypoint order single-person estimators
//! emit when they report joints positionally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{JointError, JointResult};

/// Canonical joint identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    /// All joints in canonical estimator order
    pub fn all() -> &'static [JointName] {
        &[
            JointName::Nose,
            JointName::LeftEye,
            JointName::RightEye,
            JointName::LeftEar,
            JointName::RightEar,
            JointName::LeftShoulder,
            JointName::RightShoulder,
            JointName::LeftElbow,
            JointName::RightElbow,
            JointName::LeftWrist,
            JointName::RightWrist,
            JointName::LeftHip,
            JointName::RightHip,
            JointName::LeftKnee,
            JointName::RightKnee,
            JointName::LeftAnkle,
            JointName::RightAnkle,
        ]
    }

    /// Number of canonical joints
    pub fn count() -> usize {
        17
    }

    /// Joint at a position of the canonical order
    pub fn from_index(index: usize) -> Option<JointName> {
        Self::all().get(index).copied()
    }

    /// snake_case identifier, as estimators label joints
    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::Nose => "nose",
            JointName::LeftEye => "left_eye",
            JointName::RightEye => "right_eye",
            JointName::LeftEar => "left_ear",
            JointName::RightEar => "right_ear",
            JointName::LeftShoulder => "left_shoulder",
            JointName::RightShoulder => "right_shoulder",
            JointName::LeftElbow => "left_elbow",
            JointName::RightElbow => "right_elbow",
            JointName::LeftWrist => "left_wrist",
            JointName::RightWrist => "right_wrist",
            JointName::LeftHip => "left_hip",
            JointName::RightHip => "right_hip",
            JointName::LeftKnee => "left_knee",
            JointName::RightKnee => "right_knee",
            JointName::LeftAnkle => "left_ankle",
            JointName::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointName {
    type Err = JointError;

    fn from_str(s: &str) -> JointResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|joint| joint.as_str() == s)
            .ok_or_else(|| JointError::UnknownName(s.to_string()))
    }
}

/// Key of an entry in a NamedFrame.
///
/// Entries the estimator reports beyond the canonical order keep their
/// position as `unknown_<index>`. They are carried for diagnostics and
/// never take part in rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointKey {
    Canonical(JointName),
    Unknown(usize),
}

impl JointKey {
    pub fn canonical(&self) -> Option<JointName> {
        match self {
            JointKey::Canonical(name) => Some(*name),
            JointKey::Unknown(_) => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, JointKey::Canonical(_))
    }
}

impl From<JointName> for JointKey {
    fn from(name: JointName) -> Self {
        JointKey::Canonical(name)
    }
}

impl fmt::Display for JointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointKey::Canonical(name) => f.write_str(name.as_str()),
            JointKey::Unknown(index) => write!(f, "unknown_{}", index),
        }
    }
}

impl FromStr for JointKey {
    type Err = JointError;

    fn from_str(s: &str) -> JointResult<Self> {
        if let Some(index) = s.strip_prefix("unknown_") {
            return index
                .parse()
                .map(JointKey::Unknown)
                .map_err(|_| JointError::MalformedKey(s.to_string()));
        }
        s.parse().map(JointKey::Canonical)
    }
}

impl Serialize for JointKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JointKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Lateral side of the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Bilateral body part, resolved to a concrete joint once a side is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Eye,
    Ear,
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

impl BodyPart {
    /// The joint for this part on the given side
    pub fn on(self, side: Side) -> JointName {
        use BodyPart::*;
        use JointName::*;

        match (self, side) {
            (Eye, Side::Left) => LeftEye,
            (Eye, Side::Right) => RightEye,
            (Ear, Side::Left) => LeftEar,
            (Ear, Side::Right) => RightEar,
            (Shoulder, Side::Left) => LeftShoulder,
            (Shoulder, Side::Right) => RightShoulder,
            (Elbow, Side::Left) => LeftElbow,
            (Elbow, Side::Right) => RightElbow,
            (Wrist, Side::Left) => LeftWrist,
            (Wrist, Side::Right) => RightWrist,
            (Hip, Side::Left) => LeftHip,
            (Hip, Side::Right) => RightHip,
            (Knee, Side::Left) => LeftKnee,
            (Knee, Side::Right) => RightKnee,
            (Ankle, Side::Left) => LeftAnkle,
            (Ankle, Side::Right) => RightAnkle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        assert_eq!(JointName::all().len(), JointName::count());
        assert_eq!(JointName::from_index(0), Some(JointName::Nose));
        assert_eq!(JointName::from_index(13), Some(JointName::LeftKnee));
        assert_eq!(JointName::from_index(16), Some(JointName::RightAnkle));
        assert_eq!(JointName::from_index(17), None);
    }

    #[test]
    fn test_name_round_trip() {
        for joint in JointName::all() {
            assert_eq!(joint.as_str().parse::<JointName>(), Ok(*joint));
        }
        assert!("left_toe".parse::<JointName>().is_err());
    }

    #[test]
    fn test_unknown_key_display() {
        assert_eq!(JointKey::Unknown(21).to_string(), "unknown_21");
        assert_eq!("unknown_21".parse::<JointKey>(), Ok(JointKey::Unknown(21)));
        assert!(matches!(
            "unknown_x".parse::<JointKey>(),
            Err(JointError::MalformedKey(_))
        ));
        assert!(!JointKey::Unknown(3).is_canonical());
    }

    #[test]
    fn test_key_serde_as_string() {
        let json = serde_json::to_string(&JointKey::from(JointName::LeftHip)).unwrap();
        assert_eq!(json, "\"left_hip\"");

        let back: JointKey = serde_json::from_str("\"unknown_4\"").unwrap();
        assert_eq!(back, JointKey::Unknown(4));
    }

    #[test]
    fn test_body_part_sides() {
        assert_eq!(BodyPart::Knee.on(Side::Left), JointName::LeftKnee);
        assert_eq!(BodyPart::Knee.on(Side::Right), JointName::RightKnee);
        assert_eq!(BodyPart::Shoulder.on(Side::Right), JointName::RightShoulder);
    }
}
