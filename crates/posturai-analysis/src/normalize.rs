//! Keypoint normalization - raw estimator output to a NamedFrame

use posturai_core::{JointKey, JointName, JointObservation, NamedFrame};
use serde::{Deserialize, Serialize};

/// One joint entry as an estimator reports it.
///
/// Entries may carry a name or rely on their position in the canonical
/// order. Coordinates may be normalized to [0, 1] or already in pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawJoint {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default, alias = "score")]
    pub confidence: Option<f64>,
}

impl RawJoint {
    /// Positional entry with no label
    pub fn positional(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            name: None,
            x,
            y,
            confidence: Some(confidence),
        }
    }

    /// Entry labeled with a joint name
    pub fn named(name: impl Into<String>, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            name: Some(name.into()),
            x,
            y,
            confidence: Some(confidence),
        }
    }
}

/// Frame size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: f64,
    pub height: f64,
}

impl FrameDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

fn is_normalized(x: f64, y: f64) -> bool {
    (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)
}

/// Map raw estimator joints to a NamedFrame in pixel space.
///
/// Names resolve as: a valid supplied label, else the canonical joint at
/// the entry's index, else `unknown_<index>`. A canonical name already
/// taken by an earlier entry also falls back to `unknown_<index>`, so no
/// entry is ever dropped.
pub fn normalize_keypoints(raw: &[RawJoint], dims: FrameDimensions) -> NamedFrame {
    let mut frame = NamedFrame::new();

    for (index, entry) in raw.iter().enumerate() {
        let resolved = entry
            .name
            .as_deref()
            .and_then(|name| name.parse::<JointName>().ok())
            .or_else(|| JointName::from_index(index))
            .map(JointKey::Canonical)
            .filter(|key| !frame.contains(*key))
            .unwrap_or(JointKey::Unknown(index));

        let (x, y) = if is_normalized(entry.x, entry.y) {
            (entry.x * dims.width, entry.y * dims.height)
        } else {
            (entry.x, entry.y)
        };

        frame.insert(JointObservation::new(
            resolved,
            x,
            y,
            entry.confidence.unwrap_or(0.0),
        ));
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: FrameDimensions = FrameDimensions {
        width: 640.0,
        height: 480.0,
    };

    #[test]
    fn test_empty_input() {
        assert!(normalize_keypoints(&[], DIMS).is_empty());
    }

    #[test]
    fn test_positional_entries_use_canonical_order() {
        let raw: Vec<RawJoint> = (0..17)
            .map(|i| RawJoint::positional(10.0 + i as f64, 20.0, 0.8))
            .collect();
        let frame = normalize_keypoints(&raw, DIMS);

        assert_eq!(frame.len(), 17);
        let knee = frame.joint(JointName::LeftKnee).unwrap();
        assert_eq!(knee.x, 23.0);
        assert_eq!(knee.confidence, 0.8);
    }

    #[test]
    fn test_normalized_coordinates_are_scaled() {
        let raw = vec![RawJoint::named("nose", 0.5, 0.25, 0.9)];
        let frame = normalize_keypoints(&raw, DIMS);

        let nose = frame.joint(JointName::Nose).unwrap();
        assert!((nose.x - 320.0).abs() < 1e-9);
        assert!((nose.y - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_coordinates_pass_through() {
        // Only one coordinate inside [0, 1]: already pixels
        let raw = vec![RawJoint::named("nose", 0.5, 200.0, 0.9)];
        let frame = normalize_keypoints(&raw, DIMS);

        let nose = frame.joint(JointName::Nose).unwrap();
        assert_eq!((nose.x, nose.y), (0.5, 200.0));
    }

    #[test]
    fn test_label_wins_over_position() {
        let raw = vec![RawJoint::named("right_ankle", 100.0, 100.0, 0.7)];
        let frame = normalize_keypoints(&raw, DIMS);

        assert!(frame.joint(JointName::RightAnkle).is_some());
        assert!(frame.joint(JointName::Nose).is_none());
    }

    #[test]
    fn test_invalid_label_falls_back_to_index() {
        let raw = vec![
            RawJoint::positional(5.0, 5.0, 0.5),
            RawJoint::named("left_toe", 50.0, 50.0, 0.5),
        ];
        let frame = normalize_keypoints(&raw, DIMS);

        assert_eq!(frame.joint(JointName::LeftEye).unwrap().x, 50.0);
    }

    #[test]
    fn test_extra_entries_become_unknown() {
        let mut raw: Vec<RawJoint> = (0..17)
            .map(|_| RawJoint::positional(10.0, 10.0, 0.5))
            .collect();
        raw.push(RawJoint::positional(42.0, 43.0, 0.3));

        let frame = normalize_keypoints(&raw, DIMS);
        assert_eq!(frame.len(), 18);
        let extra = frame.get(&JointKey::Unknown(17)).unwrap();
        assert_eq!((extra.x, extra.y), (42.0, 43.0));
        assert_eq!(frame.canonical().count(), 17);
    }

    #[test]
    fn test_duplicate_label_is_kept_as_unknown() {
        let raw = vec![
            RawJoint::named("left_hip", 100.0, 100.0, 0.9),
            RawJoint::named("left_hip", 200.0, 200.0, 0.9),
        ];
        let frame = normalize_keypoints(&raw, DIMS);

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.joint(JointName::LeftHip).unwrap().x, 100.0);
        assert_eq!(frame.get(&JointKey::Unknown(1)).unwrap().x, 200.0);
    }

    #[test]
    fn test_missing_confidence_defaults_to_zero() {
        let raw: Vec<RawJoint> =
            serde_json::from_str(r#"[{"x": 300.0, "y": 200.0}, {"x": 1.0, "y": 2.0, "score": 0.4}]"#)
                .unwrap();
        let frame = normalize_keypoints(&raw, DIMS);

        assert_eq!(frame.joint(JointName::Nose).unwrap().confidence, 0.0);
        assert_eq!(frame.joint(JointName::LeftEye).unwrap().confidence, 0.4);
    }
}
