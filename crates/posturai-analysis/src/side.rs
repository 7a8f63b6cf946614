//! Side selection - which lateral side of a joint triple to measure

use posturai_core::{BodyPart, JointObservation, NamedFrame, Side};
use serde::{Deserialize, Serialize};

/// Default minimum confidence for a joint to be usable
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.25;

/// Three body parts forming an angle at `vertex`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub proximal: BodyPart,
    pub vertex: BodyPart,
    pub distal: BodyPart,
}

impl JointTriple {
    pub fn new(proximal: BodyPart, vertex: BodyPart, distal: BodyPart) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }
}

/// The joints of one side that passed the confidence gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideSelection<'a> {
    pub side: Side,
    pub proximal: &'a JointObservation,
    pub vertex: &'a JointObservation,
    pub distal: &'a JointObservation,
}

fn usable_side<'a>(
    frame: &'a NamedFrame,
    triple: &JointTriple,
    side: Side,
    threshold: f64,
) -> Option<SideSelection<'a>> {
    let usable = |part: BodyPart| {
        frame
            .joint(part.on(side))
            .filter(|obs| obs.confidence > threshold)
    };

    Some(SideSelection {
        side,
        proximal: usable(triple.proximal)?,
        vertex: usable(triple.vertex)?,
        distal: usable(triple.distal)?,
    })
}

/// Pick the side to measure for this frame.
///
/// A side is usable when all three of its joints are present with
/// confidence strictly above `threshold`. Left always wins when both
/// sides are usable.
pub fn select_side<'a>(
    frame: &'a NamedFrame,
    triple: &JointTriple,
    threshold: f64,
) -> Option<SideSelection<'a>> {
    usable_side(frame, triple, Side::Left, threshold)
        .or_else(|| usable_side(frame, triple, Side::Right, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use posturai_core::{JointKey, JointName};
    use proptest::prelude::*;

    const LEG: JointTriple = JointTriple {
        proximal: BodyPart::Hip,
        vertex: BodyPart::Knee,
        distal: BodyPart::Ankle,
    };

    fn legs(left: f64, right: f64) -> NamedFrame {
        [
            (JointName::LeftHip, left),
            (JointName::LeftKnee, left),
            (JointName::LeftAnkle, left),
            (JointName::RightHip, right),
            (JointName::RightKnee, right),
            (JointName::RightAnkle, right),
        ]
        .iter()
        .map(|&(name, c)| JointObservation::new(name, 1.0, 1.0, c))
        .collect()
    }

    #[test]
    fn test_falls_back_to_right() {
        let frame = legs(0.1, 0.9);
        let selection = select_side(&frame, &LEG, 0.25).unwrap();
        assert_eq!(selection.side, Side::Right);
        assert_eq!(selection.vertex.name, JointKey::from(JointName::RightKnee));
    }

    #[test]
    fn test_no_side_usable() {
        assert!(select_side(&legs(0.1, 0.2), &LEG, 0.25).is_none());
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(select_side(&legs(0.25, 0.25), &LEG, 0.25).is_none());
    }

    #[test]
    fn test_missing_joint_disqualifies_side() {
        let frame: NamedFrame = legs(0.9, 0.8)
            .iter()
            .filter(|obs| obs.name != JointKey::from(JointName::LeftAnkle))
            .copied()
            .collect();
        let selection = select_side(&frame, &LEG, 0.25).unwrap();
        assert_eq!(selection.side, Side::Right);
    }

    proptest! {
        #[test]
        fn prop_left_preferred_when_both_usable(
            threshold in 0.0f64..0.9,
            left in 0.0f64..1.0,
            right in 0.0f64..1.0,
        ) {
            prop_assume!(left > threshold && right > threshold);
            let frame = legs(left, right);
            let selection = select_side(&frame, &LEG, threshold).unwrap();
            prop_assert_eq!(selection.side, Side::Left);
        }
    }
}
