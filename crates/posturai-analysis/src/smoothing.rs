//! Temporal smoothing - per-joint exponential filter across frames

use posturai_core::NamedFrame;

/// Default weight of the newest observation
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.6;

/// Exponential smoother over NamedFrames.
///
/// Holds at most one previous frame. Joints missing from the current
/// frame are dropped from the output rather than held over, so that
/// downstream confidence gating sees the absence.
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    /// Weight of the new observation, in (0, 1]
    alpha: f64,

    /// Last smoothed frame (None before the first frame of a session)
    state: Option<NamedFrame>,
}

impl TemporalSmoother {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: None }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Previous smoothed frame, if any
    pub fn state(&self) -> Option<&NamedFrame> {
        self.state.as_ref()
    }

    /// Forget all history; the next frame passes through verbatim
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Smooth `current` against the retained frame and retain the result
    pub fn smooth(&mut self, current: &NamedFrame) -> NamedFrame {
        let smoothed: NamedFrame = match &self.state {
            None => current.clone(),
            Some(previous) => current
                .iter()
                .map(|obs| match previous.get(&obs.name) {
                    Some(prev) => obs.with_position(obs.position().blend(&prev.position(), self.alpha)),
                    None => *obs,
                })
                .collect(),
        };

        self.state = Some(smoothed.clone());
        smoothed
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posturai_core::{JointName, JointObservation};
    use proptest::prelude::*;

    fn frame(joints: &[(JointName, f64, f64, f64)]) -> NamedFrame {
        joints
            .iter()
            .map(|&(name, x, y, c)| JointObservation::new(name, x, y, c))
            .collect()
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut smoother = TemporalSmoother::new(0.3);
        let input = frame(&[(JointName::LeftKnee, 100.0, 200.0, 0.9)]);

        assert!(smoother.state().is_none());
        assert_eq!(smoother.smooth(&input), input);
        assert_eq!(smoother.state(), Some(&input));
    }

    #[test]
    fn test_blends_with_previous() {
        let mut smoother = TemporalSmoother::new(0.6);
        smoother.smooth(&frame(&[(JointName::LeftKnee, 0.0, 0.0, 0.9)]));
        let out = smoother.smooth(&frame(&[(JointName::LeftKnee, 100.0, 50.0, 0.4)]));

        let knee = out.joint(JointName::LeftKnee).unwrap();
        assert!((knee.x - 60.0).abs() < 1e-9);
        assert!((knee.y - 30.0).abs() < 1e-9);
        // Confidence is taken from the new observation
        assert_eq!(knee.confidence, 0.4);
    }

    #[test]
    fn test_absent_joints_are_dropped() {
        let mut smoother = TemporalSmoother::default();
        smoother.smooth(&frame(&[
            (JointName::LeftKnee, 0.0, 0.0, 0.9),
            (JointName::LeftHip, 0.0, 0.0, 0.9),
        ]));
        let out = smoother.smooth(&frame(&[(JointName::LeftKnee, 10.0, 10.0, 0.9)]));

        assert_eq!(out.len(), 1);
        assert!(out.joint(JointName::LeftHip).is_none());
        assert_eq!(smoother.state().map(NamedFrame::len), Some(1));
    }

    #[test]
    fn test_new_joint_is_not_smoothed() {
        let mut smoother = TemporalSmoother::new(0.5);
        smoother.smooth(&frame(&[(JointName::LeftKnee, 0.0, 0.0, 0.9)]));
        let out = smoother.smooth(&frame(&[
            (JointName::LeftKnee, 10.0, 10.0, 0.9),
            (JointName::LeftAnkle, 80.0, 90.0, 0.9),
        ]));

        let ankle = out.joint(JointName::LeftAnkle).unwrap();
        assert_eq!((ankle.x, ankle.y), (80.0, 90.0));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = TemporalSmoother::new(0.5);
        smoother.smooth(&frame(&[(JointName::Nose, 0.0, 0.0, 0.9)]));
        smoother.reset();

        let input = frame(&[(JointName::Nose, 100.0, 100.0, 0.9)]);
        assert_eq!(smoother.smooth(&input), input);
    }

    proptest! {
        #[test]
        fn prop_alpha_one_is_identity(
            x0 in -1000.0f64..1000.0, y0 in -1000.0f64..1000.0,
            x1 in -1000.0f64..1000.0, y1 in -1000.0f64..1000.0,
        ) {
            let mut smoother = TemporalSmoother::new(1.0);
            smoother.smooth(&frame(&[(JointName::RightWrist, x0, y0, 0.5)]));
            let input = frame(&[(JointName::RightWrist, x1, y1, 0.7)]);
            prop_assert_eq!(smoother.smooth(&input), input);
        }

        #[test]
        fn prop_no_prior_state_is_identity(
            alpha in 0.01f64..=1.0,
            x in -1000.0f64..1000.0, y in -1000.0f64..1000.0,
        ) {
            let mut smoother = TemporalSmoother::new(alpha);
            let input = frame(&[(JointName::LeftShoulder, x, y, 0.9)]);
            prop_assert_eq!(smoother.smooth(&input), input);
        }
    }
}
