//! Synthetic skeletons - side-view poses built from joint angles

use posturai_analysis::{FrameDimensions, RawJoint};
use posturai_core::JointName;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds a full 17-joint, side-view skeleton.
///
/// The thigh points straight up from the knee and the torso straight up
/// from the hip, so the knee angle is exactly the requested one and the
/// hip angle is 180°. Output is positional, in normalized coordinates,
/// the way a single-pose estimator reports it.
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    pub dims: FrameDimensions,
    /// Left knee position in pixels
    pub knee: (f64, f64),
    pub thigh: f64,
    pub shin: f64,
    pub torso: f64,
    /// Interior knee angle in degrees
    pub knee_angle: f64,
    pub left_confidence: f64,
    pub right_confidence: f64,
    /// Horizontal offset of the right side from the left
    pub right_offset: f64,
}

impl PoseBuilder {
    pub fn new(dims: FrameDimensions) -> Self {
        Self {
            dims,
            knee: (dims.width / 2.0, dims.height * 0.7),
            thigh: 80.0,
            shin: 80.0,
            torso: 120.0,
            knee_angle: 180.0,
            left_confidence: 0.9,
            right_confidence: 0.9,
            right_offset: 12.0,
        }
    }

    pub fn knee_angle(mut self, degrees: f64) -> Self {
        self.knee_angle = degrees;
        self
    }

    pub fn confidence(mut self, left: f64, right: f64) -> Self {
        self.left_confidence = left;
        self.right_confidence = right;
        self
    }

    /// Pixel position of every canonical joint, with its confidence
    pub fn joints(&self) -> Vec<(JointName, f64, f64, f64)> {
        let (kx, ky) = self.knee;
        let theta = self.knee_angle.to_radians();

        let hip = (kx, ky - self.thigh);
        let ankle = (kx + self.shin * theta.sin(), ky - self.shin * theta.cos());
        let shoulder = (hip.0, hip.1 - self.torso);
        let elbow = (shoulder.0, shoulder.1 + self.torso * 0.45);
        let wrist = (elbow.0, elbow.1 + self.torso * 0.4);
        let ear = (shoulder.0, shoulder.1 - 35.0);
        let eye = (ear.0 + 10.0, ear.1 - 4.0);
        let nose = (eye.0 + 8.0, eye.1 + 6.0);

        let (lc, rc) = (self.left_confidence, self.right_confidence);
        let r = self.right_offset;
        let head = lc.max(rc);

        use JointName::*;
        vec![
            (Nose, nose.0, nose.1, head),
            (LeftEye, eye.0, eye.1, lc),
            (RightEye, eye.0 + r, eye.1, rc),
            (LeftEar, ear.0, ear.1, lc),
            (RightEar, ear.0 + r, ear.1, rc),
            (LeftShoulder, shoulder.0, shoulder.1, lc),
            (RightShoulder, shoulder.0 + r, shoulder.1, rc),
            (LeftElbow, elbow.0, elbow.1, lc),
            (RightElbow, elbow.0 + r, elbow.1, rc),
            (LeftWrist, wrist.0, wrist.1, lc),
            (RightWrist, wrist.0 + r, wrist.1, rc),
            (LeftHip, hip.0, hip.1, lc),
            (RightHip, hip.0 + r, hip.1, rc),
            (LeftKnee, kx, ky, lc),
            (RightKnee, kx + r, ky, rc),
            (LeftAnkle, ankle.0, ankle.1, lc),
            (RightAnkle, ankle.0 + r, ankle.1, rc),
        ]
    }

    /// Positional raw joints in normalized [0, 1] coordinates
    pub fn build(&self) -> Vec<RawJoint> {
        self.joints()
            .into_iter()
            .map(|(_, x, y, c)| RawJoint::positional(x / self.dims.width, y / self.dims.height, c))
            .collect()
    }
}

/// Uniform positional noise, seeded for reproducibility
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
    /// Maximum displacement in pixels
    amplitude: f64,
}

impl Jitter {
    pub fn new(seed: u64, amplitude: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude,
        }
    }

    /// Displace every joint by up to `amplitude` pixels on each axis
    pub fn apply(&mut self, joints: &[RawJoint], dims: FrameDimensions) -> Vec<RawJoint> {
        joints
            .iter()
            .map(|joint| {
                let dx = self.rng.gen_range(-self.amplitude..=self.amplitude) / dims.width;
                let dy = self.rng.gen_range(-self.amplitude..=self.amplitude) / dims.height;
                RawJoint {
                    x: joint.x + dx,
                    y: joint.y + dy,
                    ..joint.clone()
                }
            })
            .collect()
    }
}
