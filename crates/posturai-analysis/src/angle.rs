//! Joint angle calculation using the dot product

use posturai_core::Point2D;

/// Interior angle at `vertex` between the segments to `proximal` and
/// `distal`, in degrees within [0, 180].
///
/// Returns None when the angle is undefined: a segment of zero (or
/// vanishingly small) length, or non-finite coordinates.
pub fn joint_angle(proximal: Point2D, vertex: Point2D, distal: Point2D) -> Option<f64> {
    let v1 = proximal.sub(&vertex);
    let v2 = distal.sub(&vertex);

    let m1 = v1.length();
    let m2 = v2.length();
    let norm = m1 * m2;
    // Also rejects NaN lengths and products that underflow or overflow
    if !(m1 > 0.0 && m2 > 0.0 && norm.is_normal()) {
        return None;
    }

    // Floating-point overshoot can push the ratio just past ±1
    let cos = (v1.dot(&v2) / norm).clamp(-1.0, 1.0);
    let degrees = cos.acos().to_degrees();
    degrees.is_finite().then_some(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_straight_limb() {
        let angle = joint_angle(p(100.0, 50.0), p(100.0, 100.0), p(100.0, 150.0)).unwrap();
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5)).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_folded_limb() {
        let angle = joint_angle(p(10.0, 0.0), p(0.0, 0.0), p(20.0, 0.0)).unwrap();
        assert!(angle.abs() < 1e-9);
    }

    #[test]
    fn test_coincident_points_are_undefined() {
        assert_eq!(joint_angle(p(1.0, 1.0), p(1.0, 1.0), p(5.0, 2.0)), None);
        assert_eq!(joint_angle(p(5.0, 2.0), p(1.0, 1.0), p(1.0, 1.0)), None);
    }

    #[test]
    fn test_non_finite_coordinates_are_undefined() {
        assert_eq!(joint_angle(p(f64::NAN, 50.0), p(100.0, 100.0), p(100.0, 150.0)), None);
        assert_eq!(joint_angle(p(100.0, 50.0), p(100.0, f64::NAN), p(100.0, 150.0)), None);
        assert_eq!(
            joint_angle(p(f64::INFINITY, 50.0), p(100.0, 100.0), p(100.0, 150.0)),
            None
        );
    }

    #[test]
    fn test_vanishing_segments_are_undefined() {
        assert_eq!(joint_angle(p(1e-170, 0.0), p(0.0, 0.0), p(0.0, 1e-170)), None);
        assert_eq!(joint_angle(p(1e200, 0.0), p(0.0, 0.0), p(0.0, 1e200)), None);
    }

    proptest! {
        #[test]
        fn prop_symmetric_and_bounded(
            x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
            x2 in -500.0f64..500.0, y2 in -500.0f64..500.0,
            x3 in -500.0f64..500.0, y3 in -500.0f64..500.0,
        ) {
            let (a, b, c) = (p(x1, y1), p(x2, y2), p(x3, y3));
            prop_assume!(a.sub(&b).length() > 1e-6 && c.sub(&b).length() > 1e-6);

            let forward = joint_angle(a, b, c).unwrap();
            let backward = joint_angle(c, b, a).unwrap();
            prop_assert!((0.0..=180.0).contains(&forward));
            prop_assert!((forward - backward).abs() < 1e-9);
        }
    }
}
