//! Angle arithmetic and planar rotation helpers.
//!
//! All headings in the crate are stored normalized to (−π, π].

use std::f64::consts::{PI, TAU};

/// Normalize angle to (−π, π].
///
/// # Example
/// ```
/// use drishti::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Shortest signed angular difference from `a` to `b`.
///
/// Returns the angle that must be added to `a` to reach `b`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Signed rotation from `previous` to `current` along the shorter arc.
///
/// The magnitude is the shortest angular distance; the sign is positive when
/// turning counter-clockwise by that magnitude from `previous` lands on
/// `current`. Crossing the ±π seam keeps the sign of the short arc.
pub fn signed_rotation(previous: f64, current: f64) -> f64 {
    let magnitude = PI - ((previous - current).abs().rem_euclid(TAU) - PI).abs();
    if normalize_angle(previous + magnitude - current).abs() < 1e-5 {
        magnitude
    } else {
        -magnitude
    }
}

/// Rotate a 2D vector by `angle` radians (counter-clockwise).
#[inline]
pub fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin_a, cos_a) = angle.sin_cos();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_angle_range() {
        for i in -40..=40 {
            let a = normalize_angle(i as f64 * 0.37);
            assert!(a > -PI && a <= PI, "angle {} out of range", a);
        }
    }

    #[test]
    fn test_normalize_angle_boundaries() {
        assert_relative_eq!(normalize_angle(PI), PI);
        assert_relative_eq!(normalize_angle(-PI), PI);
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle_just_beyond_pi() {
        let result = normalize_angle(PI + 0.001);
        assert_relative_eq!(result, -PI + 0.001, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_diff_crossing_seam() {
        assert_relative_eq!(angle_diff(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-9);
        assert_relative_eq!(angle_diff(-PI + 0.1, PI - 0.1), -0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_signed_rotation_simple() {
        assert_relative_eq!(signed_rotation(0.0, 0.3), 0.3, epsilon = 1e-9);
        assert_relative_eq!(signed_rotation(0.3, 0.0), -0.3, epsilon = 1e-9);
        assert_relative_eq!(signed_rotation(1.0, 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_rotation_across_seam() {
        // Counter-clockwise through +π stays positive
        assert_relative_eq!(signed_rotation(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-9);
        // Clockwise through -π stays negative
        assert_relative_eq!(signed_rotation(-PI + 0.1, PI - 0.1), -0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (x, y) = rotate(1.0, 0.0, FRAC_PI_2);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_zero_is_exact() {
        let (x, y) = rotate(3.25, -1.5, 0.0);
        assert_eq!(x, 3.25);
        assert_eq!(y, -1.5);
    }
}
