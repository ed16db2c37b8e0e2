//! Angle helpers.
//!
//! All angles are in radians, counter-clockwise positive.

use std::f64::consts::PI;

/// Two times PI (full circle in radians).
const TWO_PI: f64 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use smriti::core::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-12);
/// assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Square of a value.
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_wraps() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(TWO_PI + 0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-TWO_PI - 0.5), -0.5, epsilon = 1e-12);
        assert!(normalize_angle(3.0 * PI).abs() - PI < 1e-9);
    }
}
