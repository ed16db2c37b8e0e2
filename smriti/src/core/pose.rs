//! 2D pose type for scan and feature poses.
//!
//! Frames follow ROS REP-103: X forward, Y left, counter-clockwise positive
//! rotation.

use serde::{Deserialize, Serialize};

use super::math::{normalize_angle, sq};

/// A 2D pose: position in meters and heading in radians.
///
/// # Composition
///
/// ```
/// use smriti::core::Pose2D;
/// use std::f64::consts::FRAC_PI_2;
///
/// let robot = Pose2D::new(1.0, 0.0, FRAC_PI_2);
/// let ahead = Pose2D::new(1.0, 0.0, 0.0);
/// let world = robot.compose(ahead);
/// assert!((world.x - 1.0).abs() < 1e-9);
/// assert!((world.y - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f64,
    /// Y position in meters.
    pub y: f64,
    /// Heading in radians, [-π, π).
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose. Theta is normalized to [-π, π).
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Identity pose (origin, facing +X).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Position as an (x, y) pair.
    #[inline]
    pub fn position(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Transform a point from this pose's local frame to the parent frame.
    #[inline]
    pub fn transform_point(self, point: (f64, f64)) -> (f64, f64) {
        let (sin, cos) = self.theta.sin_cos();
        (
            self.x + point.0 * cos - point.1 * sin,
            self.y + point.0 * sin + point.1 * cos,
        )
    }

    /// Compose this pose with another: apply `other` in `self`'s frame.
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let (x, y) = self.transform_point(other.position());
        Self::new(x, y, self.theta + other.theta)
    }

    /// Inverse transform.
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// Express `other` in this pose's frame (inverse-compose, `self ⊖ other`).
    ///
    /// `self.compose(self.ominus(other)) ≈ other`
    #[inline]
    pub fn ominus(self, other: Pose2D) -> Self {
        self.inverse().compose(other)
    }

    /// Component-wise difference with the heading difference normalized.
    ///
    /// This is the deviation used when comparing an estimated pose against
    /// ground truth; it is not a relative transform.
    #[inline]
    pub fn difference(self, other: Pose2D) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.theta - other.theta)
    }

    /// Squared Euclidean norm of the position part.
    #[inline]
    pub fn squared_norm(self) -> f64 {
        sq(self.x) + sq(self.y)
    }

    /// Euclidean distance between positions.
    #[inline]
    pub fn distance(self, other: Pose2D) -> f64 {
        self.difference(other).squared_norm().sqrt()
    }
}
