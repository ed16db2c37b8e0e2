use crate::core::Pose2D;

use super::descriptor::Descriptor;

/// A detected feature: pose, detection scale and descriptor.
///
/// Dataset features are stored in the world frame.
#[derive(Clone, Debug, PartialEq)]
pub struct InterestPoint {
    /// Feature pose.
    pub pose: Pose2D,
    /// Detection scale in meters.
    pub scale: f64,
    /// Appearance descriptor.
    pub descriptor: Descriptor,
}

impl InterestPoint {
    /// Create a new interest point.
    pub fn new(pose: Pose2D, scale: f64, descriptor: Descriptor) -> Self {
        Self {
            pose,
            scale,
            descriptor,
        }
    }

    /// Copy of this point expressed in `frame` (`frame ⊖ pose`).
    pub fn in_frame(&self, frame: Pose2D) -> InterestPoint {
        InterestPoint {
            pose: frame.ominus(self.pose),
            scale: self.scale,
            descriptor: self.descriptor.clone(),
        }
    }

    /// Position as an (x, y) pair.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.pose.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{DescriptorKind, HistogramDistance};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_in_frame_returns_copy() {
        let descriptor = Descriptor::new(DescriptorKind::BetaGrid, vec![1.0], HistogramDistance::Chi2);
        let world = InterestPoint::new(Pose2D::new(1.0, 1.0, 0.0), 0.2, descriptor);

        let local = world.in_frame(Pose2D::new(1.0, 0.0, FRAC_PI_2));

        assert_relative_eq!(local.pose.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(local.pose.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(local.pose.theta, -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(world.pose.x, 1.0);
        assert_eq!(local.descriptor, world.descriptor);
    }
}
