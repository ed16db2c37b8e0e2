//! Matcher result types.

use crate::core::Pose2D;

/// A pairing of one reference feature with one query feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Correspondence {
    /// Index into the reference set.
    pub reference: usize,
    /// Index into the query set.
    pub query: usize,
}

/// Result of a feature-set registration.
#[derive(Clone, Debug)]
pub struct SetMatch {
    /// Transform mapping query coordinates into the reference frame.
    /// Meaningless when `correspondences` is empty.
    pub transform: Pose2D,
    /// Inlier correspondences supporting `transform`.
    pub correspondences: Vec<Correspondence>,
    /// Robust fit residual. Lower is better.
    /// `f64::INFINITY` when no hypothesis could be scored.
    pub residual: f64,
}

impl SetMatch {
    /// Create a new match result.
    pub fn new(transform: Pose2D, correspondences: Vec<Correspondence>, residual: f64) -> Self {
        Self {
            transform,
            correspondences,
            residual,
        }
    }

    /// No transform could be estimated.
    pub fn failed() -> Self {
        Self {
            transform: Pose2D::identity(),
            correspondences: Vec::new(),
            residual: f64::INFINITY,
        }
    }

    /// Number of inlier correspondences.
    #[inline]
    pub fn inliers(&self) -> usize {
        self.correspondences.len()
    }

    /// Whether a transform is available.
    #[inline]
    pub fn has_correspondences(&self) -> bool {
        !self.correspondences.is_empty()
    }
}
