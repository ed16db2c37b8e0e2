//! Pairwise geometric verification.
//!
//! Wraps a [`FeatureSetMatcher`] and times every call.

use std::time::Duration;

use crate::core::Pose2D;
use crate::features::InterestPoint;
use crate::matching::FeatureSetMatcher;

use super::timing::timed;

/// Result of verifying one (candidate, query) pair.
#[derive(Clone, Debug)]
pub struct Verification {
    /// Estimated query pose in the candidate's (world) frame.
    /// `None` when the matcher found no correspondences.
    pub relative_pose: Option<Pose2D>,

    /// Number of inlier correspondences.
    pub inliers: usize,

    /// Matcher residual. Lower is better.
    pub residual: f64,

    /// Wall-clock time of the matcher call.
    pub elapsed: Duration,
}

/// Verifies candidate scans against a query with a geometric matcher.
///
/// Deterministic as long as the wrapped matcher is.
pub struct PairwiseVerifier<M> {
    /// Matcher doing the actual registration
    matcher: M,
}

impl<M: FeatureSetMatcher> PairwiseVerifier<M> {
    /// Create a new verifier
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// Wrapped matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Register `query` (sensor frame) against `reference` (world frame).
    ///
    /// Zero correspondences is a normal outcome and yields no pose.
    pub fn verify(&self, reference: &[InterestPoint], query: &[InterestPoint]) -> Verification {
        let (result, elapsed) = timed(|| self.matcher.match_sets(reference, query));

        Verification {
            relative_pose: result.has_correspondences().then_some(result.transform),
            inliers: result.inliers(),
            residual: result.residual,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Correspondence, SetMatch};

    struct FixedMatcher(usize);

    impl FeatureSetMatcher for FixedMatcher {
        fn match_sets(&self, _reference: &[InterestPoint], _query: &[InterestPoint]) -> SetMatch {
            let correspondences = (0..self.0)
                .map(|i| Correspondence {
                    reference: i,
                    query: i,
                })
                .collect();
            SetMatch::new(Pose2D::new(1.0, 2.0, 0.0), correspondences, 0.5)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_verify_with_correspondences() {
        let verification = PairwiseVerifier::new(FixedMatcher(4)).verify(&[], &[]);

        assert_eq!(verification.inliers, 4);
        assert_eq!(verification.relative_pose, Some(Pose2D::new(1.0, 2.0, 0.0)));
        assert_eq!(verification.residual, 0.5);
    }

    #[test]
    fn test_verify_without_correspondences() {
        let verification = PairwiseVerifier::new(FixedMatcher(0)).verify(&[], &[]);

        assert_eq!(verification.inliers, 0);
        assert!(verification.relative_pose.is_none());
    }
}
