//! Interface for geometric feature-set matchers.
//!
//! The evaluation engine only depends on this trait, so any matcher
//! (RANSAC, a scripted test double, ...) can be plugged in.

use crate::features::InterestPoint;

use super::SetMatch;

/// Trait for feature-set registration algorithms.
///
/// # Example
///
/// ```ignore
/// use smriti::matching::{FeatureSetMatcher, RansacFeatureSetMatcher};
///
/// fn estimate<M: FeatureSetMatcher>(
///     matcher: &M,
///     reference: &[InterestPoint],
///     query: &[InterestPoint],
/// ) -> Option<Pose2D> {
///     let result = matcher.match_sets(reference, query);
///     result.has_correspondences().then_some(result.transform)
/// }
/// ```
pub trait FeatureSetMatcher: Send + Sync {
    /// Register `query` against `reference`.
    ///
    /// # Returns
    /// The transform mapping query coordinates into the reference frame, the
    /// inlier correspondences supporting it and the residual of the fit.
    /// An empty correspondence set means no transform is available.
    fn match_sets(&self, reference: &[InterestPoint], query: &[InterestPoint]) -> SetMatch;

    /// Get the name of this matcher for logging
    fn name(&self) -> &str;
}
