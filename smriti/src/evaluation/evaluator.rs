//! Per-query candidate verification.
//!
//! For one query scan, verifies its ranked candidates against the query's
//! sensor-frame features and records one [`CandidateOutcome`] per scan of
//! the dataset.

use std::time::Duration;

use crate::core::Pose2D;
use crate::dataset::ScanStore;
use crate::error::{Result, SmritiError};
use crate::features::InterestPoint;
use crate::matching::FeatureSetMatcher;

use super::config::EvaluationConfig;
use super::verifier::PairwiseVerifier;

/// Squared deviation of an estimated pose from ground truth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseError {
    /// Squared position error (m²).
    pub linear_sq: f64,
    /// Squared heading error (rad²), heading difference normalized.
    pub angular_sq: f64,
}

impl PoseError {
    /// Error of `estimate` with respect to `truth`.
    pub fn between(estimate: Pose2D, truth: Pose2D) -> Self {
        let delta = truth.difference(estimate);
        Self {
            linear_sq: delta.squared_norm(),
            angular_sq: delta.theta * delta.theta,
        }
    }

    /// Combined squared error used to rank candidates.
    #[inline]
    pub fn total(&self) -> f64 {
        self.linear_sq + self.angular_sq
    }

    /// Combined error magnitude, `sqrt(linear² + angular²)`.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.total().sqrt()
    }

    /// Whether both components are within the given squared tolerances.
    #[inline]
    pub fn within(&self, linear_sq: f64, angular_sq: f64) -> bool {
        self.linear_sq <= linear_sq && self.angular_sq <= angular_sq
    }
}

/// Score of a verified candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateScore {
    /// Matcher residual.
    pub residual: f64,
    /// Inlier correspondences.
    pub inliers: usize,
    /// Pose error. `None` when no correspondences were found.
    pub error: Option<PoseError>,
}

/// What happened to one scan for a given query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CandidateOutcome {
    /// Inside the local-skip window; never verified, never counted.
    Excluded,
    /// Not among the examined neighbour-table entries.
    NotAttempted,
    /// Verified against the query.
    Verified(CandidateScore),
}

impl CandidateOutcome {
    /// Is this scan inside the local-skip window?
    #[inline]
    pub fn is_excluded(&self) -> bool {
        matches!(self, CandidateOutcome::Excluded)
    }

    /// Inlier count; zero when not verified.
    #[inline]
    pub fn inliers(&self) -> usize {
        match self {
            CandidateOutcome::Verified(score) => score.inliers,
            _ => 0,
        }
    }

    /// Score, if verified.
    #[inline]
    pub fn score(&self) -> Option<&CandidateScore> {
        match self {
            CandidateOutcome::Verified(score) => Some(score),
            _ => None,
        }
    }
}

/// Everything the classifier needs about one query.
#[derive(Clone, Debug)]
pub struct QueryResults {
    /// Query scan id.
    pub query: usize,
    /// A non-excluded scan lies within twice the error tolerances of the
    /// query's ground truth.
    pub existing: bool,
    /// One outcome per scan id of the dataset.
    pub outcomes: Vec<CandidateOutcome>,
    /// Time spent in the matcher for this query.
    pub verification_time: Duration,
}

impl QueryResults {
    /// Number of verified candidates.
    pub fn attempted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.score().is_some()).count()
    }
}

/// Verifies every query's candidates against ground truth.
pub struct MatchEvaluator<'a, M> {
    store: &'a ScanStore,
    verifier: PairwiseVerifier<M>,
    config: EvaluationConfig,
}

impl<'a, M: FeatureSetMatcher> MatchEvaluator<'a, M> {
    /// Create a new evaluator over `store`.
    pub fn new(store: &'a ScanStore, verifier: PairwiseVerifier<M>, config: EvaluationConfig) -> Self {
        Self {
            store,
            verifier,
            config,
        }
    }

    /// Evaluation configuration.
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Scan store under evaluation.
    pub fn store(&self) -> &'a ScanStore {
        self.store
    }

    /// Whether `candidate` falls inside the local-skip window of `query`.
    ///
    /// This is the only place the window is decided; verification, the
    /// existence check and classification all go through it.
    #[inline]
    pub fn is_excluded(&self, query: usize, candidate: usize) -> bool {
        query.abs_diff(candidate) < self.config.local_skip
    }

    /// The query's features re-expressed in its own sensor frame.
    pub fn query_features(&self, query: usize) -> Result<Vec<InterestPoint>> {
        let record = self
            .store
            .get(query)
            .ok_or(SmritiError::ScanOutOfRange(query))?;
        Ok(record.local_features())
    }

    /// Whether some non-excluded scan is close enough to the query's ground
    /// truth to count as a true loop: squared linear error below
    /// `2·linTh²` and squared angular error below `2·angTh²`.
    pub fn loop_exists(&self, query: usize) -> Result<bool> {
        let truth = self
            .store
            .get(query)
            .ok_or(SmritiError::ScanOutOfRange(query))?
            .ground_truth;
        let linear_limit = 2.0 * self.config.linear_threshold_sq();
        let angular_limit = 2.0 * self.config.angular_threshold_sq();

        Ok(self.store.poses().enumerate().any(|(i, pose)| {
            if self.is_excluded(query, i) {
                return false;
            }
            let error = PoseError::between(pose, truth);
            error.linear_sq < linear_limit && error.angular_sq < angular_limit
        }))
    }

    /// Verify the first `neighborhood_size` entries of `candidates`.
    ///
    /// Excluded and repeated entries use up budget but are not verified
    /// again. A candidate id outside the dataset is an error.
    pub fn evaluate_query(&self, query: usize, candidates: &[usize]) -> Result<QueryResults> {
        let scans = self.store.len();
        let local = self.query_features(query)?;
        let truth = self
            .store
            .get(query)
            .ok_or(SmritiError::ScanOutOfRange(query))?
            .ground_truth;
        let existing = self.loop_exists(query)?;

        let mut outcomes: Vec<CandidateOutcome> = (0..scans)
            .map(|i| {
                if self.is_excluded(query, i) {
                    CandidateOutcome::Excluded
                } else {
                    CandidateOutcome::NotAttempted
                }
            })
            .collect();
        let mut verification_time = Duration::ZERO;

        for &candidate in candidates.iter().take(self.config.neighborhood_size) {
            if candidate >= scans {
                return Err(SmritiError::CandidateOutOfRange {
                    query,
                    candidate,
                    scans,
                });
            }
            if !matches!(outcomes[candidate], CandidateOutcome::NotAttempted) {
                continue;
            }

            let reference = &self.store.scans()[candidate].features;
            let verification = self.verifier.verify(reference, &local);
            verification_time += verification.elapsed;

            outcomes[candidate] = CandidateOutcome::Verified(CandidateScore {
                residual: verification.residual,
                inliers: verification.inliers,
                error: verification
                    .relative_pose
                    .map(|estimate| PoseError::between(estimate, truth)),
            });
        }

        Ok(QueryResults {
            query,
            existing,
            outcomes,
            verification_time,
        })
    }
}
