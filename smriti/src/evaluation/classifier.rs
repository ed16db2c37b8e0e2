//! Multi-threshold classification of a query's candidate outcomes.
//!
//! Three strategies pick a best candidate per query:
//!
//! | Strategy | Picks | Ties |
//! |----------|-------|------|
//! | [`Strategy::Optimal`] | lowest ground-truth error (oracle) | lowest index |
//! | [`Strategy::ByInlierCount`] | most inliers | lowest index |
//! | [`Strategy::ByResidual`] | lowest matcher residual | lowest index |
//!
//! The selections do not depend on the inlier threshold; only validity does.
//! A query is valid at threshold `t` when some non-excluded scan has at least
//! `t` inliers.

use serde::{Deserialize, Serialize};

use super::evaluator::{CandidateOutcome, PoseError, QueryResults};

/// Minimum inlier counts evaluated, one output row each.
pub const INLIER_THRESHOLDS: [usize; 8] = [0, 3, 5, 7, 9, 11, 13, 15];

/// Candidate selection strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Candidate with the smallest pose error.
    Optimal,
    /// Candidate with the most inlier correspondences.
    ByInlierCount,
    /// Candidate with the smallest matcher residual.
    ByResidual,
}

impl Strategy {
    /// All strategies in output column order.
    pub const ALL: [Strategy; 3] = [
        Strategy::Optimal,
        Strategy::ByInlierCount,
        Strategy::ByResidual,
    ];
}

/// One value per strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerStrategy<T> {
    /// Value for [`Strategy::Optimal`].
    pub optimal: T,
    /// Value for [`Strategy::ByInlierCount`].
    pub by_inliers: T,
    /// Value for [`Strategy::ByResidual`].
    pub by_residual: T,
}

impl<T> PerStrategy<T> {
    /// Build from a function of the strategy.
    pub fn from_fn(mut f: impl FnMut(Strategy) -> T) -> Self {
        Self {
            optimal: f(Strategy::Optimal),
            by_inliers: f(Strategy::ByInlierCount),
            by_residual: f(Strategy::ByResidual),
        }
    }

    /// Value for a strategy.
    pub fn get(&self, strategy: Strategy) -> &T {
        match strategy {
            Strategy::Optimal => &self.optimal,
            Strategy::ByInlierCount => &self.by_inliers,
            Strategy::ByResidual => &self.by_residual,
        }
    }

    /// Mutable value for a strategy.
    pub fn get_mut(&mut self, strategy: Strategy) -> &mut T {
        match strategy {
            Strategy::Optimal => &mut self.optimal,
            Strategy::ByInlierCount => &mut self.by_inliers,
            Strategy::ByResidual => &mut self.by_residual,
        }
    }

    /// Apply `f` to every value.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerStrategy<U> {
        PerStrategy {
            optimal: f(&self.optimal),
            by_inliers: f(&self.by_inliers),
            by_residual: f(&self.by_residual),
        }
    }
}

/// The candidate a strategy picked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Scan id of the picked candidate.
    pub index: usize,
    /// Its pose error, if it has one.
    pub error: Option<PoseError>,
}

/// Classification of a query at one inlier threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThresholdOutcome {
    /// Some non-excluded scan reaches the threshold.
    pub valid: bool,
    /// Per strategy: the selection is within tolerance. Only set when valid.
    pub correct: PerStrategy<bool>,
    /// Per strategy: error magnitude of the selection. `None` when not valid
    /// or when the strategy has no selection with an error.
    pub errors: PerStrategy<Option<f64>>,
    /// A true loop exists, or the optimal selection is correct.
    pub exists: bool,
}

/// Classification of a query at every threshold.
#[derive(Clone, Debug)]
pub struct QueryClassification {
    /// Query scan id.
    pub query: usize,
    /// Best candidate per strategy.
    pub selections: PerStrategy<Option<Selection>>,
    /// One outcome per entry of [`INLIER_THRESHOLDS`].
    pub thresholds: [ThresholdOutcome; INLIER_THRESHOLDS.len()],
}

/// Classifies query results against ground-truth tolerances.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdClassifier {
    linear_threshold_sq: f64,
    angular_threshold_sq: f64,
}

impl ThresholdClassifier {
    /// Create a classifier with position (m) and heading (rad) tolerances.
    pub fn new(linear_threshold: f64, angular_threshold: f64) -> Self {
        Self {
            linear_threshold_sq: linear_threshold * linear_threshold,
            angular_threshold_sq: angular_threshold * angular_threshold,
        }
    }

    /// Whether an error is within tolerance.
    #[inline]
    pub fn is_correct(&self, error: &PoseError) -> bool {
        error.within(self.linear_threshold_sq, self.angular_threshold_sq)
    }

    /// Pick the best candidate for each strategy.
    ///
    /// Outcomes without a score never win: the optimal pick needs a pose
    /// error, the inlier pick at least one inlier and the residual pick a
    /// finite residual.
    pub fn select(&self, results: &QueryResults) -> PerStrategy<Option<Selection>> {
        let mut optimal: Option<(usize, PoseError)> = None;
        let mut by_inliers: Option<(usize, usize)> = None;
        let mut by_residual: Option<(usize, f64)> = None;

        for (index, outcome) in results.outcomes.iter().enumerate() {
            let CandidateOutcome::Verified(score) = outcome else {
                continue;
            };

            if let Some(error) = score.error
                && optimal.is_none_or(|(_, best)| error.total() < best.total())
            {
                optimal = Some((index, error));
            }

            if score.inliers > by_inliers.map_or(0, |(_, best)| best) {
                by_inliers = Some((index, score.inliers));
            }

            if score.residual < by_residual.map_or(f64::INFINITY, |(_, best)| best) {
                by_residual = Some((index, score.residual));
            }
        }

        let selection = |index: usize| Selection {
            index,
            error: results.outcomes[index].score().and_then(|s| s.error),
        };

        PerStrategy {
            optimal: optimal.map(|(index, _)| selection(index)),
            by_inliers: by_inliers.map(|(index, _)| selection(index)),
            by_residual: by_residual.map(|(index, _)| selection(index)),
        }
    }

    /// Classify a query at every inlier threshold.
    pub fn classify(&self, results: &QueryResults) -> QueryClassification {
        let selections = self.select(results);

        let correct = selections.map(|s| {
            s.and_then(|s| s.error)
                .is_some_and(|error| self.is_correct(&error))
        });
        let errors = selections.map(|s| s.and_then(|s| s.error).map(|e| e.magnitude()));

        // Most inliers among non-excluded scans; unverified ones count as 0.
        let max_inliers = results
            .outcomes
            .iter()
            .filter(|o| !o.is_excluded())
            .map(CandidateOutcome::inliers)
            .max();

        let thresholds = INLIER_THRESHOLDS.map(|threshold| {
            let valid = max_inliers.is_some_and(|m| m >= threshold);
            if valid {
                ThresholdOutcome {
                    valid,
                    correct,
                    errors,
                    exists: results.existing || correct.optimal,
                }
            } else {
                ThresholdOutcome {
                    exists: results.existing,
                    ..Default::default()
                }
            }
        });

        QueryClassification {
            query: results.query,
            selections,
            thresholds,
        }
    }
}
