//! Running statistics over all queries.
//!
//! [`EvaluationState`] is zero-initialised once and only ever grows through
//! [`EvaluationState::apply`]. [`EvaluationSummary`] is the read-out at the
//! end of the pass.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::classifier::{INLIER_THRESHOLDS, PerStrategy, QueryClassification, Strategy};
use super::timing::{OperationTiming, PhaseTimings};

/// Accumulated counts for one inlier threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ThresholdBucket {
    /// Minimum inlier count of this bucket.
    pub threshold: usize,
    /// Correct selections per strategy.
    pub matches: PerStrategy<usize>,
    /// Sum of selection error magnitudes per strategy.
    pub error_sums: PerStrategy<f64>,
    /// Valid queries whose selection had no pose error, per strategy.
    pub unresolved: PerStrategy<usize>,
    /// Queries valid at this threshold.
    pub valid: usize,
    /// Queries with an existing loop or a correct optimal selection.
    pub exist: usize,
}

/// Evaluation accumulator.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationState {
    buckets: [ThresholdBucket; INLIER_THRESHOLDS.len()],
    timings: PhaseTimings,
    query_times: Vec<Duration>,
}

impl Default for EvaluationState {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            buckets: INLIER_THRESHOLDS.map(|threshold| ThresholdBucket {
                threshold,
                ..Default::default()
            }),
            timings: PhaseTimings::default(),
            query_times: Vec::new(),
        }
    }

    /// Add one query's classification and its verification time.
    ///
    /// Validity, matches and error sums of a bucket are updated together.
    pub fn apply(&mut self, classification: &QueryClassification, verification_time: Duration) {
        for (bucket, outcome) in self.buckets.iter_mut().zip(&classification.thresholds) {
            if outcome.valid {
                bucket.valid += 1;
                for strategy in Strategy::ALL {
                    *bucket.matches.get_mut(strategy) += usize::from(*outcome.correct.get(strategy));
                    match outcome.errors.get(strategy) {
                        Some(error) => *bucket.error_sums.get_mut(strategy) += error,
                        None => *bucket.unresolved.get_mut(strategy) += 1,
                    }
                }
            }
            bucket.exist += usize::from(outcome.exists);
        }

        self.timings.verification += verification_time;
        self.query_times.push(verification_time);
    }

    /// Record detection and description totals.
    pub fn record_extraction(&mut self, detection: Duration, description: Duration) {
        self.timings.detection += detection;
        self.timings.description += description;
    }

    /// Record time spent producing neighbour candidates.
    pub fn record_candidate_generation(&mut self, elapsed: Duration) {
        self.timings.candidate_generation += elapsed;
    }

    /// Per-threshold buckets, in [`INLIER_THRESHOLDS`] order.
    pub fn buckets(&self) -> &[ThresholdBucket] {
        &self.buckets
    }

    /// Phase timings so far.
    pub fn timings(&self) -> &PhaseTimings {
        &self.timings
    }

    /// Number of queries applied.
    pub fn queries(&self) -> usize {
        self.query_times.len()
    }

    /// Final read-out.
    pub fn summary(&self) -> EvaluationSummary {
        let rows = self
            .buckets
            .iter()
            .map(|bucket| SummaryRow {
                threshold: bucket.threshold,
                matches: bucket.matches,
                mean_errors: PerStrategy::from_fn(|strategy| {
                    MeanError::from_sum(
                        *bucket.error_sums.get(strategy),
                        bucket.valid,
                        *bucket.unresolved.get(strategy),
                    )
                }),
                unresolved: bucket.unresolved,
                valid: bucket.valid,
                exist: bucket.exist,
            })
            .collect();

        EvaluationSummary {
            queries: self.queries(),
            rows,
            timings: TimingSummary::from(self.timings),
            verification_latency: OperationTiming::from_durations(
                "verification per query",
                &self.query_times,
            ),
        }
    }
}

/// Mean error of a strategy at a threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeanError {
    /// `error_sum / valid`.
    Defined(f64),
    /// No valid query at this threshold.
    Undefined,
    /// Valid queries exist but none of them has a selection with an error.
    Unresolved,
}

impl MeanError {
    /// Mean from a sum over `count` valid queries, `unresolved` of which
    /// contributed nothing to the sum.
    pub fn from_sum(sum: f64, count: usize, unresolved: usize) -> Self {
        if count == 0 {
            MeanError::Undefined
        } else if unresolved >= count {
            MeanError::Unresolved
        } else {
            MeanError::Defined(sum / count as f64)
        }
    }

    /// Value, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            MeanError::Defined(v) => Some(v),
            MeanError::Undefined | MeanError::Unresolved => None,
        }
    }
}

impl fmt::Display for MeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeanError::Defined(v) => write!(f, "{}", v),
            MeanError::Undefined => f.write_str("undefined"),
            MeanError::Unresolved => f.write_str("unresolved"),
        }
    }
}

impl Serialize for MeanError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MeanError::Defined(v) => serializer.serialize_f64(*v),
            MeanError::Undefined => serializer.serialize_str("undefined"),
            MeanError::Unresolved => serializer.serialize_str("unresolved"),
        }
    }
}

/// One output row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Minimum inlier count.
    pub threshold: usize,
    /// Correct selections per strategy.
    pub matches: PerStrategy<usize>,
    /// Mean error per strategy.
    pub mean_errors: PerStrategy<MeanError>,
    /// Valid queries without a selection error, per strategy.
    pub unresolved: PerStrategy<usize>,
    /// Valid queries.
    pub valid: usize,
    /// Queries where a loop exists.
    pub exist: usize,
}

/// Phase totals in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TimingSummary {
    /// Feature detection.
    pub detection_secs: f64,
    /// Descriptor computation.
    pub description_secs: f64,
    /// Geometric verification.
    pub verification_secs: f64,
    /// Candidate generation.
    pub candidate_generation_secs: f64,
}

impl From<PhaseTimings> for TimingSummary {
    fn from(timings: PhaseTimings) -> Self {
        let [detection, description, verification, candidates] = timings.as_secs();
        Self {
            detection_secs: detection,
            description_secs: description,
            verification_secs: verification,
            candidate_generation_secs: candidates,
        }
    }
}

/// Final statistics of an evaluation pass.
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationSummary {
    /// Queries evaluated.
    pub queries: usize,
    /// One row per inlier threshold.
    pub rows: Vec<SummaryRow>,
    /// Phase totals.
    pub timings: TimingSummary,
    /// Per-query verification latency.
    pub verification_latency: OperationTiming,
}

impl EvaluationSummary {
    /// Log the summary table.
    pub fn log(&self) {
        log::info!("Evaluated {} queries", self.queries);
        log::info!("  thr | optimal inliers residual | valid exist | mean error (opt/inl/res)");
        for row in &self.rows {
            log::info!(
                "  {:>3} | {:>7} {:>7} {:>8} | {:>5} {:>5} | {} / {} / {}",
                row.threshold,
                row.matches.optimal,
                row.matches.by_inliers,
                row.matches.by_residual,
                row.valid,
                row.exist,
                row.mean_errors.optimal,
                row.mean_errors.by_inliers,
                row.mean_errors.by_residual
            );
            if row.valid == 0 {
                log::warn!(
                    "No valid query at {} inliers, mean error undefined",
                    row.threshold
                );
            }
        }
        log::info!(
            "Time: detection {:.3}s, description {:.3}s, verification {:.3}s, candidates {:.3}s",
            self.timings.detection_secs,
            self.timings.description_secs,
            self.timings.verification_secs,
            self.timings.candidate_generation_secs
        );
        log::info!("{}", self.verification_latency.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::classifier::ThresholdOutcome;
    use approx::assert_relative_eq;

    fn classification(valid_until: usize, error: Option<f64>, exists: bool) -> QueryClassification {
        let correct = error.is_some_and(|e| e < 0.5);
        QueryClassification {
            query: 0,
            selections: PerStrategy::default(),
            thresholds: std::array::from_fn(|i| {
                if i < valid_until {
                    ThresholdOutcome {
                        valid: true,
                        correct: PerStrategy::from_fn(|_| correct),
                        errors: PerStrategy::from_fn(|_| error),
                        exists: exists || correct,
                    }
                } else {
                    ThresholdOutcome {
                        exists,
                        ..Default::default()
                    }
                }
            }),
        }
    }

    #[test]
    fn test_new_state_is_zeroed() {
        let state = EvaluationState::new();
        let thresholds: Vec<usize> = state.buckets().iter().map(|b| b.threshold).collect();

        assert_eq!(thresholds, INLIER_THRESHOLDS.to_vec());
        assert!(state.buckets().iter().all(|b| b.valid == 0 && b.exist == 0));
        assert_eq!(state.queries(), 0);
    }

    #[test]
    fn test_apply_accumulates() {
        let mut state = EvaluationState::new();
        state.apply(&classification(3, Some(0.1), false), Duration::from_millis(5));
        state.apply(&classification(1, Some(0.9), true), Duration::from_millis(7));

        let b0 = state.buckets()[0];
        assert_eq!(b0.valid, 2);
        assert_eq!(b0.matches.optimal, 1);
        assert_relative_eq!(b0.error_sums.by_residual, 1.0, epsilon = 1e-12);
        assert_eq!(b0.exist, 2);

        let b1 = state.buckets()[1];
        assert_eq!(b1.valid, 1);
        assert_eq!(b1.exist, 2);

        assert_eq!(state.timings().verification, Duration::from_millis(12));
        assert_eq!(state.queries(), 2);
    }

    #[test]
    fn test_missing_error_counts_unresolved() {
        let mut state = EvaluationState::new();
        state.apply(&classification(1, None, false), Duration::ZERO);

        let b0 = state.buckets()[0];
        assert_eq!(b0.valid, 1);
        assert_eq!(b0.unresolved.optimal, 1);
        assert_eq!(b0.error_sums.optimal, 0.0);
        assert_eq!(b0.matches.optimal, 0);
    }

    #[test]
    fn test_summary_undefined_mean() {
        let mut state = EvaluationState::new();
        state.apply(&classification(1, Some(0.2), false), Duration::ZERO);

        let summary = state.summary();

        assert_eq!(summary.rows.len(), 8);
        assert_eq!(summary.rows[0].mean_errors.optimal, MeanError::Defined(0.2));
        assert_eq!(summary.rows[1].mean_errors.optimal, MeanError::Undefined);
        assert_eq!(summary.rows[1].mean_errors.optimal.to_string(), "undefined");
    }

    #[test]
    fn test_summary_unresolved_mean() {
        let mut state = EvaluationState::new();
        state.apply(&classification(1, None, false), Duration::ZERO);
        state.apply(&classification(1, None, false), Duration::ZERO);

        let row = state.summary().rows[0];

        assert_eq!(row.valid, 2);
        assert_eq!(row.mean_errors.optimal, MeanError::Unresolved);
        assert_eq!(row.mean_errors.optimal.to_string(), "unresolved");
    }

    #[test]
    fn test_mean_error_from_sum() {
        assert_eq!(MeanError::from_sum(0.0, 0, 0), MeanError::Undefined);
        assert_eq!(MeanError::from_sum(0.0, 3, 3), MeanError::Unresolved);
        assert_eq!(MeanError::from_sum(0.6, 3, 1), MeanError::Defined(0.2));
    }

    #[test]
    fn test_mean_error_json() {
        let json = serde_json::to_string(&[
            MeanError::Defined(0.5),
            MeanError::Undefined,
            MeanError::Unresolved,
        ])
        .unwrap();
        assert_eq!(json, r#"[0.5,"undefined","unresolved"]"#);
    }
}
