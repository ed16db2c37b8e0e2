//! Loop-closure verification and evaluation engine.
//!
//! ## Overview
//!
//! For every scan of a sequence, the engine verifies the scan's ranked
//! neighbour candidates with a geometric matcher and asks: did the matcher
//! find the same place, and would a practical selection strategy have
//! picked the right candidate?
//!
//! 1. **Verify** ([`MatchEvaluator`]) - register each candidate's features
//!    against the query's sensor-frame features and compare the estimated
//!    pose with ground truth
//! 2. **Classify** ([`ThresholdClassifier`]) - pick a candidate per
//!    [`Strategy`] and decide validity at each of [`INLIER_THRESHOLDS`]
//! 3. **Accumulate** ([`EvaluationState`]) - sum counts and errors in query
//!    order
//!
//! ## Example
//!
//! ```rust,ignore
//! use smriti::evaluation::{
//!     EvaluationConfig, EvaluationRun, EvaluationState, MatchEvaluator, PairwiseVerifier,
//! };
//!
//! let verifier = PairwiseVerifier::new(RansacFeatureSetMatcher::default());
//! let evaluator = MatchEvaluator::new(&dataset.store, verifier, EvaluationConfig::default());
//!
//! let mut state = EvaluationState::new();
//! EvaluationRun::new(evaluator).execute(&table, &mut state)?;
//!
//! let summary = state.summary();
//! summary.log();
//! ```

mod classifier;
mod config;
mod evaluator;
mod report;
mod run;
mod statistics;
mod timing;
mod verifier;

pub use classifier::{
    INLIER_THRESHOLDS, PerStrategy, QueryClassification, Selection, Strategy, ThresholdClassifier,
    ThresholdOutcome,
};
pub use config::EvaluationConfig;
pub use evaluator::{CandidateOutcome, CandidateScore, MatchEvaluator, PoseError, QueryResults};
pub use report::{
    OutputNames, write_error_table, write_json_summary, write_match_table, write_tables,
    write_time_table,
};
pub use run::EvaluationRun;
pub use statistics::{
    EvaluationState, EvaluationSummary, MeanError, SummaryRow, ThresholdBucket, TimingSummary,
};
pub use timing::{OperationTiming, PhaseTimings, timed};
pub use verifier::{PairwiseVerifier, Verification};
