//! The evaluation pass.
//!
//! ```text
//! NeighborTable + ScanStore
//!         │
//!         ▼
//!  MatchEvaluator ──▶ QueryResults ──▶ ThresholdClassifier ──▶ EvaluationState
//!  └──────────── per query, optionally parallel ─────────────┘  (ascending query
//!                                                                order)
//! ```

use std::time::Duration;

use rayon::prelude::*;

use crate::dataset::NeighborTable;
use crate::error::Result;
use crate::matching::FeatureSetMatcher;

use super::classifier::{QueryClassification, ThresholdClassifier};
use super::evaluator::MatchEvaluator;
use super::statistics::EvaluationState;

/// Drives the evaluator over every query and accumulates statistics.
pub struct EvaluationRun<'a, M> {
    evaluator: MatchEvaluator<'a, M>,
    classifier: ThresholdClassifier,
}

impl<'a, M: FeatureSetMatcher> EvaluationRun<'a, M> {
    /// Create a run from an evaluator; tolerances come from its config.
    pub fn new(evaluator: MatchEvaluator<'a, M>) -> Self {
        let config = evaluator.config();
        let classifier =
            ThresholdClassifier::new(config.linear_error_threshold, config.angular_error_threshold);
        Self {
            evaluator,
            classifier,
        }
    }

    /// The wrapped evaluator.
    pub fn evaluator(&self) -> &MatchEvaluator<'a, M> {
        &self.evaluator
    }

    /// Evaluate every query into `state`.
    ///
    /// The table must have been validated against the store. Queries are
    /// applied in ascending order in both modes, so the resulting state does
    /// not depend on `parallel`.
    pub fn execute(&self, table: &NeighborTable, state: &mut EvaluationState) -> Result<()> {
        let scans = self.evaluator.store().len();
        table.validate(scans)?;

        if self.evaluator.config().parallel {
            self.execute_parallel(table, scans, state)
        } else {
            self.execute_sequential(table, scans, state)
        }
    }

    fn execute_sequential(
        &self,
        table: &NeighborTable,
        scans: usize,
        state: &mut EvaluationState,
    ) -> Result<()> {
        let mut progress = Progress::new(scans);
        for query in 0..scans {
            self.classify_query(table, query)?.apply(state);
            progress.advance(query + 1);
        }
        Ok(())
    }

    fn execute_parallel(
        &self,
        table: &NeighborTable,
        scans: usize,
        state: &mut EvaluationState,
    ) -> Result<()> {
        log::info!(
            "Verifying {} queries on {} threads",
            scans,
            rayon::current_num_threads()
        );

        let classified = self.classify_parallel(table, scans)?;

        let mut progress = Progress::new(scans);
        for (done, query) in classified.iter().enumerate() {
            query.apply(state);
            progress.advance(done + 1);
        }
        Ok(())
    }

    /// Classify every query on the rayon pool.
    ///
    /// Outcome vectors are dropped inside the worker, so only the fixed-size
    /// classifications are held until accumulation. Collect keeps query order.
    fn classify_parallel(&self, table: &NeighborTable, scans: usize) -> Result<Vec<ClassifiedQuery>> {
        (0..scans)
            .into_par_iter()
            .map(|query| self.classify_query(table, query))
            .collect()
    }

    fn classify_query(&self, table: &NeighborTable, query: usize) -> Result<ClassifiedQuery> {
        let candidates = table.candidates(query).unwrap_or(&[]);
        let results = self.evaluator.evaluate_query(query, candidates)?;
        let classification = self.classifier.classify(&results);
        log::debug!(
            "Query {}: {} verified, existing={}, valid@0={}",
            results.query,
            results.attempted(),
            results.existing,
            classification.thresholds[0].valid
        );
        Ok(ClassifiedQuery {
            classification,
            verification_time: results.verification_time,
        })
    }
}

/// What survives of a query once it is classified.
struct ClassifiedQuery {
    classification: QueryClassification,
    verification_time: Duration,
}

impl ClassifiedQuery {
    fn apply(&self, state: &mut EvaluationState) {
        state.apply(&self.classification, self.verification_time);
    }
}

/// Logs progress every 10%.
struct Progress {
    total: usize,
    last_decile: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            last_decile: 0,
        }
    }

    fn advance(&mut self, done: usize) {
        if self.total == 0 {
            return;
        }
        let decile = done * 10 / self.total;
        if decile > self.last_decile {
            self.last_decile = decile;
            log::info!("Matching: {}% ({}/{})", decile * 10, done, self.total);
        }
    }
}
