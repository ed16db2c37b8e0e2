//! RANSAC feature-set registration.
//!
//! Proposes correspondences by descriptor distance, then searches for the
//! rigid transform with the lowest MSAC cost using 2-point hypotheses.
//!
//! ```text
//! query features ──▶ descriptor proposals ──▶ 2-point hypotheses ──▶ MSAC score
//!                                                                       │
//!                                    least-squares refit on inliers ◀───┘
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Pose2D, sq};
use crate::features::InterestPoint;

use super::config::{CorrespondenceStrategy, RansacConfig};
use super::rigid::fit_rigid;
use super::traits::FeatureSetMatcher;
use super::types::{Correspondence, SetMatch};

/// RANSAC matcher over interest-point sets.
///
/// Deterministic: sampling is reseeded from the configured seed on every
/// call, so the same inputs always produce the same result.
#[derive(Clone, Debug, Default)]
pub struct RansacFeatureSetMatcher {
    config: RansacConfig,
}

/// Scored hypothesis.
struct Hypothesis {
    transform: Pose2D,
    cost: f64,
    inliers: Vec<Correspondence>,
}

impl RansacFeatureSetMatcher {
    /// Create a new matcher.
    pub fn new(config: RansacConfig) -> Self {
        Self { config }
    }

    /// Matcher configuration.
    pub fn config(&self) -> &RansacConfig {
        &self.config
    }

    /// Propose correspondences from descriptor distances.
    ///
    /// Only pairs strictly below the matching threshold are proposed. With
    /// [`CorrespondenceStrategy::Nearest`] ties go to the lowest reference
    /// index.
    pub fn propose(
        &self,
        reference: &[InterestPoint],
        query: &[InterestPoint],
    ) -> Vec<Correspondence> {
        let threshold = self.config.matching_threshold;
        let mut proposals = Vec::new();

        for (qi, q) in query.iter().enumerate() {
            let distances = reference
                .iter()
                .enumerate()
                .filter_map(|(ri, r)| q.descriptor.distance(&r.descriptor).map(|d| (ri, d)))
                .filter(|&(_, d)| d < threshold);

            match self.config.strategy {
                CorrespondenceStrategy::Nearest => {
                    let mut best: Option<(usize, f64)> = None;
                    for (ri, d) in distances {
                        if best.is_none_or(|(_, best_d)| d < best_d) {
                            best = Some((ri, d));
                        }
                    }
                    if let Some((ri, _)) = best {
                        proposals.push(Correspondence {
                            reference: ri,
                            query: qi,
                        });
                    }
                }
                CorrespondenceStrategy::Threshold => {
                    proposals.extend(distances.map(|(ri, _)| Correspondence {
                        reference: ri,
                        query: qi,
                    }));
                }
            }
        }

        proposals
    }

    /// MSAC cost of a transform: squared residual for inliers, the
    /// acceptance threshold for everything else.
    fn score(
        &self,
        transform: Pose2D,
        proposals: &[Correspondence],
        reference: &[InterestPoint],
        query: &[InterestPoint],
    ) -> Hypothesis {
        let acceptance = self.config.acceptance_threshold();
        let mut cost = 0.0;
        let mut inliers = Vec::with_capacity(proposals.len());

        for c in proposals {
            let (x, y) = transform.transform_point(query[c.query].position());
            let (rx, ry) = reference[c.reference].position();
            let residual = sq(x - rx) + sq(y - ry);
            if residual < acceptance {
                cost += residual;
                inliers.push(*c);
            } else {
                cost += acceptance;
            }
        }

        Hypothesis {
            transform,
            cost,
            inliers,
        }
    }

    /// Hypothesis from two proposals, if they are geometrically consistent.
    fn hypothesis(
        &self,
        a: Correspondence,
        b: Correspondence,
        reference: &[InterestPoint],
        query: &[InterestPoint],
    ) -> Option<Pose2D> {
        if a.reference == b.reference || a.query == b.query {
            return None;
        }

        let (qa, qb) = (query[a.query].position(), query[b.query].position());
        let (ra, rb) = (reference[a.reference].position(), reference[b.reference].position());

        // Rigid motion preserves pairwise distance
        let query_len = (sq(qa.0 - qb.0) + sq(qa.1 - qb.1)).sqrt();
        let reference_len = (sq(ra.0 - rb.0) + sq(ra.1 - rb.1)).sqrt();
        if sq(query_len - reference_len) > self.config.rigidity_threshold() {
            return None;
        }

        fit_rigid(&[qa, qb], &[ra, rb])
    }
}

impl FeatureSetMatcher for RansacFeatureSetMatcher {
    fn match_sets(&self, reference: &[InterestPoint], query: &[InterestPoint]) -> SetMatch {
        let proposals = self.propose(reference, query);
        let n = proposals.len();
        if n < 2 {
            return SetMatch::failed();
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut budget = self.config.iterations_for(self.config.inlier_probability);
        let mut best: Option<Hypothesis> = None;
        let mut iteration = 0;

        while iteration < budget {
            iteration += 1;

            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            if i == j {
                continue;
            }

            let Some(transform) = self.hypothesis(proposals[i], proposals[j], reference, query)
            else {
                continue;
            };

            let candidate = self.score(transform, &proposals, reference, query);
            if best.as_ref().is_none_or(|b| candidate.cost < b.cost) {
                if self.config.adaptive {
                    let ratio = candidate.inliers.len() as f64 / n as f64;
                    budget = budget.min(self.config.iterations_for(ratio));
                }
                best = Some(candidate);
            }
        }

        let Some(mut best) = best else {
            return SetMatch::failed();
        };

        // Least-squares refit on the consensus set
        if best.inliers.len() > 2 {
            let source: Vec<_> = best
                .inliers
                .iter()
                .map(|c| query[c.query].position())
                .collect();
            let target: Vec<_> = best
                .inliers
                .iter()
                .map(|c| reference[c.reference].position())
                .collect();
            if let Some(refit) = fit_rigid(&source, &target) {
                let refined = self.score(refit, &proposals, reference, query);
                if refined.cost <= best.cost {
                    best = refined;
                }
            }
        }

        if best.inliers.is_empty() {
            return SetMatch::failed();
        }

        log::trace!(
            "RANSAC: {} proposals, {} inliers, cost {:.4} after {} iterations",
            n,
            best.inliers.len(),
            best.cost,
            iteration
        );

        SetMatch::new(best.transform, best.inliers, best.cost)
    }

    fn name(&self) -> &str {
        "ransac"
    }
}
