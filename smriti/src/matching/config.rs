//! Feature-set matcher configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// χ² 95% quantile for 2 degrees of freedom (point residuals).
pub const CHI2_2DOF_95: f64 = 5.99;

/// χ² 95% quantile for 1 degree of freedom (pairwise distances).
pub const CHI2_1DOF_95: f64 = 3.84;

/// How descriptor correspondences are proposed before geometric voting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CorrespondenceStrategy {
    /// Each query feature proposes its single closest reference feature.
    #[default]
    Nearest,
    /// Each query feature proposes every reference feature under the
    /// matching threshold.
    Threshold,
}

/// Configuration for the RANSAC feature-set matcher.
///
/// Thresholds are derived from `acceptance_sigma`: point residuals are
/// accepted below `σ²·χ²₂(0.95)` and sampled pairs must preserve their
/// distance within `σ²·χ²₁(0.95)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RansacConfig {
    /// Expected feature position noise (meters).
    #[serde(default = "default_acceptance_sigma")]
    pub acceptance_sigma: f64,

    /// Desired probability of drawing at least one all-inlier sample.
    #[serde(default = "default_success_probability")]
    pub success_probability: f64,

    /// Assumed fraction of inliers among proposed correspondences.
    #[serde(default = "default_inlier_probability")]
    pub inlier_probability: f64,

    /// Maximum descriptor distance for a proposed correspondence.
    #[serde(default = "default_matching_threshold")]
    pub matching_threshold: f64,

    /// Correspondence proposal strategy.
    #[serde(default)]
    pub strategy: CorrespondenceStrategy,

    /// Shrink the iteration budget as the best inlier ratio improves.
    #[serde(default)]
    pub adaptive: bool,

    /// Hard cap on hypotheses per call.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Seed for hypothesis sampling. Each call reseeds, so a call is
    /// deterministic regardless of call order.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_acceptance_sigma() -> f64 {
    0.1
}
fn default_success_probability() -> f64 {
    0.95
}
fn default_inlier_probability() -> f64 {
    0.4
}
fn default_matching_threshold() -> f64 {
    0.4
}
fn default_max_iterations() -> usize {
    1000
}
fn default_seed() -> u64 {
    42
}

impl Default for RansacConfig {
    fn default() -> Self {
        Self {
            acceptance_sigma: default_acceptance_sigma(),
            success_probability: default_success_probability(),
            inlier_probability: default_inlier_probability(),
            matching_threshold: default_matching_threshold(),
            strategy: CorrespondenceStrategy::default(),
            adaptive: false,
            max_iterations: default_max_iterations(),
            seed: default_seed(),
        }
    }
}

impl RansacConfig {
    /// Squared residual under which a correspondence is an inlier.
    #[inline]
    pub fn acceptance_threshold(&self) -> f64 {
        self.acceptance_sigma * self.acceptance_sigma * CHI2_2DOF_95
    }

    /// Squared tolerance on pairwise distance preservation for a sample.
    #[inline]
    pub fn rigidity_threshold(&self) -> f64 {
        self.acceptance_sigma * self.acceptance_sigma * CHI2_1DOF_95
    }

    /// Iteration budget for a given inlier ratio and 2-point samples.
    pub fn iterations_for(&self, inlier_ratio: f64) -> usize {
        let p_good_sample = inlier_ratio * inlier_ratio;
        if p_good_sample <= 0.0 {
            return self.max_iterations;
        }
        if p_good_sample >= 1.0 {
            return 1;
        }

        let log_one_minus_conf = (1.0 - self.success_probability).ln();
        let log_one_minus_p = (1.0 - p_good_sample).ln();
        if !log_one_minus_conf.is_finite() || !log_one_minus_p.is_finite() {
            return self.max_iterations;
        }

        let required = (log_one_minus_conf / log_one_minus_p).ceil().max(1.0);
        (required as usize).min(self.max_iterations)
    }

    /// Builder-style setter for the correspondence strategy.
    pub fn with_strategy(mut self, strategy: CorrespondenceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder-style setter for the descriptor matching threshold.
    pub fn with_matching_threshold(mut self, threshold: f64) -> Self {
        self.matching_threshold = threshold;
        self
    }

    /// Builder-style setter for the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
