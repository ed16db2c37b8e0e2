//! Evaluation pass configuration.

use serde::{Deserialize, Serialize};

/// Configuration of the loop-closure evaluation pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Candidates with `|candidate - query| < local_skip` are ignored.
    /// 1 excludes only the query itself; 0 excludes nothing.
    #[serde(default = "default_local_skip")]
    pub local_skip: usize,

    /// Maximum number of neighbour-table entries examined per query.
    #[serde(default = "default_neighborhood_size")]
    pub neighborhood_size: usize,

    /// Position tolerance for a correct match (meters).
    #[serde(default = "default_linear_error_threshold")]
    pub linear_error_threshold: f64,

    /// Heading tolerance for a correct match (radians).
    #[serde(default = "default_angular_error_threshold")]
    pub angular_error_threshold: f64,

    /// Verify queries on the rayon pool. Accumulation stays in query order.
    #[serde(default)]
    pub parallel: bool,
}

fn default_local_skip() -> usize {
    1
}
fn default_neighborhood_size() -> usize {
    50
}
fn default_linear_error_threshold() -> f64 {
    0.5
}
fn default_angular_error_threshold() -> f64 {
    0.2
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            local_skip: default_local_skip(),
            neighborhood_size: default_neighborhood_size(),
            linear_error_threshold: default_linear_error_threshold(),
            angular_error_threshold: default_angular_error_threshold(),
            parallel: false,
        }
    }
}

impl EvaluationConfig {
    /// Builder-style setter for the local skip window.
    pub fn with_local_skip(mut self, local_skip: usize) -> Self {
        self.local_skip = local_skip;
        self
    }

    /// Builder-style setter for the neighbourhood size.
    pub fn with_neighborhood_size(mut self, size: usize) -> Self {
        self.neighborhood_size = size;
        self
    }

    /// Builder-style setter for parallel verification.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Squared position tolerance.
    #[inline]
    pub fn linear_threshold_sq(&self) -> f64 {
        self.linear_error_threshold * self.linear_error_threshold
    }

    /// Squared heading tolerance.
    #[inline]
    pub fn angular_threshold_sq(&self) -> f64 {
        self.angular_error_threshold * self.angular_error_threshold
    }
}
