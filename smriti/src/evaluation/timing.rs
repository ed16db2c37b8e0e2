//! Timing instrumentation for the evaluation pass.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smriti::evaluation::{OperationTiming, timed};
//!
//! let (result, elapsed) = timed(|| matcher.match_sets(&reference, &query));
//! samples.push(elapsed);
//!
//! let stats = OperationTiming::from_durations("verification", &samples);
//! log::info!("{}", stats.summary());
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::dataset::ExtractionTime;

/// Run `f` and return its result with the elapsed wall-clock time.
#[inline]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Total time spent in each phase of the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseTimings {
    /// Feature detection.
    pub detection: Duration,
    /// Descriptor computation.
    pub description: Duration,
    /// Pairwise geometric verification.
    pub verification: Duration,
    /// Neighbour candidate generation.
    pub candidate_generation: Duration,
}

impl PhaseTimings {
    /// Timings with detection and description taken from extraction metadata.
    pub fn from_extraction(extraction: ExtractionTime) -> Self {
        Self {
            detection: secs(extraction.detection_secs),
            description: secs(extraction.description_secs),
            ..Default::default()
        }
    }

    /// Phase totals in seconds: detection, description, verification,
    /// candidate generation.
    pub fn as_secs(&self) -> [f64; 4] {
        [
            self.detection.as_secs_f64(),
            self.description.as_secs_f64(),
            self.verification.as_secs_f64(),
            self.candidate_generation.as_secs_f64(),
        ]
    }
}

/// Duration from seconds, clamping invalid values to zero.
fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

/// Latency statistics for a repeated operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OperationTiming {
    /// Operation name.
    pub name: String,

    /// Mean duration (milliseconds).
    pub mean_ms: f64,

    /// Standard deviation (milliseconds).
    pub std_ms: f64,

    /// Minimum duration (milliseconds).
    pub min_ms: f64,

    /// Maximum duration (milliseconds).
    pub max_ms: f64,

    /// Median duration (milliseconds).
    pub median_ms: f64,

    /// Total number of samples.
    pub count: usize,

    /// Total time spent (milliseconds).
    pub total_ms: f64,
}

impl OperationTiming {
    /// Create from a list of durations.
    pub fn from_durations(name: &str, durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self {
                name: name.to_string(),
                ..Default::default()
            };
        }

        let mut ms_values: Vec<f64> = durations.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        let n = ms_values.len() as f64;

        let total_ms = ms_values.iter().sum::<f64>();
        let mean_ms = total_ms / n;
        let variance = ms_values.iter().map(|v| (v - mean_ms).powi(2)).sum::<f64>() / n;

        ms_values.sort_by(|a, b| a.total_cmp(b));
        let mid = ms_values.len() / 2;
        let median_ms = if ms_values.len().is_multiple_of(2) {
            (ms_values[mid - 1] + ms_values[mid]) / 2.0
        } else {
            ms_values[mid]
        };

        Self {
            name: name.to_string(),
            mean_ms,
            std_ms: variance.sqrt(),
            min_ms: ms_values[0],
            max_ms: ms_values[ms_values.len() - 1],
            median_ms,
            count: durations.len(),
            total_ms,
        }
    }

    /// Format as a single line.
    pub fn summary(&self) -> String {
        format!(
            "{}: {:.3} ± {:.3} ms (median: {:.3}, max: {:.3}, n={})",
            self.name, self.mean_ms, self.std_ms, self.median_ms, self.max_ms, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_operation_timing() {
        let durations = vec![
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
            Duration::from_millis(40),
        ];

        let timing = OperationTiming::from_durations("verification", &durations);

        assert_eq!(timing.count, 4);
        assert_relative_eq!(timing.mean_ms, 25.0, epsilon = 1e-9);
        assert_relative_eq!(timing.median_ms, 25.0, epsilon = 1e-9);
        assert_relative_eq!(timing.min_ms, 10.0, epsilon = 1e-9);
        assert_relative_eq!(timing.max_ms, 40.0, epsilon = 1e-9);
        assert_relative_eq!(timing.total_ms, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_operation_timing_empty() {
        let timing = OperationTiming::from_durations("empty", &[]);
        assert_eq!(timing.count, 0);
        assert_eq!(timing.total_ms, 0.0);
    }

    #[test]
    fn test_timed_returns_value() {
        let (value, elapsed) = timed(|| 6 * 7);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_phase_timings_from_extraction() {
        let timings = PhaseTimings::from_extraction(ExtractionTime {
            detection_secs: 1.5,
            description_secs: -2.0,
        });

        let [detection, description, verification, candidates] = timings.as_secs();
        assert_relative_eq!(detection, 1.5);
        assert_eq!(description, 0.0);
        assert_eq!(verification, 0.0);
        assert_eq!(candidates, 0.0);
    }
}
