//! Histogram distances for descriptor comparison.
//!
//! Descriptors are histograms (not necessarily normalized). Every distance is
//! non-negative and zero for identical inputs. Bins where a logarithm or a
//! ratio is undefined are skipped.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const LOG_EPSILON: f64 = 1e-12;

/// Distance function between two histograms of equal length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum HistogramDistance {
    /// Euclidean (L2) distance.
    #[serde(rename = "euclid")]
    #[value(name = "euclid")]
    Euclidean,
    /// χ² distance, `Σ (a-b)² / b`.
    #[serde(rename = "chi2")]
    #[value(name = "chi2")]
    Chi2,
    /// Symmetric χ² distance, `½ Σ (a-b)² / (a+b)`.
    #[default]
    #[serde(rename = "symchi2")]
    #[value(name = "symchi2")]
    SymmetricChi2,
    /// Bhattacharyya (Hellinger form) distance.
    #[serde(rename = "batt")]
    #[value(name = "batt")]
    Bhattacharyya,
    /// Kullback-Leibler divergence `KL(a || b)`.
    #[serde(rename = "kld")]
    #[value(name = "kld")]
    KullbackLeibler,
    /// Jensen-Shannon divergence.
    #[serde(rename = "jsd")]
    #[value(name = "jsd")]
    JensenShannon,
}

impl HistogramDistance {
    /// Every supported distance, in command-line order.
    pub const ALL: [HistogramDistance; 6] = [
        HistogramDistance::Euclidean,
        HistogramDistance::Chi2,
        HistogramDistance::SymmetricChi2,
        HistogramDistance::Bhattacharyya,
        HistogramDistance::KullbackLeibler,
        HistogramDistance::JensenShannon,
    ];

    /// Short tag used in output file names.
    pub fn tag(self) -> &'static str {
        match self {
            HistogramDistance::Euclidean => "euclid",
            HistogramDistance::Chi2 => "chi2",
            HistogramDistance::SymmetricChi2 => "symchi2",
            HistogramDistance::Bhattacharyya => "batt",
            HistogramDistance::KullbackLeibler => "kld",
            HistogramDistance::JensenShannon => "jsd",
        }
    }

    /// Distance between two histograms.
    ///
    /// Extra bins of the longer histogram are ignored; callers compare
    /// histograms of the same length.
    pub fn compute(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            HistogramDistance::Euclidean => pairs(a, b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            HistogramDistance::Chi2 => pairs(a, b)
                .filter(|&(_, y)| y > 0.0)
                .map(|(x, y)| (x - y) * (x - y) / y)
                .sum(),
            HistogramDistance::SymmetricChi2 => {
                0.5 * pairs(a, b)
                    .filter(|&(x, y)| x + y > 0.0)
                    .map(|(x, y)| (x - y) * (x - y) / (x + y))
                    .sum::<f64>()
            }
            HistogramDistance::Bhattacharyya => bhattacharyya(a, b),
            HistogramDistance::KullbackLeibler => kullback_leibler(pairs(a, b)),
            HistogramDistance::JensenShannon => {
                let left = kullback_leibler(pairs(a, b).map(|(x, y)| (x, 0.5 * (x + y))));
                let right = kullback_leibler(pairs(a, b).map(|(x, y)| (y, 0.5 * (x + y))));
                0.5 * (left + right)
            }
        }
    }
}

impl std::fmt::Display for HistogramDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[inline]
fn pairs<'a>(a: &'a [f64], b: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    a.iter().copied().zip(b.iter().copied())
}

fn bhattacharyya(a: &[f64], b: &[f64]) -> f64 {
    let sum_a: f64 = a.iter().sum();
    let sum_b: f64 = b.iter().sum();
    let norm = (sum_a * sum_b).sqrt();
    if norm <= 0.0 {
        return if sum_a == sum_b { 0.0 } else { 1.0 };
    }

    let coefficient: f64 = pairs(a, b)
        .filter(|&(x, y)| x > 0.0 && y > 0.0)
        .map(|(x, y)| (x * y).sqrt())
        .sum();
    (1.0 - coefficient / norm).max(0.0).sqrt()
}

fn kullback_leibler(bins: impl Iterator<Item = (f64, f64)>) -> f64 {
    bins.filter(|&(p, _)| p > 0.0)
        .map(|(p, q)| p * ((p + LOG_EPSILON) / (q + LOG_EPSILON)).ln())
        .sum::<f64>()
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_histograms_are_zero() {
        let h = [0.1, 0.4, 0.3, 0.2];
        for metric in HistogramDistance::ALL {
            assert_relative_eq!(metric.compute(&h, &h), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_euclidean() {
        let d = HistogramDistance::Euclidean.compute(&[0.0, 3.0], &[4.0, 0.0]);
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_symmetric_chi2_is_symmetric() {
        let a = [0.5, 0.25, 0.25];
        let b = [0.2, 0.3, 0.5];
        let ab = HistogramDistance::SymmetricChi2.compute(&a, &b);
        let ba = HistogramDistance::SymmetricChi2.compute(&b, &a);
        assert_relative_eq!(ab, ba, epsilon = 1e-12);
        assert!(ab > 0.0);
    }

    #[test]
    fn test_chi2_skips_empty_reference_bins() {
        let d = HistogramDistance::Chi2.compute(&[1.0, 1.0], &[1.0, 0.0]);
        assert_relative_eq!(d, 0.0);
    }

    #[test]
    fn test_bhattacharyya_disjoint_is_one() {
        let d = HistogramDistance::Bhattacharyya.compute(&[1.0, 0.0], &[0.0, 1.0]);
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_jensen_shannon_bounded() {
        let d = HistogramDistance::JensenShannon.compute(&[1.0, 0.0], &[0.0, 1.0]);
        assert_relative_eq!(d, std::f64::consts::LN_2, epsilon = 1e-6);
    }

    #[test]
    fn test_tags_parse_from_yaml() {
        let metric: HistogramDistance = serde_yaml::from_str("kld").unwrap();
        assert_eq!(metric, HistogramDistance::KullbackLeibler);
        assert_eq!(HistogramDistance::default().tag(), "symchi2");
    }
}
