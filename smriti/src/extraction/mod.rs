//! Feature extraction driver.
//!
//! Detection and description algorithms live outside this crate and plug in
//! through [`Detector`] and [`DescriptorGenerator`]. [`FeatureExtractor`]
//! runs them over a scan sequence, moves the features into the world frame
//! and accounts detection and description time separately.
//!
//! ```rust,ignore
//! use smriti::extraction::FeatureExtractor;
//!
//! let extractor = FeatureExtractor::new(detector, generator);
//! let dataset = extractor.extract(&scans);
//! dataset.save(Path::new("features.json"))?;
//! ```

use std::time::Duration;

use crate::core::{Pose2D, RangeScan};
use crate::dataset::{Dataset, ExtractionTime, ScanRecord};
use crate::evaluation::timed;
use crate::features::{Descriptor, InterestPoint};

/// A detected keypoint in the sensor frame, before description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    /// Keypoint pose in the sensor frame.
    pub pose: Pose2D,
    /// Detection scale in meters.
    pub scale: f64,
}

/// Trait for interest point detectors.
pub trait Detector: Send + Sync {
    /// Detect keypoints in a scan. Poses are in the sensor frame.
    fn detect(&self, scan: &RangeScan) -> Vec<Keypoint>;

    /// Detector name used in output file names.
    fn name(&self) -> &str;
}

/// Trait for descriptor generators.
pub trait DescriptorGenerator: Send + Sync {
    /// Describe the neighbourhood of a keypoint.
    fn describe(&self, keypoint: &Keypoint, scan: &RangeScan) -> Descriptor;
}

/// Runs a detector and a descriptor generator over a scan sequence.
pub struct FeatureExtractor<D, G> {
    detector: D,
    generator: G,
}

impl<D: Detector, G: DescriptorGenerator> FeatureExtractor<D, G> {
    /// Create a new extractor.
    pub fn new(detector: D, generator: G) -> Self {
        Self {
            detector,
            generator,
        }
    }

    /// Extract features from every scan.
    ///
    /// The scan pose is taken as ground truth and features are stored in the
    /// world frame.
    pub fn extract(&self, scans: &[RangeScan]) -> Dataset {
        let mut detection = Duration::ZERO;
        let mut description = Duration::ZERO;
        let mut records = Vec::with_capacity(scans.len());

        for scan in scans {
            let (keypoints, elapsed) = timed(|| self.detector.detect(scan));
            detection += elapsed;

            let (features, elapsed) = timed(|| {
                keypoints
                    .iter()
                    .map(|kp| {
                        let descriptor = self.generator.describe(kp, scan);
                        InterestPoint::new(scan.pose.compose(kp.pose), kp.scale, descriptor)
                    })
                    .collect::<Vec<_>>()
            });
            description += elapsed;

            records.push(ScanRecord::new(scan.pose, features));
        }

        let dataset = Dataset {
            store: records.into_iter().collect(),
            detector: Some(self.detector.name().to_string()),
            extraction_time: ExtractionTime {
                detection_secs: detection.as_secs_f64(),
                description_secs: description.as_secs_f64(),
            },
        };

        log::info!(
            "Extracted {} features from {} scans ({:.1} per non-empty scan)",
            dataset.store.total_features(),
            dataset.store.len(),
            dataset.store.mean_features_per_scan()
        );

        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{DescriptorKind, HistogramDistance};
    use approx::assert_relative_eq;

    /// Reports the endpoint of every valid beam.
    struct BeamDetector;

    impl Detector for BeamDetector {
        fn detect(&self, scan: &RangeScan) -> Vec<Keypoint> {
            scan.angles
                .iter()
                .zip(&scan.ranges)
                .filter(|&(_, &r)| r < scan.range_max)
                .map(|(&a, &r)| Keypoint {
                    pose: Pose2D::new(r * a.cos(), r * a.sin(), a),
                    scale: 0.1,
                })
                .collect()
        }

        fn name(&self) -> &str {
            "beam"
        }
    }

    struct RangeHistogram;

    impl DescriptorGenerator for RangeHistogram {
        fn describe(&self, keypoint: &Keypoint, _scan: &RangeScan) -> Descriptor {
            let (x, y) = keypoint.pose.position();
            Descriptor::new(
                DescriptorKind::BetaGrid,
                vec![(x * x + y * y).sqrt()],
                HistogramDistance::Euclidean,
            )
        }
    }

    #[test]
    fn test_extract_moves_features_to_world() {
        let scans = vec![
            RangeScan::new(Pose2D::new(1.0, 0.0, 0.0), vec![2.0, 9.0], vec![0.0, 1.0], 8.0),
            RangeScan::new(Pose2D::new(0.0, 0.0, 0.0), vec![9.0], vec![0.0], 8.0),
        ];

        let dataset = FeatureExtractor::new(BeamDetector, RangeHistogram).extract(&scans);

        assert_eq!(dataset.detector.as_deref(), Some("beam"));
        assert_eq!(dataset.store.len(), 2);
        assert_eq!(dataset.store.total_features(), 1);
        assert_relative_eq!(dataset.store.mean_features_per_scan(), 1.0);

        let feature = &dataset.store.get(0).unwrap().features[0];
        assert_relative_eq!(feature.pose.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(feature.descriptor.histogram()[0], 2.0, epsilon = 1e-12);
        assert!(dataset.extraction_time.detection_secs >= 0.0);
    }
}
