//! JSON dataset files.
//!
//! ```json
//! {
//!   "detector": "curvature",
//!   "extraction_time": { "detection_secs": 1.2, "description_secs": 0.4 },
//!   "scans": [
//!     {
//!       "ground_truth": { "x": 0.0, "y": 0.0, "theta": 0.0 },
//!       "features": [
//!         {
//!           "pose": { "x": 1.0, "y": 2.0, "theta": 0.1 },
//!           "scale": 0.2,
//!           "descriptor": { "kind": "beta_grid", "histogram": [0.1, 0.9] }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;
use crate::error::Result;
use crate::features::{DescriptorKind, HistogramDistance, InterestPoint, RawDescriptor};

use super::scan_store::{ScanRecord, ScanStore};

/// Feature extraction cost recorded alongside the features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionTime {
    /// Total detection time (seconds).
    #[serde(default)]
    pub detection_secs: f64,
    /// Total description time (seconds).
    #[serde(default)]
    pub description_secs: f64,
}

#[derive(Serialize, Deserialize)]
struct FeatureEntry {
    pose: Pose2D,
    #[serde(default)]
    scale: f64,
    descriptor: RawDescriptor,
}

#[derive(Serialize, Deserialize)]
struct ScanEntry {
    ground_truth: Pose2D,
    #[serde(default)]
    features: Vec<FeatureEntry>,
}

#[derive(Serialize, Deserialize)]
struct DatasetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extraction_time: Option<ExtractionTime>,
    scans: Vec<ScanEntry>,
}

/// A loaded dataset: scans plus extraction metadata.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Scans in id order.
    pub store: ScanStore,
    /// Name of the detector that produced the features.
    pub detector: Option<String>,
    /// Extraction cost, when recorded.
    pub extraction_time: ExtractionTime,
}

impl Dataset {
    /// Load a dataset, attaching `metric` to every descriptor.
    pub fn load(path: &Path, metric: HistogramDistance) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file: DatasetFile = serde_json::from_reader(reader)?;
        Ok(Self::from_file(file, metric))
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json(json: &str, metric: HistogramDistance) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file, metric))
    }

    /// Write the dataset as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = DatasetFile {
            detector: self.detector.clone(),
            extraction_time: Some(self.extraction_time),
            scans: self
                .store
                .scans()
                .iter()
                .map(|scan| ScanEntry {
                    ground_truth: scan.ground_truth,
                    features: scan
                        .features
                        .iter()
                        .map(|f| FeatureEntry {
                            pose: f.pose,
                            scale: f.scale,
                            descriptor: f.descriptor.to_raw(),
                        })
                        .collect(),
                })
                .collect(),
        };

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &file)?;
        Ok(())
    }

    /// Descriptor family of the first feature, if any.
    pub fn descriptor_kind(&self) -> Option<DescriptorKind> {
        self.store
            .scans()
            .iter()
            .flat_map(|s| s.features.first())
            .map(|f| f.descriptor.kind())
            .next()
    }

    fn from_file(file: DatasetFile, metric: HistogramDistance) -> Self {
        let store = file
            .scans
            .into_iter()
            .map(|scan| {
                let features = scan
                    .features
                    .into_iter()
                    .map(|f| InterestPoint::new(f.pose, f.scale, f.descriptor.attach(metric)))
                    .collect();
                ScanRecord::new(scan.ground_truth, features)
            })
            .collect();

        Self {
            store,
            detector: file.detector,
            extraction_time: file.extraction_time.unwrap_or_default(),
        }
    }
}
