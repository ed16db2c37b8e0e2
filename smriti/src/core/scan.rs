//! Raw range scan, as handed to detectors and descriptor generators.

use serde::{Deserialize, Serialize};

use super::Pose2D;

/// A single laser range scan with the sensor pose it was taken at.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RangeScan {
    /// Sensor pose in the world frame.
    pub pose: Pose2D,
    /// Range measurements in meters.
    pub ranges: Vec<f64>,
    /// Beam angle for each range in radians (0 = forward).
    pub angles: Vec<f64>,
    /// Maximum valid range in meters; farther readings are "no hit".
    pub range_max: f64,
}

impl RangeScan {
    /// Create a new scan.
    pub fn new(pose: Pose2D, ranges: Vec<f64>, angles: Vec<f64>, range_max: f64) -> Self {
        Self {
            pose,
            ranges,
            angles,
            range_max,
        }
    }
}
