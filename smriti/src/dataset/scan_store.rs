//! Per-scan feature sets with ground-truth poses.

use crate::core::Pose2D;
use crate::features::InterestPoint;

/// One scan of the sequence: world-frame features plus ground truth.
#[derive(Clone, Debug, Default)]
pub struct ScanRecord {
    /// Features in the world frame. May be empty.
    pub features: Vec<InterestPoint>,
    /// Ground-truth sensor pose.
    pub ground_truth: Pose2D,
}

impl ScanRecord {
    /// Create a new record.
    pub fn new(ground_truth: Pose2D, features: Vec<InterestPoint>) -> Self {
        Self {
            features,
            ground_truth,
        }
    }

    /// Features re-expressed in this scan's sensor frame.
    pub fn local_features(&self) -> Vec<InterestPoint> {
        self.features
            .iter()
            .map(|f| f.in_frame(self.ground_truth))
            .collect()
    }
}

/// Read-only store of all scans, indexed by scan id.
#[derive(Clone, Debug, Default)]
pub struct ScanStore {
    scans: Vec<ScanRecord>,
}

impl ScanStore {
    /// Create a store from records in id order.
    pub fn new(scans: Vec<ScanRecord>) -> Self {
        Self { scans }
    }

    /// Number of scans.
    #[inline]
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Is the store empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Scan by id.
    #[inline]
    pub fn get(&self, id: usize) -> Option<&ScanRecord> {
        self.scans.get(id)
    }

    /// All scans in id order.
    #[inline]
    pub fn scans(&self) -> &[ScanRecord] {
        &self.scans
    }

    /// Iterate ground-truth poses in id order.
    pub fn poses(&self) -> impl Iterator<Item = Pose2D> + '_ {
        self.scans.iter().map(|s| s.ground_truth)
    }

    /// Total number of features over all scans.
    pub fn total_features(&self) -> usize {
        self.scans.iter().map(|s| s.features.len()).sum()
    }

    /// Mean number of features per scan, over scans that have any.
    ///
    /// Returns 0 when no scan has features.
    pub fn mean_features_per_scan(&self) -> f64 {
        let non_empty = self.scans.iter().filter(|s| !s.features.is_empty()).count();
        if non_empty == 0 {
            return 0.0;
        }
        self.total_features() as f64 / non_empty as f64
    }
}

impl FromIterator<ScanRecord> for ScanStore {
    fn from_iter<I: IntoIterator<Item = ScanRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
