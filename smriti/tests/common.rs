//! Test utilities for Smriti evaluation.
//!
//! Synthetic landmark worlds, trajectories and neighbour tables.

#![allow(dead_code)]

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use smriti::core::Pose2D;
use smriti::features::{Descriptor, DescriptorKind, HistogramDistance, InterestPoint};
use smriti::matching::{Correspondence, FeatureSetMatcher, SetMatch};
use smriti::{NeighborTable, ScanRecord, ScanStore};

/// Descriptor with a single bin set, one bin per landmark.
pub fn one_hot(bin: usize, bins: usize) -> Descriptor {
    let mut histogram = vec![0.0; bins];
    histogram[bin] = 1.0;
    Descriptor::new(DescriptorKind::BetaGrid, histogram, HistogramDistance::Euclidean)
}

/// Landmarks with unique descriptors, in the world frame.
#[derive(Clone, Debug)]
pub struct LandmarkWorld {
    pub landmarks: Vec<(f64, f64)>,
}

impl LandmarkWorld {
    /// Landmarks on a regular grid spanning `[min, max]` on both axes.
    pub fn grid(min: f64, max: f64, spacing: f64) -> Self {
        let steps = ((max - min) / spacing).round() as usize;
        let mut landmarks = Vec::new();
        for i in 0..=steps {
            for j in 0..=steps {
                // Shear breaks the grid symmetry
                let x = min + i as f64 * spacing + 0.13 * j as f64;
                let y = min + j as f64 * spacing + 0.07 * i as f64;
                landmarks.push((x, y));
            }
        }
        Self { landmarks }
    }

    /// Landmarks in a small irregular cluster around `center`.
    pub fn cluster(center: (f64, f64), count: usize) -> Self {
        let landmarks = (0..count)
            .map(|i| {
                let angle = i as f64 * 2.4;
                let radius = 0.5 + 0.3 * i as f64;
                (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
            })
            .collect();
        Self { landmarks }
    }

    /// Merge two worlds; descriptors follow landmark order.
    pub fn merged(mut self, other: LandmarkWorld) -> Self {
        self.landmarks.extend(other.landmarks);
        self
    }

    /// World-frame features of the landmarks within `radius` of `pose`.
    pub fn observe(&self, pose: Pose2D, radius: f64) -> Vec<InterestPoint> {
        let bins = self.landmarks.len();
        self.landmarks
            .iter()
            .enumerate()
            .filter(|(_, (x, y))| ((x - pose.x).powi(2) + (y - pose.y).powi(2)).sqrt() <= radius)
            .map(|(id, &(x, y))| InterestPoint::new(Pose2D::new(x, y, 0.0), 0.1, one_hot(id, bins)))
            .collect()
    }

    /// A scan store observing this world from each pose.
    pub fn store(&self, poses: &[Pose2D], radius: f64) -> ScanStore {
        poses
            .iter()
            .map(|&pose| ScanRecord::new(pose, self.observe(pose, radius)))
            .collect()
    }
}

/// Create a square loop trajectory.
pub fn square_trajectory(side_length: f64, points_per_side: usize) -> Vec<Pose2D> {
    let mut poses = Vec::new();
    let spacing = side_length / points_per_side as f64;

    for i in 0..points_per_side {
        poses.push(Pose2D::new(i as f64 * spacing, 0.0, 0.0));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(side_length, i as f64 * spacing, FRAC_PI_2));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(side_length - i as f64 * spacing, side_length, PI));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(0.0, side_length - i as f64 * spacing, -FRAC_PI_2));
    }

    poses
}

/// Neighbour table ranking every scan (self included) by ground-truth
/// distance, ties by id.
pub fn ground_truth_table(poses: &[Pose2D]) -> NeighborTable {
    let rows = poses
        .iter()
        .map(|query| {
            let mut ids: Vec<usize> = (0..poses.len()).collect();
            ids.sort_by(|&a, &b| {
                query
                    .distance(poses[a])
                    .total_cmp(&query.distance(poses[b]))
                    .then(a.cmp(&b))
            });
            ids
        })
        .collect();
    NeighborTable::new(rows)
}

/// Render a table in the on-disk format.
pub fn table_text(rows: &[Vec<usize>]) -> String {
    rows.iter()
        .map(|row| {
            let ids: Vec<String> = row.iter().map(|id| id.to_string()).collect();
            format!("{} 0 0.0 {}\n", row.len(), ids.join(" "))
        })
        .collect()
}

/// A store where each scan has one feature whose scale holds the scan id.
pub fn tagged_store(poses: &[Pose2D]) -> ScanStore {
    poses
        .iter()
        .enumerate()
        .map(|(id, &pose)| {
            let feature = InterestPoint::new(pose, id as f64, one_hot(0, 1));
            ScanRecord::new(pose, vec![feature])
        })
        .collect()
}

/// Matcher returning scripted results keyed by (query id, reference id),
/// where ids are read from the feature scale of [`tagged_store`] scans.
/// Unscripted pairs fail.
#[derive(Default)]
pub struct ScriptedMatcher {
    script: HashMap<(usize, usize), (Pose2D, usize, f64)>,
}

impl ScriptedMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for `query` against `reference`.
    pub fn with(mut self, query: usize, reference: usize, pose: Pose2D, inliers: usize, residual: f64) -> Self {
        self.script.insert((query, reference), (pose, inliers, residual));
        self
    }
}

impl FeatureSetMatcher for ScriptedMatcher {
    fn match_sets(&self, reference: &[InterestPoint], query: &[InterestPoint]) -> SetMatch {
        let (Some(r), Some(q)) = (reference.first(), query.first()) else {
            return SetMatch::failed();
        };
        let key = (q.scale as usize, r.scale as usize);
        match self.script.get(&key) {
            Some(&(pose, inliers, residual)) => {
                let correspondences = (0..inliers)
                    .map(|i| Correspondence {
                        reference: i,
                        query: i,
                    })
                    .collect();
                SetMatch::new(pose, correspondences, residual)
            }
            None => SetMatch::failed(),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
