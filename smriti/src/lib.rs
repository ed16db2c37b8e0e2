//! # Smriti
//!
//! Loop-closure verification and evaluation for 2D range-scan sequences.
//!
//! ## Overview
//!
//! Given a scan sequence with extracted features, ground-truth poses and a
//! ranked table of neighbour candidates per scan, Smriti verifies each
//! candidate geometrically and measures how often a loop-closure system
//! would have found the right place:
//!
//! - **Optimal** - the candidate with the lowest ground-truth error
//! - **By inlier count** - the candidate with the most RANSAC inliers
//! - **By residual** - the candidate with the lowest matcher residual
//!
//! Statistics are reported for minimum inlier counts of
//! 0, 3, 5, 7, 9, 11, 13 and 15.
//!
//! ## Features
//!
//! - **Feature-set matching**: RANSAC registration over interest points
//! - **Histogram distances**: Euclidean, χ², symmetric χ², Bhattacharyya,
//!   Kullback-Leibler, Jensen-Shannon
//! - **Evaluation engine**: deterministic single pass, optionally parallel
//! - **Reports**: `.dat` tables and a JSON summary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smriti::{Dataset, NeighborTable, SmritiConfig};
//! use smriti::evaluation::{EvaluationRun, EvaluationState, MatchEvaluator, PairwiseVerifier};
//! use smriti::matching::RansacFeatureSetMatcher;
//!
//! let config = SmritiConfig::load_default()?;
//! let dataset = Dataset::load(Path::new("run.json"), config.descriptor.distance)?;
//! let table = NeighborTable::load(Path::new("run.nn"))?;
//!
//! let verifier = PairwiseVerifier::new(RansacFeatureSetMatcher::new(config.matcher.clone()));
//! let evaluator = MatchEvaluator::new(&dataset.store, verifier, config.evaluation.clone());
//!
//! let mut state = EvaluationState::new();
//! EvaluationRun::new(evaluator).execute(&table, &mut state)?;
//! state.summary().log();
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Interest points and descriptors
pub mod features;

// Detector / descriptor plumbing
pub mod extraction;

// Geometric set matching
pub mod matching;

// Scan store and neighbour table
pub mod dataset;

// Evaluation engine
pub mod evaluation;

// Unified configuration
pub mod config;

mod error;

// Re-export commonly used types
pub use config::SmritiConfig;
pub use core::{Pose2D, RangeScan};
pub use dataset::{Dataset, NeighborTable, ScanRecord, ScanStore};
pub use error::{Result, SmritiError};
pub use evaluation::{EvaluationConfig, EvaluationState, EvaluationSummary};
pub use features::{Descriptor, DescriptorKind, HistogramDistance, InterestPoint};
pub use matching::{FeatureSetMatcher, RansacConfig, RansacFeatureSetMatcher, SetMatch};
