//! Geometric feature-set matching.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  FEATURE-SET MATCHING                        │
//! │                                                              │
//! │  reference set (world)       query set (sensor frame)        │
//! │          │                           │                       │
//! │          └──────────┬────────────────┘                       │
//! │                     ▼                                        │
//! │          ┌─────────────────────┐    ┌──────────────────┐     │
//! │          │ Descriptor proposals│ ──▶│ 2-point RANSAC   │     │
//! │          │ (nearest/threshold) │    │ + MSAC scoring   │     │
//! │          └─────────────────────┘    └──────────────────┘     │
//! │                                              │               │
//! │                                              ▼               │
//! │                                          SetMatch            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`FeatureSetMatcher`] | Interface consumed by the evaluation engine |
//! | [`RansacFeatureSetMatcher`] | Reference RANSAC implementation |
//! | [`fit_rigid`] | Closed-form least-squares rigid fit |
//!
//! ## Example
//!
//! ```rust,ignore
//! use smriti::matching::{FeatureSetMatcher, RansacConfig, RansacFeatureSetMatcher};
//!
//! let matcher = RansacFeatureSetMatcher::new(RansacConfig::default());
//! let result = matcher.match_sets(&reference, &query);
//!
//! if result.has_correspondences() {
//!     println!("Pose: {:?} ({} inliers)", result.transform, result.inliers());
//! }
//! ```

mod config;
mod ransac;
mod rigid;
mod traits;
mod types;

pub use config::{CHI2_1DOF_95, CHI2_2DOF_95, CorrespondenceStrategy, RansacConfig};
pub use ransac::RansacFeatureSetMatcher;
pub use rigid::fit_rigid;
pub use traits::FeatureSetMatcher;
pub use types::{Correspondence, SetMatch};
