//! Core types shared by every layer.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward
//! - **Y-axis**: Left
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! - [`Pose2D`]: scan poses, feature poses and relative transforms
//! - [`RangeScan`]: raw beams handed to external detectors

mod math;
mod pose;
mod scan;

pub use math::{normalize_angle, sq};
pub use pose::Pose2D;
pub use scan::RangeScan;
