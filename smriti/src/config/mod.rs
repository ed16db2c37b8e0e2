//! Unified configuration loading for Smriti.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smriti::config::SmritiConfig;
//!
//! // Load from default path (configs/smriti.yaml)
//! let config = SmritiConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = SmritiConfig::default();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`EvaluationConfig`](crate::evaluation::EvaluationConfig) | Local skip, neighbourhood, error tolerances |
//! | [`RansacConfig`](crate::matching::RansacConfig) | Matcher tunables |
//! | [`DescriptorSection`] | Histogram distance |
//! | [`OutputSection`] | Table and summary output |
//!
//! ## Example YAML
//!
//! ```yaml
//! evaluation:
//!   local_skip: 1
//!   neighborhood_size: 50
//!   linear_error_threshold: 0.5   # meters
//!   angular_error_threshold: 0.2  # radians
//!
//! matcher:
//!   acceptance_sigma: 0.1
//!   strategy: nearest             # or threshold
//!   seed: 42
//!
//! descriptor:
//!   distance: symchi2             # euclid, chi2, symchi2, batt, kld, jsd
//! ```

mod defaults;
mod descriptor;
mod output;
mod smriti;

pub use descriptor::DescriptorSection;
pub use output::OutputSection;
pub use smriti::SmritiConfig;
