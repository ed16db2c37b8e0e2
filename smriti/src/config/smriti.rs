//! Main SmritiConfig.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::EvaluationConfig;
use crate::matching::RansacConfig;

use super::defaults;
use super::descriptor::DescriptorSection;
use super::output::OutputSection;

/// Full Smriti configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SmritiConfig {
    /// Evaluation pass settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// RANSAC matcher settings
    #[serde(default)]
    pub matcher: RansacConfig,

    /// Descriptor settings
    #[serde(default)]
    pub descriptor: DescriptorSection,

    /// Output settings
    #[serde(default)]
    pub output: OutputSection,
}

impl SmritiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/smriti.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new(defaults::config_path());
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Log the effective configuration
    pub fn log_summary(&self) {
        let e = &self.evaluation;
        let m = &self.matcher;
        log::info!(
            "Evaluation: local_skip={}, neighborhood={}, lin_th={:.3}m, ang_th={:.3}rad, parallel={}",
            e.local_skip,
            e.neighborhood_size,
            e.linear_error_threshold,
            e.angular_error_threshold,
            e.parallel
        );
        log::info!(
            "Matcher: sigma={:.3}, success={:.2}, inlier={:.2}, threshold={:.3}, strategy={:?}, adaptive={}, seed={}",
            m.acceptance_sigma,
            m.success_probability,
            m.inlier_probability,
            m.matching_threshold,
            m.strategy,
            m.adaptive,
            m.seed
        );
        log::info!("Descriptor distance: {}", self.descriptor.distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::HistogramDistance;
    use crate::matching::CorrespondenceStrategy;

    #[test]
    fn test_default_config() {
        let config = SmritiConfig::default();
        assert_eq!(config.evaluation.local_skip, 1);
        assert_eq!(config.evaluation.neighborhood_size, 50);
        assert_eq!(config.matcher.seed, 42);
        assert_eq!(config.descriptor.distance, HistogramDistance::SymmetricChi2);
        assert!(config.output.write_tables);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SmritiConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = SmritiConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.matcher.max_iterations, config.matcher.max_iterations);
        assert_eq!(parsed.descriptor.distance, config.descriptor.distance);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "evaluation:\n  local_skip: 5\nmatcher:\n  strategy: threshold\ndescriptor:\n  distance: jsd\n";
        let config = SmritiConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.evaluation.local_skip, 5);
        assert_eq!(config.evaluation.neighborhood_size, 50);
        assert_eq!(config.matcher.strategy, CorrespondenceStrategy::Threshold);
        assert_eq!(config.descriptor.distance, HistogramDistance::JensenShannon);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(SmritiConfig::from_yaml("evaluation: [1, 2").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smriti.yaml");
        std::fs::write(&path, "evaluation:\n  neighborhood_size: 10\n").unwrap();

        let config = SmritiConfig::load(&path).unwrap();
        assert_eq!(config.evaluation.neighborhood_size, 10);
    }
}
