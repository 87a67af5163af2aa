//! Main DrishtiConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clustering::ClusteringConfig;
use crate::filter::CtrvConfig;
use crate::ingest::IngestConfig;
use crate::tracking::TrackerConfig;

use super::defaults;
use super::error::ConfigLoadError;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/drishti.yaml";

/// Pipeline orchestration settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineSection {
    /// Remove stale obstacles after every frame.
    ///
    /// The tracker itself never removes obstacles; when this is false the
    /// caller owns the removal policy.
    #[serde(default = "defaults::disabled")]
    pub prune_stale: bool,
}

/// Full Drishti configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DrishtiConfig {
    /// Polar frame conversion and suppression
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Density clustering
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Association, classification and confidence thresholds
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// CTRV motion filter noise
    #[serde(default)]
    pub filter: CtrvConfig,

    /// Frame orchestration
    #[serde(default)]
    pub pipeline: PipelineSection,
}

impl DrishtiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/drishti.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Get the ingest config
    pub fn ingest_config(&self) -> IngestConfig {
        self.ingest.clone()
    }

    /// Get the clustering config
    pub fn clustering_config(&self) -> ClusteringConfig {
        self.clustering.clone()
    }

    /// Get the tracker config
    pub fn tracker_config(&self) -> TrackerConfig {
        self.tracker.clone()
    }

    /// Get the motion filter config
    pub fn filter_config(&self) -> CtrvConfig {
        self.filter.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DrishtiConfig::default();
        assert_eq!(config.clustering.min_points, 3);
        assert_eq!(config.tracker.building_height, 4.5);
        assert_eq!(config.tracker.speed_glitch_limit, 100.0);
        assert_eq!(config.tracker.min_heading_displacement, 1e-6);
        assert!(!config.pipeline.prune_stale);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = DrishtiConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = DrishtiConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.clustering.eps, config.clustering.eps);
        assert_eq!(parsed.tracker.sizes.lengths, config.tracker.sizes.lengths);
        assert_eq!(parsed.filter.measurement.speed, config.filter.measurement.speed);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
clustering:
  eps: 0.8
tracker:
  association_distance: 4.0
  classes:
    pedestrian: { length: 1.0, width: 1.0 }
    cyclist: { length: 2.0, width: 1.5 }
    car: { length: 7.0, width: 4.0 }
"#;
        let config = DrishtiConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.clustering.eps, 0.8);
        assert_eq!(config.clustering.min_points, 3);
        assert_eq!(config.tracker.association_distance, 4.0);
        assert_eq!(config.tracker.classes.pedestrian.length, 1.0);
        assert_eq!(config.tracker.high_speed_limit, 10.0);
        assert_eq!(config.tracker.min_heading_displacement, 1e-6);
        assert_eq!(config.ingest.min_range, 1.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pipeline:\n  prune_stale: true\nclustering:\n  min_points: 5").unwrap();

        let config = DrishtiConfig::load(file.path()).unwrap();
        assert!(config.pipeline.prune_stale);
        assert_eq!(config.clustering.min_points, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = DrishtiConfig::load(Path::new("/nonexistent/drishti.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::Io(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = DrishtiConfig::from_yaml("clustering: [not, a, map]");
        assert!(matches!(result, Err(ConfigLoadError::Parse(_))));
    }
}
