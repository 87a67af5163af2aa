//! Clustering configuration.

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Configuration for grid-adjacency density clustering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Density radius: maximum 3D distance between neighbors (meters).
    ///
    /// Default: 0.6
    #[serde(default = "defaults::eps")]
    pub eps: f64,

    /// Minimum neighborhood size, seed included, for a point to open or
    /// grow a cluster.
    ///
    /// Default: 3
    #[serde(default = "defaults::min_points")]
    pub min_points: usize,

    /// Azimuth slots searched on either side of a point.
    ///
    /// Default: 8
    #[serde(default = "defaults::azimuth_window")]
    pub azimuth_window: usize,

    /// Rings searched on either side of a point.
    ///
    /// Default: 2
    #[serde(default = "defaults::ring_window")]
    pub ring_window: usize,

    /// Treat the first and last azimuth slot as neighbors.
    ///
    /// Enable for full 360° scans. Rings never wrap.
    ///
    /// Default: false
    #[serde(default)]
    pub wrap_azimuth: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            eps: defaults::eps(),
            min_points: defaults::min_points(),
            azimuth_window: defaults::azimuth_window(),
            ring_window: defaults::ring_window(),
            wrap_azimuth: false,
        }
    }
}
