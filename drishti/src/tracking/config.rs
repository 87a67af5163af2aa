//! Tracker thresholds.
//!
//! Classification limits are inclusive (`<=`). Anomaly triggers are strict
//! (`>`): a speed, footprint or height exactly at its limit is plausible.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::geometry::SizeTable;

/// Maximum footprint for a class (meters, inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeLimit {
    /// Maximum length
    pub length: f64,
    /// Maximum width
    pub width: f64,
}

impl SizeLimit {
    /// Create a new limit.
    pub const fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// True if `length x width` fits within the limit.
    #[inline]
    pub fn fits(&self, length: f64, width: f64) -> bool {
        length <= self.length && width <= self.width
    }
}

/// Footprint limits per obstacle class, checked in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassLimits {
    /// Pedestrian footprint
    pub pedestrian: SizeLimit,
    /// Cyclist footprint
    pub cyclist: SizeLimit,
    /// Car footprint
    pub car: SizeLimit,
}

impl Default for ClassLimits {
    fn default() -> Self {
        defaults::class_limits()
    }
}

/// Configuration for [`ObstacleTracker`](super::ObstacleTracker).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum cluster-center to obstacle distance for a match (meters).
    ///
    /// Default: 2.5
    #[serde(default = "defaults::association_distance")]
    pub association_distance: f64,

    /// Confidence of a freshly created obstacle.
    ///
    /// Default: 1
    #[serde(default = "defaults::initial_confidence")]
    pub initial_confidence: u32,

    /// Consecutive unmatched frames after which an obstacle is stale.
    ///
    /// Default: 5
    #[serde(default = "defaults::max_missed_frames")]
    pub max_missed_frames: u32,

    /// Raw speeds above this are treated as sensor glitches and zeroed.
    ///
    /// Default: 100.0
    #[serde(default = "defaults::speed_glitch_limit")]
    pub speed_glitch_limit: f64,

    /// Speeds above this halve confidence.
    ///
    /// Default: 10.0
    #[serde(default = "defaults::high_speed_limit")]
    pub high_speed_limit: f64,

    /// Weight of the instantaneous speed in the exponential smoothing.
    ///
    /// Default: 0.5
    #[serde(default = "defaults::speed_smoothing")]
    pub speed_smoothing: f64,

    /// Displacement below which the stored heading is kept (meters).
    ///
    /// Rounding noise in the mean of a static obstacle must not swing the
    /// heading.
    ///
    /// Default: 1e-6
    #[serde(default = "defaults::min_heading_displacement")]
    pub min_heading_displacement: f64,

    /// Max point height above this forces the building class (meters).
    ///
    /// Default: 4.5
    #[serde(default = "defaults::building_height")]
    pub building_height: f64,

    /// Largest plausible footprint; anything larger halves confidence.
    ///
    /// Default: 7.0 x 4.0
    #[serde(default = "defaults::max_footprint")]
    pub max_footprint: SizeLimit,

    /// Classification footprints.
    #[serde(default = "defaults::class_limits")]
    pub classes: ClassLimits,

    /// Canonical dimensions for rectangle snapping.
    #[serde(default = "defaults::size_table")]
    pub sizes: SizeTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            association_distance: defaults::association_distance(),
            initial_confidence: defaults::initial_confidence(),
            max_missed_frames: defaults::max_missed_frames(),
            speed_glitch_limit: defaults::speed_glitch_limit(),
            high_speed_limit: defaults::high_speed_limit(),
            speed_smoothing: defaults::speed_smoothing(),
            min_heading_displacement: defaults::min_heading_displacement(),
            building_height: defaults::building_height(),
            max_footprint: defaults::max_footprint(),
            classes: defaults::class_limits(),
            sizes: defaults::size_table(),
        }
    }
}
