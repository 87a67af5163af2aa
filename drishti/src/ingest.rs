//! Polar range frame to [`PointGrid`] conversion.
//!
//! A rotating 16-ring sensor delivers one range per ring for every azimuth
//! step. This module converts those ranges to sensor-relative Cartesian
//! points and applies the ingestion-time suppression policy: near-sensor
//! returns and returns outside the height window are pre-flagged so the
//! clustering engine never expands through them.
//!
//! # Conversion
//!
//! For ring elevation `e`, slot azimuth `az` and range `r`:
//!
//! ```text
//! xy = r·cos(e)
//! x  = xy·sin(az)
//! y  = xy·cos(az)
//! z  = r·sin(e)
//! ```
//!
//! Slot azimuths are evenly spaced from the start to the end azimuth,
//! both endpoints included.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{LidarPoint, PointGrid, RING_COUNT};
use crate::error::{Error, Result};

/// Ingestion settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Returns at or below this range are suppressed (meters).
    ///
    /// Default: 1.0
    #[serde(default = "defaults::min_range")]
    pub min_range: f64,

    /// Lower bound of the accepted height window, exclusive (meters).
    ///
    /// Default: -2.0
    #[serde(default = "defaults::min_z")]
    pub min_z: f64,

    /// Upper bound of the accepted height window, exclusive (meters).
    ///
    /// Default: 10.0
    #[serde(default = "defaults::max_z")]
    pub max_z: f64,

    /// Elevation of each ring in degrees, ring 0 first.
    ///
    /// Default: -15° to 15° in 2° steps
    #[serde(default = "defaults::ring_elevations_deg")]
    pub ring_elevations_deg: [f64; RING_COUNT],
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_range: defaults::min_range(),
            min_z: defaults::min_z(),
            max_z: defaults::max_z(),
            ring_elevations_deg: defaults::ring_elevations_deg(),
        }
    }
}

impl IngestConfig {
    /// True if a return should be excluded from clustering.
    #[inline]
    pub fn suppresses(&self, range: f64, z: f64) -> bool {
        range <= self.min_range || !(z < self.max_z && z > self.min_z)
    }
}

/// A raw frame of range measurements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarFrame {
    /// Azimuth of the first slot (degrees)
    pub start_azimuth_deg: f64,
    /// Azimuth of the last slot (degrees)
    pub end_azimuth_deg: f64,
    /// Ranges in slot-major order, one per ring per slot (0 = no return)
    pub ranges: Vec<f64>,
}

impl PolarFrame {
    /// Create a new frame.
    pub fn new(start_azimuth_deg: f64, end_azimuth_deg: f64, ranges: Vec<f64>) -> Self {
        Self {
            start_azimuth_deg,
            end_azimuth_deg,
            ranges,
        }
    }

    /// Number of azimuth slots, `None` if ranges do not fill whole slots.
    pub fn slots(&self) -> Option<usize> {
        if self.ranges.len() % RING_COUNT == 0 {
            Some(self.ranges.len() / RING_COUNT)
        } else {
            None
        }
    }

    /// Azimuth of slot `i` of `slots` in radians.
    pub fn slot_azimuth(&self, i: usize, slots: usize) -> f64 {
        let start = self.start_azimuth_deg.to_radians();
        let end = self.end_azimuth_deg.to_radians();
        if slots <= 1 {
            return start;
        }
        start + (end - start) * i as f64 / (slots - 1) as f64
    }
}

/// Convert a polar frame into a point grid.
///
/// # Errors
/// [`Error::RangeCount`] if the range count is not a multiple of
/// [`RING_COUNT`].
pub fn ingest(frame: &PolarFrame, config: &IngestConfig) -> Result<PointGrid> {
    let slots = frame.slots().ok_or(Error::RangeCount {
        ranges: frame.ranges.len(),
    })?;

    let elevations: Vec<(f64, f64)> = config
        .ring_elevations_deg
        .iter()
        .map(|deg| deg.to_radians().sin_cos())
        .collect();

    let mut points = Vec::with_capacity(frame.ranges.len());
    for slot in 0..slots {
        let azimuth = frame.slot_azimuth(slot, slots);
        let (sin_az, cos_az) = azimuth.sin_cos();

        for (ring, &(sin_e, cos_e)) in elevations.iter().enumerate() {
            let range = frame.ranges[slot * RING_COUNT + ring];
            let xy_range = range * cos_e;
            let z = range * sin_e;

            let mut point = LidarPoint::new(xy_range * sin_az, xy_range * cos_az, z, range, azimuth);
            if config.suppresses(range, z) {
                point.suppress();
            }
            points.push(point);
        }
    }

    let grid = PointGrid::new(slots, points)?;
    log::trace!(
        "Ingested {} slots, {} live points",
        grid.slots(),
        grid.live_count()
    );
    Ok(grid)
}
