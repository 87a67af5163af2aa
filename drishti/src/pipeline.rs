//! Per-frame orchestration.
//!
//! ```text
//! PolarFrame ──ingest──► PointGrid ──GridDbscan──► clusters ──hull──► summaries
//!                                                     │
//!                                                     └──► ObstacleTracker ──► snapshots
//! ```
//!
//! Clusters and the grid are frame-scoped: nothing produced here borrows
//! from them once [`Pipeline::process`] returns.

use serde::{Deserialize, Serialize};

use crate::clustering::{ClusterScratch, GridDbscan};
use crate::config::DrishtiConfig;
use crate::core::{EgoMotion, Point2D, PointGrid};
use crate::error::Result;
use crate::geometry::convex_hull;
use crate::ingest::{IngestConfig, PolarFrame, ingest};
use crate::tracking::{Anomaly, ObstacleClass, ObstacleId, ObstacleTracker, TrackedObstacle};

/// Shape summary of one cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Planar center
    pub center: Point2D,
    /// Member count
    pub size: usize,
    /// Convex hull vertices, counter-clockwise
    pub hull: Vec<Point2D>,
}

/// Exported state of one tracked obstacle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    /// Stable identifier
    pub id: ObstacleId,
    /// Filtered x
    pub x: f64,
    /// Filtered y
    pub y: f64,
    /// Filtered heading
    pub theta: f64,
    /// Filtered speed
    pub speed: f64,
    /// Filtered yaw rate
    pub yaw_rate: f64,
    /// Smoothed raw speed
    pub raw_speed: f64,
    /// Rectangle corners, empty before the first fit
    pub corners: Vec<Point2D>,
    /// Rectangle center
    pub center: Option<Point2D>,
    /// Snapped length
    pub length: f64,
    /// Snapped width
    pub width: f64,
    /// Class
    pub class: ObstacleClass,
    /// Confidence
    pub confidence: u32,
    /// Consecutive unmatched frames
    pub missed_frames: u32,
}

impl From<&TrackedObstacle> for ObstacleSnapshot {
    fn from(o: &TrackedObstacle) -> Self {
        let filter = o.filter();
        Self {
            id: o.id(),
            x: filter.x(),
            y: filter.y(),
            theta: filter.theta(),
            speed: filter.speed(),
            yaw_rate: filter.yaw_rate(),
            raw_speed: o.speed(),
            corners: o
                .rectangle()
                .map(|r| r.corners().to_vec())
                .unwrap_or_default(),
            center: o.rectangle().map(|r| r.center()),
            length: o.length(),
            width: o.width(),
            class: o.class(),
            confidence: o.confidence(),
            missed_frames: o.missed_frames(),
        }
    }
}

/// Result of processing one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Sequential frame number, starting at 0
    pub frame: u64,
    /// Frame timestamp (µs)
    pub timestamp_us: u64,
    /// Live (unsuppressed) points
    pub live_points: usize,
    /// Per-cluster summaries in discovery order
    pub clusters: Vec<ClusterSummary>,
    /// Obstacles after the update, creation order
    pub obstacles: Vec<ObstacleSnapshot>,
    /// Obstacles created this frame
    pub created: Vec<ObstacleId>,
    /// Obstacles pruned this frame
    pub pruned: Vec<ObstacleId>,
    /// Anomalies reported during refresh
    pub anomalies: Vec<(ObstacleId, Anomaly)>,
}

/// Full perception pipeline for one sensor stream.
#[derive(Debug)]
pub struct Pipeline {
    ingest: IngestConfig,
    dbscan: GridDbscan,
    scratch: ClusterScratch,
    tracker: ObstacleTracker,
    prune_stale: bool,
    frame: u64,
}

impl Pipeline {
    /// Build the pipeline from a configuration.
    pub fn new(config: &DrishtiConfig) -> Self {
        Self {
            ingest: config.ingest_config(),
            dbscan: GridDbscan::new(config.clustering_config()),
            scratch: ClusterScratch::default(),
            tracker: ObstacleTracker::new(config.tracker_config(), config.filter_config()),
            prune_stale: config.pipeline.prune_stale,
            frame: 0,
        }
    }

    /// Tracker state.
    pub fn tracker(&self) -> &ObstacleTracker {
        &self.tracker
    }

    /// Frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    /// Process an already populated grid.
    pub fn process(&mut self, grid: &PointGrid, ego: EgoMotion, timestamp_us: u64) -> FrameReport {
        let clusters = self.dbscan.cluster_with_scratch(grid, &mut self.scratch);

        let summaries = clusters
            .iter()
            .map(|cluster| ClusterSummary {
                center: cluster.center(),
                size: cluster.len(),
                hull: convex_hull(grid, cluster)
                    .into_iter()
                    .map(|i| grid.point(i).xy())
                    .collect(),
            })
            .collect();

        let update = self.tracker.update(grid, &clusters, ego, timestamp_us);
        let pruned = if self.prune_stale {
            self.tracker.prune()
        } else {
            Vec::new()
        };

        let report = FrameReport {
            frame: self.frame,
            timestamp_us,
            live_points: grid.live_count(),
            clusters: summaries,
            obstacles: self
                .tracker
                .obstacles()
                .iter()
                .map(ObstacleSnapshot::from)
                .collect(),
            created: update.created,
            pruned,
            anomalies: update.anomalies,
        };

        log::debug!(
            "Frame {}: {} live points, {} clusters, {} obstacles",
            report.frame,
            report.live_points,
            report.clusters.len(),
            report.obstacles.len()
        );
        self.frame += 1;
        report
    }

    /// Ingest a polar frame and process it.
    ///
    /// # Errors
    /// Propagates ingestion shape errors; no state changes on error.
    pub fn process_polar(
        &mut self,
        frame: &PolarFrame,
        ego: EgoMotion,
        timestamp_us: u64,
    ) -> Result<FrameReport> {
        let grid = ingest(frame, &self.ingest)?;
        Ok(self.process(&grid, ego, timestamp_us))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LidarPoint, RING_COUNT};
    use crate::error::Error;

    fn blob_grid() -> PointGrid {
        let mut grid = PointGrid::empty(12);
        for s in 0..5 {
            for r in 0..3 {
                let x = 10.0 + 0.3 * s as f64;
                let y = 4.0 + 0.3 * r as f64;
                grid.set(s, r, LidarPoint::new(x, y, 0.2, (x * x + y * y).sqrt(), 0.0));
            }
        }
        grid
    }

    #[test]
    fn test_process_reports_clusters_and_obstacles() {
        let mut pipeline = Pipeline::new(&DrishtiConfig::default());
        let report = pipeline.process(&blob_grid(), EgoMotion::ZERO, 0);

        assert_eq!(report.frame, 0);
        assert_eq!(report.live_points, 15);
        assert_eq!(report.clusters.len(), 1);
        assert_eq!(report.clusters[0].size, 15);
        assert_eq!(report.clusters[0].hull.len(), 4);
        assert_eq!(report.obstacles.len(), 1);
        assert_eq!(report.created, vec![ObstacleId(0)]);
        assert_eq!(report.obstacles[0].corners.len(), 4);
        assert_eq!(pipeline.frames_processed(), 1);
    }

    #[test]
    fn test_prune_stale_removes_lost_tracks() {
        let mut config = DrishtiConfig::default();
        config.pipeline.prune_stale = true;
        let mut pipeline = Pipeline::new(&config);

        pipeline.process(&blob_grid(), EgoMotion::ZERO, 0);
        let empty = PointGrid::empty(12);

        let mut pruned = Vec::new();
        for k in 1..=4u64 {
            pruned.extend(pipeline.process(&empty, EgoMotion::ZERO, k * 100_000).pruned);
        }
        assert_eq!(pruned, vec![ObstacleId(0)]);
        assert!(pipeline.tracker().is_empty());
    }

    #[test]
    fn test_process_polar_rejects_bad_shape() {
        let mut pipeline = Pipeline::new(&DrishtiConfig::default());
        let frame = PolarFrame::new(0.0, 10.0, vec![5.0; RING_COUNT + 1]);
        let result = pipeline.process_polar(&frame, EgoMotion::ZERO, 0);
        assert!(matches!(result, Err(Error::RangeCount { .. })));
        assert_eq!(pipeline.frames_processed(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let mut pipeline = Pipeline::new(&DrishtiConfig::default());
        let report = pipeline.process(&blob_grid(), EgoMotion::ZERO, 0);
        let yaml = serde_yaml::to_string(&report).unwrap();
        assert!(yaml.contains("obstacles"));
        let parsed: FrameReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.obstacles.len(), 1);
    }
}
