//! Obstacle population management.
//!
//! # Association
//!
//! Every cluster is matched to the nearest existing obstacle whose stored
//! position lies within `association_distance` of the cluster center.
//! Ties keep the earliest obstacle, so the result depends only on obstacle
//! creation order. Several clusters may match the same obstacle; their
//! points are merged before fitting.
//!
//! Clusters without a match are staged. Each staged cluster joins an
//! obstacle created earlier in the same frame when one is within the
//! association distance, and otherwise creates a new obstacle.
//!
//! # Lifecycle
//!
//! Matched obstacles are refreshed, unmatched obstacles are missed. The
//! tracker never removes obstacles during [`update`](ObstacleTracker::update);
//! callers decide when to [`prune`](ObstacleTracker::prune).

use crate::clustering::Cluster;
use crate::core::{EgoMotion, PointGrid};
use crate::filter::CtrvConfig;
use crate::geometry::RectangleFitter;

use super::config::TrackerConfig;
use super::obstacle::{Anomaly, FrameContext, ObstacleId, TrackedObstacle};

/// Summary of one tracker update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerUpdate {
    /// Obstacles created this frame
    pub created: Vec<ObstacleId>,
    /// Obstacles refreshed with at least one cluster
    pub refreshed: usize,
    /// Obstacles without any matched cluster
    pub missed: usize,
    /// Anomalies reported by refreshed obstacles
    pub anomalies: Vec<(ObstacleId, Anomaly)>,
}

/// Owns and updates the set of tracked obstacles.
#[derive(Clone, Debug)]
pub struct ObstacleTracker {
    config: TrackerConfig,
    filter_config: CtrvConfig,
    fitter: RectangleFitter,
    obstacles: Vec<TrackedObstacle>,
    next_id: u64,
}

impl ObstacleTracker {
    /// Create an empty tracker.
    pub fn new(config: TrackerConfig, filter_config: CtrvConfig) -> Self {
        let fitter = RectangleFitter::new(config.sizes.clone());
        Self {
            config,
            filter_config,
            fitter,
            obstacles: Vec::new(),
            next_id: 0,
        }
    }

    /// Tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live obstacles in creation order.
    pub fn obstacles(&self) -> &[TrackedObstacle] {
        &self.obstacles
    }

    /// Look up an obstacle by id.
    pub fn get(&self, id: ObstacleId) -> Option<&TrackedObstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// True if no obstacle is tracked.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Associate, create, refresh and miss for one frame.
    pub fn update(
        &mut self,
        grid: &PointGrid,
        clusters: &[Cluster],
        ego: EgoMotion,
        timestamp_us: u64,
    ) -> TrackerUpdate {
        let mut update = TrackerUpdate::default();
        let existing = self.obstacles.len();
        let threshold = self.config.association_distance;

        let mut staged = Vec::new();
        for (index, cluster) in clusters.iter().enumerate() {
            match nearest(&self.obstacles[..existing], cluster, threshold) {
                Some(o) => {
                    log::trace!(
                        "Cluster {} -> obstacle {}",
                        index,
                        self.obstacles[o].id()
                    );
                    self.obstacles[o].assign(index);
                }
                None => staged.push(index),
            }
        }

        for index in staged {
            let cluster = &clusters[index];
            if let Some(o) = nearest(&self.obstacles[existing..], cluster, threshold) {
                let o = existing + o;
                log::trace!(
                    "Cluster {} merged into new obstacle {}",
                    index,
                    self.obstacles[o].id()
                );
                self.obstacles[o].assign(index);
                continue;
            }

            let id = ObstacleId(self.next_id);
            self.next_id += 1;
            let mut obstacle = TrackedObstacle::new(
                id,
                cluster.center(),
                timestamp_us,
                self.config.initial_confidence,
                self.filter_config.clone(),
            );
            obstacle.assign(index);
            log::info!(
                "Created obstacle {} at ({:.2}, {:.2}) from {} points",
                id,
                cluster.center().x,
                cluster.center().y,
                cluster.len()
            );
            self.obstacles.push(obstacle);
            update.created.push(id);
        }

        let frame = FrameContext {
            grid,
            clusters,
            ego,
            timestamp_us,
        };
        for obstacle in &mut self.obstacles {
            if obstacle.matched_clusters().is_empty() {
                obstacle.miss();
                update.missed += 1;
                continue;
            }
            let outcome = obstacle.refresh(&frame, &self.config, &self.fitter);
            update.refreshed += 1;
            update
                .anomalies
                .extend(outcome.anomalies.into_iter().map(|a| (obstacle.id(), a)));
        }

        log::debug!(
            "Tracker: {} clusters, {} refreshed, {} missed, {} created, {} live",
            clusters.len(),
            update.refreshed,
            update.missed,
            update.created.len(),
            self.obstacles.len()
        );
        update
    }

    /// Remove stale obstacles, returning their ids.
    ///
    /// An obstacle is stale when its confidence is 0 or it has gone
    /// unmatched for more than `max_missed_frames`.
    pub fn prune(&mut self) -> Vec<ObstacleId> {
        let max_missed = self.config.max_missed_frames;
        let mut removed = Vec::new();
        self.obstacles.retain(|o| {
            if o.is_stale(max_missed) {
                log::info!(
                    "Removed obstacle {} (confidence {}, missed {})",
                    o.id(),
                    o.confidence(),
                    o.missed_frames()
                );
                removed.push(o.id());
                false
            } else {
                true
            }
        });
        removed
    }
}

/// Index of the nearest obstacle within `threshold`, first wins on ties.
fn nearest(obstacles: &[TrackedObstacle], cluster: &Cluster, threshold: f64) -> Option<usize> {
    let center = cluster.center();
    let mut best: Option<(usize, f64)> = None;
    for (i, obstacle) in obstacles.iter().enumerate() {
        let distance = obstacle.distance_to(center);
        if distance > threshold {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}
