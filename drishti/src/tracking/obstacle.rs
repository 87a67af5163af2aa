//! Tracked obstacle state and per-frame refresh.
//!
//! # Refresh
//!
//! Each frame an obstacle with at least one matched cluster runs:
//!
//! 1. Raw mean over all matched points; lifetime max height updated
//! 2. Ego-motion compensation of the stored position (skipped on the
//!    creation frame, whose position is already in frame coordinates)
//! 3. Heading from compensated position to raw mean, kept while the
//!    displacement is below `min_heading_displacement`
//! 4. Oriented rectangle fit in the heading frame. With fewer than two
//!    points every estimate is kept and confidence does not grow
//! 5. Smoothed speed from rectangle-center displacement, glitch clamped
//! 6. Yaw rate from the signed change in rectangle rotation
//! 7. CTRV filter update
//! 8. Classification and confidence adjustment
//!
//! Anomalies never abort a refresh. They are reported in the returned
//! [`RefreshOutcome`] and reflected in confidence.

use serde::{Deserialize, Serialize};

use crate::clustering::Cluster;
use crate::core::math::{normalize_angle, signed_rotation};
use crate::core::{EgoMotion, Point2D, PointGrid};
use crate::filter::{CtrvConfig, CtrvFilter, CtrvMeasurement};
use crate::geometry::{OrientedRectangle, RectangleFitter};

use super::classification::ObstacleClass;
use super::config::TrackerConfig;

/// Stable obstacle identifier, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u64);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-fatal condition detected during a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Too few points to fit a rectangle; previous rectangle retained
    DegenerateGeometry {
        /// Points that reached the fitter
        points: usize,
    },
    /// Raw speed above the glitch limit, clamped to zero
    SpeedGlitch {
        /// Smoothed speed before clamping
        speed: f64,
    },
    /// Speed above the high-speed limit
    HighSpeed {
        /// Smoothed speed
        speed: f64,
    },
    /// Fitted footprint larger than any plausible vehicle
    OversizeFootprint {
        /// Snapped length
        length: f64,
        /// Snapped width
        width: f64,
    },
    /// Tall structure
    BuildingHeight {
        /// Lifetime max point height
        height: f64,
    },
}

impl Anomaly {
    /// True if this anomaly halves confidence.
    pub fn degrades_confidence(&self) -> bool {
        matches!(
            self,
            Anomaly::HighSpeed { .. }
                | Anomaly::OversizeFootprint { .. }
                | Anomaly::BuildingHeight { .. }
        )
    }
}

/// What happened during one refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefreshOutcome {
    /// Anomalies in detection order
    pub anomalies: Vec<Anomaly>,
    /// Confidence was halved this frame
    pub confidence_halved: bool,
    /// Motion filter was updated this frame
    pub filter_updated: bool,
}

/// Read-only view of one frame shared by every obstacle refresh.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// The frame's point arena
    pub grid: &'a PointGrid,
    /// Clusters of this frame, indexed by matched-cluster lists
    pub clusters: &'a [Cluster],
    /// Ego-motion delta since the previous frame
    pub ego: EgoMotion,
    /// Frame timestamp (µs)
    pub timestamp_us: u64,
}

/// A persistent tracked obstacle.
#[derive(Clone, Debug)]
pub struct TrackedObstacle {
    id: ObstacleId,

    // Pose
    position: Point2D,
    heading: f64,
    /// Created this frame; position is already in frame coordinates
    fresh: bool,

    filter: CtrvFilter,

    // Shape
    rectangle: Option<OrientedRectangle>,
    rotation: f64,
    previous_rotation: f64,
    length: f64,
    width: f64,

    class: ObstacleClass,
    confidence: u32,

    /// Cluster indices matched this frame
    matched: Vec<usize>,

    last_timestamp_us: u64,
    max_height: f64,
    raw_mean: Point2D,

    // Raw motion
    speed_x: f64,
    speed_y: f64,
    speed: f64,
    yaw_rate: f64,

    missed_frames: u32,
}

impl TrackedObstacle {
    /// Create an obstacle at a cluster center.
    pub fn new(
        id: ObstacleId,
        center: Point2D,
        timestamp_us: u64,
        initial_confidence: u32,
        filter_config: CtrvConfig,
    ) -> Self {
        let mut filter = CtrvFilter::new(filter_config);
        filter.init(center.x, center.y, 0.0, 0.0, 0.0);

        Self {
            id,
            position: center,
            heading: 0.0,
            fresh: true,
            filter,
            rectangle: None,
            rotation: 0.0,
            previous_rotation: 0.0,
            length: 0.0,
            width: 0.0,
            class: ObstacleClass::Unclassified,
            confidence: initial_confidence,
            matched: Vec::new(),
            last_timestamp_us: timestamp_us,
            max_height: f64::NEG_INFINITY,
            raw_mean: center,
            speed_x: 0.0,
            speed_y: 0.0,
            speed: 0.0,
            yaw_rate: 0.0,
            missed_frames: 0,
        }
    }

    /// Add a cluster (by frame index) to this frame's working set.
    pub fn assign(&mut self, cluster: usize) {
        self.matched.push(cluster);
    }

    /// Euclidean distance from the stored position.
    #[inline]
    pub fn distance_to(&self, point: Point2D) -> f64 {
        self.position.distance(&point)
    }

    /// Fuse this frame's matched clusters.
    ///
    /// Falls back to [`miss`](Self::miss) when no cluster was matched.
    pub fn refresh(
        &mut self,
        frame: &FrameContext<'_>,
        config: &TrackerConfig,
        fitter: &RectangleFitter,
    ) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        // A new obstacle already lives in this frame's coordinates
        let ego = if std::mem::take(&mut self.fresh) {
            EgoMotion::ZERO
        } else {
            frame.ego
        };

        let mut points = Vec::new();
        for &index in &self.matched {
            let Some(cluster) = frame.clusters.get(index) else {
                continue;
            };
            if let Some(height) = cluster.max_height(frame.grid) {
                self.max_height = self.max_height.max(height);
            }
            points.extend(cluster.points(frame.grid).map(|p| p.xy()));
        }
        self.matched.clear();

        let Some(mean) = Point2D::mean(&points) else {
            self.miss();
            outcome.confidence_halved = true;
            return outcome;
        };

        // Ego compensation, then heading
        let compensated = self.position.translated(ego.dx, ego.dy);
        let dx = mean.x - compensated.x;
        let dy = mean.y - compensated.y;
        let heading = if dx.hypot(dy) > config.min_heading_displacement {
            normalize_angle(dy.atan2(dx))
        } else {
            self.heading
        };

        // Too few points: keep every estimate from the last fit
        let Some(fit) = fitter.fit(&points, heading) else {
            log::warn!(
                "Obstacle {}: {} point(s) cannot support a rectangle, keeping previous",
                self.id,
                points.len()
            );
            outcome.anomalies.push(Anomaly::DegenerateGeometry {
                points: points.len(),
            });
            self.check_height(config, &mut outcome);
            self.settle_confidence(&mut outcome, false);
            return outcome;
        };

        let dt = frame.timestamp_us.saturating_sub(self.last_timestamp_us) as f64 / 1e6;
        self.last_timestamp_us = frame.timestamp_us;
        self.raw_mean = mean;
        self.position = mean;
        self.heading = heading;

        // Rectangle
        let previous_center = self.rectangle.as_ref().map(OrientedRectangle::center);
        self.previous_rotation = self.rotation;
        self.rotation = fit.rectangle.rotation();
        self.length = fit.length;
        self.width = fit.width;
        let center = fit.rectangle.center();
        self.rectangle = Some(fit.rectangle);

        // Speed and yaw rate need a previous rectangle and elapsed time
        self.yaw_rate = 0.0;
        if let Some(previous) = previous_center {
            if dt > 0.0 {
                let inst_x = (center.x - ego.dx - previous.x) / dt;
                let inst_y = (center.y - ego.dy - previous.y) / dt;
                let w = config.speed_smoothing;
                self.speed_x = w * inst_x + (1.0 - w) * self.speed_x;
                self.speed_y = w * inst_y + (1.0 - w) * self.speed_y;
                self.speed = self.speed_x.hypot(self.speed_y);

                if self.speed > config.speed_glitch_limit {
                    log::warn!(
                        "Obstacle {}: implausible speed {:.1}, clamping to zero",
                        self.id,
                        self.speed
                    );
                    outcome.anomalies.push(Anomaly::SpeedGlitch { speed: self.speed });
                    self.speed = 0.0;
                    self.speed_x = 0.0;
                    self.speed_y = 0.0;
                }

                self.yaw_rate = signed_rotation(self.previous_rotation, self.rotation) / dt;
            }
        }

        // Filter
        let measurement = CtrvMeasurement {
            x: center.x,
            y: center.y,
            theta: self.rotation,
            speed: self.speed,
            yaw_rate: self.yaw_rate,
        };
        self.filter.update(&measurement, ego, dt);
        outcome.filter_updated = true;

        // Classification and confidence
        self.class = ObstacleClass::from_footprint(self.length, self.width, &config.classes);

        if self.speed > config.high_speed_limit {
            outcome.anomalies.push(Anomaly::HighSpeed { speed: self.speed });
        }
        if self.length > config.max_footprint.length || self.width > config.max_footprint.width {
            outcome.anomalies.push(Anomaly::OversizeFootprint {
                length: self.length,
                width: self.width,
            });
        }
        self.check_height(config, &mut outcome);
        self.settle_confidence(&mut outcome, true);

        log::debug!(
            "Obstacle {}: {} at ({:.2}, {:.2}) v={:.2} ω={:.3} {}x{} conf={}",
            self.id,
            self.class,
            self.filter.x(),
            self.filter.y(),
            self.filter.speed(),
            self.filter.yaw_rate(),
            self.length,
            self.width,
            self.confidence
        );

        outcome
    }

    /// Force the building class when the lifetime max height is too tall.
    fn check_height(&mut self, config: &TrackerConfig, outcome: &mut RefreshOutcome) {
        if self.max_height > config.building_height {
            self.class = ObstacleClass::Building;
            outcome.anomalies.push(Anomaly::BuildingHeight {
                height: self.max_height,
            });
        }
    }

    /// Halve on a degrading anomaly, otherwise grow when `consistent`.
    fn settle_confidence(&mut self, outcome: &mut RefreshOutcome, consistent: bool) {
        if outcome.anomalies.iter().any(Anomaly::degrades_confidence) {
            self.confidence /= 2;
            outcome.confidence_halved = true;
            log::warn!(
                "Obstacle {}: confidence halved to {} ({:?})",
                self.id,
                self.confidence,
                outcome.anomalies
            );
        } else if consistent {
            self.confidence = self.confidence.saturating_add(1);
        }
        self.missed_frames = 0;
    }

    /// Record a frame without any matched cluster.
    ///
    /// Halves confidence; no other estimate changes.
    pub fn miss(&mut self) {
        self.matched.clear();
        self.confidence /= 2;
        self.missed_frames = self.missed_frames.saturating_add(1);
    }

    /// True if confidence is exhausted or the obstacle has gone unmatched
    /// for more than `max_missed_frames`.
    pub fn is_stale(&self, max_missed_frames: u32) -> bool {
        self.confidence == 0 || self.missed_frames > max_missed_frames
    }

    /// True if `point` lies within the fitted rectangle.
    pub fn contains(&self, point: Point2D) -> bool {
        self.rectangle
            .as_ref()
            .is_some_and(|rect| rect.contains(point))
    }

    /// Filtered position advanced by one second along the filtered heading.
    pub fn filtered_movement_vector(&self) -> Point2D {
        self.filter.movement_vector()
    }

    // Accessors

    /// Stable identifier.
    pub fn id(&self) -> ObstacleId {
        self.id
    }

    /// Stored (unfiltered) position.
    pub fn position(&self) -> Point2D {
        self.position
    }

    /// Stored heading, normalized to (−π, π].
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Motion filter.
    pub fn filter(&self) -> &CtrvFilter {
        &self.filter
    }

    /// Fitted rectangle, if any frame supported one.
    pub fn rectangle(&self) -> Option<&OrientedRectangle> {
        self.rectangle.as_ref()
    }

    /// Current rectangle rotation.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rectangle rotation of the previous fit.
    pub fn previous_rotation(&self) -> f64 {
        self.previous_rotation
    }

    /// Snapped length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Snapped width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current class.
    pub fn class(&self) -> ObstacleClass {
        self.class
    }

    /// Track confidence.
    pub fn confidence(&self) -> u32 {
        self.confidence
    }

    /// Clusters matched so far this frame.
    pub fn matched_clusters(&self) -> &[usize] {
        &self.matched
    }

    /// Timestamp of the last refresh (µs).
    pub fn last_timestamp_us(&self) -> u64 {
        self.last_timestamp_us
    }

    /// Lifetime max point height (−∞ before the first refresh).
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Raw mean of the last matched points.
    pub fn raw_mean(&self) -> Point2D {
        self.raw_mean
    }

    /// Smoothed raw speed (m/s).
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Raw yaw rate of the last refresh (rad/s).
    pub fn yaw_rate(&self) -> f64 {
        self.yaw_rate
    }

    /// Consecutive unmatched frames.
    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }
}
