//! Synthetic lidar scenarios loaded from YAML.
//!
//! A scenario places oriented boxes around the sensor and moves them with
//! constant velocity and yaw rate. Each frame is produced by ray casting
//! every azimuth slot and ring against the boxes:
//!
//! - The horizontal ray is intersected with each box footprint (slab test
//!   in the box frame)
//! - The ring elevation limits the hit to the box's vertical extent, from
//!   the ground (`-sensor_height`) to `height - sensor_height`
//! - The nearest hit wins; no hit gives range 0 (no return)
//!
//! Stationary world points move by `ego_motion` per frame in the sensor
//! frame, so object positions include the accumulated ego offset.
//!
//! Noise is seeded per frame, so [`Scenario::frame`] is deterministic for
//! a given seed and frame index.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{EgoMotion, Point2D};
use crate::error::{Error, Result};
use crate::ingest::PolarFrame;

/// A scenario definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable scenario name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Number of frames to generate
    #[serde(default = "default_frames")]
    pub frames: usize,

    /// Time between frames in milliseconds
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Azimuth slots per frame
    #[serde(default = "default_azimuth_slots")]
    pub azimuth_slots: usize,

    /// Azimuth of the first slot (degrees)
    #[serde(default)]
    pub start_azimuth_deg: f64,

    /// Azimuth of the last slot (degrees)
    #[serde(default = "default_end_azimuth_deg")]
    pub end_azimuth_deg: f64,

    /// Sensor height above the ground (meters)
    #[serde(default = "default_sensor_height")]
    pub sensor_height: f64,

    /// Ego-motion delta per frame `[dx, dy]` in the sensor frame
    #[serde(default)]
    pub ego_motion: [f64; 2],

    /// Range noise
    #[serde(default)]
    pub noise: NoiseSpec,

    /// Ring elevations in degrees
    #[serde(default = "defaults::ring_elevations_deg")]
    pub ring_elevations_deg: [f64; 16],

    /// Boxes in the scene
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

/// Gaussian range noise
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Standard deviation added to every hit (meters, 0 = exact)
    #[serde(default)]
    pub range_stddev: f64,

    /// Random seed
    #[serde(default)]
    pub seed: u64,
}

/// An oriented box moving with constant velocity and yaw rate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneObject {
    /// Center X at frame 0 (meters)
    pub x: f64,
    /// Center Y at frame 0 (meters)
    pub y: f64,
    /// Heading of the length axis at frame 0 (radians, CCW from +X)
    #[serde(default)]
    pub heading: f64,
    /// Extent along the heading (meters)
    pub length: f64,
    /// Extent across the heading (meters)
    pub width: f64,
    /// Height above the ground (meters)
    pub height: f64,
    /// World velocity `[vx, vy]` (m/s)
    #[serde(default)]
    pub velocity: [f64; 2],
    /// Yaw rate (rad/s)
    #[serde(default)]
    pub yaw_rate: f64,
}

/// One generated frame
#[derive(Clone, Debug)]
pub struct ScenarioFrame {
    /// Frame index
    pub index: usize,
    /// Timestamp (µs)
    pub timestamp_us: u64,
    /// Ego-motion delta for this frame
    pub ego: EgoMotion,
    /// Raw ranges
    pub polar: PolarFrame,
}

fn default_frames() -> usize {
    10
}
fn default_frame_interval_ms() -> u64 {
    100
}
fn default_azimuth_slots() -> usize {
    360
}
fn default_end_azimuth_deg() -> f64 {
    359.0
}
fn default_sensor_height() -> f64 {
    1.8
}

impl Scenario {
    /// Load and validate a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check ranges of all parameters
    pub fn validate(&self) -> Result<()> {
        if self.azimuth_slots == 0 {
            return Err(Error::Scenario("azimuth_slots must be positive".into()));
        }
        if self.frame_interval_ms == 0 {
            return Err(Error::Scenario("frame_interval_ms must be positive".into()));
        }
        if self.noise.range_stddev < 0.0 {
            return Err(Error::Scenario("range_stddev must not be negative".into()));
        }
        for (i, object) in self.objects.iter().enumerate() {
            if object.length <= 0.0 || object.width <= 0.0 || object.height <= 0.0 {
                return Err(Error::Scenario(format!(
                    "object {} must have positive dimensions",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Frame interval in seconds
    pub fn frame_interval_secs(&self) -> f64 {
        self.frame_interval_ms as f64 / 1000.0
    }

    /// Ego-motion delta per frame
    pub fn ego(&self) -> EgoMotion {
        EgoMotion::new(self.ego_motion[0], self.ego_motion[1])
    }

    /// Center and heading of `object` at frame `k`, in the sensor frame
    pub fn object_pose(&self, object: &SceneObject, k: usize) -> (Point2D, f64) {
        let t = k as f64 * self.frame_interval_secs();
        let center = Point2D::new(
            object.x + object.velocity[0] * t + self.ego_motion[0] * k as f64,
            object.y + object.velocity[1] * t + self.ego_motion[1] * k as f64,
        );
        (center, object.heading + object.yaw_rate * t)
    }

    /// Generate frame `k`
    pub fn frame(&self, k: usize) -> ScenarioFrame {
        let mut rng = SmallRng::seed_from_u64(self.noise.seed.wrapping_add(k as u64));
        let boxes: Vec<(Point2D, f64, &SceneObject)> = self
            .objects
            .iter()
            .map(|o| {
                let (center, heading) = self.object_pose(o, k);
                (center, heading, o)
            })
            .collect();

        let elevations: Vec<f64> = self
            .ring_elevations_deg
            .iter()
            .map(|d| d.to_radians())
            .collect();

        let mut polar = PolarFrame::new(self.start_azimuth_deg, self.end_azimuth_deg, Vec::new());
        let slots = self.azimuth_slots;
        let mut ranges = Vec::with_capacity(slots * elevations.len());

        for slot in 0..slots {
            let (sin_az, cos_az) = polar.slot_azimuth(slot, slots).sin_cos();
            let direction = Point2D::new(sin_az, cos_az);

            for &elevation in &elevations {
                let hit = boxes
                    .iter()
                    .filter_map(|(center, heading, object)| {
                        self.cast(direction, elevation, *center, *heading, object)
                    })
                    .reduce(f64::min);

                let range = match hit {
                    Some(r) if self.noise.range_stddev > 0.0 => {
                        let n: f64 = rng.sample(StandardNormal);
                        (r + n * self.noise.range_stddev).max(0.0)
                    }
                    Some(r) => r,
                    None => 0.0,
                };
                ranges.push(range);
            }
        }

        polar.ranges = ranges;
        ScenarioFrame {
            index: k,
            timestamp_us: k as u64 * self.frame_interval_ms * 1000,
            ego: self.ego(),
            polar,
        }
    }

    /// Iterate over all frames
    pub fn frames(&self) -> impl Iterator<Item = ScenarioFrame> + '_ {
        (0..self.frames).map(move |k| self.frame(k))
    }

    /// Range at which a ray hits a box, if it does.
    fn cast(
        &self,
        direction: Point2D,
        elevation: f64,
        center: Point2D,
        heading: f64,
        object: &SceneObject,
    ) -> Option<f64> {
        // Ray in the box frame
        let origin = Point2D::new(-center.x, -center.y).rotated(-heading);
        let dir = direction.rotated(-heading);

        let (mut s_in, mut s_out) = (0.0f64, f64::INFINITY);
        for (o, d, half) in [
            (origin.x, dir.x, object.length / 2.0),
            (origin.y, dir.y, object.width / 2.0),
        ] {
            if d.abs() < 1e-12 {
                if o.abs() > half {
                    return None;
                }
                continue;
            }
            let t1 = (-half - o) / d;
            let t2 = (half - o) / d;
            s_in = s_in.max(t1.min(t2));
            s_out = s_out.min(t1.max(t2));
        }
        if s_in > s_out {
            return None;
        }

        // Vertical extent: z = s·tan(e) within [-sensor_height, height - sensor_height]
        let bottom = -self.sensor_height;
        let top = object.height - self.sensor_height;
        let slope = elevation.tan();
        if slope.abs() < 1e-12 {
            if bottom > 0.0 || top < 0.0 {
                return None;
            }
        } else {
            let (a, b) = (bottom / slope, top / slope);
            s_in = s_in.max(a.min(b));
            s_out = s_out.min(a.max(b));
        }
        if s_in > s_out {
            return None;
        }

        Some(s_in / elevation.cos())
    }
}
