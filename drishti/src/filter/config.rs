//! CTRV filter configuration.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::Vector5;

/// Per-component variances for the `[x, y, θ, v, ω]` state.
///
/// Position variance applies to both x and y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateNoise {
    /// Position variance (m²)
    pub position: f64,
    /// Heading variance (rad²)
    pub heading: f64,
    /// Speed variance ((m/s)²)
    pub speed: f64,
    /// Yaw-rate variance ((rad/s)²)
    pub yaw_rate: f64,
}

impl StateNoise {
    /// Diagonal in state order `[x, y, θ, v, ω]`.
    pub fn diagonal(&self) -> Vector5 {
        [
            self.position,
            self.position,
            self.heading,
            self.speed,
            self.yaw_rate,
        ]
    }
}

/// Configuration for [`CtrvFilter`](super::CtrvFilter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CtrvConfig {
    /// Initial state covariance diagonal.
    #[serde(default = "defaults::initial_variance")]
    pub initial: StateNoise,

    /// Process noise per second, scaled by `max(dt, dt_floor)`.
    #[serde(default = "defaults::process_noise")]
    pub process: StateNoise,

    /// Measurement noise.
    #[serde(default = "defaults::measurement_noise")]
    pub measurement: StateNoise,

    /// Lower bound on the process-noise time scale (seconds).
    ///
    /// Default: 0.01
    #[serde(default = "defaults::dt_floor")]
    pub dt_floor: f64,

    /// Yaw rates at or below this magnitude use straight-line motion (rad/s).
    ///
    /// Default: 1e-4
    #[serde(default = "defaults::straight_line_yaw_rate")]
    pub straight_line_yaw_rate: f64,
}

impl Default for CtrvConfig {
    fn default() -> Self {
        Self {
            initial: defaults::initial_variance(),
            process: defaults::process_noise(),
            measurement: defaults::measurement_noise(),
            dt_floor: defaults::dt_floor(),
            straight_line_yaw_rate: defaults::straight_line_yaw_rate(),
        }
    }
}
