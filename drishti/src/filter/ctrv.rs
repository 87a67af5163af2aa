//! Constant Turn Rate and Velocity (CTRV) extended Kalman filter.
//!
//! # State
//!
//! `[x, y, θ, v, ω]`: position (m), heading (rad), speed (m/s) and yaw
//! rate (rad/s), with a 5x5 covariance.
//!
//! # Prediction
//!
//! For `|ω| > straight_line_yaw_rate`:
//!
//! ```text
//! x' = x + v/ω · (sin(θ + ω·dt) − sin θ)
//! y' = y + v/ω · (cos θ − cos(θ + ω·dt))
//! ```
//!
//! otherwise straight-line motion `x' = x + v·cos θ·dt`, `y' = y + v·sin θ·dt`.
//! Heading advances by `ω·dt`; speed and yaw rate are constant. The
//! frame's ego-motion translation is added to the position afterwards.
//! Covariance propagates through the model Jacobian `F`:
//!
//! ```text
//! P' = F·P·Fᵀ + Q·max(dt, dt_floor)
//! ```
//!
//! # Correction
//!
//! All five state components are observed directly (`H = I`). The heading
//! residual is wrapped to (−π, π] before weighting.

use crate::core::linalg::DIM;
use crate::core::math::{angle_diff, normalize_angle};
use crate::core::{EgoMotion, Matrix5, Point2D, Vector5};

use super::config::CtrvConfig;

const X: usize = 0;
const Y: usize = 1;
const THETA: usize = 2;
const V: usize = 3;
const OMEGA: usize = 4;

/// Direct observation of the full CTRV state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CtrvMeasurement {
    /// Measured x (m)
    pub x: f64,
    /// Measured y (m)
    pub y: f64,
    /// Measured heading (rad)
    pub theta: f64,
    /// Measured speed (m/s)
    pub speed: f64,
    /// Measured yaw rate (rad/s)
    pub yaw_rate: f64,
}

impl CtrvMeasurement {
    fn as_vector(&self) -> Vector5 {
        [self.x, self.y, self.theta, self.speed, self.yaw_rate]
    }
}

/// Per-obstacle CTRV state estimator.
///
/// # Example
///
/// ```
/// use drishti::core::EgoMotion;
/// use drishti::filter::{CtrvConfig, CtrvFilter, CtrvMeasurement};
///
/// let mut filter = CtrvFilter::new(CtrvConfig::default());
/// filter.init(10.0, 5.0, 0.0, 0.0, 0.0);
///
/// let measurement = CtrvMeasurement { x: 11.0, y: 5.0, speed: 1.0, ..Default::default() };
/// filter.update(&measurement, EgoMotion::ZERO, 1.0);
/// assert!(filter.x() > 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct CtrvFilter {
    config: CtrvConfig,
    state: Vector5,
    covariance: Matrix5,
}

impl CtrvFilter {
    /// Create a filter at the origin with the initial covariance.
    pub fn new(config: CtrvConfig) -> Self {
        let covariance = Matrix5::diagonal(config.initial.diagonal());
        Self {
            config,
            state: [0.0; DIM],
            covariance,
        }
    }

    /// Reset the state and covariance.
    pub fn init(&mut self, x: f64, y: f64, theta: f64, speed: f64, yaw_rate: f64) {
        self.state = [x, y, normalize_angle(theta), speed, yaw_rate];
        self.covariance = Matrix5::diagonal(self.config.initial.diagonal());
    }

    /// Predict over `dt` seconds, then fuse `measurement`.
    ///
    /// With `dt <= 0` the motion model is skipped; the ego translation is
    /// still applied before fusing.
    pub fn update(&mut self, measurement: &CtrvMeasurement, ego: EgoMotion, dt: f64) {
        self.predict(dt, ego);
        self.correct(measurement);
    }

    /// Time propagation through the CTRV model plus ego translation.
    pub fn predict(&mut self, dt: f64, ego: EgoMotion) {
        if dt > 0.0 {
            let jacobian = self.jacobian(dt);
            self.state = self.propagate(dt);

            let scale = dt.max(self.config.dt_floor);
            let q = self.config.process.diagonal().map(|q| q * scale);
            self.covariance = jacobian
                .mul(&self.covariance)
                .mul(&jacobian.transpose())
                .add(&Matrix5::diagonal(q))
                .symmetrized();
        }

        self.state[X] += ego.dx;
        self.state[Y] += ego.dy;
    }

    /// Measurement fusion with `H = I`.
    ///
    /// A singular innovation covariance leaves the prediction in place.
    pub fn correct(&mut self, measurement: &CtrvMeasurement) {
        let z = measurement.as_vector();
        let mut residual = [0.0; DIM];
        for (i, r) in residual.iter_mut().enumerate() {
            *r = z[i] - self.state[i];
        }
        residual[THETA] = angle_diff(self.state[THETA], z[THETA]);

        let r = Matrix5::diagonal(self.config.measurement.diagonal());
        let innovation = self.covariance.add(&r);
        let Some(innovation_inv) = innovation.inverse() else {
            log::warn!("CTRV innovation covariance is singular, skipping correction");
            return;
        };

        let gain = self.covariance.mul(&innovation_inv);
        let delta = gain.mul_vec(&residual);
        for (s, d) in self.state.iter_mut().zip(delta.iter()) {
            *s += d;
        }
        self.state[THETA] = normalize_angle(self.state[THETA]);

        self.covariance = Matrix5::identity()
            .sub(&gain)
            .mul(&self.covariance)
            .symmetrized();
    }

    fn propagate(&self, dt: f64) -> Vector5 {
        let [x, y, theta, v, omega] = self.state;
        let (px, py) = if omega.abs() > self.config.straight_line_yaw_rate {
            let theta_end = theta + omega * dt;
            (
                x + v / omega * (theta_end.sin() - theta.sin()),
                y + v / omega * (theta.cos() - theta_end.cos()),
            )
        } else {
            (x + v * theta.cos() * dt, y + v * theta.sin() * dt)
        };
        [px, py, normalize_angle(theta + omega * dt), v, omega]
    }

    fn jacobian(&self, dt: f64) -> Matrix5 {
        let [_, _, theta, v, omega] = self.state;
        let (sin_t, cos_t) = theta.sin_cos();
        let mut f = Matrix5::identity();

        if omega.abs() > self.config.straight_line_yaw_rate {
            let (sin_e, cos_e) = (theta + omega * dt).sin_cos();
            let inv = 1.0 / omega;

            f.set(X, THETA, v * inv * (cos_e - cos_t));
            f.set(X, V, inv * (sin_e - sin_t));
            f.set(X, OMEGA, v * dt * cos_e * inv - v * inv * inv * (sin_e - sin_t));

            f.set(Y, THETA, v * inv * (sin_e - sin_t));
            f.set(Y, V, inv * (cos_t - cos_e));
            f.set(Y, OMEGA, v * dt * sin_e * inv - v * inv * inv * (cos_t - cos_e));
        } else {
            f.set(X, THETA, -v * sin_t * dt);
            f.set(X, V, cos_t * dt);
            f.set(X, OMEGA, -0.5 * v * dt * dt * sin_t);

            f.set(Y, THETA, v * cos_t * dt);
            f.set(Y, V, sin_t * dt);
            f.set(Y, OMEGA, 0.5 * v * dt * dt * cos_t);
        }
        f.set(THETA, OMEGA, dt);
        f
    }

    // Accessors

    /// Filtered x (m).
    #[inline]
    pub fn x(&self) -> f64 {
        self.state[X]
    }

    /// Filtered y (m).
    #[inline]
    pub fn y(&self) -> f64 {
        self.state[Y]
    }

    /// Filtered heading, normalized to (−π, π].
    #[inline]
    pub fn theta(&self) -> f64 {
        self.state[THETA]
    }

    /// Filtered speed (m/s).
    #[inline]
    pub fn speed(&self) -> f64 {
        self.state[V]
    }

    /// Filtered yaw rate (rad/s).
    #[inline]
    pub fn yaw_rate(&self) -> f64 {
        self.state[OMEGA]
    }

    /// Full state `[x, y, θ, v, ω]`.
    #[inline]
    pub fn state(&self) -> &Vector5 {
        &self.state
    }

    /// State covariance.
    #[inline]
    pub fn covariance(&self) -> &Matrix5 {
        &self.covariance
    }

    /// Position plus one second of filtered motion along the heading.
    pub fn movement_vector(&self) -> Point2D {
        let (sin_t, cos_t) = self.theta().sin_cos();
        Point2D::new(
            self.x() + cos_t * self.speed(),
            self.y() + sin_t * self.speed(),
        )
    }
}
