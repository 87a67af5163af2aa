//! Per-obstacle motion estimation.
//!
//! [`CtrvFilter`] is an extended Kalman filter over a constant turn rate
//! and velocity model. Each tracked obstacle owns one instance and feeds it
//! rectangle-derived measurements once per matched frame.

mod config;
mod ctrv;

pub use config::{CtrvConfig, StateNoise};
pub use ctrv::{CtrvFilter, CtrvMeasurement};
