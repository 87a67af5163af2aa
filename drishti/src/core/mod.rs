//! Core foundation layer.
//!
//! Bottom layer of the perception stack with no internal dependencies
//! other than the crate error type.
//!
//! # Contents
//!
//! - [`math`]: Angle normalization and planar rotation
//! - [`linalg`]: Fixed-size 5x5 matrices for the motion filter
//! - [`PointGrid`]: Frame-local arena of lidar returns
//! - [`LidarPoint`], [`Point2D`], [`EgoMotion`]: Point and motion types
//!
//! ## Coordinate System
//!
//! Sensor-relative Cartesian meters. Azimuth is measured from +Y towards +X
//! (`x = r·sin(az)`, `y = r·cos(az)`), headings are CCW from +X.

pub mod linalg;
pub mod math;

mod grid;
mod point;

pub use grid::{PointGrid, PointIndex};
pub use linalg::{Matrix5, Vector5};
pub use math::{angle_diff, normalize_angle, signed_rotation};
pub use point::{EgoMotion, LidarPoint, Point2D, RING_COUNT};
