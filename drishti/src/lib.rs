//! # Drishti
//!
//! Lidar obstacle perception for a rotating 16-ring sensor.
//!
//! ## Overview
//!
//! Each frame flows through four stages:
//!
//! - **Ingest** - Polar ranges to a `[azimuth slot][ring]` point grid, with
//!   near-sensor and out-of-band returns suppressed
//! - **Clustering** - Density clustering over grid adjacency
//! - **Geometry** - Convex hulls per cluster, oriented rectangles per obstacle
//! - **Tracking** - Association, classification, confidence and a CTRV
//!   motion filter per obstacle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{DrishtiConfig, EgoMotion, Pipeline};
//!
//! let config = DrishtiConfig::load_default()?;
//! let mut pipeline = Pipeline::new(&config);
//!
//! let report = pipeline.process(&grid, EgoMotion::new(0.0, -0.4), timestamp_us);
//! for obstacle in &report.obstacles {
//!     println!("{} {} conf={}", obstacle.id, obstacle.class, obstacle.confidence);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Sensor-relative Cartesian meters. Slot azimuth is measured from +Y towards
//! +X; headings and rectangle rotations are CCW from +X, normalized to
//! (−π, π].

#![warn(missing_docs)]

// Foundation types
pub mod core;

// Error types
pub mod error;

// YAML configuration
pub mod config;

// Polar frame conversion
pub mod ingest;

// Density clustering
pub mod clustering;

// Hulls, rectangles, size snapping
pub mod geometry;

// CTRV motion filter
pub mod filter;

// Obstacle tracking
pub mod tracking;

// Frame orchestration
pub mod pipeline;

// Scenario input
pub mod io;

// Re-export commonly used types
pub use core::{EgoMotion, LidarPoint, Point2D, PointGrid, PointIndex, RING_COUNT};

pub use error::{Error, Result};

pub use config::{ConfigLoadError, DrishtiConfig};

pub use ingest::{IngestConfig, PolarFrame, ingest};

pub use clustering::{Cluster, ClusterScratch, ClusteringConfig, GridDbscan};

pub use geometry::{OrientedRectangle, RectangleFitter, SizeTable, convex_hull};

pub use filter::{CtrvConfig, CtrvFilter, CtrvMeasurement};

pub use tracking::{
    Anomaly, ObstacleClass, ObstacleId, ObstacleTracker, TrackedObstacle, TrackerConfig,
};

pub use pipeline::{ClusterSummary, FrameReport, ObstacleSnapshot, Pipeline};

pub use io::Scenario;
