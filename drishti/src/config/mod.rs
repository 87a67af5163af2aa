//! Unified configuration loading for Drishti.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//! Every threshold the tracker applies is a named value here.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::config::DrishtiConfig;
//!
//! // Load from default path (configs/drishti.yaml)
//! let config = DrishtiConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = DrishtiConfig::default();
//!
//! let pipeline = drishti::Pipeline::new(&config);
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | `ingest` | Minimum range, height window, ring elevations |
//! | `clustering` | Density radius, minimum points, grid windows |
//! | `tracker` | Association distance, confidence, classification, size snapping |
//! | `filter` | CTRV initial, process and measurement variances |
//! | [`PipelineSection`] | Stale track pruning |
//!
//! ## Example YAML
//!
//! ```yaml
//! clustering:
//!   eps: 0.6              # density radius (m)
//!   min_points: 3         # neighborhood size including the seed
//!   azimuth_window: 8     # slots searched either side
//!   ring_window: 2        # rings searched either side
//!   wrap_azimuth: false   # true for full 360° scans
//!
//! tracker:
//!   association_distance: 2.5
//!   building_height: 4.5
//!   min_heading_displacement: 0.000001
//!   speed_glitch_limit: 100.0
//!   high_speed_limit: 10.0
//!
//! pipeline:
//!   prune_stale: true
//! ```

pub(crate) mod defaults;
mod drishti;
mod error;

pub use drishti::{DEFAULT_CONFIG_PATH, DrishtiConfig, PipelineSection};
pub use error::ConfigLoadError;
