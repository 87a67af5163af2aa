//! Multi-frame obstacle tracking.
//!
//! ## Components
//!
//! - [`ObstacleTracker`]: Association, creation, refresh and pruning
//! - [`TrackedObstacle`]: Persistent pose, shape, motion and confidence state
//! - [`ObstacleClass`]: Footprint/height classification
//! - [`TrackerConfig`]: Association distance and plausibility thresholds
//!
//! ## Confidence
//!
//! Confidence grows by one for every consistent refresh. Implausible speed,
//! an oversize footprint or a building-height return halves it once for the
//! frame, as does a frame without any matched cluster. An obstacle with
//! confidence 0 is eligible for removal.

mod classification;
mod config;
mod obstacle;
mod tracker;

pub use classification::ObstacleClass;
pub use config::{ClassLimits, SizeLimit, TrackerConfig};
pub use obstacle::{Anomaly, FrameContext, ObstacleId, RefreshOutcome, TrackedObstacle};
pub use tracker::{ObstacleTracker, TrackerUpdate};
