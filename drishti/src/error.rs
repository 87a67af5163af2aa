//! Error types for Drishti

use crate::config::ConfigLoadError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Drishti error types
///
/// Only malformed input is fatal. Estimation anomalies (degenerate
/// geometry, implausible speeds, ambiguous association) degrade obstacle
/// confidence instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Point count inconsistent with the declared grid dimensions
    #[error("Grid shape mismatch: {points} points for {slots} slots x {rings} rings")]
    GridShape {
        /// Number of points supplied
        points: usize,
        /// Declared azimuth slot count
        slots: usize,
        /// Rings per slot
        rings: usize,
    },

    /// Polar frame whose range count is not a whole number of slots
    #[error("Range count {ranges} is not a multiple of the ring count")]
    RangeCount {
        /// Number of ranges supplied
        ranges: usize,
    },

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigLoadError),

    /// Scenario definition is invalid
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
