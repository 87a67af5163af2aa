//! Scenario input for end-to-end runs.
//!
//! ```rust,ignore
//! use drishti::io::Scenario;
//! use std::path::Path;
//!
//! let scenario = Scenario::load(Path::new("scenarios/crossing.yaml"))?;
//! for frame in scenario.frames() {
//!     let report = pipeline.process_polar(&frame.polar, frame.ego, frame.timestamp_us)?;
//! }
//! ```

pub mod scenario;

pub use scenario::{NoiseSpec, Scenario, SceneObject, ScenarioFrame};
