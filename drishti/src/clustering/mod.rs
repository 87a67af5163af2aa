//! Density clustering over the per-frame point grid.
//!
//! ## Components
//!
//! - [`GridDbscan`]: DBSCAN that uses grid adjacency for region queries
//! - [`Cluster`]: A frame-scoped group of point indices with its planar center
//! - [`ClusterScratch`]: Reusable per-pass buffers
//! - [`ClusteringConfig`]: Density radius, minimum points, search windows
//!
//! ## Example
//!
//! ```rust,ignore
//! use drishti::clustering::{ClusteringConfig, GridDbscan};
//!
//! let dbscan = GridDbscan::new(ClusteringConfig::default());
//! for cluster in dbscan.cluster(&grid) {
//!     println!("{} points at {:?}", cluster.len(), cluster.center());
//! }
//! ```

mod cluster;
mod config;
mod dbscan;
mod scratch;

pub use cluster::Cluster;
pub use config::ClusteringConfig;
pub use dbscan::GridDbscan;
pub use scratch::ClusterScratch;
