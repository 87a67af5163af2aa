//! Pre-allocated scratch space for clustering.
//!
//! Clustering keeps per-point `visited` / `assigned` state for the duration
//! of one pass. The grid's own flags are ingestion pre-flags and stay
//! untouched, so running the same grid twice gives the same clusters.

use std::collections::VecDeque;

use crate::core::{PointGrid, PointIndex};

/// Reusable buffers for [`GridDbscan`](super::GridDbscan) passes.
///
/// # Example
/// ```rust,ignore
/// use drishti::clustering::{ClusterScratch, GridDbscan};
///
/// let dbscan = GridDbscan::default();
/// let mut scratch = ClusterScratch::default();
/// for grid in frames {
///     let clusters = dbscan.cluster_with_scratch(&grid, &mut scratch);
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClusterScratch {
    /// Point has been expanded (or was pre-flagged visited).
    pub(crate) visited: Vec<bool>,
    /// Point belongs to a cluster (or was pre-flagged clustered).
    pub(crate) assigned: Vec<bool>,
    /// Neighborhood buffer for one region query.
    pub(crate) neighbors: Vec<PointIndex>,
    /// Breadth-first expansion frontier.
    pub(crate) frontier: VecDeque<PointIndex>,
}

impl ClusterScratch {
    /// Create scratch space sized for a grid of `points` cells.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            visited: Vec::with_capacity(points),
            assigned: Vec::with_capacity(points),
            neighbors: Vec::with_capacity(64),
            frontier: VecDeque::with_capacity(256),
        }
    }

    /// Seed state from the grid's ingestion pre-flags.
    pub(crate) fn reset(&mut self, grid: &PointGrid) {
        self.visited.clear();
        self.assigned.clear();
        self.visited.extend(grid.points().iter().map(|p| p.visited));
        self.assigned.extend(grid.points().iter().map(|p| p.clustered));
        self.neighbors.clear();
        self.frontier.clear();
    }
}
