//! Grid-adjacency density clustering.
//!
//! DBSCAN over the sensor's own point layout: neighboring azimuth slots and
//! adjacent rings are geometric neighbors, so a region query only inspects
//! a small window of grid cells around the point instead of a spatial index.
//!
//! # Algorithm
//!
//! Points are visited in slot-major grid order. For each unvisited point:
//!
//! 1. **Region query**: collect points in the `azimuth_window × ring_window`
//!    cell window whose 3D distance is within `eps`. Suppressed points are
//!    never neighbors.
//! 2. **Core test**: if the neighborhood, seed included, holds at least
//!    `min_points` points, open a cluster; otherwise the point stays noise.
//! 3. **Expansion**: grow the cluster breadth-first, repeating the region
//!    query from every newly reached point and enqueueing the neighbors of
//!    those that are themselves core points.
//!
//! # Grid Boundaries
//!
//! Rings never wrap. Azimuth slots stop at the grid edge unless
//! `wrap_azimuth` is set, in which case slot 0 and the last slot are
//! adjacent.
//!
//! # Determinism
//!
//! Iteration order is fixed by the grid, so identical input always gives
//! identical clusters with identical member order.

use crate::core::{PointGrid, PointIndex, RING_COUNT};

use super::cluster::Cluster;
use super::config::ClusteringConfig;
use super::scratch::ClusterScratch;

/// Density clustering engine for [`PointGrid`]s.
#[derive(Clone, Debug, Default)]
pub struct GridDbscan {
    config: ClusteringConfig,
}

impl GridDbscan {
    /// Create a new clustering engine.
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster a grid, allocating fresh scratch space.
    pub fn cluster(&self, grid: &PointGrid) -> Vec<Cluster> {
        let mut scratch = ClusterScratch::with_capacity(grid.len());
        self.cluster_with_scratch(grid, &mut scratch)
    }

    /// Cluster a grid reusing `scratch` buffers.
    pub fn cluster_with_scratch(
        &self,
        grid: &PointGrid,
        scratch: &mut ClusterScratch,
    ) -> Vec<Cluster> {
        scratch.reset(grid);
        let ClusterScratch {
            visited,
            assigned,
            neighbors,
            frontier,
        } = scratch;

        let min_points = self.config.min_points.max(1);
        let mut clusters = Vec::new();

        for seed in 0..grid.len() {
            if visited[seed] || assigned[seed] {
                continue;
            }
            visited[seed] = true;

            self.region_query(grid, seed, neighbors);
            if neighbors.len() + 1 < min_points {
                continue;
            }

            let mut members = vec![seed];
            assigned[seed] = true;
            for &n in neighbors.iter() {
                if !assigned[n] {
                    assigned[n] = true;
                    members.push(n);
                    frontier.push_back(n);
                }
            }

            while let Some(q) = frontier.pop_front() {
                if visited[q] {
                    continue;
                }
                visited[q] = true;

                self.region_query(grid, q, neighbors);
                if neighbors.len() + 1 < min_points {
                    continue;
                }
                for &n in neighbors.iter() {
                    if !assigned[n] {
                        assigned[n] = true;
                        members.push(n);
                        frontier.push_back(n);
                    }
                }
            }

            clusters.push(Cluster::from_indices(members, grid));
        }

        log::debug!(
            "Clustered {} live points into {} clusters",
            grid.live_count(),
            clusters.len()
        );
        clusters
    }

    /// Collect the density neighbors of `index` into `out`.
    fn region_query(&self, grid: &PointGrid, index: PointIndex, out: &mut Vec<PointIndex>) {
        out.clear();

        let slots = grid.slots();
        if slots == 0 {
            return;
        }
        let center = grid.point(index);
        let slot = index / RING_COUNT;
        let ring = index % RING_COUNT;
        let eps = self.config.eps;

        let ring_lo = ring.saturating_sub(self.config.ring_window);
        let ring_hi = (ring + self.config.ring_window).min(RING_COUNT - 1);

        for s in self.slot_window(slot, slots) {
            for r in ring_lo..=ring_hi {
                let n = grid.index(s, r);
                if n == index {
                    continue;
                }
                let candidate = grid.point(n);
                if candidate.is_suppressed() {
                    continue;
                }
                if center.distance(candidate) <= eps {
                    out.push(n);
                }
            }
        }
    }

    /// Slots adjacent to `slot` (inclusive) under the configured boundary rule.
    fn slot_window(&self, slot: usize, slots: usize) -> impl Iterator<Item = usize> {
        let window = self.config.azimuth_window;
        let wrap = self.config.wrap_azimuth;

        let (start, count) = if wrap {
            if 2 * window + 1 >= slots {
                (0, slots)
            } else {
                ((slot + slots - window) % slots, 2 * window + 1)
            }
        } else {
            let lo = slot.saturating_sub(window);
            let hi = (slot + window).min(slots - 1);
            (lo, hi - lo + 1)
        };

        (0..count).map(move |i| (start + i) % slots)
    }
}
