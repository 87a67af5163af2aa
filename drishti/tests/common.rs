//! Test utilities for Drishti integration tests.
//!
//! Grid builders that place regular lattice blobs into azimuth slots.

#![allow(dead_code)]

use drishti::{Cluster, ClusteringConfig, GridDbscan, LidarPoint, PointGrid};

/// Slots in every test grid.
pub const GRID_SLOTS: usize = 64;

/// A rectangular lattice of points occupying consecutive slots and rings.
#[derive(Clone, Copy, Debug)]
pub struct Blob {
    /// First slot
    pub slot: usize,
    /// Lower-left corner
    pub x: f64,
    pub y: f64,
    /// Extent along X and Y
    pub length: f64,
    pub width: f64,
    /// Height of every point
    pub z: f64,
    /// Lattice size (slots x rings)
    pub columns: usize,
    pub rows: usize,
}

impl Blob {
    /// 2.0 x 1.0 footprint on a 10x4 lattice.
    pub fn cyclist(slot: usize, x: f64, y: f64) -> Self {
        Self {
            slot,
            x,
            y,
            length: 2.0,
            width: 1.0,
            z: 0.2,
            columns: 10,
            rows: 4,
        }
    }

    pub fn at_height(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Write the lattice into `grid`.
    pub fn paint(&self, grid: &mut PointGrid) {
        for c in 0..self.columns {
            for r in 0..self.rows {
                let x = self.x + self.length * fraction(c, self.columns);
                let y = self.y + self.width * fraction(r, self.rows);
                let range = (x * x + y * y + self.z * self.z).sqrt();
                grid.set(
                    self.slot + c,
                    r,
                    LidarPoint::new(x, y, self.z, range, x.atan2(y)),
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows
    }
}

fn fraction(i: usize, n: usize) -> f64 {
    if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 }
}

/// Grid containing the given blobs.
pub fn grid_with(blobs: &[Blob]) -> PointGrid {
    let mut grid = PointGrid::empty(GRID_SLOTS);
    for blob in blobs {
        blob.paint(&mut grid);
    }
    grid
}

/// Cluster a grid with default settings.
pub fn clusters_of(grid: &PointGrid) -> Vec<Cluster> {
    GridDbscan::new(ClusteringConfig::default()).cluster(grid)
}

/// Isolated single points, one per slot, spaced well beyond the density radius.
pub fn scattered_points(grid: &mut PointGrid, slots: &[usize]) {
    for (i, &slot) in slots.iter().enumerate() {
        let x = 5.0 * (i + 1) as f64;
        let y = 20.0;
        grid.set(slot, 8, LidarPoint::new(x, y, 0.0, x.hypot(y), x.atan2(y)));
    }
}
