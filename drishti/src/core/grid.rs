//! Frame-local point arena indexed by `[azimuth slot][ring]`.
//!
//! The grid owns every point of one frame. Clusters and obstacle working
//! sets refer to points by [`PointIndex`], never by reference, so the arena
//! can be rebuilt every frame without invalidating anything that outlives it.

use crate::error::{Error, Result};

use super::point::{LidarPoint, RING_COUNT};

/// Flat index of a point in a [`PointGrid`] (`slot * RING_COUNT + ring`).
pub type PointIndex = usize;

/// Fixed-size grid of lidar points, one row per azimuth slot.
#[derive(Clone, Debug)]
pub struct PointGrid {
    points: Vec<LidarPoint>,
    slots: usize,
}

impl PointGrid {
    /// Build a grid from slot-major points.
    ///
    /// Point grid indices are rewritten to match their position.
    ///
    /// # Errors
    /// [`Error::GridShape`] if `points.len() != slots * RING_COUNT`.
    pub fn new(slots: usize, mut points: Vec<LidarPoint>) -> Result<Self> {
        if points.len() != slots * RING_COUNT {
            return Err(Error::GridShape {
                points: points.len(),
                slots,
                rings: RING_COUNT,
            });
        }

        for (index, point) in points.iter_mut().enumerate() {
            point.slot = index / RING_COUNT;
            point.ring = index % RING_COUNT;
        }

        Ok(Self { points, slots })
    }

    /// A grid of `slots` rows where every point is suppressed.
    pub fn empty(slots: usize) -> Self {
        let mut points = vec![LidarPoint::suppressed(); slots * RING_COUNT];
        for (index, point) in points.iter_mut().enumerate() {
            point.slot = index / RING_COUNT;
            point.ring = index % RING_COUNT;
        }
        Self { points, slots }
    }

    /// Number of azimuth slots.
    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Number of rings per slot.
    #[inline]
    pub fn rings(&self) -> usize {
        RING_COUNT
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the grid has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of `(slot, ring)`.
    #[inline]
    pub fn index(&self, slot: usize, ring: usize) -> PointIndex {
        slot * RING_COUNT + ring
    }

    /// Point at a flat index.
    ///
    /// # Panics
    /// If `index` is out of range.
    #[inline]
    pub fn point(&self, index: PointIndex) -> &LidarPoint {
        &self.points[index]
    }

    /// Point at `(slot, ring)`, `None` outside the grid.
    #[inline]
    pub fn get(&self, slot: usize, ring: usize) -> Option<&LidarPoint> {
        if slot >= self.slots || ring >= RING_COUNT {
            return None;
        }
        self.points.get(self.index(slot, ring))
    }

    /// Replace the point at `(slot, ring)`, keeping its grid indices consistent.
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, slot: usize, ring: usize, mut point: LidarPoint) {
        if slot >= self.slots || ring >= RING_COUNT {
            return;
        }
        point.slot = slot;
        point.ring = ring;
        let index = self.index(slot, ring);
        self.points[index] = point;
    }

    /// All points in slot-major order.
    #[inline]
    pub fn points(&self) -> &[LidarPoint] {
        &self.points
    }

    /// Number of points not suppressed by ingestion.
    pub fn live_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_suppressed()).count()
    }
}
