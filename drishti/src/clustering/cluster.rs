//! Frame-scoped point clusters.

use crate::core::{LidarPoint, Point2D, PointGrid, PointIndex};

/// A group of density-connected points from one frame.
///
/// Stores indices into the frame's [`PointGrid`]; it must not outlive the
/// grid it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    points: Vec<PointIndex>,
    center: Point2D,
}

impl Cluster {
    /// Build a cluster from point indices, computing the planar center.
    pub fn from_indices(points: Vec<PointIndex>, grid: &PointGrid) -> Self {
        let center = mean_xy(&points, grid);
        Self { points, center }
    }

    /// Member indices in discovery order.
    #[inline]
    pub fn indices(&self) -> &[PointIndex] {
        &self.points
    }

    /// Mean (x, y) of the members.
    #[inline]
    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the cluster has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over member points.
    pub fn points<'a>(&'a self, grid: &'a PointGrid) -> impl Iterator<Item = &'a LidarPoint> + 'a {
        self.points.iter().map(move |&i| grid.point(i))
    }

    /// Planar projections of the members.
    pub fn planar_points(&self, grid: &PointGrid) -> Vec<Point2D> {
        self.points(grid).map(LidarPoint::xy).collect()
    }

    /// Highest member z, `None` for an empty cluster.
    pub fn max_height(&self, grid: &PointGrid) -> Option<f64> {
        self.points(grid).map(|p| p.z).reduce(f64::max)
    }
}

fn mean_xy(points: &[PointIndex], grid: &PointGrid) -> Point2D {
    if points.is_empty() {
        return Point2D::ZERO;
    }
    let (sum_x, sum_y) = points.iter().fold((0.0, 0.0), |(sx, sy), &i| {
        let p = grid.point(i);
        (sx + p.x, sy + p.y)
    });
    let n = points.len() as f64;
    Point2D::new(sum_x / n, sum_y / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_and_height() {
        let mut grid = PointGrid::empty(4);
        grid.set(0, 0, LidarPoint::new(1.0, 1.0, 0.2, 0.0, 0.0));
        grid.set(1, 0, LidarPoint::new(3.0, 1.0, 1.4, 0.0, 0.0));
        grid.set(2, 0, LidarPoint::new(2.0, 4.0, -0.5, 0.0, 0.0));

        let indices = vec![grid.index(0, 0), grid.index(1, 0), grid.index(2, 0)];
        let cluster = Cluster::from_indices(indices, &grid);

        assert_eq!(cluster.len(), 3);
        assert_relative_eq!(cluster.center().x, 2.0);
        assert_relative_eq!(cluster.center().y, 2.0);
        assert_relative_eq!(cluster.max_height(&grid).unwrap(), 1.4);
        assert_eq!(cluster.planar_points(&grid)[1], Point2D::new(3.0, 1.0));
    }

    #[test]
    fn test_empty_cluster() {
        let grid = PointGrid::empty(1);
        let cluster = Cluster::from_indices(Vec::new(), &grid);
        assert!(cluster.is_empty());
        assert_eq!(cluster.center(), Point2D::ZERO);
        assert!(cluster.max_height(&grid).is_none());
    }
}
