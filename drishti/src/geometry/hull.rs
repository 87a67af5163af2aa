//! Planar convex hull (Andrew's monotone chain).

use std::cmp::Ordering;

use crate::clustering::Cluster;
use crate::core::{Point2D, PointGrid, PointIndex};

/// 2D cross product of `(a - o)` and `(b - o)`.
#[inline]
fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[inline]
fn lexicographic(a: &Point2D, b: &Point2D) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Convex hull of planar points, as positions into `points`.
///
/// Vertices are returned counter-clockwise starting from the lowest-x
/// (then lowest-y) point. Collinear and duplicate points are dropped so the
/// hull is minimal. Inputs with fewer than two distinct points return those
/// points unchanged.
///
/// Runs in O(n log n).
pub fn convex_hull_points(points: &[Point2D]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| lexicographic(&points[a], &points[b]).then(a.cmp(&b)));
    order.dedup_by(|a, b| points[*a] == points[*b]);

    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() + 1);

    // Lower chain
    for &i in &order {
        while hull.len() >= 2
            && cross(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // Last point repeats the first
    hull.pop();
    hull
}

/// Convex hull of a cluster's planar projection, as grid indices.
pub fn convex_hull(grid: &PointGrid, cluster: &Cluster) -> Vec<PointIndex> {
    let planar = cluster.planar_points(grid);
    convex_hull_points(&planar)
        .into_iter()
        .map(|i| cluster.indices()[i])
        .collect()
}
