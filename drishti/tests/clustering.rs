//! Clustering and hull behavior over whole frames.

mod common;

use common::{Blob, GRID_SLOTS, clusters_of, grid_with, scattered_points};
use drishti::geometry::convex_hull_points;
use drishti::{ClusterScratch, ClusteringConfig, GridDbscan, PointGrid, convex_hull};

fn cross(o: drishti::Point2D, a: drishti::Point2D, b: drishti::Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[test]
fn test_separated_blobs_form_separate_clusters() {
    let grid = grid_with(&[
        Blob::cyclist(0, 10.0, 5.0),
        Blob::cyclist(10, 10.0, 20.0),
        Blob::cyclist(30, -8.0, 3.0),
    ]);
    let clusters = clusters_of(&grid);

    assert_eq!(clusters.len(), 3);
    for cluster in &clusters {
        assert_eq!(cluster.len(), 40);
    }

    // Discovery order follows the seed scan
    assert!(clusters[0].center().y < 6.0);
    assert!(clusters[1].center().y > 19.0);
    assert!(clusters[2].center().x < 0.0);
}

#[test]
fn test_clusters_are_disjoint_and_live() {
    let grid = grid_with(&[Blob::cyclist(0, 10.0, 5.0), Blob::cyclist(10, 10.0, 20.0)]);
    let clusters = clusters_of(&grid);

    let mut seen = std::collections::HashSet::new();
    for cluster in &clusters {
        for &index in cluster.indices() {
            assert!(seen.insert(index), "point {} in two clusters", index);
            assert!(!grid.point(index).is_suppressed());
        }
    }
    assert_eq!(seen.len(), grid.live_count());
}

#[test]
fn test_sparse_points_are_noise() {
    let mut grid = PointGrid::empty(GRID_SLOTS);
    scattered_points(&mut grid, &[3, 4, 20, 40]);

    assert_eq!(grid.live_count(), 4);
    assert!(clusters_of(&grid).is_empty());
}

#[test]
fn test_two_point_pair_is_noise_with_default_min_points() {
    let mut grid = PointGrid::empty(GRID_SLOTS);
    let blob = Blob {
        columns: 2,
        rows: 1,
        length: 0.2,
        width: 0.0,
        ..Blob::cyclist(5, 10.0, 5.0)
    };
    blob.paint(&mut grid);

    assert!(clusters_of(&grid).is_empty());

    let relaxed = GridDbscan::new(ClusteringConfig {
        min_points: 2,
        ..Default::default()
    });
    assert_eq!(relaxed.cluster(&grid).len(), 1);
}

#[test]
fn test_clustering_is_deterministic_with_reused_scratch() {
    let dbscan = GridDbscan::new(ClusteringConfig::default());
    let first = grid_with(&[Blob::cyclist(0, 10.0, 5.0), Blob::cyclist(20, 3.0, 12.0)]);
    let second = grid_with(&[Blob::cyclist(40, -6.0, -6.0)]);

    let mut scratch = ClusterScratch::default();
    let a = dbscan.cluster_with_scratch(&first, &mut scratch);
    let b = dbscan.cluster_with_scratch(&second, &mut scratch);
    let a_again = dbscan.cluster_with_scratch(&first, &mut scratch);

    assert_eq!(a, a_again);
    assert_eq!(a, dbscan.cluster(&first));
    assert_eq!(b, dbscan.cluster(&second));
}

#[test]
fn test_hull_is_convex_subset_of_cluster() {
    let grid = grid_with(&[Blob::cyclist(0, 10.0, 5.0)]);
    let clusters = clusters_of(&grid);
    let cluster = &clusters[0];

    let hull = convex_hull(&grid, cluster);
    assert_eq!(hull.len(), 4);
    for index in &hull {
        assert!(cluster.indices().contains(index));
    }

    let vertices: Vec<_> = hull.iter().map(|&i| grid.point(i).xy()).collect();
    let n = vertices.len();
    for i in 0..n {
        let turn = cross(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]);
        assert!(turn > 0.0, "hull turns clockwise at vertex {}", i);
    }

    // No cluster point lies outside any hull edge
    for p in cluster.planar_points(&grid) {
        for i in 0..n {
            assert!(cross(vertices[i], vertices[(i + 1) % n], p) >= -1e-9);
        }
    }
}

#[test]
fn test_hull_of_hull_is_itself() {
    let grid = grid_with(&[Blob::cyclist(0, 10.0, 5.0)]);
    let clusters = clusters_of(&grid);
    let vertices: Vec<_> = convex_hull(&grid, &clusters[0])
        .into_iter()
        .map(|i| grid.point(i).xy())
        .collect();

    let again = convex_hull_points(&vertices);
    assert_eq!(again.len(), vertices.len());
    let mut sorted = again.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..vertices.len()).collect::<Vec<_>>());
}
