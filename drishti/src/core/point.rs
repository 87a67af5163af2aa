//! Point types: planar points and lidar returns.

use serde::{Deserialize, Serialize};

use super::math::rotate;

/// Number of vertical rings on the sensor (one grid column per ring).
pub const RING_COUNT: usize = 16;

/// A point in the horizontal plane (meters).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// This point rotated about the origin by `angle` radians.
    #[inline]
    pub fn rotated(&self, angle: f64) -> Point2D {
        let (x, y) = rotate(self.x, self.y, angle);
        Point2D::new(x, y)
    }

    /// This point shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }

    /// Arithmetic mean of a set of points, `None` if empty.
    pub fn mean<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Point2D> {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut count = 0usize;
        for p in points {
            sum_x += p.x;
            sum_y += p.y;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(Point2D::new(sum_x / count as f64, sum_y / count as f64))
        }
    }
}

/// Ego-motion delta for one frame.
///
/// The translation that stationary world points undergo in the sensor frame
/// between the previous frame and this one. Stored obstacle positions are
/// shifted by this amount before being compared with new detections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EgoMotion {
    /// Movement along X
    pub dx: f64,
    /// Movement along Y
    pub dy: f64,
}

impl EgoMotion {
    /// No movement.
    pub const ZERO: EgoMotion = EgoMotion { dx: 0.0, dy: 0.0 };

    /// Create a new ego-motion delta.
    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A single lidar return stored in the point grid.
///
/// Coordinates are sensor-relative Cartesian meters. `visited` and
/// `clustered` are pre-flags set during ingestion: suppressed returns
/// (ground, near-sensor noise) carry both and never join a cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LidarPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (height relative to the sensor)
    pub z: f64,
    /// Raw range measurement
    pub range: f64,
    /// Azimuth angle in radians
    pub azimuth: f64,
    /// Azimuth slot (grid row)
    pub slot: usize,
    /// Vertical ring (grid column)
    pub ring: usize,
    /// Already visited (pre-flag)
    pub visited: bool,
    /// Already assigned / excluded from clustering (pre-flag)
    pub clustered: bool,
}

impl LidarPoint {
    /// Create a live (unflagged) point.
    pub fn new(x: f64, y: f64, z: f64, range: f64, azimuth: f64) -> Self {
        Self {
            x,
            y,
            z,
            range,
            azimuth,
            ..Default::default()
        }
    }

    /// Create a point that is excluded from clustering.
    pub fn suppressed() -> Self {
        Self {
            visited: true,
            clustered: true,
            ..Default::default()
        }
    }

    /// Flag this point as excluded from clustering.
    pub fn suppress(&mut self) {
        self.visited = true;
        self.clustered = true;
    }

    /// True if ingestion excluded this point from clustering.
    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.clustered
    }

    /// Planar projection.
    #[inline]
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// 3D Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &LidarPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_point2d_mean() {
        let points = [Point2D::new(0.0, 0.0), Point2D::new(2.0, 4.0)];
        let mean = Point2D::mean(&points).unwrap();
        assert_relative_eq!(mean.x, 1.0);
        assert_relative_eq!(mean.y, 2.0);
        assert!(Point2D::mean(&[] as &[Point2D]).is_none());
    }

    #[test]
    fn test_suppressed_point_flags() {
        let p = LidarPoint::suppressed();
        assert!(p.visited);
        assert!(p.is_suppressed());

        let mut live = LidarPoint::new(1.0, 2.0, 0.0, 2.2, 0.4);
        assert!(!live.is_suppressed());
        live.suppress();
        assert!(live.visited && live.clustered);
    }

    #[test]
    fn test_lidar_point_distance_is_3d() {
        let a = LidarPoint::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let b = LidarPoint::new(1.0, 2.0, 2.0, 0.0, 0.0);
        assert_relative_eq!(a.distance(&b), 3.0);
    }
}
