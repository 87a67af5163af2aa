//! Oriented rectangle fitting.
//!
//! Fits a heading-aligned rectangle to an obstacle's points:
//!
//! 1. Rotate the points by `-heading` so the blob is roughly axis aligned.
//! 2. Split the x-extent into thirds. In the left and right third pick the
//!    point nearest the sensor's side of the blob (minimum y when the blob
//!    lies above the origin, maximum y when it lies below). The vector
//!    between these anchors gives a correction angle aligning the visible
//!    edge with the x-axis.
//! 3. Rotate by `-correction`, take the extents again, and snap the spans
//!    to canonical dimensions.
//! 4. Anchor the snapped rectangle at the extreme corner nearest the sensor
//!    and rotate it back by `heading + correction`.
//!
//! The above/below and left/right branches are kept as four explicit
//! corner layouts. They encode the sensor's mounting handedness.

use crate::core::Point2D;
use crate::core::math::normalize_angle;

use super::sizing::SizeTable;

/// A rotated rectangle in the sensor frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientedRectangle {
    corners: [Point2D; 4],
    center: Point2D,
    rotation: f64,
}

impl OrientedRectangle {
    /// Create from corners in boundary order and the rectangle's rotation.
    pub fn new(corners: [Point2D; 4], rotation: f64) -> Self {
        let center = Point2D::new(
            corners.iter().map(|c| c.x).sum::<f64>() / 4.0,
            corners.iter().map(|c| c.y).sum::<f64>() / 4.0,
        );
        Self {
            corners,
            center,
            rotation: normalize_angle(rotation),
        }
    }

    /// Corners in boundary order.
    #[inline]
    pub fn corners(&self) -> &[Point2D; 4] {
        &self.corners
    }

    /// Mean of the four corners.
    #[inline]
    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Orientation of the long edge, normalized to (−π, π].
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// True if `point` lies inside or on the boundary.
    pub fn contains(&self, point: Point2D) -> bool {
        let aligned = self.corners.map(|c| c.rotated(-self.rotation));
        let bounds = Bounds::of(aligned.iter().copied());
        let p = point.rotated(-self.rotation);
        const TOLERANCE: f64 = 1e-9;
        p.x >= bounds.min_x - TOLERANCE
            && p.x <= bounds.max_x + TOLERANCE
            && p.y >= bounds.min_y - TOLERANCE
            && p.y <= bounds.max_y + TOLERANCE
    }
}

/// Result of a rectangle fit.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleFit {
    /// Fitted rectangle in the sensor frame
    pub rectangle: OrientedRectangle,
    /// Snapped length along the corrected heading
    pub length: f64,
    /// Snapped width across the corrected heading
    pub width: f64,
    /// Correction applied on top of the heading (radians)
    pub correction: f64,
}

/// Axis-aligned extents of a point set.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn of(points: impl IntoIterator<Item = Point2D>) -> Self {
        points.into_iter().fold(
            Bounds {
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                min_y: f64::INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    #[inline]
    fn mid_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    #[inline]
    fn mid_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Heading-aligned rectangle fitter with dimension snapping.
#[derive(Clone, Debug)]
pub struct RectangleFitter {
    sizes: SizeTable,
}

impl RectangleFitter {
    /// Create a fitter snapping to `sizes`.
    pub fn new(sizes: SizeTable) -> Self {
        Self { sizes }
    }

    /// Fit a rectangle to `points` given the obstacle heading.
    ///
    /// Returns `None` for fewer than two points.
    pub fn fit(&self, points: &[Point2D], heading: f64) -> Option<RectangleFit> {
        if points.len() < 2 {
            return None;
        }

        let mut local: Vec<Point2D> = points.iter().map(|p| p.rotated(-heading)).collect();
        let bounds = Bounds::of(local.iter().copied());

        let third = (bounds.max_x - bounds.min_x) / 3.0;
        let x1 = bounds.min_x + third;
        let x2 = bounds.min_x + third * 2.0;
        let above = bounds.mid_y() > 0.0;

        let correction = match anchors(&local, x1, x2, above) {
            Some((p1, p2)) => (p2.y - p1.y).atan2(p2.x - p1.x),
            None => 0.0,
        };

        for p in local.iter_mut() {
            *p = p.rotated(-correction);
        }
        let b = Bounds::of(local.iter().copied());

        let width = self.sizes.snap_width(b.max_y - b.min_y);
        let length = self.sizes.snap_length(b.max_x - b.min_x);
        let right = b.mid_x() > 0.0;

        let corners = match (above, right) {
            (true, true) => [
                Point2D::new(b.min_x, b.min_y),
                Point2D::new(b.min_x, b.min_y + width),
                Point2D::new(b.min_x + length, b.min_y + width),
                Point2D::new(b.min_x + length, b.min_y),
            ],
            (true, false) => [
                Point2D::new(b.max_x - length, b.min_y),
                Point2D::new(b.max_x, b.min_y),
                Point2D::new(b.max_x, b.min_y + width),
                Point2D::new(b.max_x - length, b.min_y + width),
            ],
            (false, true) => [
                Point2D::new(b.min_x, b.max_y),
                Point2D::new(b.min_x + length, b.max_y),
                Point2D::new(b.min_x + length, b.max_y - width),
                Point2D::new(b.min_x, b.max_y - width),
            ],
            (false, false) => [
                Point2D::new(b.max_x - length, b.max_y - width),
                Point2D::new(b.max_x, b.max_y - width),
                Point2D::new(b.max_x, b.max_y),
                Point2D::new(b.max_x - length, b.max_y),
            ],
        };

        let back = heading + correction;
        let rectangle = OrientedRectangle::new(corners.map(|c| c.rotated(back)), back);

        Some(RectangleFit {
            rectangle,
            length,
            width,
            correction,
        })
    }
}

/// Edge anchors in the left and right thirds.
///
/// Minimum y when the blob is above the origin, maximum y otherwise. The
/// first point wins on ties. `None` if either third is empty.
fn anchors(points: &[Point2D], x1: f64, x2: f64, above: bool) -> Option<(Point2D, Point2D)> {
    let better = |candidate: &Point2D, current: &Option<Point2D>| match current {
        None => true,
        Some(c) if above => candidate.y < c.y,
        Some(c) => candidate.y > c.y,
    };

    let mut left: Option<Point2D> = None;
    let mut right: Option<Point2D> = None;
    for p in points {
        if p.x < x1 && better(p, &left) {
            left = Some(*p);
        }
        if p.x > x2 && better(p, &right) {
            right = Some(*p);
        }
    }
    Some((left?, right?))
}
