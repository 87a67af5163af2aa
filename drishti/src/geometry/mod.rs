//! Planar shape geometry for clusters and obstacles.
//!
//! - [`convex_hull`] / [`convex_hull_points`]: Minimal convex hull (monotone chain)
//! - [`RectangleFitter`]: Heading-aligned oriented rectangle fit
//! - [`SizeTable`]: Canonical length/width snapping

mod hull;
mod rectangle;
mod sizing;

pub use hull::{convex_hull, convex_hull_points};
pub use rectangle::{OrientedRectangle, RectangleFit, RectangleFitter};
pub use sizing::SizeTable;
