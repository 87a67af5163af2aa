//! Canonical footprint dimensions.

use serde::{Deserialize, Serialize};

/// Canonical lengths and widths that fitted spans snap to.
///
/// Snapping damps frame-to-frame size jitter from sparse or noisy returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeTable {
    /// Canonical lengths in ascending order (meters)
    pub lengths: Vec<f64>,
    /// Canonical widths in ascending order (meters)
    pub widths: Vec<f64>,
}

impl SizeTable {
    /// Snap a length span to the nearest canonical length.
    pub fn snap_length(&self, span: f64) -> f64 {
        snap(&self.lengths, span)
    }

    /// Snap a width span to the nearest canonical width.
    pub fn snap_width(&self, span: f64) -> f64 {
        snap(&self.widths, span)
    }
}

/// Nearest value of `table`, ties to the smaller.
///
/// Spans beyond the largest value are returned unchanged so oversize
/// footprints stay visible to the plausibility checks.
fn snap(table: &[f64], span: f64) -> f64 {
    let Some(largest) = table.iter().copied().reduce(f64::max) else {
        return span;
    };
    if span > largest {
        return span;
    }

    let mut best = largest;
    let mut best_err = f64::INFINITY;
    for &value in table {
        let err = (value - span).abs();
        if err < best_err || (err == best_err && value < best) {
            best = value;
            best_err = err;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;
    use approx::assert_relative_eq;

    #[test]
    fn test_snap_to_nearest() {
        let table = defaults::size_table();
        assert_relative_eq!(table.snap_length(1.9), 2.0);
        assert_relative_eq!(table.snap_length(0.1), 0.5);
        assert_relative_eq!(table.snap_width(1.7), 1.8);
        assert_relative_eq!(table.snap_width(2.45), 2.6);
    }

    #[test]
    fn test_tie_goes_to_smaller() {
        let table = defaults::size_table();
        assert_relative_eq!(table.snap_length(0.75), 0.5);
        assert_relative_eq!(table.snap_length(2.5), 2.0);
    }

    #[test]
    fn test_oversize_kept_raw() {
        let table = defaults::size_table();
        assert_relative_eq!(table.snap_length(9.3), 9.3);
        assert_relative_eq!(table.snap_width(4.0), 4.0);
        assert_relative_eq!(table.snap_width(4.01), 4.01);
    }

    #[test]
    fn test_empty_table_passes_through() {
        let table = SizeTable {
            lengths: Vec::new(),
            widths: Vec::new(),
        };
        assert_relative_eq!(table.snap_length(3.3), 3.3);
    }
}
