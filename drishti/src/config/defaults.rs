//! Default value functions for serde deserialization.

use crate::filter::StateNoise;
use crate::geometry::SizeTable;
use crate::tracking::{ClassLimits, SizeLimit};

// Ingest

pub fn min_range() -> f64 {
    1.0
}

pub fn min_z() -> f64 {
    -2.0
}

pub fn max_z() -> f64 {
    10.0
}

pub fn ring_elevations_deg() -> [f64; 16] {
    [
        -15.0, -13.0, -11.0, -9.0, -7.0, -5.0, -3.0, -1.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0,
        15.0,
    ]
}

// Clustering

pub fn eps() -> f64 {
    0.6
}

pub fn min_points() -> usize {
    3
}

pub fn azimuth_window() -> usize {
    8
}

pub fn ring_window() -> usize {
    2
}

// Tracker

pub fn association_distance() -> f64 {
    2.5
}

pub fn initial_confidence() -> u32 {
    1
}

pub fn max_missed_frames() -> u32 {
    5
}

pub fn speed_glitch_limit() -> f64 {
    100.0
}

pub fn high_speed_limit() -> f64 {
    10.0
}

pub fn speed_smoothing() -> f64 {
    0.5
}

pub fn min_heading_displacement() -> f64 {
    1e-6
}

pub fn building_height() -> f64 {
    4.5
}

pub fn max_footprint() -> SizeLimit {
    SizeLimit::new(7.0, 4.0)
}

pub fn class_limits() -> ClassLimits {
    ClassLimits {
        pedestrian: SizeLimit::new(1.5, 1.5),
        cyclist: SizeLimit::new(2.0, 1.5),
        car: SizeLimit::new(7.0, 4.0),
    }
}

pub fn size_table() -> SizeTable {
    SizeTable {
        lengths: vec![0.5, 1.0, 1.5, 2.0, 3.0, 4.5, 5.5, 7.0],
        widths: vec![0.5, 1.0, 1.5, 1.8, 2.2, 2.6, 3.2, 4.0],
    }
}

// Motion filter

pub fn initial_variance() -> StateNoise {
    StateNoise {
        position: 1.0,
        heading: 1.0,
        speed: 4.0,
        yaw_rate: 1.0,
    }
}

pub fn process_noise() -> StateNoise {
    StateNoise {
        position: 0.1,
        heading: 0.05,
        speed: 1.0,
        yaw_rate: 0.1,
    }
}

pub fn measurement_noise() -> StateNoise {
    StateNoise {
        position: 0.1,
        heading: 0.2,
        speed: 0.1,
        yaw_rate: 0.5,
    }
}

pub fn dt_floor() -> f64 {
    0.01
}

pub fn straight_line_yaw_rate() -> f64 {
    1e-4
}

// Pipeline

pub fn disabled() -> bool {
    false
}
