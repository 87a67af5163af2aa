//! Geometric obstacle classification.

use serde::{Deserialize, Serialize};

use super::config::ClassLimits;

/// Obstacle class from footprint and height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleClass {
    /// No footprint class matched
    #[default]
    Unclassified,
    /// Fits the pedestrian footprint
    Pedestrian,
    /// Fits the cyclist footprint
    Cyclist,
    /// Fits the car footprint
    Car,
    /// Tall structure (max height above the building threshold)
    Building,
}

impl ObstacleClass {
    /// Classify a footprint, smallest class first.
    pub fn from_footprint(length: f64, width: f64, limits: &ClassLimits) -> Self {
        if limits.pedestrian.fits(length, width) {
            ObstacleClass::Pedestrian
        } else if limits.cyclist.fits(length, width) {
            ObstacleClass::Cyclist
        } else if limits.car.fits(length, width) {
            ObstacleClass::Car
        } else {
            ObstacleClass::Unclassified
        }
    }
}

impl std::fmt::Display for ObstacleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObstacleClass::Unclassified => write!(f, "unclassified"),
            ObstacleClass::Pedestrian => write!(f, "pedestrian"),
            ObstacleClass::Cyclist => write!(f, "cyclist"),
            ObstacleClass::Car => write!(f, "car"),
            ObstacleClass::Building => write!(f, "building"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_table() {
        let limits = ClassLimits::default();
        let classify = |l, w| ObstacleClass::from_footprint(l, w, &limits);

        assert_eq!(classify(0.5, 0.5), ObstacleClass::Pedestrian);
        assert_eq!(classify(1.5, 1.5), ObstacleClass::Pedestrian);
        assert_eq!(classify(2.0, 1.0), ObstacleClass::Cyclist);
        assert_eq!(classify(2.0, 1.8), ObstacleClass::Car);
        assert_eq!(classify(4.5, 1.8), ObstacleClass::Car);
        assert_eq!(classify(7.0, 4.0), ObstacleClass::Car);
        assert_eq!(classify(7.5, 2.0), ObstacleClass::Unclassified);
        assert_eq!(classify(3.0, 4.2), ObstacleClass::Unclassified);
    }

    #[test]
    fn test_display_matches_serde() {
        let yaml = serde_yaml::to_string(&ObstacleClass::Cyclist).unwrap();
        assert_eq!(yaml.trim(), ObstacleClass::Cyclist.to_string());
    }
}
