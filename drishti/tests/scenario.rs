//! End-to-end runs of synthetic scenarios through the pipeline.

use std::path::PathBuf;

use drishti::{DrishtiConfig, FrameReport, ObstacleClass, Pipeline, Scenario};

const CAR_AND_PEDESTRIAN: &str = r#"
name: "Car passing a pedestrian"
frames: 10
frame_interval_ms: 100
azimuth_slots: 360
objects:
  # Car east of the sensor driving north
  - x: 10.0
    y: 0.0
    heading: 1.5707963267948966
    length: 4.5
    width: 1.8
    height: 1.5
    velocity: [0.0, 5.0]
  # Pedestrian standing north-west
  - x: -6.0
    y: 6.0
    length: 0.5
    width: 0.5
    height: 1.7
"#;

fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn run(scenario: &Scenario, config: &DrishtiConfig) -> Vec<FrameReport> {
    let mut pipeline = Pipeline::new(config);
    scenario
        .frames()
        .map(|frame| {
            pipeline
                .process_polar(&frame.polar, frame.ego, frame.timestamp_us)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_car_and_pedestrian_are_tracked() {
    let scenario = Scenario::from_yaml(CAR_AND_PEDESTRIAN).unwrap();
    let reports = run(&scenario, &DrishtiConfig::default());

    assert_eq!(reports.len(), 10);
    for report in &reports {
        assert_eq!(report.clusters.len(), 2, "frame {}", report.frame);
        assert!(report.live_points > 0);
    }

    let last = reports.last().unwrap();
    assert_eq!(last.obstacles.len(), 2);

    let car = last.obstacles.iter().find(|o| o.x > 0.0).unwrap();
    let pedestrian = last.obstacles.iter().find(|o| o.x < 0.0).unwrap();

    assert_eq!(car.class, ObstacleClass::Car);
    assert_eq!(pedestrian.class, ObstacleClass::Pedestrian);

    // Car drove 4.5 m north over nine intervals
    let first_car = reports[0].obstacles.iter().find(|o| o.x > 0.0).unwrap();
    assert!(
        car.y - first_car.y > 2.0,
        "car moved from {:.2} to {:.2}",
        first_car.y,
        car.y
    );
    assert!(car.raw_speed > 1.0);

    // Pedestrian never moves
    assert!(pedestrian.raw_speed < 1e-9);
    assert_eq!(pedestrian.confidence, 11);
    assert_eq!(pedestrian.missed_frames, 0);
}

#[test]
fn test_runs_are_deterministic() {
    let mut scenario = Scenario::from_yaml(CAR_AND_PEDESTRIAN).unwrap();
    scenario.noise.range_stddev = 0.02;
    scenario.noise.seed = 11;

    let config = DrishtiConfig::default();
    assert_eq!(run(&scenario, &config), run(&scenario, &config));
}

#[test]
fn test_noise_depends_on_seed() {
    let mut scenario = Scenario::from_yaml(CAR_AND_PEDESTRIAN).unwrap();
    scenario.noise.range_stddev = 0.05;

    scenario.noise.seed = 1;
    let a = scenario.frame(3).polar.ranges;
    scenario.noise.seed = 2;
    let b = scenario.frame(3).polar.ranges;

    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
    // Misses stay misses
    for (ra, rb) in a.iter().zip(&b) {
        assert_eq!(*ra == 0.0, *rb == 0.0);
    }
}

#[test]
fn test_pruning_removes_objects_that_leave() {
    // Coverage is 60°..120°; the box drives out of it after about 8 frames
    let yaml = r#"
name: "Brief visitor"
frames: 14
azimuth_slots: 61
start_azimuth_deg: 60.0
end_azimuth_deg: 120.0
objects:
  - x: 10.0
    y: 0.0
    length: 1.0
    width: 1.0
    height: 1.2
    velocity: [0.0, 8.0]
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let mut config = DrishtiConfig::default();
    config.pipeline.prune_stale = true;

    let reports = run(&scenario, &config);
    let created: usize = reports.iter().map(|r| r.created.len()).sum();
    let pruned: usize = reports.iter().map(|r| r.pruned.len()).sum();

    assert!(created >= 1);
    assert_eq!(created, pruned);
    assert!(reports.last().unwrap().obstacles.is_empty());
}

#[test]
fn test_bundled_config_loads() {
    let config = DrishtiConfig::load(&manifest_path("configs/drishti.yaml")).unwrap();
    let defaults = DrishtiConfig::default();

    assert_eq!(config.clustering.min_points, defaults.clustering.min_points);
    assert_eq!(
        config.tracker.association_distance,
        defaults.tracker.association_distance
    );
    assert_eq!(config.tracker.sizes, defaults.tracker.sizes);
}

#[test]
fn test_bundled_scenarios_run() {
    let config = DrishtiConfig::load(&manifest_path("configs/drishti.yaml")).unwrap();

    for name in ["scenarios/crossing.yaml", "scenarios/ego_motion.yaml"] {
        let scenario = Scenario::load(&manifest_path(name)).unwrap();
        let reports = run(&scenario, &config);

        assert_eq!(reports.len(), scenario.frames, "{}", name);
        assert!(
            reports.iter().any(|r| !r.obstacles.is_empty()),
            "{} produced no obstacles",
            name
        );
    }
}
