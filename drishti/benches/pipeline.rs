//! Benchmark full frames through ingest, clustering and tracking.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use drishti::{DrishtiConfig, IngestConfig, Pipeline, Scenario, ingest};

fn create_scenario(objects: usize) -> Scenario {
    let mut yaml = String::from("name: bench\nframes: 20\nobjects:\n");
    for i in 0..objects {
        let angle = i as f64 * std::f64::consts::TAU / objects as f64;
        let distance = 8.0 + (i % 4) as f64 * 4.0;
        yaml.push_str(&format!(
            "  - {{ x: {:.3}, y: {:.3}, length: 4.5, width: 1.8, height: 1.5, velocity: [1.0, 0.5] }}\n",
            distance * angle.sin(),
            distance * angle.cos()
        ));
    }
    Scenario::from_yaml(&yaml).unwrap()
}

fn bench_ingest(c: &mut Criterion) {
    let scenario = create_scenario(8);
    let frame = scenario.frame(0);
    let config = IngestConfig::default();

    c.bench_function("ingest_360_slots", |b| {
        b.iter(|| black_box(ingest(black_box(&frame.polar), &config).unwrap()))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_sequence");
    group.sample_size(20);

    for objects in [2, 8, 16].iter() {
        let scenario = create_scenario(*objects);
        let frames: Vec<_> = scenario.frames().collect();
        let config = DrishtiConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(objects), objects, |b, _| {
            b.iter(|| {
                let mut pipeline = Pipeline::new(&config);
                for frame in &frames {
                    let report = pipeline
                        .process_polar(&frame.polar, frame.ego, frame.timestamp_us)
                        .unwrap();
                    black_box(report);
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingest, bench_pipeline);
criterion_main!(benches);
