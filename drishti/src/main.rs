//! Drishti - run a synthetic lidar scenario through the perception pipeline
//!
//! # Usage
//!
//! ```bash
//! drishti --scenario scenarios/crossing.yaml --config configs/drishti.yaml --output tracks.yaml
//! ```

use std::path::PathBuf;

use clap::Parser;

use drishti::{DrishtiConfig, FrameReport, Pipeline, Result, Scenario};

#[derive(Parser)]
#[command(name = "drishti")]
#[command(about = "Cluster and track obstacles in a synthetic lidar scenario")]
struct Args {
    /// Scenario YAML file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Configuration YAML (defaults to configs/drishti.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write every frame report as YAML to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Remove stale obstacles after every frame
    #[arg(long)]
    prune: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Using config: {}", path.display());
            DrishtiConfig::load(path)?
        }
        None => DrishtiConfig::load_default()?,
    };
    if args.prune {
        config.pipeline.prune_stale = true;
    }

    let scenario = Scenario::load(&args.scenario)?;
    log::info!(
        "Scenario '{}': {} frames, {} objects, {} slots",
        scenario.name,
        scenario.frames,
        scenario.objects.len(),
        scenario.azimuth_slots
    );

    let mut pipeline = Pipeline::new(&config);
    let mut reports: Vec<FrameReport> = Vec::with_capacity(scenario.frames);

    for frame in scenario.frames() {
        let report = pipeline.process_polar(&frame.polar, frame.ego, frame.timestamp_us)?;
        log::info!(
            "Frame {}: {} clusters, {} obstacles ({} new, {} pruned)",
            report.frame,
            report.clusters.len(),
            report.obstacles.len(),
            report.created.len(),
            report.pruned.len()
        );
        for (id, anomaly) in &report.anomalies {
            log::debug!("  obstacle {}: {:?}", id, anomaly);
        }
        reports.push(report);
    }

    if let Some(last) = reports.last() {
        for o in &last.obstacles {
            log::info!(
                "Obstacle {}: {} at ({:.2}, {:.2}) v={:.2} m/s {:.1}x{:.1} conf={}",
                o.id,
                o.class,
                o.x,
                o.y,
                o.speed,
                o.length,
                o.width,
                o.confidence
            );
        }
    }

    if let Some(path) = &args.output {
        std::fs::write(path, serde_yaml::to_string(&reports)?)?;
        log::info!("Wrote {} frame reports to {}", reports.len(), path.display());
    }

    Ok(())
}
