//! AQI heatmap generator.
//!
//! Interpolates point readings over a bounding box and writes:
//! - a PNG raster, one pixel per grid cell
//! - a north-up overlay image plus a JSON document for a web map

use std::path::PathBuf;

use anyhow::{Context, Result};
use aqi_common::BoundingBox;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap::{run, FileOverlaySink, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Render AQI point readings as an interpolated heatmap")]
struct Args {
    /// JSON file with readings: [{"lat": .., "lon": .., "aqi": ..}, ...]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// YAML run configuration; flags below override its values
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Bounding box as "lat_min,lat_max,lon_min,lon_max"
    #[arg(long, allow_hyphen_values = true)]
    bbox: Option<BoundingBox>,

    #[arg(long, allow_hyphen_values = true)]
    lat_min: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lat_max: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lon_min: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lon_max: Option<f64>,

    /// Grid cell size in meters
    #[arg(long)]
    accuracy_m: Option<f64>,

    /// Distance in meters at which a reading's influence reaches zero
    #[arg(long)]
    decay_radius_m: Option<f64>,

    /// Background value of every cell
    #[arg(long, allow_hyphen_values = true)]
    baseline: Option<f64>,

    /// Worker threads (default: logical CPUs)
    #[arg(long)]
    workers: Option<usize>,

    /// Points per scheduled chunk (default: points / workers)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Output PNG path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overlay document path; the north-up image is written beside it
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Custom color ramp (JSON)
    #[arg(long)]
    color_ramp: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Start from the YAML file (or defaults) and apply every flag given.
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("loading run configuration {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(bbox) = self.bbox {
            config.bbox = bbox;
        }
        if let Some(v) = self.lat_min {
            config.bbox.lat_min = v;
        }
        if let Some(v) = self.lat_max {
            config.bbox.lat_max = v;
        }
        if let Some(v) = self.lon_min {
            config.bbox.lon_min = v;
        }
        if let Some(v) = self.lon_max {
            config.bbox.lon_max = v;
        }
        if let Some(v) = self.accuracy_m {
            config.grid.accuracy_m = v;
        }
        if let Some(v) = self.decay_radius_m {
            config.grid.decay_radius_m = v;
        }
        if let Some(v) = self.baseline {
            config.grid.baseline = v;
        }
        if self.workers.is_some() {
            config.grid.workers = self.workers;
        }
        if self.chunk_size.is_some() {
            config.grid.chunk_size = self.chunk_size;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(overlay) = self.overlay {
            config.overlay.path = overlay;
        }
        if self.color_ramp.is_some() {
            config.color_ramp = self.color_ramp;
        }

        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let config = args.into_config()?;
    let mut sink = FileOverlaySink::new(config.overlay.path.clone());

    let report = run(&config, &mut sink).context("heatmap run failed")?;

    info!(
        image = %report.output.display(),
        overlay = %sink.document_path().display(),
        elapsed_s = format!("{:.2}", report.elapsed.as_secs_f64()),
        "Heatmap with overlay saved"
    );

    Ok(())
}
