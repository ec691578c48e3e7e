//! Geofenced Pass Prediction CLI
//!
//! Fetches a GP element catalog, predicts which satellites pass over the
//! configured region within the prediction window, and writes the report
//! as JSON.
//!
//! Usage:
//!   predict-passes --output satellites.json
//!   predict-passes --catalog-file data/catalog.csv --lat-min 34 --lat-max 37

use anyhow::{Context, Result};
use catalog_ingest::{fetch_catalog, read_records, CELESTRAK_GP_URL};
use clap::Parser;
use pass_prediction::predictor::PassPredictor;
use pass_prediction::propagation::Sgp4Propagator;
use pass_prediction::{PredictionWindow, PredictorConfig, RegionBounds};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "predict-passes",
    about = "Predict satellite passes over a rectangular geographic region"
)]
struct Args {
    /// Catalog endpoint (GP CSV)
    #[arg(long, default_value = CELESTRAK_GP_URL)]
    catalog_url: String,

    /// Use an already-staged catalog file instead of fetching
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Staging path for the fetched catalog
    #[arg(long, default_value = "data/catalog.csv")]
    stage: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "satellites.json")]
    output: PathBuf,

    /// Region latitude bounds in degrees
    #[arg(long, default_value_t = 34.0)]
    lat_min: f64,
    #[arg(long, default_value_t = 37.0)]
    lat_max: f64,

    /// Region longitude bounds in degrees
    #[arg(long, default_value_t = -86.0)]
    lon_min: f64,
    #[arg(long, default_value_t = -74.0)]
    lon_max: f64,

    /// Prediction window duration in minutes
    #[arg(long, default_value_t = 180.0)]
    window_minutes: f64,

    /// Number of future samples across the window
    #[arg(long, default_value_t = 36)]
    samples: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    anyhow::ensure!(args.lat_min <= args.lat_max, "lat-min must not exceed lat-max");
    anyhow::ensure!(args.lon_min <= args.lon_max, "lon-min must not exceed lon-max");
    anyhow::ensure!(args.window_minutes > 0.0, "window-minutes must be positive");
    anyhow::ensure!(args.samples >= 1, "samples must be at least 1");

    // Catalog acquisition failure is fatal: no processing without input.
    let catalog_path = match &args.catalog_file {
        Some(path) => path.clone(),
        None => {
            fetch_catalog(&args.catalog_url, &args.stage)
                .context("failed to fetch the element catalog")?;
            args.stage.clone()
        }
    };
    let records = read_records(&catalog_path).context("failed to read the element catalog")?;

    let config = PredictorConfig {
        region: RegionBounds {
            lat_min: args.lat_min,
            lat_max: args.lat_max,
            lon_min: args.lon_min,
            lon_max: args.lon_max,
        },
        window: PredictionWindow {
            duration_minutes: args.window_minutes,
            samples: args.samples,
        },
    };

    let predictor = PassPredictor::new(Sgp4Propagator, config);
    let report = predictor.run(&records, chrono::Utc::now());

    if report.satellites_in_region == 0 {
        warn!("No satellites matched the region; not writing a report");
        return Ok(());
    }

    info!("Writing report to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;

    info!(
        "{} of {} satellites in region (processing took {:.2}s)",
        report.satellites_in_region, report.total_processed, report.processing_time
    );

    Ok(())
}
