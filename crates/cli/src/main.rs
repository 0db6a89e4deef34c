//! AODMAP CLI - interpolate scattered AOD readings onto a lat/lon grid

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use aodmap_algorithms::interpolation::{filter_samples, idw, IdwParams, IdwResult, SearchStrategy};
use aodmap_colormap::{auto_params, grid_to_rgba, ColorScheme, ColormapParams, ContourLevels};
use aodmap_core::io::{read_points, write_grid_geotiff, write_grid_json, write_rgba_tiff, DEFAULT_VALUE_FIELD};
use aodmap_core::{RawSample, RegionBounds};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "aodmap")]
#[command(author, version, about = "Scatter-to-grid interpolation of air-quality readings", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a points file
    Info {
        /// Input points file (JSON)
        input: PathBuf,
        /// Name of the value field in each record
        #[arg(short, long, default_value = DEFAULT_VALUE_FIELD)]
        field: String,
        /// Region as minLat,maxLat,minLon,maxLon or "texas"
        #[arg(short, long, default_value = "texas")]
        bounds: RegionBounds,
    },
    /// Interpolate points onto a grid (.json plot payload or .tif GeoTIFF)
    Interpolate {
        /// Input points file (JSON)
        input: PathBuf,
        /// Output file; the extension selects the format
        output: PathBuf,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Interpolate points and render a colored RGBA TIFF
    Render {
        /// Input points file (JSON)
        input: PathBuf,
        /// Output RGBA TIFF
        output: PathBuf,
        #[command(flatten)]
        grid: GridArgs,
        /// Color scheme: aod, grayscale, divergent
        #[arg(long, default_value = "aod")]
        scheme: ColorScheme,
        /// Value mapped to the start of the scale
        #[arg(long, default_value = "0.0")]
        zmin: f64,
        /// Value mapped to the end of the scale
        #[arg(long, default_value = "0.5")]
        zmax: f64,
        /// Stretch the scale to the data range instead of zmin/zmax
        #[arg(long)]
        auto_range: bool,
        /// Contour band size; 0 disables banding
        #[arg(long, default_value = "0.02")]
        contour_size: f64,
    },
}

/// Interpolation options shared by `interpolate` and `render`.
#[derive(Args)]
struct GridArgs {
    /// JSON file with interpolation parameters; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Name of the value field in each record
    #[arg(short, long, default_value = DEFAULT_VALUE_FIELD)]
    field: String,
    /// Region as minLat,maxLat,minLon,maxLon or "texas"
    #[arg(short, long)]
    bounds: Option<RegionBounds>,
    /// Subdivisions per axis (grid has resolution+1 nodes per side)
    #[arg(short, long)]
    resolution: Option<usize>,
    /// Influence radius in degrees
    #[arg(long)]
    radius: Option<f64>,
    /// Distance offset in the weight denominator
    #[arg(long)]
    epsilon: Option<f64>,
    /// Neighbour search: brute or kdtree
    #[arg(short, long)]
    strategy: Option<SearchStrategy>,
}

impl GridArgs {
    fn params(&self) -> Result<IdwParams> {
        let mut params = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text).context("Invalid config file")?
            }
            None => IdwParams::default(),
        };

        if let Some(bounds) = self.bounds {
            params.bounds = bounds;
        }
        if let Some(resolution) = self.resolution {
            params.resolution = resolution;
        }
        if let Some(radius) = self.radius {
            params.influence_radius = radius;
        }
        if let Some(epsilon) = self.epsilon {
            params.epsilon = epsilon;
        }
        if let Some(strategy) = self.strategy {
            params.strategy = strategy;
        }

        params.validate().context("Invalid interpolation parameters")?;
        Ok(params)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already set");
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn load_points(path: &Path, field: &str) -> Result<Vec<RawSample>> {
    let pb = spinner("Reading points...");
    let records = read_points(path, field).context("Failed to read points")?;
    pb.finish_and_clear();
    info!("Input: {} records", records.len());
    Ok(records)
}

fn run_idw(records: &[RawSample], params: IdwParams) -> Result<IdwResult> {
    info!(
        "Grid: {}x{} nodes over {}, radius {}, epsilon {}, {} search",
        params.resolution + 1,
        params.resolution + 1,
        params.bounds,
        params.influence_radius,
        params.epsilon,
        params.strategy
    );
    let pb = spinner("Interpolating...");
    let result = idw(records, params).context("Failed to interpolate")?;
    pb.finish_and_clear();

    let s = result.summary;
    info!(
        "Samples: {} used, {} outside region, {} malformed",
        s.used, s.outside_region, s.malformed
    );
    if result.grid.is_all_nodata() {
        warn!("No data in region: every grid node is empty");
    }
    Ok(result)
}

fn is_tiff(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("tif") | Some("tiff")
    )
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input, field, bounds } => {
            let records = load_points(&input, &field)?;
            let (kept, summary) = filter_samples(&records, &bounds);

            println!("File: {}", input.display());
            println!("Records: {}", summary.total);
            println!("  Malformed: {}", summary.malformed);
            println!("  Outside region: {}", summary.outside_region);
            println!("  In region ({}): {}", bounds, summary.used);

            let values = kept.iter().map(|s| s.value);
            if let (Some(min), Some(max)) = (
                values.clone().reduce(f64::min),
                values.clone().reduce(f64::max),
            ) {
                let mean = values.sum::<f64>() / kept.len() as f64;
                println!("\n{} in region:", field);
                println!("  Min: {:.4}", min);
                println!("  Max: {:.4}", max);
                println!("  Mean: {:.4}", mean);
            }
        }

        // ── Interpolate ──────────────────────────────────────────────
        Commands::Interpolate { input, output, grid } => {
            let params = grid.params()?;
            let records = load_points(&input, &grid.field)?;

            let start = Instant::now();
            let result = run_idw(&records, params)?;
            let elapsed = start.elapsed();

            let stats = result.grid.statistics();
            info!(
                "Nodes with data: {} of {}",
                stats.valid_count,
                result.grid.len()
            );

            let pb = spinner("Writing output...");
            if is_tiff(&output) {
                write_grid_geotiff(&result.grid, &output).context("Failed to write output")?;
            } else {
                write_grid_json(&result.grid, result.summary.used, &output)
                    .context("Failed to write output")?;
            }
            pb.finish_and_clear();
            done("Grid", &output, elapsed);
        }

        // ── Render ───────────────────────────────────────────────────
        Commands::Render {
            input,
            output,
            grid,
            scheme,
            zmin,
            zmax,
            auto_range,
            contour_size,
        } => {
            let params = grid.params()?;
            let records = load_points(&input, &grid.field)?;

            let start = Instant::now();
            let result = run_idw(&records, params)?;

            let mut colormap = if auto_range {
                auto_params(&result.grid, scheme)
            } else {
                if !(zmin < zmax) {
                    anyhow::bail!("zmin ({}) must be below zmax ({})", zmin, zmax);
                }
                ColormapParams::with_range(scheme, zmin, zmax)
            };
            if contour_size > 0.0 {
                let levels = ContourLevels::new(colormap.min, colormap.max, contour_size)
                    .map_err(|e| anyhow::anyhow!("Invalid contour levels: {}", e))?;
                colormap = colormap.with_levels(levels);
            }

            let rgba = grid_to_rgba(&result.grid, &colormap);
            let elapsed = start.elapsed();

            let (rows, cols) = result.grid.shape();
            let pb = spinner("Writing output...");
            write_rgba_tiff(&rgba, cols, rows, &output).context("Failed to write output")?;
            pb.finish_and_clear();
            done("Rendering", &output, elapsed);
        }
    }

    Ok(())
}
