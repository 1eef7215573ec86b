//! vt2geojson CLI - Command-line interface
//!
//! Converts one vector tile into a GeoJSON FeatureCollection on stdout.

mod error;

use clap::Parser;
use error::CliError;
use tracing::debug;
use vt2geojson::convert::{ConvertConfig, Converter, OutputMode};
use vt2geojson::locator::ExplicitTile;
use vt2geojson::logging::{init_logging, LoggingConfig};
use vt2geojson::source::{DefaultLoader, DEFAULT_TIMEOUT_SECS};
use vt2geojson::version::BuildInfo;

#[derive(Parser)]
#[command(name = "vt2geojson")]
#[command(about = "Convert a Mapbox Vector Tile to GeoJSON", long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Tile file path or http(s) URL
    #[arg(long)]
    mvt: Option<String>,

    /// Tile column
    #[arg(long)]
    x: Option<u32>,

    /// Tile row
    #[arg(long)]
    y: Option<u32>,

    /// Zoom level
    #[arg(long)]
    z: Option<u32>,

    /// Tile bytes are gzip-compressed
    #[arg(long)]
    gzipped: bool,

    /// Only output features from this layer
    #[arg(long)]
    layer: Option<String>,

    /// Print a layer summary instead of GeoJSON
    #[arg(long)]
    summary: bool,

    /// Print version information and exit
    #[arg(long)]
    version: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<String>,
}

impl Args {
    fn convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            source: self.mvt.clone(),
            tile: ExplicitTile::from_parts(self.z, self.x, self.y),
            gzipped: self.gzipped,
            layer: self.layer.clone(),
            mode: if self.summary {
                OutputMode::Summary
            } else {
                OutputMode::GeoJson
            },
            http_timeout_secs: self.timeout,
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("{}", BuildInfo::current());
        return;
    }

    if let Err(e) = run(&args) {
        e.exit();
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let _guard = init_logging(&LoggingConfig {
        verbose: args.verbose,
        log_file: args.log_file.clone(),
    })
    .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let config = args.convert_config();
    debug!(?config, "Starting conversion");

    let loader = DefaultLoader::with_timeout(config.http_timeout_secs)?;
    let output = Converter::new(loader).run(&config)?;

    println!("{}", output.as_str());
    Ok(())
}
