//! Disposal Matching CLI
//!
//! Classifies waste types, ranks nearby disposal centers and scores the
//! impact of a disposal against the built-in or file-backed tables.
//!
//! Usage:
//!   match-disposal classify "Plastic"
//!   match-disposal find-centers plastic --lat 40.7128 --lon -74.006 --radius-km 10
//!   match-disposal score battery --count 2 --method retailer_takeback
//!   match-disposal --catalog data/disposal_centers.json find-centers all --geojson

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use disposal_matcher::{loader, ranker, Catalog, GeoPoint, MatchingFacade, WasteTaxonomy};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "match-disposal",
    about = "Match waste to disposal centers and score environmental impact"
)]
struct Args {
    /// Disposal center catalog JSON (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Waste taxonomy JSON (defaults to the built-in table)
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the taxonomy profile for a waste type
    Classify {
        waste_type: String,
        /// Treat the input as a free-text description
        #[arg(long)]
        describe: bool,
    },

    /// List centers accepting a waste type, closest first
    FindCenters {
        waste_type: String,
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long)]
        radius_km: Option<f64>,
        #[arg(long)]
        max_results: Option<usize>,
        /// Emit a GeoJSON FeatureCollection instead of plain JSON
        #[arg(long)]
        geojson: bool,
    },

    /// Score the impact of disposing of items
    Score {
        waste_type: String,
        #[arg(short = 'n', long, default_value_t = 1, allow_hyphen_values = true)]
        count: i64,
        #[arg(short, long, default_value = "recycling")]
        method: String,
    },

    /// Print the whole taxonomy
    WasteTypes,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let taxonomy = match &args.taxonomy {
        Some(path) => Arc::new(waste_taxonomy::loader::load_taxonomy(path)?),
        None => WasteTaxonomy::shared_default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Arc::new(loader::load_catalog(path)?),
        None => Catalog::shared_default(),
    };
    info!(
        "Using {} waste types and {} disposal centers",
        taxonomy.len(),
        catalog.len()
    );

    let facade = MatchingFacade::new(taxonomy, catalog);

    match args.command {
        Command::Classify {
            waste_type,
            describe,
        } => {
            let profile = if describe {
                facade.taxonomy().identify(&waste_type)
            } else {
                facade.classify(&waste_type)
            };
            print_json(profile)?;
        }
        Command::FindCenters {
            waste_type,
            lat,
            lon,
            radius_km,
            max_results,
            geojson,
        } => {
            let origin = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)?),
                (None, None) => None,
                _ => bail!("--lat and --lon must be given together"),
            };
            let ranked = facade.find_centers(origin, &waste_type, radius_km, max_results)?;
            info!("{} centers matched {:?}", ranked.len(), waste_type);

            if geojson {
                print_json(&ranker::to_geojson(&ranked))?;
            } else {
                print_json(&ranked)?;
            }
        }
        Command::Score {
            waste_type,
            count,
            method,
        } => {
            let scored = facade.score_disposal(&waste_type, count, &method)?;
            print_json(&scored)?;
        }
        Command::WasteTypes => {
            print_json(&facade.taxonomy().profiles())?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}
