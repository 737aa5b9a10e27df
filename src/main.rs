//! # EcoRoute CLI
//!
//! Command-line interface for the ecoroute library.
//! Compares travel modes between two places by distance, time and CO₂.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ecoroute::{Coordinate, GeocoderConfig, RouteResult, RoutePlanner};
use log::{debug, error, info};

mod cli;

use cli::{render, OverwriteBehavior, ProgressManager, Session};

/// Command-line interface for ecoroute
#[derive(Parser)]
#[command(name = "ecoroute")]
#[command(about = "Compare travel modes between two places by distance, time and emissions")]
#[command(long_about = "Estimates car, bus, bike and walking trips between two places:
  ecoroute route Delhi Mumbai                  # Compare every mode
  ecoroute route \"28.61, 77.21\" Jaipur --json  # Coordinates work too
  ecoroute search chen                         # Suggest place names
  ecoroute reverse 19.076 72.8777              # Label a coordinate
  ecoroute session                             # Plan routes interactively

Place names are geocoded with Mapbox when MAPBOX_ACCESS_TOKEN is set;
otherwise a built-in catalog of Indian cities is used.

File Overwrite Behavior (route --output):
  By default, you'll be prompted if destination file exists
  --force                          # Overwrite without asking
  --no-clobber                     # Never overwrite, fail if file exists")]
#[command(version = env!("ECOROUTE_VERSION"))]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Never contact the geocoding service
    #[arg(long, global = true)]
    offline: bool,

    /// Mapbox access token (overrides MAPBOX_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Country bias for place lookups, e.g. "IN"; empty disables it
    #[arg(long, global = true)]
    country: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare every travel mode between two places
    Route {
        /// Starting point: a place name or "lat, lng"
        source: String,

        /// End point: a place name or "lat, lng"
        destination: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Never overwrite existing files (fail if destination exists)
        #[arg(long)]
        no_clobber: bool,

        /// Show what would be compared without resolving anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Suggest places for a partially typed name
    Search {
        query: String,
    },
    /// Describe a coordinate
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
    /// Read "source -> destination" lines from stdin and keep a trip history
    Session,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🌱 EcoRoute v{} starting...", env!("ECOROUTE_VERSION"));
    }

    let planner = build_planner(&cli);
    debug!(
        "Geocoding is {}",
        if planner.is_offline() { "disabled" } else { "enabled" }
    );

    match cli.command {
        Command::Route {
            source,
            destination,
            json,
            output,
            force,
            no_clobber,
            dry_run,
        } => {
            if force && no_clobber {
                bail!("--force and --no-clobber cannot be used together");
            }

            if dry_run {
                eprintln!("🔍 [DRY RUN] Would compare: {source} → {destination}");
                if let Some(path) = &output {
                    eprintln!("🔍 [DRY RUN] Would save to: {}", path.display());
                }
                return Ok(());
            }

            let result = plan_route(&planner, &source, &destination).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::route(&result));
            }

            if let Some(path) = output {
                let behavior = OverwriteBehavior::from_flags(force, no_clobber);
                cli::export::write_json(&path, &result, behavior)
                    .with_context(|| format!("could not save {}", path.display()))?;
                eprintln!("📁 Saved to: {}", path.display());
            }
        }
        Command::Search { query } => {
            let progress = ProgressManager::new(
                &format!("🌐 Searching {query}"),
                !planner.is_offline(),
            );
            let outcome = progress.run(planner.suggest(&query)).await;
            print!("{}", render::suggestions(&query, &outcome));
        }
        Command::Reverse { lat, lng } => {
            let coordinate = Coordinate::new(lat, lng);
            if !coordinate.is_finite() {
                bail!("Coordinates must be finite numbers");
            }
            let progress = ProgressManager::new(
                &format!("🌐 Describing {coordinate}"),
                !planner.is_offline(),
            );
            println!("{}", progress.run(planner.describe(coordinate)).await);
        }
        Command::Session => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let mut session = Session::new(planner);
            session.run(input, &mut stdout).await?;
            info!("Session ended with {} trips recorded", session.history().total_trips());
        }
    }

    Ok(())
}

/// Planner configured from the environment plus command-line overrides
fn build_planner(cli: &Cli) -> RoutePlanner {
    if cli.offline {
        return RoutePlanner::offline();
    }
    RoutePlanner::new(geocoder_config(
        GeocoderConfig::from_env(),
        cli.token.as_deref(),
        cli.country.as_deref(),
    ))
}

fn geocoder_config(
    mut config: GeocoderConfig,
    token: Option<&str>,
    country: Option<&str>,
) -> GeocoderConfig {
    if let Some(token) = token {
        config = config.with_token(token);
    }
    if let Some(country) = country {
        config = config.with_country(country);
    }
    config
}

async fn plan_route(
    planner: &RoutePlanner,
    source: &str,
    destination: &str,
) -> ecoroute::Result<RouteResult> {
    let progress = ProgressManager::new(
        &format!("🌐 Resolving {source} → {destination}"),
        !planner.is_offline(),
    );
    let result = progress.run(planner.plan(source, destination)).await?;
    info!(
        "Eco choice for {} → {}: {}",
        result.source, result.destination, result.eco_friendly
    );
    Ok(result)
}
