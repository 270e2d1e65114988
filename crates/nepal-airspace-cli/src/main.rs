//! CLI for Nepal airspace lookups and flight plan checks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use nepal_airspace_cli::{parse_waypoint, report, CatalogSource};
use nepal_airspace_core::{
    AirspaceZone, ClassifierRules, ContainmentStrategy, Coordinates, FlightPlan, FlightPlanInput,
    Step, ZoneType,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Classify Nepal airspace and check drone flight plans
#[derive(Parser, Debug)]
#[command(name = "nepal-airspace", author, version, about)]
struct Cli {
    /// JSON catalog file (takes precedence over --url)
    #[arg(long, global = true, env = "AIRSPACE_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    /// Airspace server to fetch catalogs from
    #[arg(long, global = true, env = "AIRSPACE_URL")]
    url: Option<String>,

    /// Polygon containment: centroid or ray-casting
    #[arg(long, global = true, env = "AIRSPACE_CONTAINMENT", default_value = "centroid", value_parser = parse_strategy)]
    strategy: ContainmentStrategy,

    /// Continue with an empty catalog if loading fails
    #[arg(long, global = true)]
    allow_empty: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalogued zones
    Zones {
        /// Only zones of this type
        #[arg(long = "type", value_parser = parse_zone_type)]
        zone_type: Option<ZoneType>,
    },
    /// Classify a single point
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Classify a route given as LAT,LNG waypoints
    Route {
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_waypoint)]
        waypoints: Vec<Coordinates>,
    },
    /// Evaluate a flight plan JSON file (intent, location, flight)
    Evaluate { plan: PathBuf },
}

fn parse_strategy(value: &str) -> Result<ContainmentStrategy, String> {
    ContainmentStrategy::parse(value)
        .ok_or_else(|| format!("unknown strategy '{}' (use centroid or ray-casting)", value))
}

fn parse_zone_type(value: &str) -> Result<ZoneType, String> {
    ZoneType::parse(value).ok_or_else(|| format!("unknown zone type '{}'", value))
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("warn")
            .add_directive("nepal_airspace_cli=debug".parse()?)
            .add_directive("nepal_airspace_core=debug".parse()?)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let source = CatalogSource::from_args(cli.catalog.clone(), cli.url.clone());
    let rules = ClassifierRules::default().with_containment(cli.strategy);
    let engine = source.engine(cli.allow_empty, rules)?;

    match cli.command {
        Command::Zones { zone_type } => {
            let zones: Vec<&AirspaceZone> = match zone_type {
                Some(zone_type) => engine.registry().by_type(zone_type),
                None => engine.registry().list_all().iter().collect(),
            };
            if cli.json {
                print_json(&zones)?;
            } else {
                print!("{}", report::zone_table(&zones));
            }
        }
        Command::Classify { lat, lng } => {
            let point = Coordinates::new(lat, lng);
            if !point.is_valid() {
                bail!("coordinates out of range: {}", point);
            }
            let classification = engine.classify(point);
            if cli.json {
                print_json(&classification)?;
            } else {
                print!("{}", report::classification(&classification));
            }
        }
        Command::Route { waypoints } => {
            let classification = engine.classify_route(&waypoints);
            if cli.json {
                print_json(&classification)?;
            } else {
                print!("{}", report::classification(&classification));
            }
        }
        Command::Evaluate { plan } => {
            let json = std::fs::read_to_string(&plan)
                .with_context(|| format!("Failed to read {}", plan.display()))?;
            let input: FlightPlanInput = serde_json::from_str(&json)
                .with_context(|| format!("Invalid flight plan {}", plan.display()))?;

            let mut flight_plan = FlightPlan::from_input(input, &engine);
            while flight_plan.step() != Step::Results {
                let step = flight_plan.step();
                flight_plan
                    .next(&engine)
                    .with_context(|| format!("Flight plan stopped at step {}", step))?;
            }
            let results = flight_plan
                .results()
                .context("Results step reached without results")?;
            let airspace_type = flight_plan
                .location
                .as_ref()
                .and_then(|location| location.airspace_type);

            if cli.json {
                print_json(&flight_plan)?;
            } else {
                print!("{}", report::flight_results(airspace_type, results));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn route_accepts_southern_hemisphere_waypoints() {
        let cli = Cli::try_parse_from(["nepal-airspace", "route", "-33.9,151.2", "-33.8,151.3"])
            .unwrap();
        match cli.command {
            Command::Route { waypoints } => assert_eq!(
                waypoints,
                [Coordinates::new(-33.9, 151.2), Coordinates::new(-33.8, 151.3)]
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn route_still_rejects_malformed_waypoints() {
        assert!(Cli::try_parse_from(["nepal-airspace", "route", "-33.9"]).is_err());
    }
}
