use anyhow::{bail, Context, Result};
use clap::Parser;
use gesalt_lookup::prelude::*;
use std::path::PathBuf;

mod query;

use query::Query;

#[derive(Parser, Debug)]
#[command(
    name = "globe-lookup",
    author,
    version,
    about = "Resolve coordinates and globe hits to countries",
    long_about = "Loads country boundaries from a GeoJSON file, indexes every boundary ring \
                  and reports, for each query, the country whose border lies closest within \
                  the tolerance window.\n\n\
                  Queries are lon,lat pairs in degrees or x,y,z points on a globe of the \
                  given radius (as produced by a raycast against the rendered sphere)."
)]
struct Args {
    /// Input GeoJSON file with country features (Polygon or MultiPolygon)
    #[arg(short, long)]
    input: PathBuf,

    /// Points to resolve, as lon,lat
    #[arg(value_parser = Query::parse_lon_lat, allow_hyphen_values = true)]
    points: Vec<Query>,

    /// Globe hits to resolve, as x,y,z
    #[arg(long = "hit", value_parser = Query::parse_hit, allow_hyphen_values = true)]
    hits: Vec<Query>,

    /// Globe radius in scene units
    #[arg(short, long, default_value_t = LookupConfig::default().radius)]
    radius: f64,

    /// Half-width in degrees of the candidate search window
    #[arg(short, long, default_value_t = LookupConfig::default().tolerance)]
    tolerance: f64,

    /// Only report countries whose border is at most this many degrees away
    #[arg(long)]
    max_distance: Option<f64>,

    /// List every loaded country
    #[arg(long)]
    list: bool,

    /// Print label anchors for every country
    #[arg(long)]
    labels: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            radius: self.radius,
            tolerance: self.tolerance,
            hover_threshold: self.max_distance,
            ..LookupConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Globe Lookup ===");
    log::info!("Input: {}", args.input.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }
    let config = args.lookup_config();
    if !(config.tolerance.is_finite() && config.tolerance >= 0.0) {
        bail!("Tolerance must be a non-negative number, got {}", config.tolerance);
    }

    // Phase 1: Load boundaries and build the index
    log::info!("Phase 1: Loading boundaries...");
    let world = WorldData::from_path_with(&args.input, &config)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    log::info!(
        "  Indexed {} rings across {} countries",
        world.index().len(),
        world.countries().len()
    );

    if args.list {
        for country in world.countries() {
            println!(
                "{}\t{}\t{} rings",
                country.id,
                country.display_name(),
                country.geometry.ring_count()
            );
        }
    }

    if args.labels {
        for label in place_labels(world.countries(), world.projection()) {
            let anchor = to_geodetic(label.position);
            println!(
                "{}\t{}\t{:.4},{:.4}",
                label.country_id,
                label.text,
                anchor.x(),
                anchor.y()
            );
        }
    }

    // Phase 2: Resolve queries
    let queries: Vec<&Query> = args.points.iter().chain(&args.hits).collect();
    if queries.is_empty() {
        if !args.list && !args.labels {
            log::warn!("No points given; nothing to resolve");
        }
        return Ok(());
    }

    log::info!("Phase 2: Resolving {} queries...", queries.len());
    let mut unresolved = 0;
    for query in queries {
        let point = match query {
            Query::LonLat(point) => *point,
            Query::Hit(hit) => world.projection().unproject(*hit),
        };

        let resolution = resolve_nearest(world.index(), point, config.tolerance)
            .filter(|r| config.hover_threshold.map_or(true, |max| r.distance <= max));

        match resolution {
            Some(Resolution { country_id, distance }) => {
                let name = world
                    .country(&country_id)
                    .map(|c| c.display_name().to_string())
                    .context("Resolved country missing from dataset")?;
                println!(
                    "{:.4},{:.4}\t{}\t{}\t{:.4}",
                    point.x(),
                    point.y(),
                    country_id,
                    name,
                    distance
                );
            }
            None => {
                unresolved += 1;
                println!("{:.4},{:.4}\t-", point.x(), point.y());
            }
        }
    }

    if unresolved > 0 {
        log::info!("  {unresolved} queries matched no country");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_lookup_config() {
        let args = Args::parse_from(["globe-lookup", "--input", "world.geojson"]);
        let config = args.lookup_config();
        let defaults = LookupConfig::default();
        assert_eq!(config.radius, defaults.radius);
        assert_eq!(config.tolerance, defaults.tolerance);
        assert_eq!(config.hover_threshold, None);
        assert_eq!(config.throttle_ms, defaults.throttle_ms);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "globe-lookup",
            "-i",
            "world.geojson",
            "--radius",
            "6",
            "--max-distance",
            "0.1",
            "--",
            "-3.7,40.4",
        ]);
        let config = args.lookup_config();
        assert_eq!(config.radius, 6.0);
        assert_eq!(config.hover_threshold, Some(0.1));
        assert_eq!(args.points.len(), 1);
    }
}
