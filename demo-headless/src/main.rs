//! Headless dispersion demo over a synthetic street grid
//!
//! Builds a Manhattan-style neighborhood around a geographic origin, runs one
//! simulation with configurable wind and garden placements, and prints the
//! hotspot summary. No network file or weather service needed.

use clap::Parser;
use std::error::Error;

use airshed_core::core_types::geometry::{BoundingBox, GeoPoint, PlanarPoint};
use airshed_core::core_types::units::Meters;
use airshed_core::network::{RoadNetwork, RoadSegment};
use airshed_core::projection::{CoordinateProjector, UtmProjector};
use airshed_core::simulation::{self, SimulationConfig};
use airshed_core::WindState;

/// Dispersion simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "airshed-demo")]
#[command(about = "Synthetic street-grid dispersion demo", long_about = None)]
struct Args {
    /// Wind speed in m/s
    #[arg(short = 'w', long, default_value_t = 2.0)]
    wind_speed: f64,

    /// Wind direction in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 45.0)]
    wind_direction: f64,

    /// Sampling grid resolution per axis
    #[arg(short, long, default_value_t = 50)]
    resolution: usize,

    /// Number of city blocks per side
    #[arg(long, default_value_t = 6)]
    blocks: usize,

    /// Block edge length in meters
    #[arg(long, default_value_t = 120.0)]
    block_size: f64,

    /// Origin latitude of the synthetic neighborhood
    #[arg(long, default_value_t = 23.241)]
    origin_lat: f64,

    /// Origin longitude of the synthetic neighborhood
    #[arg(long, default_value_t = 72.504)]
    origin_lon: f64,

    /// Vertical garden placement as LAT,LNG (repeatable)
    #[arg(long = "garden", value_parser = parse_garden)]
    gardens: Vec<GeoPoint>,
}

fn parse_garden(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{raw}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("bad longitude: {e}"))?;
    Ok(GeoPoint::new(lat, lng))
}

/// Build a Manhattan grid of streets centered on `origin`: a primary ring
/// road, secondary cross streets every third line, residential fill.
fn synthetic_network(origin: PlanarPoint, blocks: usize, block_size: f64) -> RoadNetwork {
    let lines = blocks + 1;
    let half = blocks as f64 * block_size / 2.0;
    let class_for = |line: usize| -> &'static str {
        if line == 0 || line == blocks {
            "primary"
        } else if line % 3 == 0 {
            "secondary"
        } else {
            "residential"
        }
    };

    let mut intersections = Vec::with_capacity(lines * lines);
    for row in 0..lines {
        for col in 0..lines {
            intersections.push(PlanarPoint::new(
                origin.x - half + col as f64 * block_size,
                origin.y - half + row as f64 * block_size,
            ));
        }
    }
    let at = |row: usize, col: usize| intersections[row * lines + col];

    let mut segments = Vec::new();
    for row in 0..lines {
        for col in 0..blocks {
            let (a, b) = (at(row, col), at(row, col + 1));
            segments.push(RoadSegment::new(
                class_for(row),
                Meters::new(a.distance_to(b)),
                a.midpoint(b),
            ));
        }
    }
    for col in 0..lines {
        for row in 0..blocks {
            let (a, b) = (at(row, col), at(row + 1, col));
            segments.push(RoadSegment::new(
                class_for(col),
                Meters::new(a.distance_to(b)),
                a.midpoint(b),
            ));
        }
    }

    let bounds = BoundingBox::from_points(intersections.iter().copied())
        .expect("synthetic grid always has intersections");
    RoadNetwork::new(segments, bounds)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let origin = GeoPoint::new(args.origin_lat, args.origin_lon);
    let projector = UtmProjector::for_location(origin);
    let planar_origin = projector.to_planar(origin)?;
    let network = synthetic_network(planar_origin, args.blocks, args.block_size);

    let wind = WindState::new(args.wind_speed, args.wind_direction);
    let config = SimulationConfig {
        grid_resolution: args.resolution,
        ..SimulationConfig::default()
    };

    println!("=== Airshed demo ===");
    println!(
        "Neighborhood: {}x{} blocks of {} m around ({:.4}, {:.4})",
        args.blocks, args.blocks, args.block_size, args.origin_lat, args.origin_lon
    );
    println!(
        "Wind: {} m/s from {}°, grid {}x{}, {} gardens",
        *wind.speed(),
        *wind.direction(),
        args.resolution,
        args.resolution,
        args.gardens.len()
    );

    let result = simulation::run(&network, wind, &args.gardens, &config, &projector)?;

    let mean: f64 =
        result.samples.iter().map(|s| s.value()).sum::<f64>() / result.samples.len() as f64;
    println!();
    println!("Sources:              {}", result.source_count);
    println!("Applied gardens:      {}", result.applied_interventions);
    println!("Peak concentration:   {:.6e} g/m³", result.peak_concentration);
    println!("Mean normalized load: {mean:.4}");

    let mut ranked: Vec<_> = result.samples.iter().collect();
    ranked.sort_by(|a, b| b.value().total_cmp(&a.value()));
    println!();
    println!("Top hotspots (lat, lon, normalized):");
    for sample in ranked.iter().take(5) {
        println!(
            "  {:.6}, {:.6}  ->  {:.4}",
            sample.lat(),
            sample.lon(),
            sample.value()
        );
    }

    Ok(())
}
