//! Read-only map queries: distance and neighbors

use anyhow::Result;
use clap::Args;

use darkemperor_core::Point;

use crate::map_source::{load_map, MapArgs};
use crate::path_cmd::format_points;

#[derive(Args)]
pub struct DistanceArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// First cell as X,Y
    #[arg(long)]
    pub from: Point,

    /// Second cell as X,Y
    #[arg(long)]
    pub to: Point,
}

#[derive(Args)]
pub struct NeighborsArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Cell as X,Y
    #[arg(long)]
    pub at: Point,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print the hex distance (-1 when either cell is off the map)
pub fn run_distance(args: DistanceArgs) -> Result<()> {
    let (map, _) = load_map(&args.map)?;
    let distance = map.distance(args.from, args.to);
    if distance < 0 {
        tracing::warn!("{} or {} is outside the {}x{} map", args.from, args.to, map.width(), map.height());
    }
    println!("{}", distance);
    Ok(())
}

pub fn run_neighbors(args: NeighborsArgs) -> Result<()> {
    let (map, _) = load_map(&args.map)?;
    if !map.is_valid(args.at) {
        tracing::warn!("{} is outside the {}x{} map", args.at, map.width(), map.height());
    }

    let neighbors = map.neighbors(args.at);
    if args.json {
        println!("{}", serde_json::to_string(&neighbors)?);
    } else {
        println!("{}", format_points(&neighbors).replace(" -> ", " "));
    }
    Ok(())
}
