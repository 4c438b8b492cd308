//! Path command - find a movement path for a stack
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load map, search, report_results()
//! - Level 3: build_report()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use darkemperor_core::{Map, Path, Pathfinder, Point};

use crate::map_source::{build_stack, load_map, FeatureArgs, MapArgs, StackArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PathArgs {
    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Starting cell as X,Y
    #[arg(long)]
    pub from: Point,

    /// Destination cell as X,Y
    #[arg(long)]
    pub to: Point,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// What a search produced, ready for printing
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathReport {
    pub from: Point,
    pub to: Point,
    pub found: bool,
    pub points: Vec<Point>,
    pub closest: Point,
    pub steps: usize,
    pub cost: i32,
    /// Hex distance from `closest` to the destination
    pub remaining: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run path command
pub fn run(args: PathArgs) -> Result<()> {
    let (map, rules) = load_map(&args.map)?;
    let stack = build_stack(&args.stack)?;
    let features = args.features.features();

    tracing::info!(
        "Finding path {} -> {} for {} unit(s) on {}x{} map",
        args.from,
        args.to,
        stack.len(),
        map.width(),
        map.height()
    );

    let pathfinder = Pathfinder::new(&rules).with_features(features);
    let path = pathfinder.find_path(&map, args.from, args.to, &stack);
    let report = build_report(&map, &pathfinder, args.from, args.to, &path);

    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_results(report: &PathReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_report(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

pub fn build_report(map: &Map, pathfinder: &Pathfinder<'_>, from: Point, to: Point, path: &Path) -> PathReport {
    PathReport {
        from,
        to,
        found: !path.is_empty(),
        points: path.points.clone(),
        closest: path.closest,
        steps: path.steps(),
        cost: path.cost(map, pathfinder.features()),
        remaining: map.distance(path.closest, to),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn print_text_report(report: &PathReport) {
    if report.found {
        println!("Path {} -> {}: {} steps, cost {}", report.from, report.to, report.steps, report.cost);
        println!("  {}", format_points(&report.points));
    } else {
        println!("No path {} -> {}", report.from, report.to);
        if report.remaining >= 0 {
            println!("  Closest reachable: {} ({} from destination)", report.closest, report.remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkemperor_core::{find_path, test_pattern, Kingdom, Orientation, TerrainRules, UnitId, UnitType};

    #[test]
    fn test_report_for_found_path() {
        let rules = TerrainRules::default();
        let map = test_pattern(5, 5, 32, Orientation::Flat, &rules).unwrap();
        let stack = vec![UnitId::new(1, UnitType::Ground, Kingdom::None)];
        let path = find_path(&map, &rules, Point::new(0, 0), Point::new(4, 4), &stack);

        let report = build_report(&map, &Pathfinder::new(&rules), Point::new(0, 0), Point::new(4, 4), &path);
        assert!(report.found);
        assert_eq!(report.steps, report.points.len() - 1);
        assert_eq!(report.cost as usize, report.steps);
        assert_eq!(report.remaining, 0);
    }

    #[test]
    fn test_report_for_unreachable() {
        let rules = TerrainRules::default();
        let map = test_pattern(5, 5, 32, Orientation::Flat, &rules).unwrap();
        let path = find_path(&map, &rules, Point::new(0, 0), Point::new(9, 9), &[]);

        let report = build_report(&map, &Pathfinder::new(&rules), Point::new(0, 0), Point::new(9, 9), &path);
        assert!(!report.found);
        assert_eq!(report.steps, 0);
        assert_eq!(report.closest, Point::new(0, 0));
        assert_eq!(report.remaining, -1);
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(&[Point::new(0, 0), Point::new(1, 0)]), "(0, 0) -> (1, 0)");
        assert_eq!(format_points(&[]), "");
    }
}
