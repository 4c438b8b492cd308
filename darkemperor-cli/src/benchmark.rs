//! Benchmark command - time pathfinding on random maps
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_layout_benchmarks(), report_results()
//! - Level 3: benchmark_searches(), pick_endpoints()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use darkemperor_core::{
    random_map, Features, GenerateConfig, Kingdom, Map, Orientation, Pathfinder, Point, TerrainRules, UnitId,
    UnitType,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Searches per benchmark
    #[arg(long, default_value = "200")]
    pub searches: usize,

    /// Map width in tiles
    #[arg(long, default_value = "40")]
    pub width: i32,

    /// Map height in tiles
    #[arg(long, default_value = "30")]
    pub height: i32,

    /// Fraction of impassable tiles
    #[arg(long, default_value = "0.15")]
    pub blocked: f64,

    /// Seed for maps and endpoints (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of a single benchmark run
#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: String,
    searches: usize,
    total_time: Duration,
    avg_time_per_search: Duration,
    searches_per_second: f64,
    notes: String,
}

/// All benchmark results
#[derive(Clone, Debug)]
struct AllResults {
    results: Vec<BenchmarkResult>,
    system_info: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate one random map per orientation
/// 2. Time searches between random passable endpoints
/// 3. Report all results
pub fn run(args: BenchmarkArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(
        "Starting benchmarks: {} searches on {}x{} maps (seed {})",
        args.searches,
        args.width,
        args.height,
        seed
    );

    let mut all_results = AllResults {
        results: Vec::new(),
        system_info: get_system_info(),
    };

    run_layout_benchmarks(&args, seed, &mut all_results)?;

    report_results(&all_results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn run_layout_benchmarks(args: &BenchmarkArgs, seed: u64, results: &mut AllResults) -> Result<()> {
    let rules = TerrainRules::default();
    let config = GenerateConfig::default().with_blocked_ratio(args.blocked);

    let runs = [
        ("Flat", Orientation::Flat, Features::default()),
        ("Pointy", Orientation::Pointy, Features::default()),
        ("Flat no-attrition", Orientation::Flat, Features::default().with_no_attrition(true)),
    ];

    for (label, orientation, features) in runs {
        tracing::info!("Benchmarking {} layout...", label);
        let map = random_map(args.width, args.height, 32, orientation, &rules, &config, seed)?;
        let pathfinder = Pathfinder::new(&rules).with_features(features);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut result = benchmark_searches(&map, &pathfinder, args.searches, &mut rng);
        result.name = format!("{} {}x{}", label, args.width, args.height);
        results.results.push(result);
    }

    Ok(())
}

/// Report all benchmark results
fn report_results(results: &AllResults, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Time `count` searches for a single ground unit
fn benchmark_searches(map: &Map, pathfinder: &Pathfinder<'_>, count: usize, rng: &mut ChaCha8Rng) -> BenchmarkResult {
    let stack = vec![UnitId::new(1, UnitType::Ground, Kingdom::None)];
    let endpoints: Vec<(Point, Point)> = (0..count).filter_map(|_| pick_endpoints(map, rng)).collect();

    let start = Instant::now();
    let mut found = 0;
    let mut total_steps = 0;

    for &(src, dst) in &endpoints {
        let path = pathfinder.find_path(map, src, dst, &stack);
        if !path.is_empty() {
            found += 1;
            total_steps += path.steps();
        }
    }

    let total_time = start.elapsed();
    let searches = endpoints.len();

    BenchmarkResult {
        name: String::new(),
        searches,
        total_time,
        avg_time_per_search: total_time / searches.max(1) as u32,
        searches_per_second: searches as f64 / total_time.as_secs_f64().max(f64::EPSILON),
        notes: format!(
            "Found {:.0}%, avg steps {:.1}",
            percent(found, searches),
            total_steps as f64 / found.max(1) as f64
        ),
    }
}

/// Two distinct non-blocked cells, or None if the map has fewer than two
fn pick_endpoints(map: &Map, rng: &mut ChaCha8Rng) -> Option<(Point, Point)> {
    let open: Vec<Point> = map.tiles().filter(|t| !t.is_blocked()).map(|t| t.point).collect();
    if open.len() < 2 {
        return None;
    }

    let src = open[rng.gen_range(0..open.len())];
    loop {
        let dst = open[rng.gen_range(0..open.len())];
        if dst != src {
            return Some((src, dst));
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Get system information string
fn get_system_info() -> String {
    format!(
        "darkemperor {}, {} CPUs",
        env!("CARGO_PKG_VERSION"),
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
    )
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(results: &AllResults) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        searches: usize,
        total_time_ms: u64,
        avg_time_us: f64,
        searches_per_second: f64,
        notes: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        system_info: String,
        benchmarks: Vec<JsonBenchmark>,
    }

    let output = JsonOutput {
        system_info: results.system_info.clone(),
        benchmarks: results
            .results
            .iter()
            .map(|r| JsonBenchmark {
                name: r.name.clone(),
                searches: r.searches,
                total_time_ms: r.total_time.as_millis() as u64,
                avg_time_us: r.avg_time_per_search.as_secs_f64() * 1_000_000.0,
                searches_per_second: r.searches_per_second,
                notes: r.notes.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &AllResults) {
    println!("\n=== DarkEmperor Pathfinding Benchmark ===");
    println!("System: {}\n", results.system_info);

    println!(
        "{:<26} {:>9} {:>12} {:>12} {:>12}  {}",
        "Benchmark", "Searches", "Total Time", "Avg/Search", "Searches/s", "Notes"
    );
    println!("{}", "-".repeat(96));

    for r in &results.results {
        println!(
            "{:<26} {:>9} {:>12} {:>12} {:>12.1}  {}",
            r.name,
            r.searches,
            format_duration(r.total_time),
            format_duration(r.avg_time_per_search),
            r.searches_per_second,
            r.notes
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert!(format_duration(Duration::from_micros(300)).contains("us"));
        assert!(format_duration(Duration::from_millis(500)).contains("ms"));
        assert!(format_duration(Duration::from_secs(5)).contains("s"));
    }

    #[test]
    fn test_pick_endpoints() {
        let rules = TerrainRules::default();
        let config = GenerateConfig::default();
        let map = random_map(8, 8, 32, Orientation::Flat, &rules, &config, 11).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let (src, dst) = pick_endpoints(&map, &mut rng).unwrap();
            assert_ne!(src, dst);
            assert!(!map[src].is_blocked());
            assert!(!map[dst].is_blocked());
        }

        let walls = GenerateConfig::default().with_blocked_ratio(1.0);
        let map = random_map(8, 8, 32, Orientation::Flat, &rules, &walls, 11).unwrap();
        assert!(pick_endpoints(&map, &mut rng).is_none());
    }

    #[test]
    fn test_benchmark_counts() {
        let rules = TerrainRules::default();
        let map = random_map(10, 10, 32, Orientation::Pointy, &rules, &GenerateConfig::default(), 5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = benchmark_searches(&map, &Pathfinder::new(&rules), 12, &mut rng);
        assert_eq!(result.searches, 12);
        assert!(result.notes.starts_with("Found"));
    }

    #[test]
    fn test_get_system_info() {
        assert!(get_system_info().contains("CPUs"));
    }
}
