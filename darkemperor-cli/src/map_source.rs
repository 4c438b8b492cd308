//! Shared arguments: where the map comes from, what is moving, which features apply

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use darkemperor_core::{
    random_map, test_pattern, Features, GenerateConfig, Kingdom, Map, Orientation, Scenario, Stack,
    TerrainRules, TerrainType, UnitId, UnitType,
};

#[derive(Args, Clone, Debug)]
pub struct MapArgs {
    /// Scenario JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["pattern", "random"])]
    pub scenario: Option<PathBuf>,

    /// Use the city/battlefield/port test pattern
    #[arg(long, conflicts_with = "random")]
    pub pattern: bool,

    /// Generate a random map from this seed
    #[arg(long, value_name = "SEED")]
    pub random: Option<u64>,

    /// Terrain rules JSON (replaces scenario rules)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Map width in tiles (ignored with --scenario)
    #[arg(long, default_value = "10")]
    pub width: i32,

    /// Map height in tiles (ignored with --scenario)
    #[arg(long, default_value = "10")]
    pub height: i32,

    /// Tile size in pixels (ignored with --scenario)
    #[arg(long, default_value = "32")]
    pub size: i32,

    /// flat or pointy (ignored with --scenario)
    #[arg(long, default_value = "flat")]
    pub orientation: Orientation,
}

#[derive(Args, Clone, Debug)]
pub struct StackArgs {
    /// Unit types in the moving stack, comma separated
    #[arg(long, value_delimiter = ',', default_value = "ground")]
    pub units: Vec<String>,

    /// Kingdom the moving stack belongs to
    #[arg(long, default_value = "none")]
    pub kingdom: String,
}

#[derive(Args, Clone, Debug)]
pub struct FeatureArgs {
    /// Every step costs 1
    #[arg(long)]
    pub no_attrition: bool,

    /// Ignore stacking limits
    #[arg(long)]
    pub unlimited_stack: bool,

    /// Only enter empty tiles
    #[arg(long)]
    pub no_stacking: bool,
}

impl FeatureArgs {
    pub fn features(&self) -> Features {
        Features::default()
            .with_no_attrition(self.no_attrition)
            .with_unlimited_stack_size(self.unlimited_stack)
            .with_no_stacking(self.no_stacking)
    }
}

/// Build the map and rules selected on the command line
pub fn load_map(args: &MapArgs) -> Result<(Map, TerrainRules)> {
    let file_rules = match &args.rules {
        Some(path) => Some(
            TerrainRules::load(path)
                .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        ),
        None => None,
    };

    if let Some(path) = &args.scenario {
        let scenario = Scenario::load(path)
            .with_context(|| format!("Failed to load scenario: {}", path.display()))?;
        let rules = match file_rules {
            Some(rules) => rules,
            None => scenario.rules()?,
        };
        let map = scenario
            .build_map(&rules)
            .with_context(|| format!("Invalid scenario: {}", path.display()))?;
        return Ok((map, rules));
    }

    let rules = file_rules.unwrap_or_default();

    let map = if args.pattern {
        test_pattern(args.width, args.height, args.size, args.orientation, &rules)?
    } else if let Some(seed) = args.random {
        random_map(
            args.width,
            args.height,
            args.size,
            args.orientation,
            &rules,
            &GenerateConfig::default(),
            seed,
        )?
    } else {
        open_scenario(args).build_map(&rules)?
    };

    tracing::debug!("Using {}x{} {:?} map", map.width(), map.height(), map.orientation());
    Ok((map, rules))
}

/// Plain map where every tile is settled land
fn open_scenario(args: &MapArgs) -> Scenario {
    Scenario {
        name: "open".to_string(),
        width: args.width,
        height: args.height,
        size: args.size,
        orientation: args.orientation,
        default_terrain: TerrainType::Settled,
        tiles: Vec::new(),
        rules: None,
    }
}

/// Build the moving stack; unit ids are numbered from 1
pub fn build_stack(args: &StackArgs) -> Result<Stack> {
    let kingdom: Kingdom = parse_name(&args.kingdom).context("Unknown kingdom")?;

    args.units
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let unit_type: UnitType =
                parse_name(name).with_context(|| format!("Unknown unit type: {}", name))?;
            Ok(UnitId::new(i as i32 + 1, unit_type, kingdom))
        })
        .collect()
}

/// Parse an enum by its JSON name, case-insensitively ("capital-city" works too)
fn parse_name<T: serde::de::DeserializeOwned>(name: &str) -> Result<T> {
    let key = name.trim().to_ascii_uppercase().replace('-', "_");
    Ok(serde_json::from_value(serde_json::Value::String(key))?)
}
