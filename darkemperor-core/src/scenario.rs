//! Scenario - map setup from JSON
//!
//! A scenario names the map dimensions, a default terrain and a list of
//! per-tile overrides. It may embed terrain rule overrides as well.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_file, Error, Result};
use crate::hex::Orientation;
use crate::map::Map;
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::units::{Kingdom, Stack, TerrainType};

/// Tile size used when a scenario does not give one
pub const DEFAULT_TILE_SIZE: i32 = 32;

fn default_tile_size() -> i32 {
    DEFAULT_TILE_SIZE
}

fn default_terrain() -> TerrainType {
    TerrainType::Settled
}

/// Override for one tile; unset fields keep the map default
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<TerrainType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrition: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Kingdom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Stack,
}

impl TileSpec {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_tile_size")]
    pub size: i32,
    #[serde(default)]
    pub orientation: Orientation,
    /// Terrain of every tile not listed in `tiles`
    #[serde(default = "default_terrain")]
    pub default_terrain: TerrainType,
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
    /// Overrides applied on top of the default terrain rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<TerrainRules>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        let mut scenario = Self::from_json(&content)?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unnamed".to_string());
        }
        tracing::info!(
            "Loaded scenario '{}' ({}x{}, {} tile overrides)",
            scenario.name,
            scenario.width,
            scenario.height,
            scenario.tiles.len()
        );
        Ok(scenario)
    }

    /// Default rules with this scenario's overrides applied
    pub fn rules(&self) -> Result<TerrainRules> {
        let mut rules = TerrainRules::default();
        if let Some(overrides) = &self.rules {
            rules.merge(overrides);
        }
        rules.validate()?;
        Ok(rules)
    }

    /// Build the map described by this scenario
    pub fn build_map(&self, rules: &TerrainRules) -> Result<Map> {
        let mut map = Map::try_new(self.width, self.height, self.size, self.orientation)?;

        for y in 0..self.height {
            for x in 0..self.width {
                map.set_terrain(Point::new(x, y), self.default_terrain, rules)?;
            }
        }

        for spec in &self.tiles {
            let point = spec.point();
            if !map.is_valid(point) {
                return Err(Error::OutOfBounds(point));
            }
            if let Some(terrain) = spec.terrain {
                map.set_terrain(point, terrain, rules)?;
            }
            if let Some(attrition) = spec.attrition {
                map.set_attrition(point, attrition)?;
            }
            if let Some(value) = spec.city_value {
                map.set_city_value(point, value)?;
            }
            if let Some(owner) = spec.owner {
                map.set_owner(point, owner)?;
            }
            if let Some(limit) = spec.stack_limit {
                map.set_stack_limit(point, limit)?;
            }
            if !spec.units.is_empty() {
                map.set_units(point, spec.units.clone())?;
            }
        }

        tracing::debug!("Built {}x{} {:?} map", self.width, self.height, self.orientation);
        Ok(map)
    }
}

/// Checkerboard of capital cities, battlefields and ports.
///
/// Useful for eyeballing neighbor tables: every tile is passable to
/// ground units, and the city/battlefield bands follow the hex columns
/// (flat) or rows (pointy).
pub fn test_pattern(width: i32, height: i32, size: i32, orientation: Orientation, rules: &TerrainRules) -> Result<Map> {
    let mut map = Map::try_new(width, height, size, orientation)?;

    for y in 0..height {
        for x in 0..width {
            // bands run along y for flat maps and along x for pointy ones
            let (band, parity) = if orientation.is_flat() { (y % 3, x % 2) } else { (x % 3, y % 2) };

            let city = (band == 0 && parity == 0) || (band == 1 && parity == 1);
            let battlefield = (band == 2 && parity == 0) || (band == 0 && parity == 1);

            let terrain = if city {
                TerrainType::CapitalCity
            } else if battlefield {
                TerrainType::Battlefield
            } else {
                TerrainType::Port
            };
            map.set_terrain(Point::new(x, y), terrain, rules)?;
        }
    }

    Ok(map)
}
