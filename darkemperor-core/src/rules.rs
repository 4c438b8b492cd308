//! TerrainRules - terrain capability tables
//!
//! Which unit types may enter each terrain, and the default stacking
//! limit a tile of that terrain starts with. Built once and passed by
//! reference to tiles, the movement gate and the pathfinder.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{read_file, Error, Result};
use crate::units::{TerrainType, UnitType};

/// Default stacking limit for terrains without a specific entry
pub const DEFAULT_STACK_LIMIT: i32 = 4;

/// Stacking limit on mountains
pub const MOUNTAIN_STACK_LIMIT: i32 = 2;

const LAND: &[UnitType] = &[UnitType::Air, UnitType::Ground, UnitType::Leader];
const SHORE: &[UnitType] = &[UnitType::Air, UnitType::Ground, UnitType::Leader, UnitType::Naval];
const WATER: &[UnitType] = &[UnitType::Air, UnitType::Leader, UnitType::Naval];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainRules {
    /// terrain -> unit types allowed to enter
    #[serde(default)]
    pub allowed: FxHashMap<TerrainType, Vec<UnitType>>,
    /// terrain -> default stacking limit
    #[serde(default)]
    pub stack_limits: FxHashMap<TerrainType, i32>,
}

impl Default for TerrainRules {
    fn default() -> Self {
        let mut allowed = FxHashMap::default();
        let mut stack_limits = FxHashMap::default();

        for terrain in TerrainType::ALL {
            let passage = match terrain {
                TerrainType::None => continue,
                TerrainType::Coastal | TerrainType::Port => SHORE,
                TerrainType::Sea => WATER,
                _ => LAND,
            };
            allowed.insert(terrain, passage.to_vec());
        }

        for terrain in TerrainType::ALL {
            let limit = match terrain {
                TerrainType::None => 0,
                TerrainType::Mountain => MOUNTAIN_STACK_LIMIT,
                _ => DEFAULT_STACK_LIMIT,
            };
            stack_limits.insert(terrain, limit);
        }

        Self {
            allowed,
            stack_limits,
        }
    }
}

impl TerrainRules {
    /// Rules with no passage and no capacity anywhere
    pub fn empty() -> Self {
        Self {
            allowed: FxHashMap::default(),
            stack_limits: FxHashMap::default(),
        }
    }

    /// Can a unit of this type enter the terrain?
    pub fn allows(&self, terrain: TerrainType, unit_type: UnitType) -> bool {
        self.allowed
            .get(&terrain)
            .is_some_and(|types| types.contains(&unit_type))
    }

    /// Default stacking limit for the terrain (0 when unlisted)
    pub fn stack_limit(&self, terrain: TerrainType) -> i32 {
        self.stack_limits.get(&terrain).copied().unwrap_or(0)
    }

    /// Replace entries with those present in `other`
    pub fn merge(&mut self, other: &TerrainRules) {
        for (terrain, types) in &other.allowed {
            self.allowed.insert(*terrain, types.clone());
        }
        for (terrain, limit) in &other.stack_limits {
            self.stack_limits.insert(*terrain, *limit);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed.get(&TerrainType::None).is_some_and(|t| !t.is_empty()) {
            return Err(Error::InvalidRules("terrain NONE cannot allow passage".to_string()));
        }
        if let Some((terrain, limit)) = self.stack_limits.iter().find(|(_, limit)| **limit < 0) {
            return Err(Error::InvalidRules(format!(
                "negative stack limit {} for {:?}",
                limit, terrain
            )));
        }
        Ok(())
    }

    /// Parse rules from JSON; entries present override the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: TerrainRules = serde_json::from_str(json)?;
        let mut rules = TerrainRules::default();
        rules.merge(&overrides);
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        let rules = Self::from_json(&content)?;
        tracing::debug!("Loaded terrain rules from {}", path.display());
        Ok(rules)
    }
}
