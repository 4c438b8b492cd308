//! Movement admission and step costs
//!
//! [`is_movable`] is the only check the pathfinder makes before entering
//! a cell.

use serde::{Deserialize, Serialize};

use crate::map::Map;
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::tile::Tile;
use crate::units::UnitId;

/// Optional game rules affecting movement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Every step costs 1 regardless of terrain attrition
    #[serde(default)]
    pub no_attrition: bool,
    /// Stacking limits are ignored
    #[serde(default)]
    pub unlimited_stack_size: bool,
    /// A stack may only enter an empty tile
    #[serde(default)]
    pub no_stacking: bool,
}

impl Features {
    pub fn with_no_attrition(mut self, on: bool) -> Self {
        self.no_attrition = on;
        self
    }

    pub fn with_unlimited_stack_size(mut self, on: bool) -> Self {
        self.unlimited_stack_size = on;
        self
    }

    pub fn with_no_stacking(mut self, on: bool) -> Self {
        self.no_stacking = on;
        self
    }

    /// Does a stack of `size` fit on the tile under these rules?
    pub fn fits(&self, tile: &Tile, size: i32) -> bool {
        if self.no_stacking {
            tile.not_occupied()
        } else if self.unlimited_stack_size {
            true
        } else {
            tile.can_fit_stack(size)
        }
    }

    /// Cost of stepping onto the tile; never less than 1
    pub fn step_cost(&self, tile: &Tile) -> i32 {
        if self.no_attrition {
            1
        } else {
            tile.attrition.max(1)
        }
    }
}

/// Can `stack` enter the cell at `point`?
pub fn is_movable(map: &Map, rules: &TerrainRules, point: Point, stack: &[UnitId], features: &Features) -> bool {
    let Some(tile) = map.tile(point) else {
        return false;
    };

    !tile.is_blocked()
        && tile.is_passable(rules, stack)
        && features.fits(tile, stack.len() as i32)
}
