//! A single hex cell: terrain, capacity and occupants

use serde::{Deserialize, Serialize};

use crate::hex::{offset_to_cube, Cube, Orientation};
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::units::{distinct_types, Kingdom, Stack, TerrainType, UnitId, UnitType};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Hex number
    pub id: i32,
    /// Offset coordinates
    pub point: Point,
    /// Cube coordinates derived from `point`
    pub hex: Cube,
    pub terrain: TerrainType,
    /// Occupying units
    pub units: Stack,
    pub stack_limit: i32,
    /// Movement cost of entering this tile (0 means the minimum of 1)
    pub attrition: i32,
    /// Revenue when owned and controlled; also extra stacking room in cities
    pub city_value: i32,
    pub owner: Kingdom,
}

impl Tile {
    pub fn new(id: i32, point: Point, orientation: Orientation) -> Self {
        Self {
            id,
            point,
            hex: offset_to_cube(point, orientation),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hex.is_valid()
    }

    pub fn is_blocked(&self) -> bool {
        self.terrain == TerrainType::None
    }

    pub fn is_city(&self) -> bool {
        self.terrain.is_city()
    }

    pub fn is_capital(&self) -> bool {
        self.terrain == TerrainType::CapitalCity
    }

    pub fn current_stack(&self) -> i32 {
        self.units.len() as i32
    }

    pub fn not_occupied(&self) -> bool {
        self.units.is_empty()
    }

    /// Stacking capacity including the city bonus
    pub fn capacity(&self) -> i32 {
        self.stack_limit + if self.is_city() { self.city_value } else { 0 }
    }

    pub fn can_fit_stack(&self, size: i32) -> bool {
        size <= self.capacity() - self.current_stack()
    }

    pub fn is_passable_by(&self, rules: &TerrainRules, unit_type: UnitType) -> bool {
        rules.allows(self.terrain, unit_type)
    }

    /// Every distinct unit type in the stack may enter
    pub fn is_passable(&self, rules: &TerrainRules, stack: &[UnitId]) -> bool {
        distinct_types(stack)
            .into_iter()
            .all(|unit_type| self.is_passable_by(rules, unit_type))
    }

    /// Units belonging to `kingdom`
    pub fn count(&self, kingdom: Kingdom) -> usize {
        self.units
            .iter()
            .filter(|u| u.kingdom != Kingdom::None && u.kingdom == kingdom)
            .count()
    }

    /// Units affiliated with some kingdom other than `kingdom`
    pub fn others(&self, kingdom: Kingdom) -> usize {
        self.units
            .iter()
            .filter(|u| u.kingdom != Kingdom::None && u.kingdom != kingdom)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(limit: i32, value: i32, occupants: usize) -> Tile {
        let mut tile = Tile::new(0, Point::new(0, 0), Orientation::Flat);
        tile.terrain = TerrainType::City;
        tile.stack_limit = limit;
        tile.city_value = value;
        tile.units = (0..occupants as i32)
            .map(|id| UnitId::new(id, UnitType::Ground, Kingdom::Ferlarie))
            .collect();
        tile
    }

    #[test]
    fn test_new_tile() {
        let tile = Tile::new(7, Point::new(3, 2), Orientation::Flat);
        assert!(tile.is_valid());
        assert!(tile.is_blocked());
        assert_eq!(tile.hex, Cube::axial(3, 1));
        assert!(tile.not_occupied());
    }

    #[test]
    fn test_city_bonus_capacity() {
        let tile = city(4, 2, 4);
        assert_eq!(tile.capacity(), 6);
        assert!(tile.can_fit_stack(2));
        assert!(!tile.can_fit_stack(3));

        let mut port = tile.clone();
        port.terrain = TerrainType::Port;
        assert!(!port.can_fit_stack(1));
        assert!(port.can_fit_stack(0));
    }

    #[test]
    fn test_stack_passability() {
        let rules = TerrainRules::default();
        let mut sea = Tile::new(0, Point::new(0, 0), Orientation::Pointy);
        sea.terrain = TerrainType::Sea;

        let fleet = vec![
            UnitId::new(1, UnitType::Naval, Kingdom::Starkeep),
            UnitId::new(2, UnitType::Leader, Kingdom::Starkeep),
        ];
        assert!(sea.is_passable(&rules, &fleet));

        let mut army = fleet.clone();
        army.push(UnitId::new(3, UnitType::Ground, Kingdom::Starkeep));
        assert!(!sea.is_passable(&rules, &army));

        assert!(sea.is_passable(&rules, &[]));
    }

    #[test]
    fn test_counts() {
        let mut tile = city(4, 0, 2);
        tile.units.push(UnitId::new(9, UnitType::Air, Kingdom::Stavror));
        tile.units.push(UnitId::mercenary(10, UnitType::Ground, crate::units::Mercenary::Saar));
        assert_eq!(tile.count(Kingdom::Ferlarie), 2);
        assert_eq!(tile.others(Kingdom::Ferlarie), 1);
        assert_eq!(tile.count(Kingdom::None), 0);
    }
}
