//! Territory queries: tile control and production

use crate::map::Map;
use crate::point::Point;
use crate::units::Kingdom;

/// Does `kingdom` control the tile at `point`?
///
/// Control is lost when units of any other kingdom stand on the tile or
/// on one of its neighbors. Off-map points are never controlled.
pub fn is_controlled(map: &Map, point: Point, kingdom: Kingdom) -> bool {
    let Some(tile) = map.tile(point) else {
        return false;
    };

    if tile.others(kingdom) > 0 {
        return false;
    }

    map.neighbors(point)
        .into_iter()
        .filter_map(|p| map.tile(p))
        .all(|neighbor| neighbor.others(kingdom) == 0)
}

/// Revenue of `kingdom`: value of the cities it owns and controls
pub fn production(map: &Map, kingdom: Kingdom) -> i32 {
    if kingdom == Kingdom::None {
        return 0;
    }

    map.tiles()
        .filter(|tile| tile.is_city() && tile.owner == kingdom)
        .filter(|tile| is_controlled(map, tile.point, kingdom))
        .map(|tile| tile.city_value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Orientation;
    use crate::rules::TerrainRules;
    use crate::units::{TerrainType, UnitId, UnitType};

    fn kingdom_map() -> Map {
        let rules = TerrainRules::default();
        let mut map = Map::new(5, 5, 32, Orientation::Flat);
        for tile in map.tiles().map(|t| t.point).collect::<Vec<_>>() {
            map.set_terrain(tile, TerrainType::Settled, &rules).unwrap();
        }
        for (p, value) in [(Point::new(1, 1), 3), (Point::new(3, 3), 2)] {
            map.set_terrain(p, TerrainType::City, &rules).unwrap();
            map.set_city_value(p, value).unwrap();
            map.set_owner(p, Kingdom::Ferlarie).unwrap();
        }
        map
    }

    #[test]
    fn test_uncontested_control() {
        let map = kingdom_map();
        assert!(is_controlled(&map, Point::new(1, 1), Kingdom::Ferlarie));
        assert!(!is_controlled(&map, Point::new(9, 9), Kingdom::Ferlarie));
        assert_eq!(production(&map, Kingdom::Ferlarie), 5);
        assert_eq!(production(&map, Kingdom::Stavror), 0);
    }

    #[test]
    fn test_enemy_neighbor_breaks_control() {
        let mut map = kingdom_map();
        // (2, 1) is adjacent to (1, 1) but not to (3, 3)
        map.place_unit(Point::new(2, 1), UnitId::new(1, UnitType::Ground, Kingdom::Stavror))
            .unwrap();

        assert!(!is_controlled(&map, Point::new(1, 1), Kingdom::Ferlarie));
        assert!(is_controlled(&map, Point::new(3, 3), Kingdom::Ferlarie));
        assert_eq!(production(&map, Kingdom::Ferlarie), 2);
    }

    #[test]
    fn test_own_units_keep_control() {
        let mut map = kingdom_map();
        map.place_unit(Point::new(1, 1), UnitId::new(1, UnitType::Ground, Kingdom::Ferlarie))
            .unwrap();
        map.place_unit(Point::new(2, 1), UnitId::new(2, UnitType::Air, Kingdom::Ferlarie))
            .unwrap();
        assert_eq!(production(&map, Kingdom::Ferlarie), 5);
    }

    #[test]
    fn test_enemy_on_tile() {
        let mut map = kingdom_map();
        map.place_unit(Point::new(3, 3), UnitId::new(1, UnitType::Leader, Kingdom::Necromancer))
            .unwrap();
        assert!(!is_controlled(&map, Point::new(3, 3), Kingdom::Ferlarie));
        assert!(is_controlled(&map, Point::new(3, 3), Kingdom::Necromancer));
    }
}
