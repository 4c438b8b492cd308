//! Rectangular hex map
//!
//! Tiles are stored row-major and each one carries its precomputed cube
//! coordinates, so neighbor and distance queries never reconvert.

use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::hex::{cube_to_offset, neighbor_offsets, Cube, Orientation};
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::tile::Tile;
use crate::units::{Kingdom, Stack, TerrainType, UnitId};

#[derive(Clone, Debug)]
pub struct Map {
    /// Number of tile columns (x) and rows (y)
    dimensions: Point,
    /// Tile size in pixels
    size: i32,
    orientation: Orientation,
    tiles: Vec<Tile>,
}

impl Map {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a map of blocked tiles. Non-positive dimensions, or more
    /// cells than tile ids can number, give an empty map.
    pub fn new(width: i32, height: i32, size: i32, orientation: Orientation) -> Self {
        let (width, height) = match width.max(0).checked_mul(height.max(0)) {
            Some(_) => (width.max(0), height.max(0)),
            None => {
                tracing::warn!("{}x{} map has too many cells; using an empty map", width, height);
                (0, 0)
            }
        };

        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(y * width + x, Point::new(x, y), orientation));
            }
        }

        Self {
            dimensions: Point::new(width, height),
            size,
            orientation,
            tiles,
        }
    }

    /// Like [`Map::new`], but rejects empty and oversized maps
    pub fn try_new(width: i32, height: i32, size: i32, orientation: Orientation) -> Result<Self> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::new(width, height, size, orientation))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn width(&self) -> i32 {
        self.dimensions.x
    }

    pub fn height(&self) -> i32 {
        self.dimensions.y
    }

    pub fn dimensions(&self) -> Point {
        self.dimensions
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Is the point within map bounds?
    pub fn is_valid(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.dimensions.x && point.y >= 0 && point.y < self.dimensions.y
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        self.is_valid(point)
            .then(|| (point.y * self.dimensions.x + point.x) as usize)
    }

    pub fn tile(&self, point: Point) -> Option<&Tile> {
        self.index_of(point).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, point: Point) -> Option<&mut Tile> {
        self.index_of(point).map(move |i| &mut self.tiles[i])
    }

    /// Tile addressed by cube coordinates
    pub fn tile_at_cube(&self, cube: Cube) -> Option<&Tile> {
        self.tile(cube_to_offset(cube, self.orientation))
    }

    /// Offset coordinates of the tile with this id, or `Point::NONE`
    pub fn locate(&self, id: i32) -> Point {
        self.tiles
            .iter()
            .find(|tile| tile.id == id)
            .map(|tile| tile.point)
            .unwrap_or(Point::NONE)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    /// In-bounds neighbors of `point`, in neighbor-table order
    pub fn neighbors(&self, point: Point) -> Vec<Point> {
        let odd = (if self.orientation.is_flat() { point.x } else { point.y }) & 1 != 0;

        neighbor_offsets(self.orientation, odd)
            .iter()
            .map(|&delta| point + delta)
            .filter(|&p| self.is_valid(p))
            .collect()
    }

    /// Hex distance between two cells, or -1 if either is off the map
    pub fn distance(&self, src: Point, dst: Point) -> i32 {
        match (self.tile(src), self.tile(dst)) {
            (Some(a), Some(b)) => a.hex.distance(b.hex),
            _ => -1,
        }
    }

    /// Total attrition along a path, skipping off-map points
    pub fn attrition(&self, path: &[Point]) -> i32 {
        path.iter()
            .filter_map(|&p| self.tile(p))
            .map(|tile| tile.attrition)
            .sum()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    fn checked_mut(&mut self, point: Point) -> Result<&mut Tile> {
        self.tile_mut(point).ok_or(Error::OutOfBounds(point))
    }

    /// Set terrain and reset the stacking limit to the terrain default
    pub fn set_terrain(&mut self, point: Point, terrain: TerrainType, rules: &TerrainRules) -> Result<()> {
        let tile = self.checked_mut(point)?;
        tile.terrain = terrain;
        tile.stack_limit = rules.stack_limit(terrain);
        Ok(())
    }

    /// Rejects negative costs so every step stays at least 1
    pub fn set_attrition(&mut self, point: Point, attrition: i32) -> Result<()> {
        let tile = self.checked_mut(point)?;
        tile.attrition = non_negative("attrition", point, attrition)?;
        Ok(())
    }

    pub fn set_city_value(&mut self, point: Point, value: i32) -> Result<()> {
        let tile = self.checked_mut(point)?;
        tile.city_value = non_negative("city_value", point, value)?;
        Ok(())
    }

    pub fn set_owner(&mut self, point: Point, owner: Kingdom) -> Result<()> {
        self.checked_mut(point)?.owner = owner;
        Ok(())
    }

    pub fn set_stack_limit(&mut self, point: Point, limit: i32) -> Result<()> {
        let tile = self.checked_mut(point)?;
        tile.stack_limit = non_negative("stack_limit", point, limit)?;
        Ok(())
    }

    pub fn set_units(&mut self, point: Point, units: Stack) -> Result<()> {
        self.checked_mut(point)?.units = units;
        Ok(())
    }

    pub fn place_unit(&mut self, point: Point, unit: UnitId) -> Result<()> {
        self.checked_mut(point)?.units.push(unit);
        Ok(())
    }

    /// Remove a unit by id from wherever it stands
    pub fn remove_unit(&mut self, id: i32) -> Option<UnitId> {
        self.tiles.iter_mut().find_map(|tile| {
            let pos = tile.units.iter().position(|u| u.id == id)?;
            Some(tile.units.remove(pos))
        })
    }
}

fn non_negative(field: &'static str, point: Point, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(Error::NegativeValue { field, point, value });
    }
    Ok(value)
}

impl Index<Point> for Map {
    type Output = Tile;

    fn index(&self, point: Point) -> &Tile {
        match self.tile(point) {
            Some(tile) => tile,
            None => panic!("point {} outside {}x{} map", point, self.width(), self.height()),
        }
    }
}

impl IndexMut<Point> for Map {
    fn index_mut(&mut self, point: Point) -> &mut Tile {
        let (width, height) = (self.width(), self.height());
        match self.tile_mut(point) {
            Some(tile) => tile,
            None => panic!("point {} outside {}x{} map", point, width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitType;

    fn all_points(map: &Map) -> Vec<Point> {
        map.tiles().map(|t| t.point).collect()
    }

    #[test]
    fn test_bounds() {
        let map = Map::new(5, 3, 32, Orientation::Flat);
        assert_eq!(map.len(), 15);
        assert!(map.is_valid(Point::new(0, 0)));
        assert!(map.is_valid(Point::new(4, 2)));
        assert!(!map.is_valid(Point::new(5, 0)));
        assert!(!map.is_valid(Point::new(0, 3)));
        assert!(!map.is_valid(Point::NONE));
        assert!(map.tile(Point::new(-1, 0)).is_none());
    }

    #[test]
    fn test_empty_map() {
        let map = Map::new(0, 4, 32, Orientation::Pointy);
        assert!(map.is_empty());
        assert!(!map.is_valid(Point::new(0, 0)));
        assert!(Map::try_new(0, 4, 32, Orientation::Pointy).is_err());
        assert!(Map::try_new(-2, 4, 32, Orientation::Pointy).is_err());
    }

    #[test]
    fn test_oversized_map() {
        let map = Map::new(70_000, 70_000, 32, Orientation::Flat);
        assert!(map.is_empty());
        assert_eq!(map.dimensions(), Point::new(0, 0));
        assert!(!map.is_valid(Point::new(0, 0)));

        assert!(matches!(
            Map::try_new(70_000, 70_000, 32, Orientation::Flat),
            Err(Error::InvalidDimensions { width: 70_000, height: 70_000 })
        ));
    }

    #[test]
    fn test_cube_invariant_everywhere() {
        for orientation in [Orientation::Flat, Orientation::Pointy] {
            let map = Map::new(9, 7, 32, orientation);
            assert!(map.tiles().all(|t| t.is_valid()));
        }
    }

    #[test]
    fn test_cube_access_round_trip() {
        for orientation in [Orientation::Flat, Orientation::Pointy] {
            let map = Map::new(8, 6, 32, orientation);
            for tile in map.tiles() {
                let found = map.tile_at_cube(tile.hex).unwrap();
                assert_eq!(found.point, tile.point);
            }
        }
    }

    #[test]
    fn test_locate() {
        let map = Map::new(4, 4, 32, Orientation::Flat);
        assert_eq!(map.locate(6), Point::new(2, 1));
        assert_eq!(map.locate(99), Point::NONE);
    }

    #[test]
    fn test_neighbors_flat() {
        let map = Map::new(5, 5, 32, Orientation::Flat);
        assert_eq!(map.neighbors(Point::new(0, 0)), vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(
            map.neighbors(Point::new(1, 1)),
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(2, 2),
                Point::new(1, 2),
                Point::new(0, 2),
                Point::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_neighbors_pointy() {
        let map = Map::new(5, 5, 32, Orientation::Pointy);
        assert_eq!(
            map.neighbors(Point::new(2, 2)),
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(1, 3),
                Point::new(1, 2),
            ]
        );
        assert_eq!(map.neighbors(Point::new(4, 1)).len(), 3);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        for orientation in [Orientation::Flat, Orientation::Pointy] {
            let map = Map::new(6, 6, 32, orientation);
            for p in all_points(&map) {
                let neighbors = map.neighbors(p);
                assert!(neighbors.len() <= 6);
                for n in neighbors {
                    assert!(map.is_valid(n));
                    assert_eq!(map.distance(p, n), 1, "{:?} {} -> {}", orientation, p, n);
                }
            }
        }
    }

    #[test]
    fn test_distance() {
        for orientation in [Orientation::Flat, Orientation::Pointy] {
            let map = Map::new(6, 6, 32, orientation);
            let points = all_points(&map);
            for &a in &points {
                assert_eq!(map.distance(a, a), 0);
                for &b in &points {
                    assert_eq!(map.distance(a, b), map.distance(b, a));
                }
            }
        }

        let map = Map::new(5, 5, 32, Orientation::Flat);
        assert_eq!(map.distance(Point::new(0, 0), Point::new(4, 0)), 4);
        assert_eq!(map.distance(Point::new(0, 0), Point::new(0, 4)), 4);
        assert_eq!(map.distance(Point::new(0, 0), Point::new(5, 0)), -1);
        assert_eq!(map.distance(Point::NONE, Point::new(1, 1)), -1);
    }

    #[test]
    fn test_mutation() {
        let rules = TerrainRules::default();
        let mut map = Map::new(3, 3, 32, Orientation::Flat);
        let p = Point::new(1, 1);

        map.set_terrain(p, TerrainType::Mountain, &rules).unwrap();
        map.set_attrition(p, 3).unwrap();
        map.set_owner(p, Kingdom::Starkeep).unwrap();
        map.place_unit(p, UnitId::new(5, UnitType::Ground, Kingdom::Starkeep)).unwrap();

        assert_eq!(map[p].terrain, TerrainType::Mountain);
        assert_eq!(map[p].stack_limit, 2);
        assert_eq!(map[p].current_stack(), 1);
        assert_eq!(map.attrition(&[p, Point::new(0, 0), Point::new(9, 9)]), 3);

        assert_eq!(map.remove_unit(5).map(|u| u.id), Some(5));
        assert!(map[p].not_occupied());
        assert!(map.remove_unit(5).is_none());

        assert!(matches!(
            map.set_city_value(Point::new(3, 0), 1),
            Err(Error::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut map = Map::new(3, 3, 32, Orientation::Flat);
        let p = Point::new(2, 0);

        assert!(matches!(
            map.set_attrition(p, -7),
            Err(Error::NegativeValue { field: "attrition", value: -7, .. })
        ));
        assert!(matches!(
            map.set_stack_limit(p, -3),
            Err(Error::NegativeValue { field: "stack_limit", .. })
        ));
        assert!(matches!(
            map.set_city_value(p, -1),
            Err(Error::NegativeValue { field: "city_value", .. })
        ));

        assert_eq!(map[p].attrition, 0);
        assert_eq!(map[p].stack_limit, 0);
        assert_eq!(map[p].city_value, 0);
        assert!(map.set_attrition(p, 0).is_ok());
    }
}
