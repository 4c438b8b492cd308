//! Hex geometry: cube coordinates, orientation and offset conversion

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::point::Point;

/// Horizontal spacing factor between hex centers (√3)
pub const SCALE: f64 = 1.732_050_807_568_877_2;

/// Vertical spacing factor between hex centers
pub const OFFSET: f64 = 3.0 / 2.0;

/// Hexagon layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Flat top; columns shift (odd-q style parity on x)
    #[default]
    Flat,
    /// Pointy top; rows shift (parity on y)
    Pointy,
}

impl Orientation {
    pub fn is_flat(self) -> bool {
        self == Orientation::Flat
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FLAT" => Ok(Orientation::Flat),
            "POINTY" => Ok(Orientation::Pointy),
            _ => Err(Error::UnknownOrientation(s.to_string())),
        }
    }
}

/// Cube hex coordinates, `q + r + s == 0` when valid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Build from axial (q, r), deriving s
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -(q + r) }
    }

    pub fn sum(&self) -> i32 {
        self.q + self.r + self.s
    }

    pub fn is_valid(&self) -> bool {
        self.sum() == 0
    }

    /// Hex distance between two cubes
    pub fn distance(&self, other: Cube) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s - other.s).abs();
        (dq + dr + ds) / 2
    }
}

// ============================================================================
// OFFSET <-> CUBE
// ============================================================================

/// Convert offset coordinates to cube coordinates.
///
/// Parity is taken from x for flat maps and y for pointy maps; the
/// neighbor tables below assume exactly this convention.
pub fn offset_to_cube(point: Point, orientation: Orientation) -> Cube {
    let flat = orientation.is_flat();
    let parity = (if flat { point.x } else { point.y }) & 1;

    let cube = if flat {
        Cube::axial(point.x, point.y - (point.x - parity) / 2)
    } else {
        Cube::axial(point.x - (point.y - parity) / 2, point.y)
    };

    debug_assert!(cube.is_valid());
    cube
}

/// Inverse of [`offset_to_cube`]
pub fn cube_to_offset(cube: Cube, orientation: Orientation) -> Point {
    if orientation.is_flat() {
        let parity = cube.q & 1;
        Point::new(cube.q, cube.r + (cube.q - parity) / 2)
    } else {
        let parity = cube.r & 1;
        Point::new(cube.q + (cube.r - parity) / 2, cube.r)
    }
}

// ============================================================================
// NEIGHBOR TABLES
// ============================================================================

const FLAT_NEIGHBORS: [Point; 6] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

const FLAT_NEIGHBORS_ODD: [Point; 6] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
];

const POINTY_NEIGHBORS: [Point; 6] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
];

const POINTY_NEIGHBORS_ODD: [Point; 6] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Offset deltas to the six neighbors of a cell.
///
/// `odd` is the parity of x (flat) or y (pointy) of the cell. The order
/// is fixed: search tie-breaking depends on it.
pub fn neighbor_offsets(orientation: Orientation, odd: bool) -> &'static [Point; 6] {
    match (orientation, odd) {
        (Orientation::Flat, false) => &FLAT_NEIGHBORS,
        (Orientation::Flat, true) => &FLAT_NEIGHBORS_ODD,
        (Orientation::Pointy, false) => &POINTY_NEIGHBORS,
        (Orientation::Pointy, true) => &POINTY_NEIGHBORS_ODD,
    }
}

// ============================================================================
// CORNERS
// ============================================================================

/// Pixel center of the cell at `point` for tiles of radius `size`.
///
/// Shifted cells (odd x for flat, odd y for pointy) sit half a row lower
/// or half a column further right. Components truncate toward zero.
pub fn center(point: Point, size: i32, orientation: Orientation) -> Point {
    let size = size as f64;

    if orientation.is_flat() {
        let shift = SCALE / 2.0 * ((point.x & 1) + 1) as f64;
        Point::new(
            (point.x as f64 * OFFSET * size) as i32,
            ((SCALE * point.y as f64 + shift) * size) as i32,
        )
    } else {
        let shift = SCALE / 2.0 * ((point.y & 1) + 1) as f64;
        Point::new(
            ((SCALE * point.x as f64 + shift) * size) as i32,
            (point.y as f64 * OFFSET * size) as i32,
        )
    }
}

/// Pixel position of hexagon corner `corner` (0..6)
pub fn corner(center: Point, size: i32, corner: usize, orientation: Orientation) -> Point {
    let deg = 60.0 * corner as f64 - if orientation.is_flat() { 0.0 } else { 30.0 };
    let rad = deg.to_radians();
    let size = size as f64;

    Point::new(
        center.x + (size * rad.cos()).round() as i32,
        center.y + (size * rad.sin()).round() as i32,
    )
}

/// All six corners in increasing-angle order
pub fn vertices(center: Point, size: i32, orientation: Orientation) -> [Point; 6] {
    std::array::from_fn(|i| corner(center, size, i, orientation))
}
