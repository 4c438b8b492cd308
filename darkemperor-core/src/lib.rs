//! DarkEmperor Core - hex map model and movement engine
//!
//! This crate provides the rules-side core of the DarkEmperor wargame:
//! - Hex geometry (offset and cube coordinates, flat and pointy layouts)
//! - Map storage with neighbor and distance queries
//! - Terrain passability and stacking capacity
//! - A* pathfinding with closest-approach fallback
//! - Territory control and production
//! - Scenario loading and random map generation

pub mod error;
pub mod point;
pub mod hex;
pub mod units;
pub mod rules;
pub mod tile;
pub mod map;
pub mod movement;
pub mod pathfind;
pub mod game;
pub mod scenario;
pub mod generate;

// Re-exports for convenient access
pub use error::{Error, Result};
pub use point::Point;
pub use hex::{center, corner, vertices, offset_to_cube, cube_to_offset, Cube, Orientation};
pub use units::{Kingdom, Mercenary, Stack, TerrainType, UnitId, UnitType};
pub use rules::TerrainRules;
pub use tile::Tile;
pub use map::Map;
pub use movement::{is_movable, Features};
pub use pathfind::{find_path, Path, Pathfinder};
pub use game::{is_controlled, production};
pub use scenario::{test_pattern, Scenario, TileSpec};
pub use generate::{random_map, GenerateConfig};
