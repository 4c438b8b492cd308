//! Seeded random maps for benchmarks and stress tests

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::hex::Orientation;
use crate::map::Map;
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::units::TerrainType;

/// Land terrains a generated tile may take
const LAND: [TerrainType; 7] = [
    TerrainType::Settled,
    TerrainType::Mountain,
    TerrainType::River,
    TerrainType::HolyPlace,
    TerrainType::MagicHex,
    TerrainType::Battlefield,
    TerrainType::City,
];

/// Random map parameters
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Fraction of tiles left impassable
    pub blocked_ratio: f64,
    /// Fraction of tiles that become sea
    pub water_ratio: f64,
    /// Attrition is drawn from 0..=max_attrition
    pub max_attrition: i32,
    /// City value is drawn from 1..=max_city_value for city tiles
    pub max_city_value: i32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            blocked_ratio: 0.15,
            water_ratio: 0.1,
            max_attrition: 3,
            max_city_value: 3,
        }
    }
}

impl GenerateConfig {
    pub fn with_blocked_ratio(mut self, ratio: f64) -> Self {
        self.blocked_ratio = ratio;
        self
    }

    pub fn with_water_ratio(mut self, ratio: f64) -> Self {
        self.water_ratio = ratio;
        self
    }

    pub fn with_max_attrition(mut self, max: i32) -> Self {
        self.max_attrition = max;
        self
    }
}

/// Build a random map. The same seed always gives the same map.
pub fn random_map(
    width: i32,
    height: i32,
    size: i32,
    orientation: Orientation,
    rules: &TerrainRules,
    config: &GenerateConfig,
    seed: u64,
) -> Result<Map> {
    let mut map = Map::try_new(width, height, size, orientation)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for y in 0..height {
        for x in 0..width {
            let point = Point::new(x, y);
            let roll: f64 = rng.gen();

            let terrain = if roll < config.blocked_ratio {
                TerrainType::None
            } else if roll < config.blocked_ratio + config.water_ratio {
                TerrainType::Sea
            } else {
                LAND[rng.gen_range(0..LAND.len())]
            };

            map.set_terrain(point, terrain, rules)?;
            map.set_attrition(point, rng.gen_range(0..=config.max_attrition.max(0)))?;
            if terrain.is_city() {
                map.set_city_value(point, rng.gen_range(1..=config.max_city_value.max(1)))?;
            }
        }
    }

    tracing::debug!("Generated {}x{} map from seed {}", width, height, seed);
    Ok(map)
}
