//! Terrain, unit and faction definitions

use serde::{Deserialize, Serialize};

/// Terrain kind of a tile. `None` is impassable to everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainType {
    #[default]
    None,
    City,
    CapitalCity,
    Mountain,
    River,
    Coastal,
    Sea,
    Port,
    HolyPlace,
    Settled,
    MagicHex,
    Battlefield,
}

impl TerrainType {
    /// Every terrain, `None` first
    pub const ALL: [TerrainType; 12] = [
        TerrainType::None,
        TerrainType::City,
        TerrainType::CapitalCity,
        TerrainType::Mountain,
        TerrainType::River,
        TerrainType::Coastal,
        TerrainType::Sea,
        TerrainType::Port,
        TerrainType::HolyPlace,
        TerrainType::Settled,
        TerrainType::MagicHex,
        TerrainType::Battlefield,
    ];

    pub fn is_city(self) -> bool {
        matches!(self, TerrainType::City | TerrainType::CapitalCity)
    }
}

/// Kind of unit (or map marker) occupying a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    #[default]
    None,
    Ground,
    Air,
    Naval,
    Siege,
    Leader,
    Monster,
    Battlefield,
    Weapon,
    MagicalDevice,
    Trench,
    Flame,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kingdom {
    #[default]
    None,
    Necromancer,
    TalPletor,
    Lammarech,
    Loymarech,
    KelaronOiret,
    Ferlarie,
    Stavror,
    TheScythe,
    Starkeep,
    Ahautsieron,
    Zolahaureslor,
    Multiple,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mercenary {
    #[default]
    None,
    CosDolCos,
    LordMontoy,
    Houndmaster,
    Saar,
    SilwerFlagriel,
    FernanConniver,
}

/// Reference to a single unit on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId {
    pub id: i32,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(default)]
    pub kingdom: Kingdom,
    #[serde(default)]
    pub mercenary: Mercenary,
}

impl UnitId {
    pub fn new(id: i32, unit_type: UnitType, kingdom: Kingdom) -> Self {
        Self {
            id,
            unit_type,
            kingdom,
            mercenary: Mercenary::None,
        }
    }

    pub fn mercenary(id: i32, unit_type: UnitType, mercenary: Mercenary) -> Self {
        Self {
            id,
            unit_type,
            kingdom: Kingdom::None,
            mercenary,
        }
    }
}

/// Units sharing one tile, or moving together
pub type Stack = Vec<UnitId>;

/// First kingdom affiliation found in the stack
pub fn first_kingdom(stack: &[UnitId]) -> Kingdom {
    stack
        .iter()
        .map(|unit| unit.kingdom)
        .find(|&k| k != Kingdom::None)
        .unwrap_or(Kingdom::None)
}

pub fn has_type(stack: &[UnitId], unit_type: UnitType) -> bool {
    stack.iter().any(|unit| unit.unit_type == unit_type)
}

/// Unit types present in the stack, in first-seen order
pub fn distinct_types(stack: &[UnitId]) -> Vec<UnitType> {
    let mut types = Vec::new();
    for unit in stack {
        if !types.contains(&unit.unit_type) {
            types.push(unit.unit_type);
        }
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_stack() -> Stack {
        vec![
            UnitId::mercenary(1, UnitType::Ground, Mercenary::Saar),
            UnitId::new(2, UnitType::Air, Kingdom::Stavror),
            UnitId::new(3, UnitType::Ground, Kingdom::Starkeep),
        ]
    }

    #[test]
    fn test_first_kingdom() {
        assert_eq!(first_kingdom(&mixed_stack()), Kingdom::Stavror);
        assert_eq!(first_kingdom(&[]), Kingdom::None);
    }

    #[test]
    fn test_distinct_types() {
        assert_eq!(distinct_types(&mixed_stack()), vec![UnitType::Ground, UnitType::Air]);
        assert!(has_type(&mixed_stack(), UnitType::Air));
        assert!(!has_type(&mixed_stack(), UnitType::Naval));
    }

    #[test]
    fn test_cities() {
        assert!(TerrainType::City.is_city());
        assert!(TerrainType::CapitalCity.is_city());
        assert!(!TerrainType::Port.is_city());
    }

    #[test]
    fn test_unit_json() {
        let unit: UnitId = serde_json::from_str(r#"{"id": 9, "type": "NAVAL", "kingdom": "THE_SCYTHE"}"#).unwrap();
        assert_eq!(unit, UnitId::new(9, UnitType::Naval, Kingdom::TheScythe));
    }
}
