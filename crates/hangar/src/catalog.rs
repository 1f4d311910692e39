//! Static ship and faction catalog.
//!
//! The tables are built at compile time and have no mutation path. Every
//! lookup is total: an unknown id yields the default entry.

use crate::color::ThemeColor;
use crate::faction::{FactionId, FactionTheme};
use crate::ship::{ShipConfig, ShipId, ShipStats};

/// Ship shown when the launch parameters name none (or an unknown one).
pub const DEFAULT_SHIP: ShipId = ShipId::Imperial;
/// Faction used when the launch parameters name none (or an unknown one).
pub const DEFAULT_FACTION: FactionId = FactionId::Amarr;

/// Default ship id as it appears in URLs.
pub const DEFAULT_SHIP_ID: &str = DEFAULT_SHIP.as_str();
/// Default faction id as it appears in URLs.
pub const DEFAULT_FACTION_ID: &str = DEFAULT_FACTION.as_str();

/// Base URL of the model CDN bucket.
pub const MODEL_CDN_BASE_URL: &str = "https://pub-ef918f4135654b1caa2833736c639ae1.r2.dev/models";
/// Directory of the optimized models below the viewer's asset root.
pub const MODEL_ASSET_DIR: &str = "models";

const DEFAULT_SCALE: Option<f32> = Some(1.3);

static FACTIONS: [FactionTheme; 3] = [
    FactionTheme {
        id: FactionId::Amarr,
        name: "艾玛帝国",
        english_name: "Amarr Empire",
        primary: ThemeColor::rgb(0xd4, 0xaf, 0x37),
        secondary: ThemeColor::rgb(0x8b, 0x69, 0x14),
        glow: ThemeColor::rgba(212, 175, 55, 204),
        background: ThemeColor::rgb(0x1a, 0x10, 0x00),
    },
    FactionTheme {
        id: FactionId::Caldari,
        name: "加达里合众国",
        english_name: "Caldari State",
        primary: ThemeColor::rgb(0x44, 0xff, 0xdd),
        secondary: ThemeColor::rgb(0x1a, 0x7a, 0x6a),
        glow: ThemeColor::rgba(68, 255, 221, 204),
        background: ThemeColor::rgb(0x00, 0x1a, 0x18),
    },
    FactionTheme {
        id: FactionId::Gallente,
        name: "盖伦特联邦",
        english_name: "Gallente Federation",
        primary: ThemeColor::rgb(0xa8, 0x55, 0xf7),
        secondary: ThemeColor::rgb(0x6b, 0x21, 0xa8),
        glow: ThemeColor::rgba(168, 85, 247, 204),
        background: ThemeColor::rgb(0x0f, 0x00, 0x1a),
    },
];

static SHIPS: [ShipConfig; 9] = [
    // Amarr Empire.
    ShipConfig {
        id: ShipId::Imperial,
        name: "Imperial Issue",
        localized_name: "帝国号",
        class: "Battleship",
        manufacturer: "Amarr Empire",
        faction: FactionId::Amarr,
        model_file: "ship_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Imperial Issue",
            class: "Battleship",
            manufacturer: "Amarr Empire",
            mass: "98,500,000 kg",
            shield: 6800,
            armor: 8500,
            structure: 7200,
            capacitor: 5800,
            cpu: "645",
            power_grid: "18500",
            turret_slots: 8,
            launcher_slots: 0,
        },
    },
    ShipConfig {
        id: ShipId::Paladin,
        name: "Paladin",
        localized_name: "先锋者级",
        class: "Marauder",
        manufacturer: "Amarr Empire",
        faction: FactionId::Amarr,
        model_file: "paladin_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Paladin",
            class: "Marauder",
            manufacturer: "Amarr Empire",
            mass: "115,000,000 kg",
            shield: 5200,
            armor: 9800,
            structure: 8500,
            capacitor: 6500,
            cpu: "750",
            power_grid: "22000",
            turret_slots: 4,
            launcher_slots: 0,
        },
    },
    ShipConfig {
        id: ShipId::Avatar,
        name: "Avatar",
        localized_name: "神使级泰坦",
        class: "Titan",
        manufacturer: "Amarr Empire",
        faction: FactionId::Amarr,
        model_file: "avatar_optimized.glb",
        scale: Some(1.9),
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Avatar",
            class: "Titan",
            manufacturer: "Amarr Empire",
            mass: "2,400,000,000 kg",
            shield: 250_000,
            armor: 400_000,
            structure: 350_000,
            capacitor: 125_000,
            cpu: "1250",
            power_grid: "750000",
            turret_slots: 6,
            launcher_slots: 0,
        },
    },
    // Caldari State.
    ShipConfig {
        id: ShipId::Naga,
        name: "Naga",
        localized_name: "娜迦级",
        class: "Battlecruiser",
        manufacturer: "Caldari State",
        faction: FactionId::Caldari,
        model_file: "naga_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Naga",
            class: "Battlecruiser",
            manufacturer: "Caldari State",
            mass: "18,500,000 kg",
            shield: 4200,
            armor: 2800,
            structure: 3500,
            capacitor: 2200,
            cpu: "435",
            power_grid: "9200",
            turret_slots: 8,
            launcher_slots: 0,
        },
    },
    ShipConfig {
        id: ShipId::Cerberus,
        name: "Cerberus",
        localized_name: "希尔博拉斯",
        class: "Heavy Assault Cruiser",
        manufacturer: "Caldari State",
        faction: FactionId::Caldari,
        model_file: "cerberus_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Cerberus",
            class: "Heavy Assault Cruiser",
            manufacturer: "Caldari State",
            mass: "12,850,000 kg",
            shield: 3800,
            armor: 2200,
            structure: 2900,
            capacitor: 1950,
            cpu: "385",
            power_grid: "7500",
            turret_slots: 0,
            launcher_slots: 5,
        },
    },
    ShipConfig {
        id: ShipId::Corax,
        name: "Corax",
        localized_name: "渡鸦级",
        class: "Destroyer",
        manufacturer: "Caldari State",
        faction: FactionId::Caldari,
        model_file: "corax_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Corax",
            class: "Destroyer",
            manufacturer: "Caldari State",
            mass: "1,480,000 kg",
            shield: 950,
            armor: 550,
            structure: 680,
            capacitor: 580,
            cpu: "195",
            power_grid: "48",
            turret_slots: 0,
            launcher_slots: 7,
        },
    },
    // Gallente Federation.
    ShipConfig {
        id: ShipId::Tristan,
        name: "Tristan",
        localized_name: "特里斯坦",
        class: "Frigate",
        manufacturer: "Gallente Federation",
        faction: FactionId::Gallente,
        model_file: "tristan_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Tristan",
            class: "Frigate",
            manufacturer: "Gallente Federation",
            mass: "1,180,000 kg",
            shield: 420,
            armor: 580,
            structure: 520,
            capacitor: 380,
            cpu: "160",
            power_grid: "38",
            turret_slots: 3,
            launcher_slots: 2,
        },
    },
    ShipConfig {
        id: ShipId::Thalia,
        name: "Thalia",
        localized_name: "塔利亚",
        class: "Logistics Frigate",
        manufacturer: "Gallente Federation",
        faction: FactionId::Gallente,
        model_file: "thalia_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Thalia",
            class: "Logistics Frigate",
            manufacturer: "Gallente Federation",
            mass: "1,350,000 kg",
            shield: 580,
            armor: 680,
            structure: 550,
            capacitor: 950,
            cpu: "185",
            power_grid: "42",
            turret_slots: 2,
            launcher_slots: 0,
        },
    },
    ShipConfig {
        id: ShipId::Atron,
        name: "Atron",
        localized_name: "阿特龙级",
        class: "Interceptor",
        manufacturer: "Gallente Federation",
        faction: FactionId::Gallente,
        model_file: "atron_optimized.glb",
        scale: DEFAULT_SCALE,
        position: None,
        rotation: None,
        stats: ShipStats {
            name: "Atron",
            class: "Interceptor",
            manufacturer: "Gallente Federation",
            mass: "980,000 kg",
            shield: 380,
            armor: 520,
            structure: 480,
            capacitor: 350,
            cpu: "150",
            power_grid: "35",
            turret_slots: 3,
            launcher_slots: 0,
        },
    },
];

/// Look up a ship by id, falling back to the default ship.
#[must_use]
pub fn ship(id: &str) -> &'static ShipConfig {
    ShipId::resolve(id).config()
}

/// Look up a faction theme by id, falling back to the default faction.
#[must_use]
pub fn faction_theme(id: &str) -> &'static FactionTheme {
    FactionId::resolve(id).theme()
}

/// All ships belonging to a faction id, in declaration order.
///
/// An unknown faction id yields an empty list (no fallback here).
#[must_use]
pub fn ships_by_faction(faction_id: &str) -> Vec<&'static ShipConfig> {
    SHIPS
        .iter()
        .filter(|ship| ship.faction.as_str() == faction_id)
        .collect()
}

/// All ships, in declaration order.
#[must_use]
pub fn all_ships() -> &'static [ShipConfig] {
    &SHIPS
}

/// All ship ids, in declaration order.
#[must_use]
pub fn all_ship_ids() -> Vec<&'static str> {
    SHIPS.iter().map(|ship| ship.id.as_str()).collect()
}

/// All faction themes, in declaration order.
#[must_use]
pub fn all_factions() -> &'static [FactionTheme] {
    &FACTIONS
}

/// All faction ids, in declaration order.
#[must_use]
pub fn all_faction_ids() -> Vec<&'static str> {
    FACTIONS.iter().map(|theme| theme.id.as_str()).collect()
}

pub(crate) fn config_of(id: ShipId) -> &'static ShipConfig {
    // `SHIPS` is declared in `ShipId::ALL` order; the search keeps this
    // correct even if the two drift apart.
    SHIPS
        .iter()
        .find(|ship| ship.id == id)
        .unwrap_or(&SHIPS[0])
}

pub(crate) fn theme_of(id: FactionId) -> &'static FactionTheme {
    FACTIONS
        .iter()
        .find(|theme| theme.id == id)
        .unwrap_or(&FACTIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ModelSource;

    #[test]
    fn test_unknown_ship_falls_back_to_default() {
        let config = ship("nonexistent");
        assert_eq!(config.id, ShipId::Imperial);
        assert_eq!(config.name, "Imperial Issue");
        assert_eq!(ship("").id, DEFAULT_SHIP);
        // Lookup is case-sensitive, like the URL keys.
        assert_eq!(ship("Naga").id, DEFAULT_SHIP);
    }

    #[test]
    fn test_unknown_faction_falls_back_to_default() {
        assert_eq!(faction_theme("nonexistent").id, FactionId::Amarr);
        assert_eq!(faction_theme("caldari").id, FactionId::Caldari);
    }

    #[test]
    fn test_ships_by_faction() {
        let caldari: Vec<_> = ships_by_faction("caldari").iter().map(|s| s.id).collect();
        assert_eq!(caldari, vec![ShipId::Naga, ShipId::Cerberus, ShipId::Corax]);
        assert!(ships_by_faction("jove").is_empty());
    }

    #[test]
    fn test_every_ship_resolves_its_faction() {
        for config in all_ships() {
            assert_eq!(config.theme().id, config.faction);
            assert_eq!(config.stats.name, config.name);
            assert_eq!(config.stats.class, config.class);
        }
    }

    #[test]
    fn test_every_faction_has_a_ship() {
        for faction in FactionId::ALL {
            assert!(
                !ships_by_faction(faction.as_str()).is_empty(),
                "{faction} has no ships"
            );
        }
    }

    #[test]
    fn test_tables_follow_enum_order() {
        let ids: Vec<_> = all_ships().iter().map(|s| s.id).collect();
        assert_eq!(ids, ShipId::ALL.to_vec());
        let factions: Vec<_> = all_factions().iter().map(|t| t.id).collect();
        assert_eq!(factions, FactionId::ALL.to_vec());
        assert_eq!(all_ship_ids().len(), 9);
        assert_eq!(all_faction_ids(), vec!["amarr", "caldari", "gallente"]);
    }

    #[test]
    fn test_model_paths() {
        assert_eq!(
            ShipId::Imperial.config().model_asset_path(),
            "models/ship_optimized.glb"
        );
        assert_eq!(
            ShipId::Naga.config().model_url(),
            format!("{MODEL_CDN_BASE_URL}/naga_optimized.glb")
        );
        assert!((ShipId::Avatar.config().effective_scale() - 1.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_model_source_paths() {
        let naga = ShipId::Naga.config();
        assert_eq!(ModelSource::default(), ModelSource::Cdn);
        assert_eq!(ModelSource::Cdn.model_path(naga), naga.model_url());
        assert_eq!(
            ModelSource::Local.model_path(naga),
            "models/naga_optimized.glb"
        );
        assert_eq!("LOCAL".parse::<ModelSource>(), Ok(ModelSource::Local));
        assert!("s3".parse::<ModelSource>().is_err());
    }
}
