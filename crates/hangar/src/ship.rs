//! Ship identifiers, configuration and statistics.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::Serialize;

use crate::faction::{FactionId, FactionTheme};

/// A ship known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipId {
    Imperial,
    Paladin,
    Avatar,
    Naga,
    Cerberus,
    Corax,
    Tristan,
    Thalia,
    Atron,
}

impl ShipId {
    /// Every ship, in catalog declaration order.
    pub const ALL: [ShipId; 9] = [
        ShipId::Imperial,
        ShipId::Paladin,
        ShipId::Avatar,
        ShipId::Naga,
        ShipId::Cerberus,
        ShipId::Corax,
        ShipId::Tristan,
        ShipId::Thalia,
        ShipId::Atron,
    ];

    /// The identifier used in URLs, asset names and the catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ShipId::Imperial => "imperial",
            ShipId::Paladin => "paladin",
            ShipId::Avatar => "avatar",
            ShipId::Naga => "naga",
            ShipId::Cerberus => "cerberus",
            ShipId::Corax => "corax",
            ShipId::Tristan => "tristan",
            ShipId::Thalia => "thalia",
            ShipId::Atron => "atron",
        }
    }

    /// Parse an identifier. Matching is exact, like a catalog key.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ship| ship.as_str() == id)
    }

    /// Parse an identifier, falling back to the default ship.
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        match Self::parse(id) {
            Some(ship) => ship,
            None => {
                tracing::debug!("Unknown ship id '{id}', using default");
                Self::default()
            }
        }
    }

    /// The catalog entry for this ship.
    #[must_use]
    pub fn config(self) -> &'static ShipConfig {
        crate::catalog::config_of(self)
    }
}

impl Default for ShipId {
    fn default() -> Self {
        crate::catalog::DEFAULT_SHIP
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics shown in the HUD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipStats {
    pub name: &'static str,
    pub class: &'static str,
    pub manufacturer: &'static str,
    /// Pre-formatted mass, e.g. `"98,500,000 kg"`.
    pub mass: &'static str,
    pub shield: u32,
    pub armor: u32,
    pub structure: u32,
    pub capacitor: u32,
    pub cpu: &'static str,
    pub power_grid: &'static str,
    pub turret_slots: u8,
    pub launcher_slots: u8,
}

impl ShipStats {
    /// The four resource pools as `(label, value)` pairs, in display order.
    #[must_use]
    pub fn pools(&self) -> [(&'static str, u32); 4] {
        [
            ("Shield", self.shield),
            ("Armor", self.armor),
            ("Structure", self.structure),
            ("Capacitor", self.capacitor),
        ]
    }

    /// The largest resource pool, used to scale HUD bars.
    #[must_use]
    pub fn max_pool(&self) -> u32 {
        self.pools()
            .iter()
            .map(|(_, value)| *value)
            .max()
            .unwrap_or(0)
    }
}

/// One selectable ship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipConfig {
    pub id: ShipId,
    pub name: &'static str,
    /// Localized display name.
    pub localized_name: &'static str,
    pub class: &'static str,
    pub manufacturer: &'static str,
    pub faction: FactionId,
    /// File name of the optimized model, relative to the model root.
    pub model_file: &'static str,
    /// Uniform model scale.
    pub scale: Option<f32>,
    /// Model placement offset.
    #[serde(skip)]
    pub position: Option<Vec3>,
    /// Model placement rotation as XYZ Euler angles in radians.
    #[serde(skip)]
    pub rotation: Option<Vec3>,
    pub stats: ShipStats,
}

impl ShipConfig {
    /// The theme of the faction this ship belongs to.
    #[must_use]
    pub fn theme(&self) -> &'static FactionTheme {
        self.faction.theme()
    }

    /// Path of the model relative to an asset root, e.g. `models/naga_optimized.glb`.
    #[must_use]
    pub fn model_asset_path(&self) -> String {
        format!("{}/{}", crate::catalog::MODEL_ASSET_DIR, self.model_file)
    }

    /// Absolute URL of the model on the CDN.
    #[must_use]
    pub fn model_url(&self) -> String {
        format!("{}/{}", crate::catalog::MODEL_CDN_BASE_URL, self.model_file)
    }

    /// Effective uniform scale (1.0 when unset).
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }
}

/// Where the viewer fetches model files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSource {
    /// The public CDN bucket.
    #[default]
    Cdn,
    /// The viewer's own asset directory, as filled by the asset pipeline.
    Local,
}

impl ModelSource {
    /// Path or URL the asset server should load for `ship`.
    #[must_use]
    pub fn model_path(self, ship: &ShipConfig) -> String {
        match self {
            ModelSource::Cdn => ship.model_url(),
            ModelSource::Local => ship.model_asset_path(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ModelSource::Cdn => "cdn",
            ModelSource::Local => "local",
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no model source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModelSource(pub String);

impl fmt::Display for UnknownModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown model source '{}', expected cdn or local", self.0)
    }
}

impl std::error::Error for UnknownModelSource {}

impl FromStr for ModelSource {
    type Err = UnknownModelSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [ModelSource::Cdn, ModelSource::Local]
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownModelSource(s.to_string()))
    }
}
