//! Faction identifiers and colour themes.

use std::fmt;

use serde::Serialize;

use crate::color::ThemeColor;

/// A faction known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FactionId {
    Amarr,
    Caldari,
    Gallente,
}

impl FactionId {
    /// Every faction, in catalog order.
    pub const ALL: [FactionId; 3] = [FactionId::Amarr, FactionId::Caldari, FactionId::Gallente];

    /// The identifier used in URLs and the catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FactionId::Amarr => "amarr",
            FactionId::Caldari => "caldari",
            FactionId::Gallente => "gallente",
        }
    }

    /// Parse an identifier. Matching is exact, like a catalog key.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|faction| faction.as_str() == id)
    }

    /// Parse an identifier, falling back to the default faction.
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        match Self::parse(id) {
            Some(faction) => faction,
            None => {
                tracing::debug!("Unknown faction id '{id}', using default");
                Self::default()
            }
        }
    }

    /// The theme for this faction.
    #[must_use]
    pub fn theme(self) -> &'static FactionTheme {
        crate::catalog::theme_of(self)
    }
}

impl Default for FactionId {
    fn default() -> Self {
        crate::catalog::DEFAULT_FACTION
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A faction's visual identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionTheme {
    pub id: FactionId,
    /// Display name (localized).
    pub name: &'static str,
    /// Display name in English.
    pub english_name: &'static str,
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub glow: ThemeColor,
    pub background: ThemeColor,
}
