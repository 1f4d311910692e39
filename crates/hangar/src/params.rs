//! Launch parameter resolution.
//!
//! The viewer reads two query parameters once at startup: `ship` and
//! `faction`. Absent or empty parameters take the catalog defaults. Unknown
//! values are kept verbatim here and only resolved by the catalog lookup, so
//! a typo never fails the page.

use std::borrow::Cow;

use crate::catalog::{self, DEFAULT_FACTION_ID, DEFAULT_SHIP_ID};
use crate::faction::FactionTheme;
use crate::ship::{ShipConfig, ShipId};

/// Query parameter naming the ship.
pub const SHIP_PARAM: &str = "ship";
/// Query parameter naming the faction.
pub const FACTION_PARAM: &str = "faction";

/// The identifiers requested by the page's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipParams {
    pub ship_id: String,
    pub faction_id: String,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            ship_id: DEFAULT_SHIP_ID.to_string(),
            faction_id: DEFAULT_FACTION_ID.to_string(),
        }
    }
}

impl ShipParams {
    /// Build parameters from explicit optional values.
    ///
    /// `None` and empty strings take the defaults.
    #[must_use]
    pub fn new(ship_id: Option<&str>, faction_id: Option<&str>) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            ship_id: pick(ship_id, DEFAULT_SHIP_ID),
            faction_id: pick(faction_id, DEFAULT_FACTION_ID),
        }
    }

    /// Parse a URL query component, with or without the leading `?`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let ship = query_value(query, SHIP_PARAM);
        let faction = query_value(query, FACTION_PARAM);
        Self::new(ship.as_deref(), faction.as_deref())
    }

    /// Resolve the identifiers against the catalog.
    #[must_use]
    pub fn resolve(&self) -> Selection {
        Selection {
            ship: catalog::ship(&self.ship_id),
            theme: catalog::faction_theme(&self.faction_id),
        }
    }
}

/// The catalog entries a set of parameters resolved to.
///
/// `ship` drives the model and HUD; its own faction is authoritative for
/// its rendering. `theme` is the standalone theme named by the `faction`
/// parameter and is not reconciled with the ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub ship: &'static ShipConfig,
    pub theme: &'static FactionTheme,
}

impl Selection {
    /// The selection for a ship, themed by the ship's own faction.
    #[must_use]
    pub fn of_ship(ship: ShipId) -> Self {
        let ship = ship.config();
        Self {
            ship,
            theme: ship.theme(),
        }
    }

    /// Parameters that select this ship again after a reload.
    #[must_use]
    pub fn to_params(&self) -> ShipParams {
        ShipParams {
            ship_id: self.ship.id.as_str().to_string(),
            faction_id: self.ship.faction.as_str().to_string(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        ShipParams::default().resolve()
    }
}

/// Return the first value of `key` in a query string.
#[must_use]
pub fn query_value(query: &str, key: &str) -> Option<String> {
    pairs(query)
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.into_owned())
}

/// Rewrite a query string so it selects `ship`.
///
/// Sets `ship` and `faction` (the ship's own faction), replacing existing
/// values in place and keeping every unrelated parameter. The result starts
/// with `?`.
#[must_use]
pub fn selection_query(query: &str, ship: &ShipConfig) -> String {
    let mut entries: Vec<(String, String)> = Vec::new();
    let updates = [
        (SHIP_PARAM, ship.id.as_str()),
        (FACTION_PARAM, ship.faction.as_str()),
    ];

    for (key, value) in pairs(query) {
        if let Some((_, new_value)) = updates.iter().find(|(k, _)| *k == key) {
            // Only the first occurrence survives, like `URLSearchParams::set`.
            if !entries.iter().any(|(k, _)| k == &key) {
                entries.push((key.into_owned(), (*new_value).to_string()));
            }
        } else {
            entries.push((key.into_owned(), value.into_owned()));
        }
    }
    for (key, value) in updates {
        if !entries.iter().any(|(k, _)| k == key) {
            entries.push((key.to_string(), value.to_string()));
        }
    }

    let encoded: Vec<String> = entries
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("?{}", encoded.join("&"))
}

/// Iterate over decoded `key=value` pairs.
fn pairs(query: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
}

/// Decode a form-encoded component, keeping it verbatim if it is not UTF-8.
fn decode(component: &str) -> Cow<'_, str> {
    if component.contains('+') {
        let spaced = component.replace('+', " ");
        let decoded = urlencoding::decode(&spaced).map_or_else(
            |_| spaced.clone(),
            std::borrow::Cow::into_owned,
        );
        return Cow::Owned(decoded);
    }
    urlencoding::decode(component).unwrap_or(Cow::Borrowed(component))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faction::FactionId;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(ShipParams::from_query(""), ShipParams::default());
        assert_eq!(ShipParams::from_query("?"), ShipParams::default());
        let params = ShipParams::from_query("?other=1");
        assert_eq!(params.ship_id, "imperial");
        assert_eq!(params.faction_id, "amarr");
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let params = ShipParams::from_query("?ship=&faction=caldari");
        assert_eq!(params.ship_id, "imperial");
        assert_eq!(params.faction_id, "caldari");
    }

    #[test]
    fn test_unknown_values_are_kept_verbatim() {
        let params = ShipParams::from_query("ship=nonexistent");
        assert_eq!(params.ship_id, "nonexistent");
        assert_eq!(params.resolve().ship.id, ShipId::Imperial);
    }

    #[test]
    fn test_first_occurrence_wins_and_values_decode() {
        let params = ShipParams::from_query("?ship=naga&ship=corax&faction=cal%64ari");
        assert_eq!(params.ship_id, "naga");
        assert_eq!(params.faction_id, "caldari");
        assert_eq!(query_value("?q=a+b%21", "q").as_deref(), Some("a b!"));
    }

    #[test]
    fn test_mismatched_faction_is_not_reconciled() {
        let selection = ShipParams::from_query("?ship=naga&faction=gallente").resolve();
        assert_eq!(selection.ship.faction, FactionId::Caldari);
        assert_eq!(selection.theme.id, FactionId::Gallente);
    }

    #[test]
    fn test_selection_query_replaces_and_preserves() {
        let corax = ShipId::Corax.config();
        assert_eq!(selection_query("", corax), "?ship=corax&faction=caldari");
        assert_eq!(
            selection_query("?embed=1&ship=naga&faction=amarr", corax),
            "?embed=1&ship=corax&faction=caldari"
        );
        assert_eq!(
            selection_query("?faction=amarr&ship=naga&ship=avatar", corax),
            "?faction=caldari&ship=corax"
        );
    }

    #[test]
    fn test_selection_round_trip() {
        let thalia = ShipId::Thalia.config();
        let query = selection_query("?x=y", thalia);
        let selection = ShipParams::from_query(&query).resolve();
        assert_eq!(selection, Selection::of_ship(ShipId::Thalia));
        assert_eq!(selection.to_params().faction_id, "gallente");
    }
}
