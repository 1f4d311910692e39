//! Ship selector panel model.
//!
//! The panel lists the catalog grouped by faction. Groups expand and
//! collapse independently; initially only the current faction is expanded.

use std::collections::BTreeSet;

use crate::catalog;
use crate::faction::{FactionId, FactionTheme};
use crate::ship::ShipConfig;

/// One faction group in the selector.
#[derive(Debug, Clone)]
pub struct FactionGroup {
    pub theme: &'static FactionTheme,
    pub ships: Vec<&'static ShipConfig>,
}

/// Open/expanded state of the selector flyout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorState {
    open: bool,
    expanded: BTreeSet<FactionId>,
}

impl SelectorState {
    /// A closed selector with `current` expanded.
    #[must_use]
    pub fn new(current: FactionId) -> Self {
        Self {
            open: false,
            expanded: BTreeSet::from([current]),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn is_expanded(&self, faction: FactionId) -> bool {
        self.expanded.contains(&faction)
    }

    /// Flip one group without touching the others.
    pub fn toggle(&mut self, faction: FactionId) {
        if !self.expanded.remove(&faction) {
            self.expanded.insert(faction);
        }
    }

    /// Faction groups in catalog order.
    #[must_use]
    pub fn groups() -> Vec<FactionGroup> {
        catalog::all_factions()
            .iter()
            .map(|theme| FactionGroup {
                theme,
                ships: catalog::ships_by_faction(theme.id.as_str()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipId;

    #[test]
    fn test_initial_state() {
        let state = SelectorState::new(FactionId::Caldari);
        assert!(!state.is_open());
        assert!(state.is_expanded(FactionId::Caldari));
        assert!(!state.is_expanded(FactionId::Amarr));
    }

    #[test]
    fn test_groups_toggle_independently() {
        let mut state = SelectorState::new(FactionId::Amarr);
        state.toggle(FactionId::Gallente);
        assert!(state.is_expanded(FactionId::Amarr));
        assert!(state.is_expanded(FactionId::Gallente));

        state.toggle(FactionId::Amarr);
        assert!(!state.is_expanded(FactionId::Amarr));
        assert!(state.is_expanded(FactionId::Gallente));
    }

    #[test]
    fn test_close_keeps_expanded_groups() {
        let mut state = SelectorState::new(FactionId::Amarr);
        state.open();
        state.toggle(FactionId::Caldari);
        state.close();
        assert!(!state.is_open());
        assert!(state.is_expanded(FactionId::Amarr));
        assert!(state.is_expanded(FactionId::Caldari));
    }

    #[test]
    fn test_groups_cover_catalog() {
        let groups = SelectorState::groups();
        assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(|g| g.ships.len()).sum();
        assert_eq!(total, catalog::all_ships().len());
        assert_eq!(groups[1].theme.id, FactionId::Caldari);
        assert_eq!(groups[1].ships[0].id, ShipId::Naga);
    }
}
