//! End-to-end checks of the launch flow: query string to catalog entries to
//! view state.

use hangar::params::selection_query;
use hangar::{FactionId, ShipId, ShipParams, ViewIntent, ViewMode, ViewState, catalog};

#[test]
fn test_url_round_trip_selects_cerberus() {
    let params = ShipParams::from_query("?ship=cerberus&faction=caldari");
    assert_eq!(params.ship_id, "cerberus");
    assert_eq!(params.faction_id, "caldari");

    let selection = params.resolve();
    assert_eq!(selection.ship.id, ShipId::Cerberus);
    assert_eq!(selection.ship.name, "Cerberus");
    assert_eq!(selection.ship.stats.launcher_slots, 5);
    assert_eq!(selection.theme.id, FactionId::Caldari);
    assert_eq!(selection.ship.theme().id, FactionId::Caldari);
}

#[test]
fn test_unknown_ids_fall_back() {
    let selection = ShipParams::from_query("?ship=nonexistent&faction=nonexistent").resolve();
    assert_eq!(selection.ship.id, ShipId::Imperial);
    assert_eq!(selection.theme.id, FactionId::Amarr);
}

#[test]
fn test_caldari_ships_in_declaration_order() {
    let names: Vec<_> = catalog::ships_by_faction("caldari")
        .iter()
        .map(|ship| ship.id.as_str())
        .collect();
    assert_eq!(names, ["naga", "cerberus", "corax"]);
    assert!(catalog::ships_by_faction("").is_empty());
}

#[test]
fn test_selector_reload_reaches_same_state() {
    // Before reload: default page, user switches mode then picks a ship.
    let mut state = ViewState::new(ShipParams::from_query("?embed=1").resolve());
    state.apply(ViewIntent::SetMode(ViewMode::Tactical));

    let naga = ShipId::Naga.config();
    let query = selection_query("?embed=1", naga);

    // After reload: parameters are read again, UI state starts fresh.
    let reloaded = ViewState::new(ShipParams::from_query(&query).resolve());
    assert_eq!(reloaded.selection().ship.id, ShipId::Naga);
    assert_eq!(reloaded.selection().theme.id, FactionId::Caldari);
    assert_eq!(reloaded.mode(), ViewMode::Inspection);
}
