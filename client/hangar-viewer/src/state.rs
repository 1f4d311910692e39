//! Session state ownership.
//!
//! [`ViewerState`] is the only place the view mode, the rotation flag and
//! the current selection live. Camera, scene and HUD systems read it; when
//! they want a change they queue a [`ViewIntent`] on [`ViewIntents`], and
//! [`apply_view_intents`] applies the queue in order once per frame.
//!
//! Ship selection is routed through the active [`SelectionHandler`]: in the
//! browser the page is reloaded with the new query string, elsewhere the
//! selection is swapped in place.

use bevy::prelude::*;
use hangar::{ShipId, ViewIntent, ViewState};
use leafwing_input_manager::prelude::*;

use crate::input::ViewerAction;
use crate::launch_params::LaunchParams;

// ============================================================================
// Resources
// ============================================================================

/// The single owner of the session UI state.
#[derive(Resource, Debug, Default, Deref)]
pub struct ViewerState(ViewState);

/// Pending view intents.
///
/// Use the methods on this resource to request changes. The apply system
/// processes them in the order they were queued.
#[derive(Resource, Default)]
pub struct ViewIntents {
    pending: Vec<ViewIntent>,
}

impl ViewIntents {
    /// Queue an intent.
    pub fn request(&mut self, intent: ViewIntent) {
        self.pending.push(intent);
    }

    /// Take all pending intents for processing.
    fn take(&mut self) -> Vec<ViewIntent> {
        std::mem::take(&mut self.pending)
    }
}

/// How a ship picked in the selector is shown.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionHandler {
    /// Rewrite the page's query string and reload, so the launch parameters
    /// are read again.
    ReloadPage,
    /// Swap the model and theme without leaving the running app.
    InPlace,
}

impl Default for SelectionHandler {
    fn default() -> Self {
        if cfg!(target_family = "wasm") {
            SelectionHandler::ReloadPage
        } else {
            SelectionHandler::InPlace
        }
    }
}

/// Whether the HUD panels are drawn.
#[derive(Resource)]
pub struct HudVisible(pub bool);

impl Default for HudVisible {
    fn default() -> Self {
        Self(true)
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the session state and the intent queue.
pub struct ViewerStatePlugin;

/// Ordering label for systems that queue intents and the system that applies them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplyIntents;

impl Plugin for ViewerStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewIntents>()
            .init_resource::<SelectionHandler>()
            .init_resource::<HudVisible>()
            .add_systems(PreStartup, init_viewer_state)
            .add_systems(
                Update,
                (queue_shortcut_intents, apply_view_intents)
                    .chain()
                    .in_set(ApplyIntents),
            );
    }
}

fn init_viewer_state(mut commands: Commands, params: Res<LaunchParams>) {
    commands.insert_resource(ViewerState(params.initial_state()));
}

// ============================================================================
// Systems
// ============================================================================

/// Translate keyboard shortcuts into intents.
fn queue_shortcut_intents(
    action_query: Query<&ActionState<ViewerAction>>,
    mut intents: ResMut<ViewIntents>,
    mut hud_visible: ResMut<HudVisible>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    for (action, mode) in [
        (ViewerAction::TacticalView, hangar::ViewMode::Tactical),
        (ViewerAction::CinematicView, hangar::ViewMode::Cinematic),
        (ViewerAction::InspectionView, hangar::ViewMode::Inspection),
    ] {
        if action_state.just_pressed(&action) {
            intents.request(ViewIntent::SetMode(mode));
        }
    }

    if action_state.just_pressed(&ViewerAction::ToggleRotation) {
        intents.request(ViewIntent::ToggleRotation);
    }

    if action_state.just_pressed(&ViewerAction::ToggleHud) {
        hud_visible.0 = !hud_visible.0;
    }
}

/// Apply queued intents to the state owner.
fn apply_view_intents(
    mut intents: ResMut<ViewIntents>,
    mut state: ResMut<ViewerState>,
    handler: Res<SelectionHandler>,
) {
    for intent in intents.take() {
        if let ViewIntent::SelectShip(ship) = intent
            && *handler == SelectionHandler::ReloadPage
            && reload_with_ship(ship)
        {
            continue;
        }

        // Only mark the resource changed when something actually changed.
        let mut next = state.0.clone();
        if next.apply(intent) {
            tracing::info!("Applied {intent:?}");
            state.0 = next;
        } else {
            tracing::debug!("Ignored {intent:?}, nothing to change");
        }
    }
}

/// Rewrite the page query for `ship` and reload. Returns whether a reload
/// was started.
#[cfg(target_family = "wasm")]
fn reload_with_ship(ship: ShipId) -> bool {
    let Some(window) = web_sys::window() else {
        tracing::warn!("No browser window, swapping {ship} in place");
        return false;
    };
    let location = window.location();
    let current = location.search().unwrap_or_default();
    let query = hangar::params::selection_query(&current, ship.config());

    tracing::info!("Reloading with {query}");
    match location.set_search(&query) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to update page URL ({e:?}), swapping {ship} in place");
            false
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn reload_with_ship(ship: ShipId) -> bool {
    tracing::debug!("No page to reload, swapping {ship} in place");
    false
}

#[cfg(test)]
mod tests {
    use hangar::ViewMode;

    use super::*;

    fn app_with_state() -> App {
        let mut app = App::new();
        app.insert_resource(ViewerState::default())
            .init_resource::<ViewIntents>()
            .insert_resource(SelectionHandler::InPlace)
            .add_systems(Update, apply_view_intents);
        app
    }

    #[test]
    fn test_intents_apply_in_order() {
        let mut app = app_with_state();
        {
            let mut intents = app.world_mut().resource_mut::<ViewIntents>();
            intents.request(ViewIntent::SetMode(ViewMode::Tactical));
            intents.request(ViewIntent::SetMode(ViewMode::Cinematic));
            intents.request(ViewIntent::ToggleRotation);
        }
        app.update();

        let state = app.world().resource::<ViewerState>();
        assert_eq!(state.mode(), ViewMode::Cinematic);
        assert!(!state.is_rotating());
        assert!(app.world().resource::<ViewIntents>().pending.is_empty());
    }

    #[test]
    fn test_select_ship_in_place() {
        let mut app = app_with_state();
        app.world_mut()
            .resource_mut::<ViewIntents>()
            .request(ViewIntent::SelectShip(ShipId::Corax));
        app.update();

        let state = app.world().resource::<ViewerState>();
        assert_eq!(state.selection().ship.id, ShipId::Corax);
        assert_eq!(state.selection().theme.id, hangar::FactionId::Caldari);
    }
}
