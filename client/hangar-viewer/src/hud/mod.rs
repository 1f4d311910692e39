//! Heads-up display drawn over the hangar scene.
//!
//! Panels read [`ViewerState`] and queue intents on [`ViewIntents`]; they
//! never change the state themselves. The mode overlays (vignette,
//! letterbox, reticle) sit on the background layer and stay up when the
//! panels are hidden with H.

mod controls;
mod fonts;
mod header;
mod overlay;
mod selector;
mod stats;
pub mod theme;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use hangar::SelectorState;
use hangar::view::Letterbox;

use crate::state::{ApplyIntents, HudVisible, ViewIntents, ViewerState};
use stats::StatsTab;
use theme::Palette;

/// Plugin for the HUD panels and mode overlays.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(Startup, init_hud_state)
            .add_systems(Update, animate_letterbox.after(ApplyIntents))
            .add_systems(
                EguiPrimaryContextPass,
                (
                    fonts::setup_fonts.run_if(not(resource_exists::<fonts::HasInitialisedFonts>)),
                    overlay::mode_overlay_ui,
                    hud_ui.run_if(|visible: Res<HudVisible>| visible.0),
                )
                    .chain(),
            );
    }
}

/// Panel state local to the HUD.
#[derive(Resource)]
struct HudState {
    tab: StatsTab,
    selector: SelectorState,
}

/// Cinematic letterbox bars.
#[derive(Resource, Deref, DerefMut)]
struct CinematicBars(Letterbox);

fn init_hud_state(mut commands: Commands, state: Res<ViewerState>) {
    // The group for the requested faction starts expanded, even when the
    // ship itself belongs to another faction.
    commands.insert_resource(HudState {
        tab: StatsTab::default(),
        selector: SelectorState::new(state.selection().theme.id),
    });
    commands.insert_resource(CinematicBars(Letterbox::settled(state.mode())));
}

fn animate_letterbox(
    time: Res<Time>,
    state: Res<ViewerState>,
    bars: Option<ResMut<CinematicBars>>,
) {
    if let Some(mut bars) = bars {
        bars.advance(state.mode(), time.delta_secs());
    }
}

/// Render the HUD panels.
fn hud_ui(
    mut contexts: EguiContexts,
    state: Res<ViewerState>,
    hud: Option<ResMut<HudState>>,
    mut intents: ResMut<ViewIntents>,
) -> Result {
    let Some(mut hud) = hud else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let ship = state.selection().ship;
    let palette = Palette::new(ship.theme());

    header::render_header(ctx, ship, &palette);
    controls::render_controls(ctx, &state, &palette, &mut intents);
    stats::render_stats(ctx, &ship.stats, &mut hud.tab, &palette);
    selector::render_selector(ctx, ship.id, &mut hud.selector, &palette, &mut intents);

    Ok(())
}
