//! 3D starship viewer with a faction-themed HUD using Bevy.
//!
//! Shows one ship from the catalog against a starfield, with an orbit
//! camera, three view modes and a selector for switching ships. The ship
//! and faction come from the command line on native builds and from the
//! page's query string in the browser.

mod camera;
mod hud;
mod input;
mod launch_params;
mod loading;
mod scene;
mod state;

use bevy::prelude::*;
use camera::OrbitCameraPlugin;
use hud::HudPlugin;
use input::InputPlugin;
use loading::LoadingPlugin;
use scene::ScenePlugin;
use state::ViewerStatePlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ViewerStatePlugin,
            InputPlugin,
            OrbitCameraPlugin,
            ScenePlugin,
            LoadingPlugin,
            HudPlugin,
        ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let mut app = App::new();
    app.insert_resource(launch_params::parse());

    #[allow(unused_mut)]
    let mut window = Window {
        title: "hangar-viewer".to_string(),
        resolution: (1600, 900).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.add_plugins(AppPlugin).run();
}
