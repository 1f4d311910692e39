//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, the `ship` and `faction` parameters are read once from the page's
//! query string; the view mode, rotation flag and model source keep their
//! defaults.

use bevy::prelude::*;
use hangar::{ModelSource, ShipParams, ViewMode, ViewState};

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Default)]
pub struct LaunchParams {
    /// Requested ship and faction ids, not yet validated.
    pub ship: ShipParams,
    /// Initial view mode.
    pub mode: ViewMode,
    /// Start with auto-rotation disabled.
    pub no_rotate: bool,
    /// Where ship models are fetched from.
    pub model_source: ModelSource,
}

impl LaunchParams {
    /// Resolve the parameters into the initial session state.
    pub fn initial_state(&self) -> ViewState {
        let selection = self.ship.resolve();
        tracing::info!(
            "Resolved ship '{}' -> {} ({}), faction '{}' -> {}",
            self.ship.ship_id,
            selection.ship.name,
            selection.ship.faction,
            self.ship.faction_id,
            selection.theme.id,
        );
        ViewState::new(selection)
            .with_mode(self.mode)
            .with_rotation(!self.no_rotate)
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "3D starship viewer")]
    struct CliArgs {
        /// Ship catalog id (e.g. `cerberus`). Unknown ids fall back to the default ship.
        #[arg(long)]
        ship: Option<String>,

        /// Faction catalog id (e.g. `caldari`). Unknown ids fall back to the default faction.
        #[arg(long)]
        faction: Option<String>,

        /// Initial view mode: tactical, cinematic or inspection.
        #[arg(long, default_value_t = ViewMode::default())]
        mode: ViewMode,

        /// Start with auto-rotation disabled.
        #[arg(long)]
        no_rotate: bool,

        /// Load models from the CDN (`cdn`) or from `assets/models` (`local`).
        #[arg(long, default_value_t = ModelSource::default())]
        model_source: ModelSource,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        LaunchParams {
            ship: ShipParams::new(args.ship.as_deref(), args.faction.as_deref()),
            mode: args.mode,
            no_rotate: args.no_rotate,
            model_source: args.model_source,
        }
    }
}

#[cfg(target_family = "wasm")]
mod web {
    use super::*;

    pub fn parse() -> LaunchParams {
        let search = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default();
        LaunchParams {
            ship: ShipParams::from_query(&search),
            ..Default::default()
        }
    }
}

/// Parse launch parameters from CLI args (native) or the page URL (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        web::parse()
    }
}

#[cfg(test)]
mod tests {
    use hangar::{FactionId, ShipId};

    use super::*;

    #[test]
    fn test_initial_state_applies_overrides() {
        let params = LaunchParams {
            ship: ShipParams::new(Some("thalia"), None),
            mode: ViewMode::Tactical,
            no_rotate: true,
            model_source: ModelSource::Local,
        };
        let state = params.initial_state();
        assert_eq!(state.selection().ship.id, ShipId::Thalia);
        assert_eq!(state.selection().theme.id, FactionId::Amarr);
        assert_eq!(state.mode(), ViewMode::Tactical);
        assert!(!state.is_rotating());
    }

    #[test]
    fn test_default_params() {
        let state = LaunchParams::default().initial_state();
        assert_eq!(state.selection().ship.id, ShipId::Imperial);
        assert_eq!(state.mode(), ViewMode::Inspection);
        assert!(state.is_rotating());
    }

    #[test]
    fn test_model_path_follows_source() {
        let thalia = ShipId::Thalia.config();
        let local = LaunchParams {
            model_source: ModelSource::Local,
            ..Default::default()
        };
        assert_eq!(
            local.model_source.model_path(thalia),
            "models/thalia_optimized.glb"
        );
        let cdn = LaunchParams::default();
        assert!(cdn.model_source.model_path(thalia).starts_with("https://"));
    }
}
