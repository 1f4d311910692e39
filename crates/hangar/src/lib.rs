//! Ship catalog and viewer state for the hangar ship viewer.
//!
//! This crate holds everything the viewer decides without a renderer:
//! the static ship and faction catalog, launch parameter resolution,
//! the view-mode state owned by the application root, the selector model
//! and the loading-progress smoothing used by the loading overlay.
//!
//! # Design principles
//!
//! - **Total lookups**: unknown ids resolve to the catalog defaults, never an error
//! - **Immutable catalog**: tables are `static` and have no mutation path
//! - **Unidirectional state**: children emit [`ViewIntent`]s, one owner applies them
//!
//! # Example
//!
//! ```
//! use hangar::{ShipParams, catalog};
//!
//! let params = ShipParams::from_query("?ship=cerberus&faction=caldari");
//! let ship = catalog::ship(&params.ship_id);
//! assert_eq!(ship.name, "Cerberus");
//! assert_eq!(catalog::faction_theme(&params.faction_id).id.as_str(), "caldari");
//! ```

pub mod catalog;
mod color;
mod faction;
pub mod params;
pub mod progress;
pub mod selector;
mod ship;
pub mod view;

pub use color::ThemeColor;
pub use faction::{FactionId, FactionTheme};
pub use params::ShipParams;
pub use progress::{ProgressSmoother, SmoothingConfig, StatusMessage};
pub use selector::SelectorState;
pub use ship::{ModelSource, ShipConfig, ShipId, ShipStats};
pub use view::{ViewIntent, ViewMode, ViewState};
