//! View mode and session UI state.
//!
//! The application root owns a single [`ViewState`]. Everything else asks
//! for changes by emitting a [`ViewIntent`]; intents are applied in order by
//! [`ViewState::apply`]. There are no transition restrictions: any mode is
//! reachable from any other.

use std::fmt;
use std::str::FromStr;

use crate::params::Selection;
use crate::ship::ShipId;

/// Duration of the letterbox open/close animation, in seconds.
pub const LETTERBOX_DURATION_SECS: f32 = 0.7;
/// Height of each letterbox bar when fully open, in logical pixels.
pub const LETTERBOX_HEIGHT: f32 = 128.0;

/// How the ship is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Grid, reticle and camera panning.
    Tactical,
    /// Letterboxed with a heavier vignette.
    Cinematic,
    /// Plain orbit view.
    #[default]
    Inspection,
}

impl ViewMode {
    /// Every mode, in control-panel order.
    pub const ALL: [ViewMode; 3] = [ViewMode::Tactical, ViewMode::Cinematic, ViewMode::Inspection];

    /// Upper-case label shown on the HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ViewMode::Tactical => "TACTICAL",
            ViewMode::Cinematic => "CINEMATIC",
            ViewMode::Inspection => "INSPECTION",
        }
    }

    /// Whether the tactical grid is drawn under the ship.
    #[must_use]
    pub fn shows_grid(self) -> bool {
        self == ViewMode::Tactical
    }

    /// Whether the targeting reticle is mounted.
    #[must_use]
    pub fn shows_reticle(self) -> bool {
        self == ViewMode::Tactical
    }

    /// Whether the orbit camera may pan.
    #[must_use]
    pub fn allows_pan(self) -> bool {
        self == ViewMode::Tactical
    }

    /// Letterbox openness this mode animates towards (0 closed, 1 open).
    #[must_use]
    pub fn letterbox_target(self) -> f32 {
        if self == ViewMode::Cinematic { 1.0 } else { 0.0 }
    }

    /// Opacity of the screen-edge vignette.
    #[must_use]
    pub fn vignette_opacity(self) -> f32 {
        if self == ViewMode::Cinematic { 0.8 } else { 0.4 }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViewMode(pub String);

impl fmt::Display for UnknownViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown view mode '{}', expected tactical, cinematic or inspection",
            self.0
        )
    }
}

impl std::error::Error for UnknownViewMode {}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownViewMode(s.to_string()))
    }
}

/// A change requested by a child of the application root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewIntent {
    /// Switch to a view mode. Always accepted.
    SetMode(ViewMode),
    /// Flip the auto-rotation flag.
    ToggleRotation,
    /// Show a different ship.
    SelectShip(ShipId),
}

/// Session UI state. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    mode: ViewMode,
    rotating: bool,
    selection: Selection,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl ViewState {
    /// State for a resolved selection, with default mode and rotation on.
    #[must_use]
    pub fn new(selection: Selection) -> Self {
        Self {
            mode: ViewMode::default(),
            rotating: true,
            selection,
        }
    }

    /// Override the initial mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the initial rotation flag.
    #[must_use]
    pub fn with_rotation(mut self, rotating: bool) -> Self {
        self.rotating = rotating;
        self
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Whether auto-rotation is enabled.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// The resolved ship and theme.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Apply an intent. Returns whether anything changed.
    pub fn apply(&mut self, intent: ViewIntent) -> bool {
        match intent {
            ViewIntent::SetMode(mode) => {
                let changed = self.mode != mode;
                self.mode = mode;
                changed
            }
            ViewIntent::ToggleRotation => {
                self.rotating = !self.rotating;
                true
            }
            ViewIntent::SelectShip(ship) => {
                let changed = self.selection.ship.id != ship;
                self.selection = Selection::of_ship(ship);
                changed
            }
        }
    }
}

/// Letterbox bar animation.
///
/// Moves linearly in time towards the mode's target and is eased on output,
/// so reversing mid-way continues smoothly from the current point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Letterbox {
    progress: f32,
}

impl Letterbox {
    /// A letterbox already settled for `mode`.
    #[must_use]
    pub fn settled(mode: ViewMode) -> Self {
        Self {
            progress: mode.letterbox_target(),
        }
    }

    /// Advance towards the target for `mode` by `dt` seconds.
    pub fn advance(&mut self, mode: ViewMode, dt: f32) {
        let target = mode.letterbox_target();
        let step = dt / LETTERBOX_DURATION_SECS;
        if self.progress < target {
            self.progress = (self.progress + step).min(target);
        } else {
            self.progress = (self.progress - step).max(target);
        }
    }

    /// Whether the bars have reached the target for `mode`.
    #[must_use]
    pub fn is_settled(&self, mode: ViewMode) -> bool {
        (self.progress - mode.letterbox_target()).abs() < f32::EPSILON
    }

    /// Eased openness in 0.0..=1.0.
    #[must_use]
    pub fn openness(&self) -> f32 {
        ease_in_out(self.progress)
    }

    /// Current bar height in logical pixels.
    #[must_use]
    pub fn bar_height(&self) -> f32 {
        self.openness() * LETTERBOX_HEIGHT
    }
}

/// Cubic ease-in-out.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert_eq!(state.mode(), ViewMode::Inspection);
        assert!(state.is_rotating());
        assert_eq!(state.selection().ship.id, ShipId::Imperial);
    }

    #[test]
    fn test_set_mode_is_total() {
        let mut state = ViewState::default();
        for mode in [
            ViewMode::Tactical,
            ViewMode::Cinematic,
            ViewMode::Inspection,
            ViewMode::Tactical,
        ] {
            state.apply(ViewIntent::SetMode(mode));
            assert_eq!(state.mode(), mode);
        }
        assert!(!state.apply(ViewIntent::SetMode(ViewMode::Tactical)));
    }

    #[test]
    fn test_toggle_rotation() {
        let mut state = ViewState::default().with_rotation(false);
        assert!(state.apply(ViewIntent::ToggleRotation));
        assert!(state.is_rotating());
        state.apply(ViewIntent::ToggleRotation);
        assert!(!state.is_rotating());
    }

    #[test]
    fn test_select_ship_uses_ship_faction() {
        let mut state = ViewState::default().with_mode(ViewMode::Cinematic);
        assert!(state.apply(ViewIntent::SelectShip(ShipId::Atron)));
        assert_eq!(state.selection().theme.id.as_str(), "gallente");
        // Selecting a ship leaves the view mode alone.
        assert_eq!(state.mode(), ViewMode::Cinematic);
        assert!(!state.apply(ViewIntent::SelectShip(ShipId::Atron)));
    }

    #[test]
    fn test_mode_presentation() {
        assert!(ViewMode::Tactical.shows_grid());
        assert!(ViewMode::Tactical.shows_reticle());
        assert!(!ViewMode::Cinematic.shows_grid());
        assert!(!ViewMode::Inspection.allows_pan());
        assert!((ViewMode::Cinematic.vignette_opacity() - 0.8).abs() < f32::EPSILON);
        assert!((ViewMode::Inspection.vignette_opacity() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("tactical".parse::<ViewMode>(), Ok(ViewMode::Tactical));
        assert_eq!("CINEMATIC".parse::<ViewMode>(), Ok(ViewMode::Cinematic));
        assert!("orbit".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_letterbox_animation() {
        let mut letterbox = Letterbox::settled(ViewMode::Inspection);
        assert!(letterbox.bar_height().abs() < f32::EPSILON);

        letterbox.advance(ViewMode::Cinematic, LETTERBOX_DURATION_SECS / 2.0);
        assert!((letterbox.openness() - 0.5).abs() < 1e-4);

        letterbox.advance(ViewMode::Cinematic, LETTERBOX_DURATION_SECS);
        assert!((letterbox.bar_height() - LETTERBOX_HEIGHT).abs() < 1e-3);

        // Leaving cinematic closes the bars over the same duration.
        letterbox.advance(ViewMode::Tactical, LETTERBOX_DURATION_SECS * 0.25);
        assert!(letterbox.openness() > 0.0 && letterbox.openness() < 1.0);
        assert!(!letterbox.is_settled(ViewMode::Tactical));
        letterbox.advance(ViewMode::Tactical, LETTERBOX_DURATION_SECS);
        assert!(letterbox.openness().abs() < f32::EPSILON);
        assert!(letterbox.is_settled(ViewMode::Tactical));
    }
}
