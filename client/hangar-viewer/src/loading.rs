//! Model loading progress and the loading overlay.
//!
//! The asset server only knows coarse load states, so they are mapped onto
//! fixed progress steps and run through [`ProgressSmoother`] on a fixed
//! 50 ms ticker. Once the smoothed value reaches 100 the model is revealed
//! and the overlay fades out. A failed load leaves the overlay up.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::asset::{LoadState, RecursiveDependencyLoadState, UntypedHandle};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use hangar::progress::{LOADING_MESSAGES, status_message};
use hangar::{ProgressSmoother, ShipId, SmoothingConfig};
use web_time::Instant;

use crate::hud::theme::{Palette, fade};
use crate::scene::ShipModel;
use crate::state::ViewerState;

/// Duration of the overlay fade-out after completion, in seconds.
pub const FADE_OUT_SECS: f32 = 0.8;

/// Reported progress while the model file is being fetched.
const PROGRESS_FETCHING: f32 = 15.0;
/// Reported progress once the model file is parsed but its textures are not.
const PROGRESS_PARSED: f32 = 60.0;

// ============================================================================
// Load tracking
// ============================================================================

/// Real progress derived from the asset server.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProgress {
    /// Progress in 0.0..=100.0.
    pub real: f32,
    /// Whether loading is still in progress.
    pub active: bool,
    /// Load error, if the model or one of its dependencies failed.
    pub error: Option<String>,
}

impl LoadProgress {
    /// Map the asset server's view of a handle to progress.
    pub fn from_states(
        load: Option<LoadState>,
        dependencies: Option<RecursiveDependencyLoadState>,
    ) -> Self {
        let in_progress = |real| Self {
            real,
            active: true,
            error: None,
        };

        if let Some(LoadState::Failed(e)) = &load {
            return Self {
                error: Some(e.to_string()),
                ..in_progress(0.0)
            };
        }
        match (load, dependencies) {
            (_, Some(RecursiveDependencyLoadState::Failed(e))) => Self {
                error: Some(e.to_string()),
                ..in_progress(PROGRESS_PARSED)
            },
            (_, Some(RecursiveDependencyLoadState::Loaded)) => Self {
                real: 100.0,
                active: false,
                error: None,
            },
            (Some(LoadState::Loaded), _) => in_progress(PROGRESS_PARSED),
            (Some(LoadState::Loading), _) => in_progress(PROGRESS_FETCHING),
            _ => in_progress(0.0),
        }
    }
}

/// Tracks the model currently loading and drives the overlay.
#[derive(Resource)]
pub struct LoadTracker {
    ship: Option<ShipId>,
    handle: Option<UntypedHandle>,
    started: Instant,
    progress: LoadProgress,
    smoother: ProgressSmoother,
    ticker: Timer,
    /// Seconds since completion, once complete.
    since_complete: Option<f32>,
    failure_logged: bool,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self::new(SmoothingConfig::default())
    }
}

impl LoadTracker {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            ship: None,
            handle: None,
            started: Instant::now(),
            progress: LoadProgress::from_states(None, None),
            smoother: ProgressSmoother::new(config),
            ticker: Timer::new(config.tick_interval, TimerMode::Repeating),
            since_complete: None,
            failure_logged: false,
        }
    }

    /// Start tracking a new model load, restarting the overlay.
    pub fn begin(&mut self, ship: ShipId, path: &str, handle: UntypedHandle) {
        tracing::info!("Loading model for {ship} from {path}");
        let config = *self.smoother.config();
        *self = Self::new(config);
        self.ship = Some(ship);
        self.handle = Some(handle);
    }

    /// The smoothed percentage to display.
    pub fn displayed(&self) -> f32 {
        self.smoother.displayed()
    }

    /// Whether the model may be shown.
    pub fn is_complete(&self) -> bool {
        self.since_complete.is_some()
    }

    /// Opacity of the overlay, 1.0 while loading and 0.0 once faded out.
    pub fn overlay_opacity(&self) -> f32 {
        match self.since_complete {
            None => 1.0,
            Some(t) => 1.0 - ease_out(t / FADE_OUT_SECS),
        }
    }

    /// Advance by `delta`, running one smoothing step per elapsed tick.
    fn advance(&mut self, delta: std::time::Duration) {
        if let Some(t) = &mut self.since_complete {
            *t += delta.as_secs_f32();
            return;
        }

        self.ticker.tick(delta);
        for _ in 0..self.ticker.times_finished_this_tick() {
            self.smoother
                .tick(self.progress.real, self.progress.active);
        }

        if self.smoother.is_complete(self.progress.active) {
            self.since_complete = Some(0.0);
            tracing::info!(
                "Model for {} loaded in {:.2}s",
                self.ship.map_or("unknown ship", ShipId::as_str),
                self.started.elapsed().as_secs_f32()
            );
        }
    }
}

fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin for load tracking and the loading overlay.
pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadTracker>()
            .add_systems(
                Update,
                (poll_load_state, advance_progress, reveal_model).chain(),
            )
            .add_systems(EguiPrimaryContextPass, loading_overlay_ui);
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Read the asset server's state for the tracked model.
fn poll_load_state(asset_server: Res<AssetServer>, mut tracker: ResMut<LoadTracker>) {
    let Some(id) = tracker.handle.as_ref().map(UntypedHandle::id) else {
        return;
    };

    let progress = LoadProgress::from_states(
        asset_server.get_load_state(id),
        asset_server.get_recursive_dependency_load_state(id),
    );

    if let Some(error) = &progress.error
        && !tracker.failure_logged
    {
        tracing::error!("Failed to load ship model: {error}");
        tracker.failure_logged = true;
    }
    tracker.progress = progress;
}

fn advance_progress(time: Res<Time>, mut tracker: ResMut<LoadTracker>) {
    if tracker.handle.is_some() {
        tracker.advance(time.delta());
    }
}

/// Show the model once loading completes.
fn reveal_model(tracker: Res<LoadTracker>, mut query: Query<(&ShipModel, &mut Visibility)>) {
    if !tracker.is_complete() {
        return;
    }
    for (model, mut visibility) in &mut query {
        if Some(model.ship) == tracker.ship && *visibility == Visibility::Hidden {
            *visibility = Visibility::Inherited;
        }
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Draw the loading overlay until it has faded out.
fn loading_overlay_ui(
    mut contexts: EguiContexts,
    tracker: Res<LoadTracker>,
    state: Res<ViewerState>,
    time: Res<Time>,
) -> Result {
    let opacity = tracker.overlay_opacity();
    if opacity <= 0.0 || tracker.handle.is_none() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let screen = ctx.screen_rect();
    let theme = state.selection().ship.theme();
    let palette = Palette::new(theme);
    let displayed = tracker.displayed();

    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // Swallow clicks so nothing behind the overlay reacts.
            let (rect, _) = ui.allocate_exact_size(screen.size(), egui::Sense::click_and_drag());
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, fade(egui::Color32::BLACK, opacity));

            let center = rect.center() - egui::vec2(0.0, 40.0);
            draw_ring(&painter, center, displayed, time.elapsed_secs(), &palette, opacity);

            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                format!("{:.0}%", displayed.round()),
                egui::FontId::monospace(36.0),
                fade(palette.primary, opacity),
            );

            let mut y = center.y + 130.0;
            painter.text(
                egui::pos2(center.x, y),
                egui::Align2::CENTER_CENTER,
                theme.english_name.to_uppercase(),
                egui::FontId::monospace(10.0),
                fade(palette.secondary, opacity),
            );
            y += 26.0;
            painter.text(
                egui::pos2(center.x, y),
                egui::Align2::CENTER_CENTER,
                "INITIALIZING SYSTEMS",
                egui::FontId::proportional(20.0),
                fade(palette.text, opacity),
            );
            y += 28.0;
            painter.text(
                egui::pos2(center.x, y),
                egui::Align2::CENTER_CENTER,
                status_message(displayed, &LOADING_MESSAGES),
                egui::FontId::monospace(13.0),
                fade(palette.muted, opacity),
            );
        });

    ctx.request_repaint();
    Ok(())
}

/// Progress ring: track, progress arc and a slowly turning dashed inner ring.
fn draw_ring(
    painter: &egui::Painter,
    center: egui::Pos2,
    progress: f32,
    elapsed: f32,
    palette: &Palette,
    opacity: f32,
) {
    const RADIUS: f32 = 86.0;
    const DASHES: u8 = 16;

    painter.circle_stroke(
        center,
        RADIUS,
        egui::Stroke::new(3.0, fade(egui::Color32::from_white_alpha(13), opacity)),
    );
    painter.circle_stroke(
        center,
        RADIUS + 6.0,
        egui::Stroke::new(0.5, fade(palette.glow, opacity * 0.15)),
    );

    // Arc starts at twelve o'clock and runs clockwise.
    let sweep = (progress / 100.0).clamp(0.0, 1.0) * TAU;
    if sweep > 0.0 {
        let points = arc_points(center, RADIUS, -FRAC_PI_2, sweep);
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(3.0, fade(palette.primary, opacity)),
        ));
    }

    // Dashed inner ring, one turn every 8 seconds.
    let offset = elapsed / 8.0 * TAU;
    let pitch = TAU / f32::from(DASHES);
    for i in 0..DASHES {
        let start = offset + f32::from(i) * pitch;
        let points = arc_points(center, RADIUS - 10.0, start, pitch / 3.0);
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.0, fade(palette.glow, opacity * 0.3)),
        ));
    }
}

fn arc_points(center: egui::Pos2, radius: f32, start: f32, sweep: f32) -> Vec<egui::Pos2> {
    let segments = (sweep / TAU * 96.0).ceil().max(2.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = segments as usize;
    (0..=count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + sweep * (i as f32 / count as f32);
            center + egui::vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_progress_from_states() {
        assert_eq!(LoadProgress::from_states(None, None).real, 0.0);

        let fetching = LoadProgress::from_states(
            Some(LoadState::Loading),
            Some(RecursiveDependencyLoadState::Loading),
        );
        assert_eq!(fetching.real, PROGRESS_FETCHING);
        assert!(fetching.active);

        let parsed = LoadProgress::from_states(
            Some(LoadState::Loaded),
            Some(RecursiveDependencyLoadState::Loading),
        );
        assert_eq!(parsed.real, PROGRESS_PARSED);

        let done = LoadProgress::from_states(
            Some(LoadState::Loaded),
            Some(RecursiveDependencyLoadState::Loaded),
        );
        assert_eq!(done.real, 100.0);
        assert!(!done.active);
        assert!(done.error.is_none());
    }

    #[test]
    fn test_tracker_completes_and_fades() {
        let mut tracker = LoadTracker::default();
        tracker.progress = LoadProgress::from_states(
            Some(LoadState::Loaded),
            Some(RecursiveDependencyLoadState::Loaded),
        );

        for _ in 0..400 {
            tracker.advance(Duration::from_millis(50));
            if tracker.is_complete() {
                break;
            }
        }
        assert!(tracker.is_complete());
        assert!((tracker.displayed() - 100.0).abs() < f32::EPSILON);
        assert!((tracker.overlay_opacity() - 1.0).abs() < f32::EPSILON);

        tracker.advance(Duration::from_secs_f32(FADE_OUT_SECS / 2.0));
        let halfway = tracker.overlay_opacity();
        assert!(halfway > 0.0 && halfway < 1.0);

        tracker.advance(Duration::from_secs_f32(FADE_OUT_SECS));
        assert!(tracker.overlay_opacity() <= 0.0);
    }

    #[test]
    fn test_tracker_holds_below_ceiling_while_loading() {
        let mut tracker = LoadTracker::default();
        tracker.progress = LoadProgress::from_states(Some(LoadState::Loaded), None);
        for _ in 0..600 {
            tracker.advance(Duration::from_millis(50));
        }
        assert!(!tracker.is_complete());
        assert!(tracker.displayed() <= 95.0);
        assert!(tracker.displayed() > PROGRESS_PARSED);
    }

    #[test]
    fn test_begin_restarts() {
        let mut tracker = LoadTracker::default();
        tracker.since_complete = Some(5.0);
        tracker.begin(ShipId::Naga, "models/naga_optimized.glb", Handle::<Scene>::default().untyped());
        assert!(!tracker.is_complete());
        assert_eq!(tracker.ship, Some(ShipId::Naga));
        assert!(tracker.displayed().abs() < f32::EPSILON);
    }
}
