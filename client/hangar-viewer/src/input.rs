//! Input action definitions and focus management.
//!
//! Viewer shortcuts and pointer gestures are declared with
//! `leafwing-input-manager`. A single system disables them while egui is
//! using the keyboard or the pointer, so typing or clicking on the HUD never
//! moves the camera.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use leafwing_input_manager::{plugin::InputManagerSystem, prelude::*};

// ============================================================================
// Action enum
// ============================================================================

/// Actions for the viewer camera and HUD.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum ViewerAction {
    /// Switch to the tactical view (1).
    TacticalView,
    /// Switch to the cinematic view (2).
    CinematicView,
    /// Switch to the inspection view (3).
    InspectionView,
    /// Toggle auto-rotation (R).
    ToggleRotation,
    /// Toggle HUD visibility (H).
    ToggleHud,
    /// Orbit while held (left mouse button).
    Orbit,
    /// Pan while held (right mouse button).
    Pan,
    /// Mouse movement, used by orbit and pan.
    #[actionlike(DualAxis)]
    Drag,
    /// Zoom with mouse scroll.
    #[actionlike(Axis)]
    Zoom,
}

/// Create the default input map for viewer actions.
pub fn default_viewer_input_map() -> InputMap<ViewerAction> {
    InputMap::default()
        .with(ViewerAction::TacticalView, KeyCode::Digit1)
        .with(ViewerAction::TacticalView, KeyCode::Numpad1)
        .with(ViewerAction::CinematicView, KeyCode::Digit2)
        .with(ViewerAction::CinematicView, KeyCode::Numpad2)
        .with(ViewerAction::InspectionView, KeyCode::Digit3)
        .with(ViewerAction::InspectionView, KeyCode::Numpad3)
        .with(ViewerAction::ToggleRotation, KeyCode::KeyR)
        .with(ViewerAction::ToggleHud, KeyCode::KeyH)
        .with(ViewerAction::Orbit, MouseButton::Left)
        .with(ViewerAction::Pan, MouseButton::Right)
        .with_dual_axis(ViewerAction::Drag, MouseMove::default())
        .with_axis(ViewerAction::Zoom, MouseScrollAxis::Y)
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin that registers the viewer actions and input focus management.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .add_systems(Startup, spawn_input_handler)
            .add_systems(
                PreUpdate,
                manage_input_focus.after(InputManagerSystem::Update),
            );
    }
}

fn spawn_input_handler(mut commands: Commands) {
    commands.spawn((
        Name::new("Viewer input"),
        default_viewer_input_map(),
        ActionState::<ViewerAction>::default(),
    ));
}

// ============================================================================
// Input focus management
// ============================================================================

/// Keyboard shortcuts, disabled while egui wants keyboard input.
const KEYBOARD_ACTIONS: &[ViewerAction] = &[
    ViewerAction::TacticalView,
    ViewerAction::CinematicView,
    ViewerAction::InspectionView,
    ViewerAction::ToggleRotation,
    ViewerAction::ToggleHud,
];

/// Pointer gestures, disabled while the pointer is over an egui area.
const POINTER_ACTIONS: &[ViewerAction] = &[
    ViewerAction::Orbit,
    ViewerAction::Pan,
    ViewerAction::Drag,
    ViewerAction::Zoom,
];

fn set_actions(
    action_state: &mut ActionState<ViewerAction>,
    actions: &[ViewerAction],
    enabled: bool,
) {
    for action in actions {
        if enabled {
            action_state.enable_action(action);
        } else {
            action_state.disable_action(action);
        }
    }
}

/// Route input either to egui or to the viewer.
///
/// A drag that started in the viewport keeps the pointer actions enabled
/// until the button is released, even if the pointer crosses a panel.
fn manage_input_focus(
    mut query: Query<&mut ActionState<ViewerAction>>,
    mut contexts: EguiContexts,
) {
    let (egui_wants_kb, egui_wants_pointer) = contexts
        .ctx_mut()
        .ok()
        .map_or((false, false), |ctx| {
            (ctx.wants_keyboard_input(), ctx.is_pointer_over_area())
        });

    for mut action_state in &mut query {
        set_actions(&mut action_state, KEYBOARD_ACTIONS, !egui_wants_kb);

        let dragging = action_state.pressed(&ViewerAction::Orbit)
            || action_state.pressed(&ViewerAction::Pan);
        set_actions(
            &mut action_state,
            POINTER_ACTIONS,
            dragging || !egui_wants_pointer,
        );
    }
}
