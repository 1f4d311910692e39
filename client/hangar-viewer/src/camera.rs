//! Orbit camera around the ship.
//!
//! Left-drag orbits, right-drag pans (tactical view only) and the scroll
//! wheel zooms. Input moves a goal; the camera eases towards it with a
//! per-frame damping factor, so motion keeps gliding briefly after the
//! pointer stops. Auto-rotation turns the goal around the vertical axis.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::input::ViewerAction;
use crate::state::{ApplyIntents, ViewerState};

// ============================================================================
// Constants
// ============================================================================

/// Initial camera position.
pub const START_POSITION: Vec3 = Vec3::new(5.0, 3.0, 5.0);
/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 45.0;
/// Closest zoom distance.
pub const MIN_DISTANCE: f32 = 3.0;
/// Farthest zoom distance.
pub const MAX_DISTANCE: f32 = 20.0;

// ============================================================================
// Components and settings
// ============================================================================

/// Tuning for the orbit controls.
#[derive(Resource, Debug, Clone)]
pub struct OrbitSettings {
    /// Fraction of the remaining distance to the goal covered each frame at 60 fps.
    pub damping: f32,
    /// Auto-rotation speed; 1.0 is one full turn per minute.
    pub auto_rotate_speed: f32,
    /// Radians per pixel of drag.
    pub orbit_sensitivity: f32,
    /// Pan distance per pixel of drag, per unit of orbit distance.
    pub pan_sensitivity: f32,
    /// Zoom factor per scroll step.
    pub zoom_step: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping: 0.05,
            auto_rotate_speed: 0.5,
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_step: 0.95,
        }
    }
}

impl OrbitSettings {
    /// Auto-rotation angular speed in radians per second.
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }
}

/// Spherical orbit state of a camera.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub focus: Vec3,
    /// Rotation around the vertical axis, in radians.
    pub yaw: f32,
    /// Elevation above the horizontal plane, in radians.
    pub pitch: f32,
    /// Distance from the focus.
    pub distance: f32,
}

impl OrbitCamera {
    /// Orbit state that places the camera at `position`, looking at `focus`.
    pub fn looking_at(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / offset.length().max(f32::EPSILON)).asin(),
            distance,
        }
    }

    /// Camera translation for this orbit state.
    pub fn translation(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.focus
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Camera transform for this orbit state.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.focus, Vec3::Y)
    }

    fn orbit(&mut self, delta: Vec2, sensitivity: f32) {
        const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch + delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        let transform = self.transform();
        let scale = self.distance * sensitivity;
        self.focus += (transform.left() * delta.x + transform.up() * delta.y) * scale;
    }

    fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Move towards `goal` by `t` of the remaining gap (yaw along the shortest arc).
    fn ease_towards(&mut self, goal: &OrbitCamera, t: f32) {
        let yaw_gap = (goal.yaw - self.yaw + std::f32::consts::PI).rem_euclid(TAU)
            - std::f32::consts::PI;
        self.yaw += yaw_gap * t;
        self.pitch += (goal.pitch - self.pitch) * t;
        self.distance += (goal.distance - self.distance) * t;
        self.focus = self.focus.lerp(goal.focus, t);
    }
}

/// Where the orbit is heading. Input and auto-rotation move the goal.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitGoal(pub OrbitCamera);

// ============================================================================
// Plugin
// ============================================================================

/// Plugin for orbit camera controls.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>().add_systems(
            Update,
            (orbit_input, auto_rotate, apply_orbit)
                .chain()
                .after(ApplyIntents),
        );
    }
}

/// Components for a new orbit camera at the start position.
pub fn orbit_camera_bundle() -> impl Bundle {
    let orbit = OrbitCamera::looking_at(START_POSITION, Vec3::ZERO);
    (
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.transform(),
        orbit,
        OrbitGoal(orbit),
    )
}

// ============================================================================
// Systems
// ============================================================================

/// Apply drag and scroll input to the orbit goal.
fn orbit_input(
    action_query: Query<&ActionState<ViewerAction>>,
    settings: Res<OrbitSettings>,
    state: Res<ViewerState>,
    mut query: Query<&mut OrbitGoal>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    let drag = action_state.axis_pair(&ViewerAction::Drag);
    let scroll = action_state.clamped_value(&ViewerAction::Zoom);

    for mut goal in &mut query {
        if drag != Vec2::ZERO {
            if action_state.pressed(&ViewerAction::Orbit) {
                goal.0.orbit(drag, settings.orbit_sensitivity);
            } else if action_state.pressed(&ViewerAction::Pan) && state.mode().allows_pan() {
                goal.0.pan(drag, settings.pan_sensitivity);
            }
        }
        if scroll != 0.0 {
            goal.0.zoom(settings.zoom_step.powf(scroll));
        }
    }
}

/// Turn the goal while auto-rotation is enabled.
fn auto_rotate(
    time: Res<Time>,
    settings: Res<OrbitSettings>,
    state: Res<ViewerState>,
    mut query: Query<&mut OrbitGoal>,
) {
    if !state.is_rotating() {
        return;
    }
    let step = settings.auto_rotate_rate() * time.delta_secs();
    for mut goal in &mut query {
        goal.0.yaw = (goal.0.yaw + step).rem_euclid(TAU);
    }
}

/// Ease each camera towards its goal and update its transform.
fn apply_orbit(
    time: Res<Time>,
    settings: Res<OrbitSettings>,
    state: Res<ViewerState>,
    mut query: Query<(&mut OrbitCamera, &mut OrbitGoal, &mut Transform)>,
) {
    // Damping is specified per 60 Hz frame; convert to this frame's delta.
    let t = 1.0 - (1.0 - settings.damping).powf(time.delta_secs() * 60.0);

    for (mut orbit, mut goal, mut transform) in &mut query {
        // Leaving the tactical view recenters the pan.
        if state.is_changed() && !state.mode().allows_pan() {
            goal.0.focus = Vec3::ZERO;
        }
        orbit.ease_towards(&goal.0, t);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_at_round_trip() {
        let orbit = OrbitCamera::looking_at(START_POSITION, Vec3::ZERO);
        assert!(orbit.translation().distance(START_POSITION) < 1e-4);
        assert!((orbit.distance - START_POSITION.length()).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = OrbitCamera::looking_at(START_POSITION, Vec3::ZERO);
        for _ in 0..200 {
            orbit.zoom(0.9);
        }
        assert!((orbit.distance - MIN_DISTANCE).abs() < f32::EPSILON);
        for _ in 0..200 {
            orbit.zoom(1.1);
        }
        assert!((orbit.distance - MAX_DISTANCE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orbit = OrbitCamera::looking_at(START_POSITION, Vec3::ZERO);
        orbit.orbit(Vec2::new(0.0, 10_000.0), 0.01);
        assert!(orbit.pitch < FRAC_PI_2);
        assert!(orbit.translation().y > 0.0);
    }

    #[test]
    fn test_ease_takes_shortest_arc() {
        let mut orbit = OrbitCamera::looking_at(START_POSITION, Vec3::ZERO);
        orbit.yaw = TAU - 0.1;
        let mut goal = orbit;
        goal.yaw = 0.1;
        orbit.ease_towards(&goal, 0.5);
        // Halfway along the 0.2 rad arc through zero, not back across the circle.
        assert!((orbit.yaw - TAU).abs() < 1e-4);
    }

    #[test]
    fn test_auto_rotate_rate() {
        let settings = OrbitSettings::default();
        assert!((settings.auto_rotate_rate() - TAU / 120.0).abs() < 1e-6);
    }
}
