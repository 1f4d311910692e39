//! Scene composition: camera, lights, starfield, the ship model and the
//! tactical grid.
//!
//! The model entity is rebuilt whenever the selected ship changes. It stays
//! hidden until the loading overlay reports that the model and all of its
//! dependencies are ready.

use std::f32::consts::FRAC_PI_2;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use hangar::{ShipConfig, ShipId, ThemeColor};
use rand::Rng;

use crate::camera::orbit_camera_bundle;
use crate::launch_params::LaunchParams;
use crate::loading::LoadTracker;
use crate::state::{ApplyIntents, ViewerState};

// ============================================================================
// Constants
// ============================================================================

/// Height of the tactical grid plane.
const GRID_HEIGHT: f32 = -1.5;
/// Number of grid cells along each side.
const GRID_CELLS: u32 = 60;
/// Cells per highlighted section.
const GRID_SECTION_CELLS: u32 = 5;
const GRID_SECTION_SIZE: f32 = 5.0;
/// Grid line colour.
const GRID_COLOR: Color = Color::srgb(0.055, 0.647, 0.914);

/// Hover amplitude and angular frequency.
const HOVER_AMPLITUDE: f32 = 0.2;
const HOVER_RATE: f32 = 0.5;
/// Roll amplitude and angular frequency.
const ROLL_AMPLITUDE: f32 = 0.02;
const ROLL_RATE: f32 = 0.3;

/// One starfield layer: a point cloud turning slowly around the vertical axis.
struct StarLayer {
    name: &'static str,
    /// Rotation rate in radians per second (negative turns clockwise from above).
    rate: f32,
    clouds: &'static [StarCloud],
}

/// How points of one cloud are distributed and coloured.
#[derive(Clone, Copy)]
enum StarCloud {
    /// Points on a spherical shell.
    Shell {
        count: usize,
        radius: f32,
        depth: f32,
        saturation: f32,
        brightness: f32,
    },
    /// Points in a centred cube, all sharing one tint.
    Cluster {
        count: usize,
        size: f32,
        color: [f32; 3],
        opacity: f32,
    },
}

const STAR_LAYERS: &[StarLayer] = &[
    StarLayer {
        name: "Distant stars",
        rate: -0.005,
        clouds: &[StarCloud::Shell {
            count: 1500,
            radius: 120.0,
            depth: 0.0,
            saturation: 0.3,
            brightness: 0.35,
        }],
    },
    StarLayer {
        name: "Star cluster",
        rate: -0.01,
        clouds: &[
            StarCloud::Shell {
                count: 5000,
                radius: 90.0,
                depth: 20.0,
                saturation: 0.5,
                brightness: 1.0,
            },
            // Dense blue core.
            StarCloud::Cluster {
                count: 800,
                size: 40.0,
                color: [0.667, 0.867, 1.0],
                opacity: 0.6,
            },
            // Scattered red/gold particles.
            StarCloud::Cluster {
                count: 200,
                size: 50.0,
                color: [1.0, 0.667, 0.533],
                opacity: 0.4,
            },
        ],
    },
];

// ============================================================================
// Components
// ============================================================================

/// The ship model root and its resting placement.
#[derive(Component, Debug)]
pub struct ShipModel {
    pub ship: ShipId,
    base: Transform,
}

/// A starfield layer that spins around the vertical axis.
#[derive(Component, Debug)]
struct Spin {
    rate: f32,
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin for the 3D scene.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_scene, spawn_starfield))
            .add_systems(
                Update,
                (
                    (sync_ship_model, sync_clear_color).after(ApplyIntents),
                    idle_motion,
                    spin_starfield,
                    draw_tactical_grid,
                ),
            );
    }
}

/// Convert a theme colour to a Bevy colour.
pub fn theme_color(color: ThemeColor) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, color.a)
}

// ============================================================================
// Setup
// ============================================================================

/// Spawn the camera and the lights.
fn setup_scene(mut commands: Commands) {
    commands.spawn((
        orbit_camera_bundle(),
        AmbientLight {
            color: Color::WHITE,
            brightness: 200.0,
            ..default()
        },
    ));

    // Key light.
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 4_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Blue rim light.
    commands.spawn((
        SpotLight {
            color: Color::srgb_u8(0x0e, 0xa5, 0xe9),
            intensity: 4_000_000.0,
            range: 40.0,
            outer_angle: 0.5,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 0.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Warm fill light from below.
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xd9, 0x77, 0x06),
            intensity: 400_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(0.0, -10.0, 0.0),
    ));

    tracing::info!("Scene setup complete - drag to orbit, scroll to zoom, 1/2/3 to switch views");
}

/// Spawn the starfield point clouds.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::rng();
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    for layer in STAR_LAYERS {
        let mut positions = Vec::new();
        let mut colors = Vec::new();
        for cloud in layer.clouds {
            scatter(&mut rng, *cloud, &mut positions, &mut colors);
        }

        let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors);

        commands.spawn((
            Name::new(layer.name),
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material.clone()),
            Transform::default(),
            Spin { rate: layer.rate },
        ));
    }
}

/// Append the points of one cloud.
fn scatter(
    rng: &mut impl Rng,
    cloud: StarCloud,
    positions: &mut Vec<[f32; 3]>,
    colors: &mut Vec<[f32; 4]>,
) {
    match cloud {
        StarCloud::Shell {
            count,
            radius,
            depth,
            saturation,
            brightness,
        } => {
            for _ in 0..count {
                let direction = random_direction(rng);
                let r = radius + rng.random::<f32>() * depth;
                positions.push((direction * r).to_array());

                let hue = rng.random::<f32>() * 360.0;
                let lightness = brightness * rng.random_range(0.5..0.9);
                let color = Color::hsl(hue, saturation, lightness).to_linear();
                colors.push(color.to_f32_array());
            }
        }
        StarCloud::Cluster {
            count,
            size,
            color,
            opacity,
        } => {
            let half = size / 2.0;
            for _ in 0..count {
                positions.push([
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                ]);
                colors.push([color[0], color[1], color[2], opacity]);
            }
        }
    }
}

/// Uniformly distributed unit vector.
fn random_direction(rng: &mut impl Rng) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..1.0);
    let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

// ============================================================================
// Ship model
// ============================================================================

/// Resting transform of a ship model from its catalog placement.
pub fn model_placement(ship: &ShipConfig) -> Transform {
    let translation = ship.position.unwrap_or(Vec3::ZERO);
    let rotation = ship
        .rotation
        .map_or(Quat::IDENTITY, |r| Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z));
    Transform {
        translation,
        rotation,
        scale: Vec3::splat(ship.effective_scale()),
    }
}

/// Respawn the model when the selected ship differs from the one on screen.
fn sync_ship_model(
    mut commands: Commands,
    state: Res<ViewerState>,
    params: Res<LaunchParams>,
    asset_server: Res<AssetServer>,
    mut tracker: ResMut<LoadTracker>,
    models: Query<(Entity, &ShipModel)>,
) {
    let ship = state.selection().ship;
    if models.iter().any(|(_, model)| model.ship == ship.id) {
        return;
    }

    for (entity, _) in &models {
        commands.entity(entity).despawn();
    }

    let path = params.model_source.model_path(ship);
    let scene: Handle<Scene> = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
    tracker.begin(ship.id, &path, scene.clone().untyped());

    let base = model_placement(ship);
    commands.spawn((
        Name::new(format!("Ship: {}", ship.name)),
        ShipModel { ship: ship.id, base },
        SceneRoot(scene),
        base,
        Visibility::Hidden,
    ));
}

/// Keep the background in the selected ship's faction colour.
fn sync_clear_color(state: Res<ViewerState>, mut clear_color: ResMut<ClearColor>) {
    if !state.is_changed() {
        return;
    }
    clear_color.0 = theme_color(state.selection().ship.theme().background);
}

/// Apply hover and roll to the ship model.
fn idle_motion(time: Res<Time>, mut query: Query<(&ShipModel, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (model, mut transform) in &mut query {
        let offset = idle_offset(t);
        transform.translation = model.base.translation + offset.translation;
        transform.rotation = model.base.rotation * offset.rotation;
    }
}

/// Idle displacement at time `t` seconds.
fn idle_offset(t: f32) -> Transform {
    Transform {
        translation: Vec3::Y * (t * HOVER_RATE).sin() * HOVER_AMPLITUDE,
        rotation: Quat::from_rotation_z((t * ROLL_RATE).sin() * ROLL_AMPLITUDE),
        ..default()
    }
}

fn spin_starfield(time: Res<Time>, mut query: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in &mut query {
        transform.rotate_y(spin.rate * time.delta_secs());
    }
}

/// Draw the tactical grid below the ship.
fn draw_tactical_grid(mut gizmos: Gizmos, state: Res<ViewerState>) {
    if !state.mode().shows_grid() {
        return;
    }

    // Grids are drawn in the XY plane of the isometry; tip it onto XZ.
    let isometry = Isometry3d::new(
        Vec3::new(0.0, GRID_HEIGHT, 0.0),
        Quat::from_rotation_x(FRAC_PI_2),
    );
    gizmos.grid(
        isometry,
        UVec2::splat(GRID_CELLS),
        Vec2::ONE,
        GRID_COLOR.with_alpha(0.25),
    );
    gizmos.grid(
        isometry,
        UVec2::splat(GRID_CELLS / GRID_SECTION_CELLS),
        Vec2::splat(GRID_SECTION_SIZE),
        GRID_COLOR.with_alpha(0.6),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_placement_uses_catalog_scale() {
        let avatar = ShipId::Avatar.config();
        let placement = model_placement(avatar);
        assert!((placement.scale.x - avatar.effective_scale()).abs() < f32::EPSILON);
        assert_eq!(placement.translation, avatar.position.unwrap_or(Vec3::ZERO));
    }

    #[test]
    fn test_idle_offset_bounds() {
        for step in 0..1000 {
            let offset = idle_offset(step as f32 * 0.1);
            assert!(offset.translation.y.abs() <= HOVER_AMPLITUDE + f32::EPSILON);
            let (_, _, roll) = offset.rotation.to_euler(EulerRot::XYZ);
            assert!(roll.abs() <= ROLL_AMPLITUDE + 1e-5);
        }
        assert!(idle_offset(0.0).translation.length() < f32::EPSILON);
    }

    #[test]
    fn test_scatter_counts_and_shell_radius() {
        let mut rng = rand::rng();
        let mut positions = Vec::new();
        let mut colors = Vec::new();
        scatter(
            &mut rng,
            StarCloud::Shell {
                count: 500,
                radius: 90.0,
                depth: 20.0,
                saturation: 0.5,
                brightness: 1.0,
            },
            &mut positions,
            &mut colors,
        );
        assert_eq!(positions.len(), 500);
        assert_eq!(colors.len(), 500);
        for p in &positions {
            let r = Vec3::from_array(*p).length();
            assert!((89.9..=110.1).contains(&r));
        }
    }
}
