mod camera;
mod input;
mod material;
mod terrain;

pub use camera::{orbit_camera, OrbitCamera};
pub use input::{exit_on_escape, free_fly_input, FreeFlyEye};
pub use material::{TerrainMaterial, TERRAIN_FRAGMENT_SHADER, TERRAIN_VERTEX_SHADER};
pub use terrain::{load_terrain, spawn_terrain, TerrainLoadFailure, TerrainStrip};

use std::path::PathBuf;

use bevy::{prelude::*, render::camera::Projection};

use crate::{generation::NoiseSettings, heightmap::HeightScale};

/// What to do when the heightmap image cannot be loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadFailurePolicy {
    /// Log, record [`TerrainLoadFailure`] and request exit.
    #[default]
    Abort,
    /// Log and render nothing.
    Empty,
    /// Log and generate a Perlin terrain instead.
    Procedural,
}

#[derive(Resource, Clone, Debug)]
pub struct TerrainSettings {
    pub heightmap_path: PathBuf,
    pub scale: HeightScale,
    pub on_load_failure: LoadFailurePolicy,
    /// `(width, height)` of the procedural fallback.
    pub fallback_size: (usize, usize),
    pub fallback_seed: u32,
    pub noise: NoiseSettings,
    pub base_color: Color,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            heightmap_path: PathBuf::from("resources/iceland_heightmap.png"),
            scale: HeightScale::default(),
            on_load_failure: LoadFailurePolicy::default(),
            fallback_size: (513, 513),
            fallback_seed: 2,
            noise: NoiseSettings::default(),
            base_color: Color::rgb(1.0, 0.847, 0.569),
        }
    }
}

/// Perspective used by the terrain camera.
pub fn terrain_projection() -> PerspectiveProjection {
    PerspectiveProjection {
        fov: 65f32.to_radians(),
        aspect_ratio: 800. / 600.,
        near: 0.1,
        far: 1000.,
    }
}

pub fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3dBundle {
            transform: orbit.view_at(0.),
            projection: Projection::Perspective(terrain_projection()),
            ..default()
        },
        orbit,
    ));
}

/// Terrain scene: loads the heightmap once, orbits the camera every frame.
///
/// Expects `Assets<Mesh>` and `Assets<TerrainMaterial>` to be registered, which
/// `DefaultPlugins` plus `MaterialPlugin::<TerrainMaterial>` provide.
pub struct TerrainViewerPlugin;

impl Plugin for TerrainViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainSettings>()
            .init_resource::<FreeFlyEye>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_startup_system(spawn_terrain)
            .add_startup_system(spawn_camera)
            .add_systems((exit_on_escape, free_fly_input, orbit_camera).chain());
    }
}
