use bevy::{app::AppExit, prelude::*};

use super::{material::TerrainMaterial, LoadFailurePolicy, TerrainSettings};
use crate::{
    generation::perlin_terrain, heightmap::HeightMapError, meshing::heightmap_to_strip_mesh,
    HeightMap,
};

/// One drawn terrain strip, covering rows `row` and `row + 1`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TerrainStrip {
    pub row: usize,
}

/// Recorded when the heightmap could not be resolved and the policy is to abort.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct TerrainLoadFailure {
    pub message: String,
}

impl TerrainLoadFailure {
    /// Process status to exit with.
    pub const EXIT_CODE: i32 = 1;
}

/// Resolves the configured heightmap, applying the failure policy when it cannot be loaded.
///
/// Returns the load error when the policy is [`LoadFailurePolicy::Abort`].
pub fn load_terrain(settings: &TerrainSettings) -> Result<HeightMap, HeightMapError> {
    let err = match HeightMap::load(&settings.heightmap_path) {
        Ok(terrain) => {
            info!(
                "Loaded heightmap {} ({}x{})",
                settings.heightmap_path.display(),
                terrain.width(),
                terrain.height()
            );
            return Ok(terrain);
        }
        Err(err) => err,
    };

    error!("Failed to load heightmap: {}", err);

    match settings.on_load_failure {
        LoadFailurePolicy::Abort => Err(err),
        LoadFailurePolicy::Empty => {
            warn!("Continuing with an empty terrain");
            Ok(HeightMap::empty())
        }
        LoadFailurePolicy::Procedural => {
            warn!(
                "Generating {}x{} fallback terrain (seed {})",
                settings.fallback_size.0, settings.fallback_size.1, settings.fallback_seed
            );
            perlin_terrain(settings.fallback_size, settings.fallback_seed, settings.noise)
        }
    }
}

/// Builds the terrain and uploads one mesh per strip. Runs once at startup.
///
/// Strips are spawned in increasing row order. The opaque render phase sorts
/// draws by depth, so that order is not kept at draw time.
///
/// On an aborting load failure this inserts [`TerrainLoadFailure`] and sends
/// [`AppExit`] instead.
pub fn spawn_terrain(
    mut commands: Commands,
    settings: Res<TerrainSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<TerrainMaterial>>,
    mut exit: EventWriter<AppExit>,
) {
    let terrain = match load_terrain(&settings) {
        Ok(terrain) => terrain,
        Err(err) => {
            commands.insert_resource(TerrainLoadFailure {
                message: err.to_string(),
            });
            exit.send(AppExit);
            return;
        }
    };

    let mesh = heightmap_to_strip_mesh(&terrain, settings.scale);
    info!(
        "Built terrain mesh: {} vertices, {} indices, {} strips",
        mesh.vertex_count(),
        mesh.index_count(),
        mesh.num_strips()
    );

    let material = materials.add(TerrainMaterial::new(
        settings.base_color,
        settings.scale.apply(u8::MIN),
        settings.scale.apply(u8::MAX),
    ));

    for (row, strip) in mesh.into_render_meshes().into_iter().enumerate() {
        commands.spawn((
            MaterialMeshBundle {
                mesh: meshes.add(strip),
                material: material.clone(),
                ..default()
            },
            TerrainStrip { row },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FreeFlyEye, OrbitCamera, TerrainViewerPlugin};
    use bevy::asset::AssetPlugin;
    use image::{GrayImage, Luma};
    use std::path::PathBuf;

    fn settings(path: PathBuf, on_load_failure: LoadFailurePolicy) -> TerrainSettings {
        TerrainSettings {
            heightmap_path: path,
            on_load_failure,
            fallback_size: (6, 4),
            ..default()
        }
    }

    fn missing() -> PathBuf {
        PathBuf::from("no/such/heightmap.png")
    }

    fn headless_app(settings: TerrainSettings) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugin(AssetPlugin::default())
            .add_asset::<Mesh>()
            .add_asset::<TerrainMaterial>()
            .insert_resource(Input::<KeyCode>::default())
            .insert_resource(settings)
            .add_plugin(TerrainViewerPlugin);
        app
    }

    fn strip_rows(app: &mut App) -> Vec<usize> {
        let mut rows = app
            .world
            .query::<&TerrainStrip>()
            .iter(&app.world)
            .map(|strip| strip.row)
            .collect::<Vec<_>>();
        rows.sort();
        rows
    }

    #[test]
    fn procedural_fallback_uses_configured_size() {
        let terrain = load_terrain(&settings(missing(), LoadFailurePolicy::Procedural)).unwrap();

        assert_eq!((terrain.width(), terrain.height()), (6, 4));
    }

    #[test]
    fn empty_fallback() {
        let terrain = load_terrain(&settings(missing(), LoadFailurePolicy::Empty)).unwrap();

        assert!(terrain.is_empty());
    }

    #[test]
    fn abort_returns_load_error() {
        let err = load_terrain(&settings(missing(), LoadFailurePolicy::Abort)).unwrap_err();

        assert!(matches!(err, HeightMapError::Decode { .. }));
    }

    #[test]
    fn missing_image_aborts_by_default() {
        let settings = TerrainSettings {
            heightmap_path: missing(),
            ..default()
        };

        assert_eq!(settings.on_load_failure, LoadFailurePolicy::Abort);
        assert!(load_terrain(&settings).is_err());
    }

    #[test]
    fn loads_configured_image() {
        let path = std::env::temp_dir().join(format!(
            "heightmap_terrain_scene_{}.png",
            std::process::id()
        ));
        GrayImage::from_pixel(5, 3, Luma([9])).save(&path).unwrap();

        let terrain = load_terrain(&settings(path.clone(), LoadFailurePolicy::Abort));
        std::fs::remove_file(&path).ok();

        let terrain = terrain.unwrap();
        assert_eq!((terrain.width(), terrain.height()), (5, 3));
    }

    #[test]
    fn gpu_resources_are_created_once() {
        let mut app = headless_app(settings(missing(), LoadFailurePolicy::Procedural));
        for _ in 0..5 {
            app.update();
        }

        assert_eq!(app.world.resource::<Assets<Mesh>>().len(), 3);
        assert_eq!(app.world.resource::<Assets<TerrainMaterial>>().len(), 1);
        assert_eq!(strip_rows(&mut app), vec![0, 1, 2]);
    }

    #[test]
    fn empty_terrain_spawns_no_strips() {
        let mut app = headless_app(settings(missing(), LoadFailurePolicy::Empty));
        app.update();
        app.update();

        assert_eq!(app.world.resource::<Assets<Mesh>>().len(), 0);
        assert!(strip_rows(&mut app).is_empty());
        assert!(app.world.resource::<Events<AppExit>>().is_empty());
    }

    #[test]
    fn abort_policy_records_failure_and_requests_exit() {
        let mut app = headless_app(settings(missing(), LoadFailurePolicy::Abort));
        app.update();

        let failure = app.world.resource::<TerrainLoadFailure>();
        assert!(failure.message.contains("no/such/heightmap.png"));
        assert!(!app.world.resource::<Events<AppExit>>().is_empty());
        assert!(strip_rows(&mut app).is_empty());
    }

    #[test]
    fn fallback_policy_records_no_failure() {
        let mut app = headless_app(settings(missing(), LoadFailurePolicy::Empty));
        app.update();

        assert!(app.world.get_resource::<TerrainLoadFailure>().is_none());
    }

    #[test]
    fn free_fly_keys_leave_orbit_view_untouched() {
        let mut app = headless_app(settings(missing(), LoadFailurePolicy::Empty));
        app.world
            .resource_mut::<Input<KeyCode>>()
            .press(KeyCode::W);
        app.update();
        app.update();

        let eye = app.world.resource::<FreeFlyEye>().eye;
        assert_ne!(eye, FreeFlyEye::default().eye);

        let elapsed = app.world.resource::<Time>().elapsed_seconds();
        let (orbit, transform) = app
            .world
            .query::<(&OrbitCamera, &Transform)>()
            .single(&app.world);
        assert_eq!(*transform, orbit.view_at(elapsed));
    }
}
