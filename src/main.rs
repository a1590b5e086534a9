use heightmap_terrain::scene::{TerrainLoadFailure, TerrainMaterial, TerrainViewerPlugin};

use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::WindowResolution,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Procedural Terrain Gen".into(),
                        resolution: WindowResolution::new(800., 600.),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn".into(),
                }),
        )
        .add_plugin(MaterialPlugin::<TerrainMaterial>::default())
        .add_plugin(TerrainViewerPlugin)
        .add_system(exit_on_load_failure)
        .run();
}

// The winit runner never hands control back to `main` and `AppExit` carries no status.
fn exit_on_load_failure(failure: Option<Res<TerrainLoadFailure>>) {
    if let Some(failure) = failure {
        error!("Aborting: {}", failure.message);
        std::process::exit(TerrainLoadFailure::EXIT_CODE);
    }
}
