pub mod generation;
pub mod heightmap;
pub mod meshing;
pub mod scene;

pub use heightmap::HeightMap;
