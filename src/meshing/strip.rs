use super::TerrainMeshData;
use crate::{heightmap::HeightScale, HeightMap};

/// Converts `terrain` into one triangle strip per pair of adjacent rows.
pub fn heightmap_to_strip_mesh(terrain: &HeightMap, scale: HeightScale) -> TerrainMeshData {
    let (width, height) = (terrain.width(), terrain.height());

    let mut vertices = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            vertices.push(terrain.vertex_at(row, col, scale));
        }
    }

    let num_strips = height.saturating_sub(1);
    let idx = |row: usize, col: usize| -> u32 { (col + width * row) as u32 };

    let mut indices = Vec::with_capacity(num_strips * 2 * width);
    for row in 0..num_strips {
        for col in 0..width {
            indices.extend([idx(row, col), idx(row + 1, col)]);
        }
    }

    TerrainMeshData {
        vertices,
        indices,
        width,
        num_strips,
    }
}
