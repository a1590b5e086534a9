mod strip;

pub use strip::heightmap_to_strip_mesh;

use std::ops::Range;

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

/// Row-major terrain vertices plus `num_strips` triangle strips of `2 * width` indices each.
pub struct TerrainMeshData {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    width: usize,
    num_strips: usize,
}

impl TerrainMeshData {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn num_strips(&self) -> usize {
        self.num_strips
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Index range occupied by strip `strip`.
    pub fn strip_range(&self, strip: usize) -> Range<usize> {
        let per_strip = 2 * self.width;
        strip * per_strip..(strip + 1) * per_strip
    }

    pub fn strip_indices(&self, strip: usize) -> &[u32] {
        &self.indices[self.strip_range(strip)]
    }

    /// Render mesh for a single strip.
    ///
    /// Only the two rows the strip touches are copied, so indices are rebased to
    /// the first vertex of row `strip`.
    pub fn strip_render_mesh(&self, strip: usize) -> Mesh {
        let first = strip * self.width;
        let vertices = self.vertices[first..first + 2 * self.width].to_vec();
        let indices = self
            .strip_indices(strip)
            .iter()
            .map(|&i| i - first as u32)
            .collect::<Vec<_>>();

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleStrip);
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
        mesh.set_indices(Some(Indices::U32(indices)));

        mesh
    }

    /// One render mesh per strip, in increasing row order.
    pub fn into_render_meshes(self) -> Vec<Mesh> {
        (0..self.num_strips)
            .map(|strip| self.strip_render_mesh(strip))
            .collect()
    }
}
