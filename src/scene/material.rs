use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypeUuid,
    render::{
        mesh::MeshVertexBufferLayout,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
        },
    },
};

pub const TERRAIN_VERTEX_SHADER: &str = "shaders/terrain_vertex.wgsl";
pub const TERRAIN_FRAGMENT_SHADER: &str = "shaders/terrain_fragment.wgsl";

/// Unlit terrain material, shaded by height between `min_height` and `max_height`.
#[derive(AsBindGroup, TypeUuid, Debug, Clone)]
#[uuid = "8f0c51d2-6b8e-4c07-9a53-2b3f5d1e7a44"]
pub struct TerrainMaterial {
    #[uniform(0)]
    pub base_color: Color,
    #[uniform(0)]
    pub min_height: f32,
    #[uniform(0)]
    pub max_height: f32,
}

impl TerrainMaterial {
    pub fn new(base_color: Color, min_height: f32, max_height: f32) -> Self {
        Self {
            base_color,
            min_height,
            max_height,
        }
    }
}

impl Material for TerrainMaterial {
    fn vertex_shader() -> ShaderRef {
        TERRAIN_VERTEX_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        TERRAIN_FRAGMENT_SHADER.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayout,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Consecutive strip triangles alternate winding.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
