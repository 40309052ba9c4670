//! Renderable objects, their meshes and per-object uniforms

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    gfx::geometry::GeometryData,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use super::vertex::Vertex3D;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self {
            index_count: indices.len() as u32,
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    fn init_gpu_resources(&mut self, device: &wgpu::Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Per-object uniform (group 1). MUST match `ObjectData` in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// rgb colour, `w` is the emissive factor
    pub color: [f32; 4],
}

pub type ObjectUBO = UniformBuffer<ObjectUniform>;

/// Layout shared by every object's bind group
pub fn object_bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

pub struct ObjectGpuResources {
    pub uniform_buffer: ObjectUBO,
    pub bind_group: wgpu::BindGroup,
}

/// A drawable body: one mesh, a flat colour and a world transform
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub color: [f32; 3],
    /// 0 = lit only by the light, 1 = fully self-illuminated
    pub emissive: f32,
    /// Uniform scale applied under the world transform
    pub scale: f32,
    pub transform: Matrix4<f32>,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            color: [1.0, 1.0, 1.0],
            emissive: 0.0,
            scale: 1.0,
            transform: Matrix4::identity(),
            visible: true,
            gpu_resources: None,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive.clamp(0.0, 1.0);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self.transform = Matrix4::from_scale(scale);
        self
    }

    /// Places the object with a world matrix; the object's own scale is applied first
    pub fn set_world_matrix(&mut self, matrix: Matrix4<f32>) {
        self.transform = matrix * Matrix4::from_scale(self.scale);
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            model: self.transform.into(),
            color: [self.color[0], self.color[1], self.color[2], self.emissive],
        }
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        self.mesh.init_gpu_resources(device, &self.name);

        let uniform_buffer = ObjectUBO::new_with_data(device, &self.uniform());
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform_buffer.binding_resource())
            .create(device, &format!("{} Bind Group", self.name));

        self.gpu_resources = Some(ObjectGpuResources {
            uniform_buffer,
            bind_group,
        });
        log::debug!(
            "uploaded `{}`: {} vertices, {} triangles",
            self.name,
            self.mesh.vertex_count(),
            self.mesh.index_count() / 3
        );
    }

    /// Syncs transform and colour to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let uniform = self.uniform();
        if let Some(gpu_resources) = self.gpu_resources.as_mut() {
            gpu_resources.uniform_buffer.update_content(queue, uniform);
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Not uploaded yet
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    /// Binds the object's uniforms at group 1 and draws its mesh
    fn draw_object(&mut self, object: &'b Object) {
        let Some(bind_group) = object.bind_group() else {
            return;
        };
        self.set_bind_group(1, bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_sphere;
    use cgmath::Vector3;

    #[test]
    fn test_world_matrix_keeps_scale() {
        let mut object = Object::new("p", Mesh::from_geometry(&generate_sphere(8, 4))).with_scale(0.5);
        object.set_world_matrix(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)));

        let uniform = object.uniform();
        assert_eq!(uniform.model[0][0], 0.5);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_uniform_packs_emissive_into_alpha() {
        let object = Object::new("s", Mesh::from_geometry(&generate_sphere(8, 4)))
            .with_color([1.0, 0.5, 0.0])
            .with_emissive(2.0);
        assert_eq!(object.uniform().color, [1.0, 0.5, 0.0, 1.0]);
        assert!(object.bind_group().is_none());
    }
}
