//! Scene container: one object per body plus the starfield backdrop
//!
//! The scene holds no animation state of its own. Transforms come from the frame loop
//! through [`Scene::apply_frame`] and are uploaded in [`Scene::sync`].

use crate::{
    gfx::{
        camera::camera_utils::CameraManager,
        geometry::{generate_sphere, generate_starfield, StarfieldParams},
    },
    narrative::FrameOutput,
    page::Portfolio,
    wgpu_utils::BindGroupLayoutWithDesc,
};

use super::object::{Mesh, Object};

const SPHERE_LONGITUDE_SEGMENTS: u32 = 48;
const SPHERE_LATITUDE_SEGMENTS: u32 = 24;

/// Everything the renderer draws: camera, bodies and the star backdrop
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub starfield: Object,
}

impl Scene {
    pub fn new(camera_manager: CameraManager, starfield: StarfieldParams) -> Self {
        let starfield = Object::new("starfield", Mesh::from_geometry(&generate_starfield(starfield)))
            .with_color([1.0, 1.0, 1.0])
            .with_emissive(1.0);

        Self {
            camera_manager,
            objects: Vec::new(),
            starfield,
        }
    }

    /// Builds one placeholder sphere per body in the portfolio
    pub fn from_portfolio(
        portfolio: &Portfolio,
        camera_manager: CameraManager,
        starfield: StarfieldParams,
    ) -> Self {
        let mut scene = Self::new(camera_manager, starfield);
        for body in &portfolio.bodies {
            let sphere = generate_sphere(SPHERE_LONGITUDE_SEGMENTS, SPHERE_LATITUDE_SEGMENTS);
            let mut object = Object::new(body.identifier.clone(), Mesh::from_geometry(&sphere))
                .with_color(body.visual.color)
                .with_emissive(body.visual.emissive)
                .with_scale(body.visual.radius);
            object.set_world_matrix(cgmath::Matrix4::from_translation(body.base_position.into()));
            scene.objects.push(object);
        }
        log::info!("scene built with {} bodies", scene.objects.len());
        scene
    }

    /// Copies the frame's object transforms onto the matching scene objects
    ///
    /// Transforms for names the scene does not know are ignored.
    pub fn apply_frame(&mut self, frame: &FrameOutput) {
        for transform in &frame.transforms {
            if let Some(object) = self.get_object_mut(&transform.identifier) {
                object.set_world_matrix(transform.matrix);
            }
        }
    }

    /// Updates the camera matrices
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, layout);
        }
        self.starfield.init_gpu_resources(device, layout);
    }

    /// Pushes object uniforms to the GPU
    pub fn sync(&mut self, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut().filter(|o| o.visible) {
            object.update_transform(queue);
        }
    }

    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Bodies to draw this frame; the starfield is drawn separately
    pub fn visible_objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().filter(|o| o.visible)
    }
}
