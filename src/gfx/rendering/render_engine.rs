//! WGPU-based rendering engine
//!
//! One lit pass over the scene plus an optional UI overlay on top.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use wgpu::TextureFormat;

use crate::{
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
            texture_resource::TextureResource,
        },
        scene::{
            object::{object_bind_group_layout, DrawObject},
            scene::Scene,
        },
    },
    wgpu_utils::BindGroupLayoutWithDesc,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const LIT_PIPELINE: &str = "Lit";
const STARS_PIPELINE: &str = "Stars";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.015,
    a: 1.0,
};

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,
    light_config: LightConfig,
}

impl RenderEngine {
    /// Creates a render engine drawing into the given window
    ///
    /// # Arguments
    /// * `window` - Surface target, kept alive by the engine
    /// * `width`, `height` - Initial surface size in physical pixels
    ///
    /// # Returns
    /// An error if no adapter or device is available or the shader pipelines cannot be
    /// built
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let object_layout = object_bind_group_layout(&device);

        let device = Arc::new(device);
        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("shader", include_str!("shader.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            object_layout.layout.clone(),
        ];
        pipeline_manager.register_pipeline(
            LIT_PIPELINE,
            PipelineConfig::default()
                .with_label("LIT")
                .with_shader("shader")
                .with_color_format(format)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(layouts.clone()),
        );
        pipeline_manager.register_pipeline(
            STARS_PIPELINE,
            PipelineConfig::default()
                .with_label("STARS")
                .with_shader("shader")
                .with_color_format(format)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_depth_write(false)
                .with_cull_mode(None)
                .with_bind_group_layouts(layouts),
        );
        pipeline_manager
            .create_all_pipelines()
            .context("failed to build render pipelines")?;

        Ok(Self {
            surface,
            device,
            queue: Arc::new(queue),
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_layout,
            light_config: LightConfig::default(),
        })
    }

    /// Draws the scene, then lets `ui_callback` record an overlay into the same frame
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    ///
    /// # Returns
    /// Only surface errors the engine cannot recover from, such as out-of-memory
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(STARS_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.draw_object(&scene.starfield);
            }

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(LIT_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for object in scene.visible_objects() {
                    render_pass.draw_object(object);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Updates camera and light uniform buffers
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            self.light_config,
        );
    }

    pub fn set_light(&mut self, light_config: LightConfig) {
        self.light_config = light_config;
    }

    /// Reconfigures the surface and recreates the depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Layout for per-object bind groups (group 1)
    pub fn object_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.object_layout
    }
}
