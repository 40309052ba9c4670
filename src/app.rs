//! Application entry point and window event handling
//!
//! [`OrreryApp`] wires the page, the narrative frame loop and the renderer together and
//! drives them from winit's event loop. Each redraw advances the page, ticks the
//! frame loop against the orbit camera, syncs the scene to the GPU and draws the
//! overlay on top.

use std::{sync::Arc, time::Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        geometry::StarfieldParams,
        rendering::RenderEngine,
        resources::LightConfig,
        scene::Scene,
    },
    narrative::{CameraRig, FrameLoop, IdleAnimator, RigConfig},
    page::{Page, PageConfig, Portfolio},
    ui::{page_overlay, OverlayModel, UiManager},
};

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial logical window size
    pub window_size: (u32, u32),
    pub rig: RigConfig,
    pub idle: IdleAnimator,
    pub page: PageConfig,
    pub starfield: StarfieldParams,
    pub light: LightConfig,
    /// Longest frame step fed to the simulation, in seconds
    pub max_frame_time: f32,
    pub font_size: f32,
}

impl ViewerConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_rig(mut self, rig: RigConfig) -> Self {
        self.rig = rig;
        self
    }

    pub fn with_idle(mut self, idle: IdleAnimator) -> Self {
        self.idle = idle;
        self
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    pub fn with_starfield(mut self, starfield: StarfieldParams) -> Self {
        self.starfield = starfield;
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = light;
        self
    }

    pub fn with_max_frame_time(mut self, seconds: f32) -> Self {
        self.max_frame_time = seconds;
        self
    }

    /// Clamps a measured frame time into the range the simulation accepts
    pub fn frame_step(&self, elapsed: f32) -> f32 {
        if elapsed.is_finite() {
            elapsed.clamp(0.0, self.max_frame_time)
        } else {
            0.0
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            window_size: (1280, 800),
            rig: RigConfig::default(),
            idle: IdleAnimator::default(),
            page: PageConfig::default(),
            starfield: StarfieldParams::default(),
            light: LightConfig::default(),
            max_frame_time: 0.1,
            font_size: 18.0,
        }
    }
}

pub struct OrreryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    portfolio: Portfolio,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    page: Page,
    frame_loop: FrameLoop,
    last_frame: Instant,
    pending_navigation: Option<String>,
    error: Option<anyhow::Error>,
}

impl OrreryApp {
    /// Validates the portfolio and builds the page, narrative core and scene
    ///
    /// The window and GPU are created once the event loop starts.
    pub fn new(portfolio: Portfolio, config: ViewerConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let page = Page::mount(&portfolio, config.window_size.1 as f32, config.page)
            .context("invalid page configuration")?;
        let registry = portfolio.registry().context("invalid scene objects")?;
        let frame_loop = FrameLoop::new(
            page.sections().clone(),
            registry,
            config.idle,
            CameraRig::new(config.rig),
            page.tracker_handle(),
        );

        let home = config.rig.home;
        let aspect = config.window_size.0 as f32 / config.window_size.1.max(1) as f32;
        let camera = OrbitCamera::new(home.position, home.look_at, aspect);
        let camera_manager = CameraManager::new(camera, CameraController::default());
        let scene = Scene::from_portfolio(&portfolio, camera_manager, config.starfield);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                portfolio,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                page,
                frame_loop,
                last_frame: Instant::now(),
                pending_navigation: None,
                error: None,
            },
        })
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(width, height);
        }
        if let Err(error) = self.page.resize(height as f32) {
            log::warn!("page resize ignored: {}", error);
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        match key_code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::PageDown | KeyCode::Space => self.page.scroll_pages(1.0),
            KeyCode::PageUp => self.page.scroll_pages(-1.0),
            KeyCode::ArrowDown => self.page.scroll_lines(1.0),
            KeyCode::ArrowUp => self.page.scroll_lines(-1.0),
            KeyCode::Home => self.page.scroll_to_top(),
            KeyCode::End => self.page.scroll_to_bottom(),
            _ => (),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = self
            .config
            .frame_step((now - self.last_frame).as_secs_f32());
        self.last_frame = now;

        if let Some(section) = self.pending_navigation.take() {
            if let Err(error) = self.page.navigate_to(&section) {
                log::warn!("{}", error);
            }
        }

        self.page.update(delta_time);
        let frame = self
            .frame_loop
            .tick_with_controls(delta_time, &mut self.scene.camera_manager.camera);
        self.scene.apply_frame(&frame);
        self.scene.update();

        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return;
        };

        self.scene.sync(render_engine.queue());
        render_engine.update(self.scene.camera_manager.camera.uniform);

        let model = OverlayModel::build(&self.portfolio, &self.page, &frame);
        let mut clicked = None;

        let result = match self.ui_manager.as_mut() {
            Some(ui_manager) => render_engine.render_frame(
                &self.scene,
                Some(|device: &wgpu::Device, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, window, view, |ui| {
                        clicked = page_overlay(ui, &model);
                    });
                }),
            ),
            None => render_engine.render_frame(
                &self.scene,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            ),
        };

        if let Err(error) = result {
            self.fail(event_loop, anyhow::Error::new(error).context("surface failure"));
            return;
        }

        if clicked.is_some() {
            self.pending_navigation = clicked;
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                self.fail(event_loop, anyhow::Error::new(error).context("failed to create window"));
                return;
            }
        };
        let (width, height) = window.inner_size().into();

        let surface_target = window.clone();
        let mut renderer = match pollster::block_on(RenderEngine::new(surface_target, width, height)) {
            Ok(renderer) => renderer,
            Err(error) => {
                self.fail(event_loop, error);
                return;
            }
        };
        renderer.set_light(self.config.light);

        self.scene
            .init_gpu_resources(renderer.device(), renderer.object_layout());
        self.ui_manager = Some(UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
            self.config.font_size,
        ));

        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.resize(width, height);
        self.last_frame = Instant::now();
        log::info!(
            "window ready at {}x{}, {} bodies",
            width,
            height,
            self.scene.get_object_count()
        );
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI sees input first; wheel input always scrolls the page
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            let captured = ui_manager.handle_input(&window, &ui_event);
            if captured && !matches!(event, WindowEvent::MouseWheel { .. }) {
                return;
            }
        }

        match event {
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, lines) => self.page.scroll_lines(-lines),
                MouseScrollDelta::PixelDelta(position) => {
                    self.page.scroll_pixels(-position.y as f32)
                }
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code),
            WindowEvent::Focused(false) => self.scene.camera_manager.controller.release(),
            WindowEvent::Resized(PhysicalSize { width, height }) => self.resize(width, height),
            WindowEvent::CloseRequested => {
                self.page.unmount();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_mouse())
        {
            return;
        }

        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_step_is_clamped() {
        let config = ViewerConfig::default();
        assert_eq!(config.frame_step(0.016), 0.016);
        assert_eq!(config.frame_step(5.0), 0.1);
        assert_eq!(config.frame_step(-1.0), 0.0);
        assert_eq!(config.frame_step(f32::NAN), 0.0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ViewerConfig::default()
            .with_title("Tour")
            .with_window_size(640, 480)
            .with_max_frame_time(0.05);
        assert_eq!(config.title, "Tour");
        assert_eq!(config.window_size, (640, 480));
        assert_eq!(config.frame_step(1.0), 0.05);
        assert_eq!(config.rig, RigConfig::default());
    }

    #[test]
    fn test_component_configs_are_carried() {
        let rig = RigConfig::default().with_focus_offset(cgmath::Vector3::new(0.0, 1.0, 2.0));
        let idle = IdleAnimator::default().with_group_rate(0.2).unwrap();
        let page = PageConfig::default().with_fade_duration(0.4);
        let starfield = StarfieldParams {
            count: 10,
            ..StarfieldParams::default()
        };
        let light = LightConfig {
            intensity: 2.0,
            ..LightConfig::default()
        };

        let config = ViewerConfig::default()
            .with_rig(rig)
            .with_idle(idle)
            .with_page(page)
            .with_starfield(starfield)
            .with_light(light);
        assert_eq!(config.rig, rig);
        assert_eq!(config.idle.group_rate(), 0.2);
        assert_eq!(config.page, page);
        assert_eq!(config.starfield.count, 10);
        assert_eq!(config.light, light);
    }
}
