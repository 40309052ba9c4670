use cgmath::{InnerSpace, Vector3};
use orrery::{
    gfx::camera::OrbitCamera,
    narrative::{CameraRig, FrameLoop, FrameOutput, OrbitControls, RigConfig},
    page::{Page, PageConfig, Portfolio},
};

const DT: f32 = 1.0 / 60.0;

struct Viewer {
    page: Page,
    frame_loop: FrameLoop,
    camera: OrbitCamera,
}

impl Viewer {
    fn new() -> Self {
        let portfolio = Portfolio::default();
        let page = Page::mount(&portfolio, 800.0, PageConfig::default()).unwrap();
        let rig = RigConfig::default();
        let frame_loop = FrameLoop::new(
            page.sections().clone(),
            portfolio.registry().unwrap(),
            Default::default(),
            CameraRig::new(rig),
            page.tracker_handle(),
        );
        let camera = OrbitCamera::new(rig.home.position, rig.home.look_at, 1.6);
        Self {
            page,
            frame_loop,
            camera,
        }
    }

    fn frame(&mut self) -> FrameOutput {
        self.page.update(DT);
        self.frame_loop.tick_with_controls(DT, &mut self.camera)
    }

    fn frames(&mut self, count: usize) -> FrameOutput {
        let mut last = self.frame();
        for _ in 1..count {
            last = self.frame();
        }
        last
    }
}

fn world_position(frame: &FrameOutput, identifier: &str) -> Vector3<f32> {
    frame
        .transforms
        .iter()
        .find(|t| t.identifier == identifier)
        .map(|t| t.world_position)
        .unwrap()
}

#[test]
fn navigation_brings_the_camera_to_the_section_planet() {
    let mut viewer = Viewer::new();
    viewer.frame();
    viewer.page.navigate_to("projects").unwrap();

    let frame = viewer.frames(900);
    assert_eq!(frame.focus.object_id(), Some("amethyst"));

    let planet = world_position(&frame, "amethyst");
    assert!((viewer.camera.target - planet).magnitude() < 1e-2);
    let expected_eye = planet + RigConfig::default().focus_offset;
    assert!((viewer.camera.position() - expected_eye).magnitude() < 1e-2);
}

#[test]
fn scrolling_back_to_top_returns_home() {
    let mut viewer = Viewer::new();
    viewer.frame();
    viewer.page.scroll_pages(2.0);
    viewer.frames(10);
    assert!(viewer.page.active_section().unwrap_or(0) > 0);

    viewer.page.scroll_to_top();
    let frame = viewer.frames(900);
    assert_eq!(frame.active_index, 0);
    assert!(!frame.focus.is_focused);

    let home = RigConfig::default().home;
    assert!((viewer.camera.target - home.look_at).magnitude() < 1e-2);
}

#[test]
fn drag_is_pulled_back_toward_the_rig_pose() {
    let mut viewer = Viewer::new();
    viewer.frame();
    viewer.page.navigate_to("about").unwrap();
    viewer.frames(900);
    let settled = viewer.camera.position();

    viewer.camera.rotate(0.4, 0.0);
    viewer.frame();
    let dragged = viewer.camera.position();
    assert!((dragged - settled).magnitude() > 0.1);

    viewer.frames(900);
    assert!((viewer.camera.position() - settled).magnitude() < 1e-2);
}

#[test]
fn unmounted_page_keeps_the_last_section() {
    let mut viewer = Viewer::new();
    viewer.frame();
    viewer.page.navigate_to("contact").unwrap();
    viewer.frames(120);
    viewer.page.unmount();

    viewer.page.scroll_to_top();
    let frame = viewer.frames(120);
    assert_eq!(frame.focus.object_id(), Some("cybertron"));
}
