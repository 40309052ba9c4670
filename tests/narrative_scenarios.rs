use cgmath::{InnerSpace, Vector3};
use orrery::narrative::{
    CameraPose, CameraRig, FocusResolver, FocusTarget, FrameLoop, FrameOutput, IdleAnimator,
    RigConfig, RigState, SceneObjectRegistry, ScrollSectionTracker, SectionList, Smoothing,
};

const DT: f32 = 1.0 / 60.0;

fn close(a: Vector3<f32>, b: Vector3<f32>, tolerance: f32) -> bool {
    (a - b).magnitude() <= tolerance
}

fn two_sections() -> SectionList {
    SectionList::new([("home", "home"), ("about", "coruscant")]).unwrap()
}

fn registry() -> SceneObjectRegistry {
    let mut registry = SceneObjectRegistry::new();
    registry
        .register_object("coruscant", Vector3::new(-2.0, -1.0, 6.0), 0.3)
        .unwrap();
    registry
        .register_object("qonos", Vector3::new(-4.0, 1.0, 4.0), 0.3)
        .unwrap();
    registry
}

fn frame_loop(tracker: &ScrollSectionTracker) -> FrameLoop {
    FrameLoop::new(
        two_sections(),
        registry(),
        IdleAnimator::default(),
        CameraRig::new(RigConfig::default()),
        tracker.handle(),
    )
}

fn run(frame_loop: &mut FrameLoop, ticks: usize) -> FrameOutput {
    let mut last = frame_loop.tick(DT);
    for _ in 1..ticks {
        last = frame_loop.tick(DT);
    }
    last
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
fn entering_a_section_focuses_its_object() {
    let mut tracker = ScrollSectionTracker::new();
    let mut frame_loop = frame_loop(&tracker);
    tracker.on_section_entered(1);

    let frame = run(&mut frame_loop, 600);
    assert!(frame.focus.is_focused);
    assert_eq!(frame.focus.target, FocusTarget::Object("coruscant".into()));
    assert_eq!(frame_loop.rig().state(), &RigState::Focused("coruscant".into()));

    let planet = world_position(&frame, "coruscant");
    assert!(close(frame.pose.look_at, planet, 1e-3));
    assert!(close(
        frame.pose.position,
        planet + RigConfig::default().focus_offset,
        1e-3
    ));
}

#[test]
fn no_active_section_shows_home_and_keeps_rotating() {
    let tracker = ScrollSectionTracker::new();
    let mut frame_loop = frame_loop(&tracker);

    let first = frame_loop.tick(DT);
    assert_eq!(first.active_index, -1);
    assert!(!first.focus.is_focused);
    let rotation_after_one = frame_loop.registry().group_rotation();

    let frame = run(&mut frame_loop, 600);
    assert!(frame_loop.registry().group_rotation() > rotation_after_one);
    assert!(frame.pose.distance_to(&CameraPose::home()) < 1e-3);
}

#[test]
fn last_event_before_a_tick_wins() {
    let mut tracker = ScrollSectionTracker::new();
    let mut frame_loop = frame_loop(&tracker);
    tracker.on_section_entered(1);
    tracker.on_section_entered(0);

    let frame = run(&mut frame_loop, 600);
    assert_eq!(frame.active_index, 0);
    assert!(!frame.focus.is_focused);
    assert_eq!(frame_loop.rig().state(), &RigState::Home);
    assert!(frame.pose.distance_to(&CameraPose::home()) < 1e-3);
}

#[test]
fn pose_never_jumps_further_than_one_smoothing_step() {
    let mut tracker = ScrollSectionTracker::new();
    let mut frame_loop = frame_loop(&tracker);
    let smoothing = RigConfig::default().smoothing;

    let mut previous = frame_loop.rig().current();
    for tick in 0..400 {
        // Retarget every 50 ticks, mid-flight included
        if tick % 50 == 0 {
            tracker.on_section_entered(((tick / 50) % 2) as i64);
        }
        let frame = frame_loop.tick(DT);
        let (_, target) = frame_loop.rig().target_for(&frame.focus, frame_loop.registry());

        let alpha = smoothing.factor(DT);
        let step = (frame.pose.position - previous.position).magnitude();
        let bound = (target.position - previous.position).magnitude() * alpha;
        assert!(step <= bound + 1e-4, "tick {tick}: moved {step}, bound {bound}");
        previous = frame.pose;
    }
}

#[test]
fn focused_object_and_group_freeze_while_others_spin() {
    let mut tracker = ScrollSectionTracker::new();
    let mut frame_loop = frame_loop(&tracker);
    run(&mut frame_loop, 30);

    tracker.on_section_entered(1);
    frame_loop.tick(DT);
    let spin = frame_loop.registry().get("coruscant").unwrap().spin();
    let other = frame_loop.registry().get("qonos").unwrap().spin();
    let group = frame_loop.registry().group_rotation();

    run(&mut frame_loop, 60);
    assert_eq!(frame_loop.registry().get("coruscant").unwrap().spin(), spin);
    assert_eq!(frame_loop.registry().group_rotation(), group);
    assert!(frame_loop.registry().get("qonos").unwrap().spin() > other);
}

#[test]
fn out_of_range_indices_resolve_home() {
    let sections = two_sections();
    for index in [i64::MIN, -7, -1, 2, 3, 1000, i64::MAX] {
        let focus = FocusResolver::resolve(index, &sections);
        assert!(!focus.is_focused, "index {index}");
        assert!(focus.target.is_home());
    }
    assert!(FocusResolver::resolve(1, &sections).is_focused);
}

#[test]
fn unknown_target_degrades_to_home() {
    let sections = SectionList::new([("home", "home"), ("ghost", "nowhere")]).unwrap();
    let mut tracker = ScrollSectionTracker::new();
    let mut frame_loop = FrameLoop::new(
        sections,
        registry(),
        IdleAnimator::default(),
        CameraRig::new(RigConfig::default()),
        tracker.handle(),
    );
    tracker.on_section_entered(1);

    let frame = frame_loop.tick(DT);
    assert!(!frame.focus.is_focused);
    assert_eq!(frame_loop.rig().state(), &RigState::Home);
}

#[test]
fn per_tick_smoothing_matches_reference_step() {
    let mut tracker = ScrollSectionTracker::new();
    let rig = CameraRig::new(
        RigConfig::default().with_smoothing(Smoothing::per_tick(0.05).unwrap()),
    );
    let mut frame_loop = FrameLoop::new(
        two_sections(),
        registry(),
        IdleAnimator::default(),
        rig,
        tracker.handle(),
    );
    tracker.on_section_entered(1);

    let start = CameraPose::home();
    let frame = frame_loop.tick(DT);
    let planet = world_position(&frame, "coruscant");
    let expected = start.look_at + (planet - start.look_at) * 0.05;
    assert!(close(frame.pose.look_at, expected, 1e-5));
}
