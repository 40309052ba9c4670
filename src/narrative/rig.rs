//! Camera rig: chases a target pose derived from the current focus
//!
//! The rig has two states, [`RigState::Home`] and [`RigState::Focused`]. Changing state
//! never moves the camera directly; it only changes the target pose that the
//! interpolator chases each frame, so the pose stays continuous across any number of
//! focus changes.

use cgmath::{InnerSpace, Vector3};

use super::error::NarrativeError;
use super::focus::Focus;
use super::registry::WorldPositions;

/// Overview camera position
pub const HOME_POSITION: [f32; 3] = [0.0, 15.0, 20.0];
/// Overview look-at point
pub const HOME_LOOK_AT: [f32; 3] = [-7.0, 2.0, 10.0];
/// Camera offset from a focused object: above and behind it
pub const FOCUS_OFFSET: [f32; 3] = [0.0, 2.0, 4.0];

/// Per-tick blend factor the overview scene was tuned with
pub const REFERENCE_ALPHA: f32 = 0.05;
/// Tick rate [`REFERENCE_ALPHA`] was tuned at
pub const REFERENCE_TICK_RATE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vector3<f32>,
    pub look_at: Vector3<f32>,
}

impl CameraPose {
    pub fn new(position: Vector3<f32>, look_at: Vector3<f32>) -> Self {
        Self { position, look_at }
    }

    pub fn home() -> Self {
        Self::new(HOME_POSITION.into(), HOME_LOOK_AT.into())
    }

    /// Largest distance between matching components of two poses
    pub fn distance_to(&self, other: &CameraPose) -> f32 {
        (self.position - other.position)
            .magnitude()
            .max((self.look_at - other.look_at).magnitude())
    }
}

/// How the current pose approaches the target each tick
///
/// Only buildable through its validating constructors, so a rig always blends with a
/// factor in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing(Kind);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    /// Constant blend per tick regardless of elapsed time. Convergence speed depends on
    /// frame rate; kept for parity with fixed-step hosts.
    PerTick { alpha: f32 },
    /// `alpha = 1 - exp(-rate * dt)`, frame-rate independent
    Exponential { rate: f32 },
}

impl Smoothing {
    /// Fixed blend factor per tick, in the open interval `(0, 1)`
    pub fn per_tick(alpha: f32) -> Result<Self, NarrativeError> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Smoothing(Kind::PerTick { alpha }))
        } else {
            Err(NarrativeError::InvalidAlpha(alpha))
        }
    }

    /// Frame-rate independent blend converging at `rate` per second
    pub fn exponential(rate: f32) -> Result<Self, NarrativeError> {
        if rate.is_finite() && rate > 0.0 {
            Ok(Smoothing(Kind::Exponential { rate }))
        } else {
            Err(NarrativeError::InvalidRate(rate))
        }
    }

    /// Exponential smoothing that converges like `alpha` applied at `tick_rate` Hz
    pub fn matching_per_tick(alpha: f32, tick_rate: f32) -> Result<Self, NarrativeError> {
        Self::per_tick(alpha)?;
        Self::exponential(-(1.0 - alpha).ln() * tick_rate)
    }

    pub fn is_frame_rate_independent(&self) -> bool {
        matches!(self.0, Kind::Exponential { .. })
    }

    /// Blend factor for a frame of `delta_time` seconds, in `[0, 1]`
    pub fn factor(&self, delta_time: f32) -> f32 {
        let alpha = match self.0 {
            Kind::PerTick { alpha } => alpha,
            Kind::Exponential { rate } => {
                if delta_time.is_finite() && delta_time > 0.0 {
                    1.0 - (-rate * delta_time).exp()
                } else {
                    0.0
                }
            }
        };
        alpha.clamp(0.0, 1.0)
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing(Kind::Exponential {
            rate: -(1.0 - REFERENCE_ALPHA).ln() * REFERENCE_TICK_RATE,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigConfig {
    pub home: CameraPose,
    pub focus_offset: Vector3<f32>,
    pub smoothing: Smoothing,
}

impl RigConfig {
    pub fn with_home(mut self, home: CameraPose) -> Self {
        self.home = home;
        self
    }

    pub fn with_focus_offset(mut self, offset: Vector3<f32>) -> Self {
        self.focus_offset = offset;
        self
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            home: CameraPose::home(),
            focus_offset: FOCUS_OFFSET.into(),
            smoothing: Smoothing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigState {
    Home,
    Focused(String),
}

/// Camera-control collaborator the rig nudges every frame
///
/// Implementations own the real camera. The rig reads the position (which may carry
/// manual drag input), writes back a blended position and look-at, then lets the
/// controls apply their own pending input.
pub trait OrbitControls {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    fn set_target(&mut self, target: Vector3<f32>);
    fn update(&mut self);
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: RigConfig,
    current: CameraPose,
    state: RigState,
}

impl CameraRig {
    /// Starts at the configured home pose
    pub fn new(config: RigConfig) -> Self {
        Self::with_pose(config, config.home)
    }

    pub fn with_pose(config: RigConfig, current: CameraPose) -> Self {
        Self {
            config,
            current,
            state: RigState::Home,
        }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn current(&self) -> CameraPose {
        self.current
    }

    pub fn state(&self) -> &RigState {
        &self.state
    }

    /// Desired state and pose for `focus`, using live world positions
    ///
    /// A focused object the capability cannot locate yields the home pose.
    pub fn target_for(&self, focus: &Focus, positions: &dyn WorldPositions) -> (RigState, CameraPose) {
        if let Some(id) = focus.object_id() {
            if let Some(position) = positions.world_position(id) {
                return (
                    RigState::Focused(id.to_string()),
                    CameraPose::new(position + self.config.focus_offset, position),
                );
            }
        }
        (RigState::Home, self.config.home)
    }

    /// Advances the current pose one frame toward the target for `focus`
    pub fn update(
        &mut self,
        delta_time: f32,
        focus: &Focus,
        positions: &dyn WorldPositions,
    ) -> CameraPose {
        let (state, target) = self.target_for(focus, positions);
        if state != self.state {
            log::info!("camera rig: {:?} -> {:?}", self.state, state);
            self.state = state;
        }

        let alpha = self.config.smoothing.factor(delta_time);
        self.current.position += (target.position - self.current.position) * alpha;
        self.current.look_at += (target.look_at - self.current.look_at) * alpha;
        self.current
    }

    /// Same as [`CameraRig::update`] but composes with a camera-control collaborator
    pub fn update_with_controls(
        &mut self,
        delta_time: f32,
        focus: &Focus,
        positions: &dyn WorldPositions,
        controls: &mut dyn OrbitControls,
    ) -> CameraPose {
        self.current.position = controls.position();
        let pose = self.update(delta_time, focus, positions);

        controls.set_position(pose.position);
        controls.set_target(pose.look_at);
        controls.update();

        self.current.position = controls.position();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::section::FocusTarget;
    use std::collections::HashMap;

    struct Fixed(HashMap<&'static str, Vector3<f32>>);

    impl WorldPositions for Fixed {
        fn world_position(&self, identifier: &str) -> Option<Vector3<f32>> {
            self.0.get(identifier).copied()
        }
    }

    fn positions() -> Fixed {
        Fixed(HashMap::from([("coruscant", Vector3::new(-2.0, -1.0, 6.0))]))
    }

    fn focused(id: &str) -> Focus {
        Focus {
            target: FocusTarget::Object(id.into()),
            is_focused: true,
        }
    }

    struct RecordingControls {
        position: Vector3<f32>,
        target: Vector3<f32>,
        updates: usize,
    }

    impl RecordingControls {
        fn at(position: Vector3<f32>) -> Self {
            Self {
                position,
                target: Vector3::new(0.0, 0.0, 0.0),
                updates: 0,
            }
        }
    }

    impl OrbitControls for RecordingControls {
        fn position(&self) -> Vector3<f32> {
            self.position
        }
        fn set_position(&mut self, position: Vector3<f32>) {
            self.position = position;
        }
        fn set_target(&mut self, target: Vector3<f32>) {
            self.target = target;
        }
        fn update(&mut self) {
            self.updates += 1;
        }
    }

    #[test]
    fn test_smoothing_validation() {
        assert!(Smoothing::per_tick(0.0).is_err());
        assert!(Smoothing::per_tick(1.0).is_err());
        assert!(Smoothing::per_tick(0.05).is_ok());
        assert!(Smoothing::exponential(0.0).is_err());
        assert!(Smoothing::exponential(f32::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_smoothing_never_reaches_the_rig() {
        for alpha in [-0.5, 0.0, 1.0, 2.0, f32::NAN] {
            assert!(Smoothing::per_tick(alpha).is_err(), "alpha {alpha} accepted");
        }
        for rate in [-5.0, 0.0, f32::NAN, f32::NEG_INFINITY] {
            assert!(Smoothing::exponential(rate).is_err(), "rate {rate} accepted");
        }

        // The only smoothing a rig can hold keeps every blend inside [0, 1]
        let fast = Smoothing::exponential(f32::MAX).unwrap();
        for dt in [0.0, 1e-6, 1.0 / 60.0, 1.0, 1e9, f32::INFINITY, -1.0] {
            let factor = fast.factor(dt);
            assert!((0.0..=1.0).contains(&factor), "dt {dt}: {factor}");
        }

        let mut rig = CameraRig::new(RigConfig::default().with_smoothing(fast));
        let target = positions().world_position("coruscant").unwrap();
        let start = (CameraPose::home().look_at - target).magnitude();
        for _ in 0..120 {
            let pose = rig.update(1.0 / 60.0, &focused("coruscant"), &positions());
            assert!((pose.look_at - target).magnitude() <= start + 1e-4);
        }
    }

    #[test]
    fn test_default_smoothing_matches_reference_at_sixty_hz() {
        let factor = Smoothing::default().factor(1.0 / 60.0);
        assert!((factor - REFERENCE_ALPHA).abs() < 1e-4);

        assert!(Smoothing::default().is_frame_rate_independent());
        assert!(!Smoothing::per_tick(0.05).unwrap().is_frame_rate_independent());

        let matched = Smoothing::matching_per_tick(0.1, 30.0).unwrap();
        assert!(matched.is_frame_rate_independent());
        assert!((matched.factor(1.0 / 30.0) - 0.1).abs() < 1e-4);
        assert!(Smoothing::matching_per_tick(1.5, 30.0).is_err());
    }

    #[test]
    fn test_exponential_is_frame_rate_independent() {
        let smoothing = Smoothing::default();
        // Remaining error after one second at 30 Hz vs 144 Hz
        let remaining = |hz: f32| (1.0 - smoothing.factor(1.0 / hz)).powf(hz);
        assert!((remaining(30.0) - remaining(144.0)).abs() < 1e-4);
    }

    #[test]
    fn test_focus_target_offsets_from_object() {
        let rig = CameraRig::new(RigConfig::default());
        let (state, pose) = rig.target_for(&focused("coruscant"), &positions());
        assert_eq!(state, RigState::Focused("coruscant".into()));
        assert_eq!(pose.look_at, Vector3::new(-2.0, -1.0, 6.0));
        assert_eq!(pose.position, Vector3::new(-2.0, 1.0, 10.0));
    }

    #[test]
    fn test_custom_home_and_offset() {
        let home = CameraPose::new(Vector3::new(0.0, 30.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        let rig = CameraRig::new(
            RigConfig::default()
                .with_home(home)
                .with_focus_offset(Vector3::new(1.0, 0.0, 0.0)),
        );
        assert_eq!(rig.current(), home);
        assert_eq!(rig.target_for(&Focus::home(), &positions()).1, home);
        let (_, pose) = rig.target_for(&focused("coruscant"), &positions());
        assert_eq!(pose.position, Vector3::new(-1.0, -1.0, 6.0));
    }

    #[test]
    fn test_unlocatable_focus_uses_home() {
        let rig = CameraRig::new(RigConfig::default());
        let (state, pose) = rig.target_for(&focused("alderaan"), &positions());
        assert_eq!(state, RigState::Home);
        assert_eq!(pose, CameraPose::home());
    }

    #[test]
    fn test_retarget_mid_flight_never_jumps() {
        let config = RigConfig::default().with_smoothing(Smoothing::per_tick(0.05).unwrap());
        let mut rig = CameraRig::new(config);
        let positions = positions();

        for tick in 0..120 {
            // Flip the target every 7 ticks
            let focus = if (tick / 7) % 2 == 0 {
                focused("coruscant")
            } else {
                Focus::home()
            };
            let before = rig.current();
            let (_, target) = rig.target_for(&focus, &positions);
            let after = rig.update(1.0 / 60.0, &focus, &positions);

            let step = (after.position - before.position).magnitude();
            let bound = (target.position - before.position).magnitude() * 0.05;
            assert!(step <= bound + 1e-5, "tick {tick}: {step} > {bound}");
        }
        // Tick 119 falls in a home window
        assert_eq!(*rig.state(), RigState::Home);
    }

    #[test]
    fn test_controls_receive_look_at_every_frame() {
        let mut rig = CameraRig::new(RigConfig::default());
        let mut controls = RecordingControls::at(CameraPose::home().position);

        for _ in 0..3 {
            let pose =
                rig.update_with_controls(1.0 / 60.0, &focused("coruscant"), &positions(), &mut controls);
            assert_eq!(controls.target, pose.look_at);
            assert_eq!(controls.position, pose.position);
        }
        assert_eq!(controls.updates, 3);
    }

    #[test]
    fn test_manual_position_is_read_back_not_overwritten() {
        let mut rig = CameraRig::new(RigConfig::default());
        let dragged = Vector3::new(30.0, 15.0, 0.0);
        let mut controls = RecordingControls::at(dragged);

        let pose = rig.update_with_controls(1.0 / 60.0, &Focus::home(), &positions(), &mut controls);
        let alpha = Smoothing::default().factor(1.0 / 60.0);
        let expected = dragged + (CameraPose::home().position - dragged) * alpha;
        assert!((pose.position - expected).magnitude() < 1e-4);
    }
}
