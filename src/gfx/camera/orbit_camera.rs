//! Orbit camera around a target point
//!
//! The camera keeps eye and target as the source of truth and re-derives its
//! spherical coordinates on every update, so positions written from outside (the
//! camera rig) and queued drag rotation compose.

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::narrative::OrbitControls;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Orbit camera in the style of a web "orbit controls" widget
///
/// The eye orbits `target` on a sphere. Drag input accumulates into pending yaw/pitch
/// that is applied on the next [`OrbitControls::update`], so automatic camera motion
/// written between frames composes with whatever the user is doing.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    /// Creates a camera at `eye` looking at `target`, with a 60° vertical field of view
    pub fn new(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            eye,
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::FRAC_PI_3),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        };
        camera.sync_spherical();
        camera
    }

    /// Queues a rotation around the target, applied on the next update
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.pending_yaw += yaw_delta;
        self.pending_pitch += pitch_delta;
    }

    pub fn has_pending_rotation(&self) -> bool {
        self.pending_yaw != 0.0 || self.pending_pitch != 0.0
    }

    /// Recomputes distance, yaw and pitch from the current eye and target
    fn sync_spherical(&mut self) {
        let offset = self.eye - self.target;
        self.distance = offset.magnitude();
        if self.distance > f32::EPSILON {
            self.yaw = offset.x.atan2(offset.z);
            self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

impl OrbitControls for OrbitCamera {
    fn position(&self) -> Vector3<f32> {
        self.eye
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.eye = position;
    }

    fn set_target(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    /// Re-derives the orbit from eye and target, then applies pending drag rotation
    fn update(&mut self) {
        self.sync_spherical();
        if self.distance <= f32::EPSILON {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            return;
        }

        self.yaw += self.pending_yaw;
        self.pitch = (self.pitch + self.pending_pitch)
            .clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;

        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
