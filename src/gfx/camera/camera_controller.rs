//! Mouse input for the orbit camera

use winit::event::{DeviceEvent, ElementState};

use super::orbit_camera::OrbitCamera;

/// Left-drag orbit input
///
/// Drag motion is queued on the camera and applied on its next update, after the
/// camera rig has written this frame's position. Wheel input belongs to the page, so
/// there is no zoom here.
pub struct CameraController {
    pub rotate_speed: f32,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32) -> Self {
        Self {
            rotate_speed,
            is_mouse_pressed: false,
        }
    }

    /// Returns true when the event moved the camera
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                camera.rotate(
                    -delta.0 as f32 * self.rotate_speed,
                    delta.1 as f32 * self.rotate_speed,
                );
                true
            }
            _ => false,
        }
    }

    /// Drops drag state, e.g. when the window loses focus mid-drag
    pub fn release(&mut self) {
        self.is_mouse_pressed = false;
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.005)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn test_motion_only_rotates_while_pressed() {
        let mut controller = CameraController::default();
        let mut camera = camera();
        let motion = DeviceEvent::MouseMotion { delta: (10.0, 0.0) };

        assert!(!controller.process_events(&motion, &mut camera));
        assert!(!camera.has_pending_rotation());

        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &mut camera,
        );
        assert!(controller.is_rotating());
        assert!(controller.process_events(&motion, &mut camera));
        assert!(camera.has_pending_rotation());
    }

    #[test]
    fn test_release_ends_drag() {
        let mut controller = CameraController::default();
        let mut camera = camera();
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &mut camera,
        );
        controller.release();
        assert!(!controller.is_rotating());
        assert!(!controller.process_events(
            &DeviceEvent::MouseMotion { delta: (5.0, 5.0) },
            &mut camera
        ));
    }
}
