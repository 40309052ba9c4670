//! The per-frame driver tying scroll state, idle animation and the camera rig together

use super::focus::{Focus, FocusResolver};
use super::registry::{IdleAnimator, ObjectTransform, SceneObjectRegistry};
use super::rig::{CameraPose, CameraRig, OrbitControls};
use super::section::SectionList;
use super::tracker::TrackerHandle;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Snapshot of the active section index used for the whole frame
    pub active_index: i64,
    pub focus: Focus,
    pub pose: CameraPose,
    pub transforms: Vec<ObjectTransform>,
}

pub struct FrameLoop {
    sections: SectionList,
    registry: SceneObjectRegistry,
    animator: IdleAnimator,
    rig: CameraRig,
    tracker: TrackerHandle,
    ticks: u64,
}

impl FrameLoop {
    pub fn new(
        sections: SectionList,
        registry: SceneObjectRegistry,
        animator: IdleAnimator,
        rig: CameraRig,
        tracker: TrackerHandle,
    ) -> Self {
        for section in sections.iter() {
            if let Some(id) = section.focus_target.object_id() {
                if !registry.contains(id) {
                    log::warn!(
                        "section `{}` focuses unknown object `{}`; it will show the home view",
                        section.identifier,
                        id
                    );
                }
            }
        }

        Self {
            sections,
            registry,
            animator,
            rig,
            tracker,
            ticks: 0,
        }
    }

    /// Advances one frame without a camera-control collaborator
    pub fn tick(&mut self, delta_time: f32) -> FrameOutput {
        self.step(delta_time, None)
    }

    /// Advances one frame, nudging `controls` toward the rig's pose
    ///
    /// # Arguments
    /// * `delta_time` - Seconds since the previous frame
    /// * `controls` - Orbit controls owning the real camera; manual drag on them is kept
    ///
    /// # Returns
    /// The frame's active index, focus, camera pose and object transforms
    pub fn tick_with_controls(
        &mut self,
        delta_time: f32,
        controls: &mut dyn OrbitControls,
    ) -> FrameOutput {
        self.step(delta_time, Some(controls))
    }

    fn step(&mut self, delta_time: f32, controls: Option<&mut dyn OrbitControls>) -> FrameOutput {
        // Read once; events arriving mid-frame apply next frame
        let active_index = self.tracker.current_index();
        let focus = FocusResolver::resolve_known(active_index, &self.sections, &self.registry);

        // Idle update first so a focused target is tracked at its post-update position
        self.animator
            .tick(&mut self.registry, delta_time, focus.object_id());

        let pose = match controls {
            Some(controls) => {
                self.rig
                    .update_with_controls(delta_time, &focus, &self.registry, controls)
            }
            None => self.rig.update(delta_time, &focus, &self.registry),
        };

        self.ticks += 1;

        FrameOutput {
            active_index,
            focus,
            pose,
            transforms: self.registry.transforms(),
        }
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn registry(&self) -> &SceneObjectRegistry {
        &self.registry
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}
