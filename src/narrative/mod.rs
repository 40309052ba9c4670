//! # Narrative Core
//!
//! Scroll-to-focus orchestration: which section is active, which scene object that
//! section points at, and how the camera and the idle animation respond frame by frame.
//!
//! ## Components
//!
//! - [`ScrollSectionTracker`] - active section index, written by section-enter events
//! - [`FocusResolver`] - active index to focus target (or home)
//! - [`SceneObjectRegistry`] / [`IdleAnimator`] - focusable objects and their idle motion
//! - [`CameraRig`] - smoothed camera pose chasing the focused object or the overview
//! - [`FrameLoop`] - the per-frame driver
//!
//! None of these touch the GPU or the window; the application feeds them elapsed time
//! and section-enter events and renders the [`FrameOutput`] they produce.

pub mod error;
pub mod focus;
pub mod frame_loop;
pub mod registry;
pub mod rig;
pub mod section;
pub mod tracker;

pub use error::NarrativeError;
pub use focus::{Focus, FocusResolver};
pub use frame_loop::{FrameLoop, FrameOutput};
pub use registry::{
    Attachment, IdleAnimator, ObjectTransform, SceneObject, SceneObjectRegistry, WorldPositions,
};
pub use rig::{CameraPose, CameraRig, OrbitControls, RigConfig, RigState, Smoothing};
pub use section::{FocusTarget, Section, SectionList, HOME};
pub use tracker::{ScrollSectionTracker, TrackerHandle, SECTION_NONE};
