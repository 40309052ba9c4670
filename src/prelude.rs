//! # Orrery Prelude
//!
//! ```no_run
//! use orrery::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ViewerConfig::default().with_title("My system");
//!     OrreryApp::new(Portfolio::default(), config)?.run()
//! }
//! ```

pub use crate::app::{OrreryApp, ViewerConfig};

pub use crate::narrative::{
    Attachment, CameraPose, CameraRig, FocusResolver, FocusTarget, FrameLoop, FrameOutput,
    IdleAnimator, NarrativeError, OrbitControls, RigConfig, SceneObjectRegistry,
    ScrollSectionTracker, SectionList, Smoothing, TrackerHandle, WorldPositions,
};

pub use crate::page::{Page, PageConfig, PageError, Portfolio, SectionContent};

pub use crate::gfx::{camera::OrbitCamera, geometry::StarfieldParams, scene::Scene};

pub use cgmath::Vector3;
