//! Orrery
//!
//! A scroll-driven tour of a small solar system. Scrolling the page activates sections;
//! each section points the camera at a planet (or back at the overview) while the
//! system idles around its star.
//!
//! - [`narrative`] - section tracking, focus resolution, idle animation, camera rig and
//!   the per-frame loop; no GPU or window
//! - [`page`] - the scrollable page those sections live on
//! - [`gfx`], [`ui`], [`app`] - wgpu/winit/imgui front end

pub mod app;
pub mod gfx;
pub mod narrative;
pub mod page;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

pub use app::{OrreryApp, ViewerConfig};

/// Runs the default portfolio with default settings
pub fn run_default() -> anyhow::Result<()> {
    OrreryApp::new(page::Portfolio::default(), ViewerConfig::default())?.run()
}
