//! # User Interface Module
//!
//! Dear ImGui overlay standing in for the page's HTML: a navbar with section links,
//! the active section's content (fading in on each section change, with its number
//! badge) and a scroll indicator.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`page_overlay`] - draws an [`OverlayModel`] and reports navbar clicks

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{page_overlay, NavEntry, OverlayModel};
