//! # Page Module
//!
//! The scrollable document the narrative core listens to. It stands in for a browser
//! page: sections are laid out top to bottom, the viewport scrolls over them, and one
//! visibility observer per section reports when a section crosses the 50% mark.
//!
//! ## Key Components
//!
//! - [`Page`] - composition root owning layout, scroll state, observers and the tracker
//! - [`PageLayout`] - section spans and viewport intersection
//! - [`Scroller`] - scroll offset with eased navigation jumps
//! - [`VisibilityObserver`] - section-enter events
//! - [`Portfolio`] - the static sections, content and scene bodies

pub mod content;
pub mod layout;
pub mod page;
pub mod portfolio;
pub mod scroll;
pub mod visibility;

pub use content::{section_badge, ContentBlock, Link, SectionContent, SectionFade};
pub use layout::{PageLayout, Span, Viewport};
pub use page::Page;
pub use portfolio::{BodySpec, BodyVisual, Portfolio, SectionSpec};
pub use scroll::Scroller;
pub use visibility::{SectionEntered, VisibilityObserver};

use thiserror::Error;

use crate::narrative::NarrativeError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    #[error("page has no sections")]
    NoSections,

    #[error("viewport height {0} must be positive and finite")]
    InvalidViewport(f32),

    #[error("no section named `{0}`")]
    UnknownSection(String),

    #[error(transparent)]
    Narrative(#[from] NarrativeError),
}

/// Page behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    /// Minimum section height in viewports
    pub min_height_factor: f32,
    /// Visible fraction at which a section counts as entered
    pub visibility_threshold: f32,
    /// Navbar jump duration in seconds
    pub navigation_duration: f32,
    /// Content fade-in duration in seconds
    pub fade_duration: f32,
    /// Pixels per wheel line and per estimated content line
    pub line_height: f32,
}

impl PageConfig {
    pub fn with_min_height_factor(mut self, factor: f32) -> Self {
        self.min_height_factor = factor;
        self
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn with_navigation_duration(mut self, seconds: f32) -> Self {
        self.navigation_duration = seconds;
        self
    }

    pub fn with_fade_duration(mut self, seconds: f32) -> Self {
        self.fade_duration = seconds;
        self
    }

    pub fn with_line_height(mut self, pixels: f32) -> Self {
        self.line_height = pixels;
        self
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            min_height_factor: 1.0,
            visibility_threshold: visibility::DEFAULT_THRESHOLD,
            navigation_duration: 0.5,
            fade_duration: 0.8,
            line_height: 40.0,
        }
    }
}
