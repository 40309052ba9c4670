//! Page composition root

use crate::narrative::{ScrollSectionTracker, SectionList, TrackerHandle};

use super::{
    content::SectionFade,
    layout::PageLayout,
    portfolio::Portfolio,
    scroll::Scroller,
    visibility::{SectionEntered, VisibilityObserver},
    PageConfig, PageError,
};

/// The scrollable page: layout, scroll offset, visibility observers and the tracker
///
/// Owns the [`ScrollSectionTracker`]; everything else reads the active section through
/// [`Page::tracker_handle`].
pub struct Page {
    config: PageConfig,
    sections: SectionList,
    layout: PageLayout,
    scroller: Scroller,
    observer: VisibilityObserver,
    tracker: ScrollSectionTracker,
    fade: SectionFade,
}

impl Page {
    /// Lays out the portfolio's sections and registers one observer per section
    ///
    /// # Arguments
    /// * `portfolio` - Sections and content to lay out
    /// * `viewport_height` - Visible height in pixels
    /// * `config` - Thresholds, durations and line height
    ///
    /// # Returns
    /// An error for an empty or invalid section list or a non-positive viewport
    pub fn mount(
        portfolio: &Portfolio,
        viewport_height: f32,
        config: PageConfig,
    ) -> Result<Self, PageError> {
        let sections = portfolio.section_list()?;
        let content_heights = portfolio
            .sections
            .iter()
            .map(|s| s.content.estimated_height(config.line_height))
            .collect();
        let layout = PageLayout::new(content_heights, viewport_height, config.min_height_factor)?;
        let scroller = Scroller::new(layout.max_scroll(), config.navigation_duration);

        let mut observer = VisibilityObserver::new(config.visibility_threshold);
        observer.observe_all(&sections);

        log::info!(
            "page mounted: {} sections, {:.0}px tall",
            sections.len(),
            layout.total_height()
        );

        Ok(Self {
            fade: SectionFade::new(config.fade_duration),
            config,
            sections,
            layout,
            scroller,
            observer,
            tracker: ScrollSectionTracker::new(),
        })
    }

    /// Advances scroll animation and fade, then delivers visibility events to the tracker
    ///
    /// Call once per frame before the frame loop ticks.
    pub fn update(&mut self, delta_time: f32) -> Vec<SectionEntered> {
        self.scroller.advance(delta_time);
        self.fade.advance(delta_time);

        let viewport = self.layout.viewport_at(self.scroller.offset());
        let entered = self.observer.observe(&self.layout, &viewport);
        for event in &entered {
            self.tracker.on_section_entered(event.order as i64);
        }
        if !entered.is_empty() {
            self.fade.restart();
        }
        entered
    }

    /// Scrolls by a number of wheel lines (positive = down)
    pub fn scroll_lines(&mut self, lines: f32) {
        self.scroller.scroll_by(lines * self.config.line_height);
    }

    pub fn scroll_pixels(&mut self, pixels: f32) {
        self.scroller.scroll_by(pixels);
    }

    /// Scrolls by whole viewports (page up / page down)
    pub fn scroll_pages(&mut self, pages: f32) {
        self.scroller
            .scroll_by(pages * self.layout.viewport_height());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroller.scroll_to(0.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroller.scroll_to(self.layout.max_scroll());
    }

    /// Eases to the top of the named section (navbar links)
    pub fn navigate_to(&mut self, identifier: &str) -> Result<(), PageError> {
        let order = self
            .sections
            .position_of(identifier)
            .ok_or_else(|| PageError::UnknownSection(identifier.to_string()))?;
        let span = self
            .layout
            .span(order)
            .ok_or_else(|| PageError::UnknownSection(identifier.to_string()))?;
        log::debug!("navigating to `{}` at {:.0}px", identifier, span.top);
        self.scroller.scroll_to(span.top);
        Ok(())
    }

    pub fn resize(&mut self, viewport_height: f32) -> Result<(), PageError> {
        self.layout.relayout(viewport_height)?;
        self.scroller.set_max_offset(self.layout.max_scroll());
        Ok(())
    }

    /// Unregisters every observer; the active section stays where it is
    pub fn unmount(&mut self) {
        self.observer.disconnect();
        log::debug!("page unmounted");
    }

    pub fn tracker_handle(&self) -> TrackerHandle {
        self.tracker.handle()
    }

    pub fn active_index(&self) -> i64 {
        self.tracker.current_index()
    }

    /// Active section order, if any section has been entered
    pub fn active_section(&self) -> Option<usize> {
        usize::try_from(self.tracker.current_index())
            .ok()
            .filter(|&order| order < self.sections.len())
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroller.offset()
    }

    /// Scroll position as a fraction of the scrollable range
    pub fn progress(&self) -> f32 {
        let max = self.layout.max_scroll();
        if max > 0.0 {
            self.scroller.offset() / max
        } else {
            0.0
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroller.is_scrolled()
    }

    pub fn content_opacity(&self) -> f32 {
        self.fade.opacity()
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_observing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::mount(&Portfolio::default(), 800.0, PageConfig::default()).unwrap()
    }

    #[test]
    fn test_mount_enters_first_section_on_first_update() {
        let mut page = page();
        assert_eq!(page.active_section(), None);
        let entered = page.update(0.016);
        assert_eq!(entered.len(), 1);
        assert_eq!(page.active_section(), Some(0));
        assert_eq!(page.content_opacity(), 0.0);
    }

    #[test]
    fn test_navigation_reaches_section() {
        let mut page = page();
        page.update(0.016);
        page.navigate_to("projects").unwrap();
        for _ in 0..60 {
            page.update(1.0 / 60.0);
        }
        assert_eq!(page.active_section(), Some(3));
        assert!(page.is_scrolled());
    }

    #[test]
    fn test_config_builders_shape_the_page() {
        let config = PageConfig::default()
            .with_min_height_factor(2.0)
            .with_visibility_threshold(0.25)
            .with_navigation_duration(0.0)
            .with_fade_duration(0.0)
            .with_line_height(10.0);
        let mut page = Page::mount(&Portfolio::default(), 800.0, config).unwrap();

        assert!(page.layout().total_height() >= 6.0 * 1600.0);
        page.update(0.016);
        assert_eq!(page.content_opacity(), 1.0);

        page.scroll_lines(3.0);
        assert_eq!(page.scroll_offset(), 30.0);

        // Zero navigation duration jumps straight to the section
        page.navigate_to("skills").unwrap();
        let top = page.layout().span(2).unwrap().top;
        assert_eq!(page.scroll_offset(), top);
    }

    #[test]
    fn test_unknown_navigation_target() {
        let mut page = page();
        assert_eq!(
            page.navigate_to("blog"),
            Err(PageError::UnknownSection("blog".into()))
        );
    }

    #[test]
    fn test_unmount_freezes_active_section() {
        let mut page = page();
        page.update(0.016);
        page.unmount();
        page.scroll_pages(3.0);
        page.update(0.016);
        assert_eq!(page.active_section(), Some(0));
        assert!(!page.is_observing());
    }
}
