//! Section visibility observer
//!
//! One registration per section, each firing when at least `threshold` of the
//! section's box enters the viewport. Re-entry fires again; leaving is silent.

use crate::narrative::SectionList;

use super::layout::{PageLayout, Viewport};

/// Default fraction of a section that must be visible to count as entered
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// A section crossed the visibility threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntered {
    pub identifier: String,
    pub order: usize,
}

#[derive(Debug, Clone)]
struct Registration {
    identifier: String,
    order: usize,
    inside: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    registrations: Vec<Registration>,
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(f32::EPSILON, 1.0),
            registrations: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Registers one section; re-registering an order replaces the old entry
    pub fn observe_section(&mut self, identifier: impl Into<String>, order: usize) {
        self.registrations.retain(|r| r.order != order);
        self.registrations.push(Registration {
            identifier: identifier.into(),
            order,
            inside: false,
        });
        self.registrations.sort_by_key(|r| r.order);
    }

    /// Registers every section of the list (page mount)
    pub fn observe_all(&mut self, sections: &SectionList) {
        for section in sections.iter() {
            self.observe_section(section.identifier.clone(), section.order);
        }
        log::debug!("observing {} sections", self.registrations.len());
    }

    /// Unregisters everything (page teardown)
    pub fn disconnect(&mut self) {
        self.registrations.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.registrations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Checks every registration against the viewport
    ///
    /// Returns the sections that crossed the threshold since the previous call, in
    /// document order. When several cross at once the caller applies them in that
    /// order, so the lowest one on the page ends up active.
    pub fn observe(&mut self, layout: &PageLayout, viewport: &Viewport) -> Vec<SectionEntered> {
        let mut entered = Vec::new();
        for registration in self.registrations.iter_mut() {
            let fraction = layout.visible_fraction(registration.order, viewport);
            let inside = fraction >= self.threshold;
            if inside && !registration.inside {
                entered.push(SectionEntered {
                    identifier: registration.identifier.clone(),
                    order: registration.order,
                });
            }
            registration.inside = inside;
        }
        entered
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer(layout: &PageLayout) -> VisibilityObserver {
        let mut observer = VisibilityObserver::default();
        for order in 0..layout.len() {
            observer.observe_section(format!("s{order}"), order);
        }
        observer
    }

    fn orders(events: &[SectionEntered]) -> Vec<usize> {
        events.iter().map(|e| e.order).collect()
    }

    #[test]
    fn test_first_section_enters_on_mount() {
        let layout = PageLayout::uniform(3, 800.0, 1.0).unwrap();
        let mut observer = observer(&layout);
        let events = observer.observe(&layout, &layout.viewport_at(0.0));
        assert_eq!(orders(&events), vec![0]);
        assert!(observer.observe(&layout, &layout.viewport_at(0.0)).is_empty());
    }

    #[test]
    fn test_nothing_enters_below_threshold() {
        let layout = PageLayout::new(vec![2000.0, 800.0], 800.0, 1.0).unwrap();
        let mut observer = observer(&layout);
        // First section is 2000px tall: 800/2000 = 40% visible
        assert!(observer.observe(&layout, &layout.viewport_at(0.0)).is_empty());
    }

    #[test]
    fn test_scrolling_down_and_back_up_refires() {
        let layout = PageLayout::uniform(3, 800.0, 1.0).unwrap();
        let mut observer = observer(&layout);
        observer.observe(&layout, &layout.viewport_at(0.0));

        assert!(observer.observe(&layout, &layout.viewport_at(300.0)).is_empty());
        assert_eq!(orders(&observer.observe(&layout, &layout.viewport_at(500.0))), vec![1]);
        assert_eq!(orders(&observer.observe(&layout, &layout.viewport_at(1300.0))), vec![2]);
        assert_eq!(orders(&observer.observe(&layout, &layout.viewport_at(200.0))), vec![0]);
    }

    #[test]
    fn test_boundary_tie_reports_document_order() {
        let layout = PageLayout::uniform(3, 800.0, 1.0).unwrap();
        let mut observer = observer(&layout);
        // Exactly half of sections 1 and 2 visible at once, neither seen before
        let events = observer.observe(&layout, &layout.viewport_at(1200.0));
        assert_eq!(orders(&events), vec![1, 2]);
    }

    #[test]
    fn test_disconnect_stops_events() {
        let layout = PageLayout::uniform(2, 800.0, 1.0).unwrap();
        let mut observer = observer(&layout);
        observer.disconnect();
        assert!(!observer.is_observing());
        assert!(observer.observe(&layout, &layout.viewport_at(0.0)).is_empty());
    }
}
