//! Vertical layout of the section stack and viewport intersection math

use super::PageError;

/// Vertical extent of one section in page coordinates (pixels, top = 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

impl Span {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// The visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_offset: f32,
    pub height: f32,
}

impl Viewport {
    pub fn top(&self) -> f32 {
        self.scroll_offset
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_offset + self.height
    }
}

/// Sections stacked top to bottom, each at least `min_height_factor` viewports tall
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    content_heights: Vec<f32>,
    spans: Vec<Span>,
    viewport_height: f32,
    min_height_factor: f32,
}

impl PageLayout {
    /// Lays out `count` sections with no intrinsic content height
    pub fn uniform(
        count: usize,
        viewport_height: f32,
        min_height_factor: f32,
    ) -> Result<Self, PageError> {
        Self::new(vec![0.0; count], viewport_height, min_height_factor)
    }

    /// Lays out sections whose content needs `content_heights` pixels each
    pub fn new(
        content_heights: Vec<f32>,
        viewport_height: f32,
        min_height_factor: f32,
    ) -> Result<Self, PageError> {
        if content_heights.is_empty() {
            return Err(PageError::NoSections);
        }
        let mut layout = Self {
            content_heights,
            spans: Vec::new(),
            viewport_height: 0.0,
            min_height_factor: min_height_factor.max(0.0),
        };
        layout.relayout(viewport_height)?;
        Ok(layout)
    }

    /// Recomputes spans for a new viewport height
    pub fn relayout(&mut self, viewport_height: f32) -> Result<(), PageError> {
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return Err(PageError::InvalidViewport(viewport_height));
        }
        let min_height = viewport_height * self.min_height_factor;

        let mut top = 0.0;
        self.spans = self
            .content_heights
            .iter()
            .map(|&content| {
                // Zero-height sections would never intersect; keep at least one pixel
                let height = content.max(min_height).max(1.0);
                let span = Span {
                    top,
                    bottom: top + height,
                };
                top += height;
                span
            })
            .collect();
        self.viewport_height = viewport_height;
        Ok(())
    }

    pub fn span(&self, order: usize) -> Option<Span> {
        self.spans.get(order).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn total_height(&self) -> f32 {
        self.spans.last().map_or(0.0, |span| span.bottom)
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    pub fn viewport_at(&self, scroll_offset: f32) -> Viewport {
        Viewport {
            scroll_offset,
            height: self.viewport_height,
        }
    }

    /// Fraction of the section's own box inside the viewport, in `[0, 1]`
    pub fn visible_fraction(&self, order: usize, viewport: &Viewport) -> f32 {
        let Some(span) = self.span(order) else {
            return 0.0;
        };
        let overlap = span.bottom.min(viewport.bottom()) - span.top.max(viewport.top());
        (overlap.max(0.0) / span.height()).min(1.0)
    }

    /// Section containing the given page coordinate
    pub fn section_at(&self, y: f32) -> Option<usize> {
        self.spans
            .iter()
            .position(|span| y >= span.top && y < span.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_spans() {
        let layout = PageLayout::uniform(3, 800.0, 1.0).unwrap();
        assert_eq!(layout.span(1), Some(Span { top: 800.0, bottom: 1600.0 }));
        assert_eq!(layout.total_height(), 2400.0);
        assert_eq!(layout.max_scroll(), 1600.0);
        assert_eq!(layout.section_at(1700.0), Some(2));
        assert_eq!(layout.section_at(2400.0), None);
    }

    #[test]
    fn test_tall_content_extends_section() {
        let layout = PageLayout::new(vec![0.0, 2000.0, 100.0], 800.0, 1.0).unwrap();
        assert_eq!(layout.span(1).unwrap().height(), 2000.0);
        assert_eq!(layout.span(2).unwrap().top, 2800.0);
    }

    #[test]
    fn test_visible_fraction() {
        let layout = PageLayout::uniform(3, 800.0, 1.0).unwrap();
        let viewport = layout.viewport_at(400.0);
        assert_eq!(layout.visible_fraction(0, &viewport), 0.5);
        assert_eq!(layout.visible_fraction(1, &viewport), 0.5);
        assert_eq!(layout.visible_fraction(2, &viewport), 0.0);
        assert_eq!(layout.visible_fraction(9, &viewport), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(PageLayout::uniform(0, 800.0, 1.0), Err(PageError::NoSections));
        assert_eq!(
            PageLayout::uniform(2, 0.0, 1.0),
            Err(PageError::InvalidViewport(0.0))
        );
    }

    #[test]
    fn test_relayout_on_resize() {
        let mut layout = PageLayout::uniform(2, 800.0, 1.0).unwrap();
        layout.relayout(600.0).unwrap();
        assert_eq!(layout.total_height(), 1200.0);
        assert_eq!(layout.max_scroll(), 600.0);
    }
}
