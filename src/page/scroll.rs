//! Scroll offset with timed navigation jumps

/// Offset past which the navbar switches to its compact style
pub const NAVBAR_SCROLL_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl ScrollAnimation {
    fn offset(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Page scroll position
///
/// Direct input (wheel, keys) moves the offset immediately and cancels any running
/// navigation animation. [`Scroller::scroll_to`] eases to a destination instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Scroller {
    offset: f32,
    max_offset: f32,
    animation: Option<ScrollAnimation>,
    navigation_duration: f32,
}

impl Scroller {
    pub fn new(max_offset: f32, navigation_duration: f32) -> Self {
        Self {
            offset: 0.0,
            max_offset: max_offset.max(0.0),
            animation: None,
            navigation_duration: navigation_duration.max(0.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Updates the scroll range (after a resize), clamping the current offset
    pub fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = max_offset.max(0.0);
        self.offset = self.clamp(self.offset);
        if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.clamp(0.0, self.max_offset);
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.animation = None;
        self.offset = self.clamp(self.offset + delta);
    }

    /// Jumps without animation
    pub fn jump_to(&mut self, offset: f32) {
        self.animation = None;
        self.offset = self.clamp(offset);
    }

    /// Eases to `offset` over the navigation duration
    pub fn scroll_to(&mut self, offset: f32) {
        let to = self.clamp(offset);
        if self.navigation_duration <= 0.0 {
            self.jump_to(to);
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to,
            elapsed: 0.0,
            duration: self.navigation_duration,
        });
    }

    /// Advances a running animation; returns whether the offset changed
    pub fn advance(&mut self, delta_time: f32) -> bool {
        let Some(mut animation) = self.animation.take() else {
            return false;
        };
        let before = self.offset;

        animation.elapsed += delta_time.max(0.0);
        self.offset = self.clamp(animation.offset());
        if !animation.finished() {
            self.animation = Some(animation);
        }
        self.offset != before
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the page has scrolled past the navbar threshold
    pub fn is_scrolled(&self) -> bool {
        self.offset > NAVBAR_SCROLL_THRESHOLD
    }

    fn clamp(&self, offset: f32) -> f32 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_offset)
        } else {
            self.offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_clamps() {
        let mut scroller = Scroller::new(1000.0, 0.5);
        scroller.scroll_by(-50.0);
        assert_eq!(scroller.offset(), 0.0);
        scroller.scroll_by(1500.0);
        assert_eq!(scroller.offset(), 1000.0);
        scroller.scroll_by(f32::NAN);
        assert_eq!(scroller.offset(), 1000.0);
    }

    #[test]
    fn test_scroll_to_eases_and_finishes() {
        let mut scroller = Scroller::new(2000.0, 0.5);
        scroller.scroll_to(800.0);
        assert!(scroller.is_animating());

        assert!(scroller.advance(0.25));
        assert!((scroller.offset() - 400.0).abs() < 1e-3);

        scroller.advance(0.3);
        assert_eq!(scroller.offset(), 800.0);
        assert!(!scroller.is_animating());
        assert!(!scroller.advance(0.1));
    }

    #[test]
    fn test_direct_input_cancels_animation() {
        let mut scroller = Scroller::new(2000.0, 0.5);
        scroller.scroll_to(1600.0);
        scroller.advance(0.1);
        scroller.scroll_by(10.0);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_navbar_threshold() {
        let mut scroller = Scroller::new(2000.0, 0.0);
        scroller.jump_to(50.0);
        assert!(!scroller.is_scrolled());
        scroller.scroll_by(1.0);
        assert!(scroller.is_scrolled());
    }

    #[test]
    fn test_shrinking_range_clamps_offset() {
        let mut scroller = Scroller::new(2000.0, 0.5);
        scroller.jump_to(1800.0);
        scroller.set_max_offset(1200.0);
        assert_eq!(scroller.offset(), 1200.0);
    }
}
