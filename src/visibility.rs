//! Reveal-on-scroll tracking, independent of the contact form.

use std::collections::HashSet;

/// Minimum share of an element that must be inside the viewport.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// The viewport is shrunk by this many pixels at the bottom.
pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;
pub const SCROLL_TOP_OFFSET: f64 = 400.0;

pub trait VisibilityObserver {
    fn is_visible(&self, element_id: &str) -> bool;
}

/// Vertical position of an element relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// Remembers which elements have been on screen. Once revealed an element
/// stays revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    viewport_height: f64,
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            revealed: HashSet::new(),
        }
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Share of `bounds` inside the margin-adjusted viewport, in `0.0..=1.0`.
    pub fn intersection_ratio(&self, bounds: Bounds) -> f64 {
        let root_bottom = (self.viewport_height - REVEAL_BOTTOM_MARGIN).max(0.0);
        let bottom = bounds.top + bounds.height;

        if bounds.height <= 0.0 {
            return if (0.0..=root_bottom).contains(&bounds.top) {
                1.0
            } else {
                0.0
            };
        }

        let visible = bottom.min(root_bottom) - bounds.top.max(0.0);
        (visible / bounds.height).clamp(0.0, 1.0)
    }

    /// Records a layout sample. Returns true when this sample reveals the
    /// element for the first time.
    pub fn observe(&mut self, element_id: &str, bounds: Bounds) -> bool {
        if self.revealed.contains(element_id) {
            return false;
        }

        let ratio = self.intersection_ratio(bounds);
        if ratio > 0.0 && ratio >= REVEAL_THRESHOLD {
            tracing::trace!(element_id, ratio, "Element revealed");
            self.revealed.insert(element_id.to_owned());
            return true;
        }

        false
    }

    pub fn revealed(&self) -> impl Iterator<Item = &str> {
        self.revealed.iter().map(String::as_str)
    }
}

impl VisibilityObserver for RevealTracker {
    fn is_visible(&self, element_id: &str) -> bool {
        self.revealed.contains(element_id)
    }
}

/// Whether the "back to top" control should show at this scroll offset.
pub fn show_scroll_top(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_below_the_margin_is_hidden() {
        let mut tracker = RevealTracker::new(800.0);

        // Starts inside the 50px bottom margin.
        assert!(!tracker.observe("about", Bounds { top: 760.0, height: 300.0 }));
        assert!(!tracker.is_visible("about"));
    }

    #[test]
    fn reveal_needs_ten_percent() {
        let mut tracker = RevealTracker::new(800.0);

        // 20px of 300px visible: under the threshold.
        assert!(!tracker.observe("skills", Bounds { top: 730.0, height: 300.0 }));
        // 40px of 300px visible.
        assert!(tracker.observe("skills", Bounds { top: 710.0, height: 300.0 }));
        assert!(tracker.is_visible("skills"));
    }

    #[test]
    fn revealed_elements_stay_visible() {
        let mut tracker = RevealTracker::new(800.0);

        assert!(tracker.observe("projects", Bounds { top: 100.0, height: 200.0 }));
        assert!(!tracker.observe("projects", Bounds { top: -2000.0, height: 200.0 }));
        assert!(tracker.is_visible("projects"));
        assert_eq!(tracker.revealed().collect::<Vec<_>>(), vec!["projects"]);
    }

    #[test]
    fn intersection_ratio_clamps() {
        let tracker = RevealTracker::new(800.0);

        assert_eq!(tracker.intersection_ratio(Bounds { top: 0.0, height: 100.0 }), 1.0);
        assert_eq!(tracker.intersection_ratio(Bounds { top: -500.0, height: 100.0 }), 0.0);
        assert_eq!(tracker.intersection_ratio(Bounds { top: 900.0, height: 100.0 }), 0.0);
        assert_eq!(tracker.intersection_ratio(Bounds { top: -50.0, height: 100.0 }), 0.5);
    }

    #[test]
    fn scroll_top_after_400px() {
        assert!(!show_scroll_top(0.0));
        assert!(!show_scroll_top(400.0));
        assert!(show_scroll_top(401.0));
    }
}
