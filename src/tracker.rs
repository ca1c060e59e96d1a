//! Scroll tracker: which heading is "current" at a scroll offset.
//!
//! The current heading is the last one at or above the activation line
//! (`scroll_top + activation_offset`). Above the first heading the first one
//! wins; past the last heading the last one wins.

use crate::outline::HeadingIndex;
use crate::page::Page;

/// Pick the current heading from offsets in document order.
///
/// Returns the index of the heading just before the first one strictly below
/// `line`, `0` if that is the very first heading, or the last index when no
/// heading is below the line. `None` only for an empty sequence.
pub fn select_heading<I>(offsets: I, line: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0;
    for (i, offset) in offsets.into_iter().enumerate() {
        if offset > line {
            return Some(i.saturating_sub(1));
        }
        count = i + 1;
    }
    count.checked_sub(1)
}

/// Maps the scroll offset to the current heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    activation_offset: f64,
}

impl ScrollTracker {
    pub fn new(activation_offset: f64) -> Self {
        Self { activation_offset }
    }

    pub fn activation_offset(&self) -> f64 {
        self.activation_offset
    }

    /// Document offset of the activation line for a scroll position.
    pub fn line(&self, scroll_top: f64) -> f64 {
        scroll_top + self.activation_offset
    }

    /// Position of the current heading, reading live offsets from `page`.
    pub fn current_heading<P: Page>(&self, page: &P, headings: &HeadingIndex<P::Node>) -> Option<usize> {
        select_heading(headings.offsets(page), self.line(page.scroll_top()))
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ACTIVATION_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSETS: [f64; 3] = [0.0, 100.0, 250.0];

    #[test]
    fn test_tie_break_prefers_heading_above_line() {
        let tracker = ScrollTracker::default();
        // scroll 100 + 45 → line at 145
        assert_eq!(tracker.line(100.0), 145.0);
        assert_eq!(select_heading(OFFSETS, tracker.line(100.0)), Some(1));
    }

    #[test]
    fn test_heading_exactly_on_line_counts_as_above() {
        assert_eq!(select_heading(OFFSETS, 250.0), Some(2));
        assert_eq!(select_heading(OFFSETS, 249.9), Some(1));
    }

    #[test]
    fn test_boundaries() {
        // Above the first heading
        assert_eq!(select_heading([300.0, 600.0], 45.0), Some(0));
        // Past the last heading
        assert_eq!(select_heading(OFFSETS, 10_000.0), Some(2));
        assert_eq!(select_heading(std::iter::empty::<f64>(), 0.0), None);
        assert_eq!(select_heading([500.0], 0.0), Some(0));
    }

    #[test]
    fn test_custom_activation_offset() {
        let tracker = ScrollTracker::new(0.0);
        assert_eq!(select_heading(OFFSETS, tracker.line(99.0)), Some(0));
        assert_eq!(tracker.activation_offset(), 0.0);
    }
}

#[cfg(all(test, feature = "sim"))]
mod page_tests {
    use super::*;
    use crate::sim::{Element, SimPage};

    #[test]
    fn test_current_heading_reads_live_layout() {
        let mut page = SimPage::new(
            Element::new("html")
                .child(Element::new("div").with_id("toc"))
                .child(
                    Element::new("div")
                        .with_id("content")
                        .child(Element::heading(1, "a", "A", 0.0))
                        .child(Element::heading(1, "b", "B", 100.0))
                        .child(Element::heading(1, "c", "C", 250.0)),
                ),
        );
        let headings = HeadingIndex::build(&page, page.id("toc").unwrap(), page.id("content").unwrap()).unwrap();
        let tracker = ScrollTracker::default();

        page.scroll_to(100.0);
        assert_eq!(tracker.current_heading(&page, &headings), Some(1));

        // Reflow pushes "b" below the line
        let b = page.id("b").unwrap();
        page.dom_mut().set_layout(b, 200.0, 30.0);
        assert_eq!(tracker.current_heading(&page, &headings), Some(0));
    }
}
