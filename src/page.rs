//! Page capability interface.
//!
//! The engine never talks to a rendering engine directly. Everything it needs
//! from the live page (element lookup, tree structure, layout reads, class
//! markers, listener registration) goes through [`Page`]. A browser host
//! implements it over its DOM bindings; [`crate::sim::SimPage`] implements it
//! in memory for tests.

use std::fmt;
use std::hash::Hash;

use compact_str::CompactString;
use smallvec::SmallVec;

// =============================================================================
// Layout & events
// =============================================================================

/// Viewport-relative vertical extent of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Events the engine binds listeners for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    HashChange,
    Scroll,
    Resize,
    Click,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::HashChange => "hashchange",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Click => "click",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget<N> {
    Window,
    Document,
    Element(N),
}

/// Handle returned by [`Page::add_listener`], used to revoke the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Whether the host should keep propagating the event that was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    Stop,
}

// =============================================================================
// Page trait
// =============================================================================

/// Capabilities the outline engine needs from a rendered page.
///
/// Node handles are cheap `Copy` values; the page owns the actual elements.
/// All layout reads are live: implementations must not cache offsets across
/// reflows.
pub trait Page {
    /// Element handle.
    type Node: Copy + Eq + Hash + fmt::Debug;

    // ─────────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The document-level element that carries page-wide markers.
    fn document_element(&self) -> Self::Node;

    /// Parent element, `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Child elements in document order (text nodes excluded).
    fn children(&self, node: Self::Node) -> SmallVec<[Self::Node; 8]>;

    /// Lowercase tag name.
    fn tag_name(&self, node: Self::Node) -> CompactString;

    /// Attribute value.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<CompactString>;

    /// Concatenated text of the element's subtree.
    fn text_content(&self, node: Self::Node) -> String;

    // ─────────────────────────────────────────────────────────────────────────
    // Markers
    // ─────────────────────────────────────────────────────────────────────────

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Document-relative top offset of the element.
    fn offset_top(&self, node: Self::Node) -> f64;

    /// Viewport-relative extent of the element.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    fn viewport_height(&self) -> f64;

    /// Current vertical scroll offset of the document.
    fn scroll_top(&self) -> f64;

    /// Computed style property on the document element (e.g. a custom property).
    fn style_property(&self, name: &str) -> Option<CompactString>;

    /// Current location fragment including the `#`, if any.
    fn location_hash(&self) -> Option<CompactString>;

    // ─────────────────────────────────────────────────────────────────────────
    // Listeners
    // ─────────────────────────────────────────────────────────────────────────

    fn add_listener(&mut self, target: ListenerTarget<Self::Node>, kind: EventKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    // ─────────────────────────────────────────────────────────────────────────
    // Provided helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Case-insensitive tag check.
    fn is_tag(&self, node: Self::Node, tag: &str) -> bool {
        self.tag_name(node).eq_ignore_ascii_case(tag)
    }

    /// All descendant elements of `node` in document order, `node` excluded.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` with the given tag, not walking
    /// past `boundary`.
    fn closest_tag(&self, node: Self::Node, tag: &str, boundary: Self::Node) -> Option<Self::Node> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.is_tag(n, tag) {
                return Some(n);
            }
            if n == boundary {
                return None;
            }
            current = self.parent(n);
        }
        None
    }

    /// Whether the element is fully inside the viewport.
    fn is_in_viewport(&self, node: Self::Node) -> bool {
        let rect = self.bounding_rect(node);
        rect.top >= 0.0 && rect.bottom <= self.viewport_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_height() {
        let rect = Rect::new(10.0, 42.5);
        assert_eq!(rect.height(), 32.5);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::HashChange.as_str(), "hashchange");
        assert_eq!(EventKind::Load.as_str(), "load");
        assert_eq!(Propagation::default(), Propagation::Continue);
    }
}
