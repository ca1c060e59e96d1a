//! `SimPage` - an in-memory page implementing [`Page`]
//!
//! Viewport, scroll offset, style properties and location hash are plain
//! fields the test drives directly. Listener registration is recorded so
//! tests can assert what the engine bound and revoked.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::attr::AttrsExt;
use crate::page::{EventKind, ListenerId, ListenerTarget, Page, Rect};

use super::dom::{Dom, NodeId};
use super::element::Element;
use super::render::{RenderConfig, render_subtree};

/// A registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub target: ListenerTarget<NodeId>,
    pub kind: EventKind,
}

/// Simulated page.
#[derive(Debug, Clone)]
pub struct SimPage {
    dom: Dom,
    scroll_top: f64,
    viewport_height: f64,
    hash: Option<CompactString>,
    styles: FxHashMap<CompactString, CompactString>,
    listeners: FxHashMap<ListenerId, Listener>,
    next_listener: u32,
}

impl SimPage {
    /// Default viewport height, in pixels.
    pub const DEFAULT_VIEWPORT: f64 = 600.0;

    pub fn new(root: Element) -> Self {
        Self {
            dom: Dom::from_root(root),
            scroll_top: 0.0,
            viewport_height: Self::DEFAULT_VIEWPORT,
            hash: None,
            styles: FxHashMap::default(),
            listeners: FxHashMap::default(),
            next_listener: 0,
        }
    }

    pub fn with_viewport(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn with_style(mut self, name: &str, value: &str) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.set_hash(hash);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Driving the page
    // ─────────────────────────────────────────────────────────────────────────

    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top.max(0.0);
    }

    /// Scroll so that `node` sits at the viewport top, like
    /// `scrollIntoView()` following a fragment link.
    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.scroll_to(self.dom.layout(node).top);
    }

    /// Set the location hash; an empty string clears it.
    pub fn set_hash(&mut self, hash: &str) {
        self.hash = if hash.is_empty() {
            None
        } else {
            Some(CompactString::new(hash))
        };
    }

    pub fn set_style(&mut self, name: &str, value: &str) {
        self.styles
            .insert(CompactString::new(name), CompactString::new(value));
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Element by html id.
    pub fn id(&self, html_id: &str) -> Option<NodeId> {
        self.dom.by_id(html_id)
    }

    /// All elements carrying `class`, in document order.
    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.dom
            .find_all(|node| node.attrs().is_some_and(|a| a.has_class(class)))
    }

    pub fn listeners(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.values()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listener(&self, target: ListenerTarget<NodeId>, kind: EventKind) -> bool {
        self.listeners
            .values()
            .any(|l| l.target == target && l.kind == kind)
    }

    /// Markup of the subtree rooted at `node`.
    pub fn html(&self, node: NodeId) -> String {
        render_subtree(&self.dom, node, &RenderConfig::PLAIN)
    }
}

impl Page for SimPage {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    fn document_element(&self) -> NodeId {
        self.dom.root()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.parent(node)
    }

    fn children(&self, node: NodeId) -> SmallVec<[NodeId; 8]> {
        self.dom.element_children(node)
    }

    fn tag_name(&self, node: NodeId) -> CompactString {
        CompactString::new(self.dom.tag(node).unwrap_or_default())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<CompactString> {
        self.dom.attr(node, name).map(CompactString::new)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.dom.has_class(node, class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        self.dom.add_class(node, class);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.dom.remove_class(node, class);
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.dom.layout(node).top
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let layout = self.dom.layout(node);
        let top = layout.top - self.scroll_top;
        Rect::new(top, top + layout.height)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn style_property(&self, name: &str) -> Option<CompactString> {
        self.styles.get(name).cloned()
    }

    fn location_hash(&self) -> Option<CompactString> {
        self.hash.clone()
    }

    fn add_listener(&mut self, target: ListenerTarget<NodeId>, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Listener { target, kind });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> SimPage {
        SimPage::new(
            Element::new("html").child(
                Element::new("div")
                    .with_id("content")
                    .child(Element::heading(2, "intro", "Intro", 100.0))
                    .child(Element::heading(2, "far", "Far", 2000.0)),
            ),
        )
        .with_viewport(500.0)
    }

    #[test]
    fn test_viewport_and_rects() {
        let mut page = page();
        let intro = page.id("intro").unwrap();
        let far = page.id("far").unwrap();
        assert!(page.is_in_viewport(intro));
        assert!(!page.is_in_viewport(far));

        page.scroll_to(1800.0);
        assert_eq!(page.bounding_rect(far), Rect::new(200.0, 230.0));
        assert!(page.is_in_viewport(far));
        assert!(!page.is_in_viewport(intro));

        page.scroll_into_view(intro);
        assert_eq!(page.scroll_top(), 100.0);
    }

    #[test]
    fn test_structure_queries() {
        let page = page();
        let content = page.id("content").unwrap();
        let intro = page.id("intro").unwrap();
        assert_eq!(page.tag_name(intro), "h2");
        assert!(page.contains(content, intro));
        assert!(!page.contains(intro, content));

        let anchor = page.children(intro)[0];
        assert_eq!(page.attribute(anchor, "href").as_deref(), Some("#intro"));
        assert_eq!(page.closest_tag(anchor, "h2", content), Some(intro));
        assert_eq!(page.descendants(content).len(), 4);
    }

    #[test]
    fn test_listener_registry() {
        let mut page = page();
        let a = page.add_listener(ListenerTarget::Window, EventKind::Scroll);
        let b = page.add_listener(ListenerTarget::Document, EventKind::Click);
        assert_ne!(a, b);
        assert!(page.has_listener(ListenerTarget::Window, EventKind::Scroll));
        page.remove_listener(a);
        assert!(!page.has_listener(ListenerTarget::Window, EventKind::Scroll));
        assert_eq!(page.listener_count(), 1);
        assert_eq!(
            page.listeners().collect::<Vec<_>>(),
            vec![&Listener {
                target: ListenerTarget::Document,
                kind: EventKind::Click,
            }]
        );
    }

    #[test]
    fn test_hash_and_styles() {
        let mut page = page().with_hash("#intro").with_style("--layout-banner-height", "64px");
        assert_eq!(page.location_hash().as_deref(), Some("#intro"));
        assert_eq!(page.style_property("--layout-banner-height").as_deref(), Some("64px"));
        page.set_hash("");
        assert_eq!(page.location_hash(), None);
    }
}
