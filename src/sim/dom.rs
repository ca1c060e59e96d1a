//! Arena DOM
//!
//! The flattened, mutable form of a builder tree. Nodes are addressed by
//! `NodeId` and keep explicit parent links, which is what the engine's
//! ancestor walks need.

use std::fmt;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};

use super::element::{Element, Layout, Node};

// =============================================================================
// NodeId
// =============================================================================

/// Index of a node in a [`Dom`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// =============================================================================
// DomNode
// =============================================================================

#[derive(Debug, Clone)]
pub enum NodeData {
    Element {
        tag: CompactString,
        attrs: Attrs,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct DomNode {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    /// All children, text included, in document order
    pub children: SmallVec<[NodeId; 8]>,
    /// Resolved document-relative box
    pub layout: Layout,
}

impl DomNode {
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match &self.data {
            NodeData::Element { attrs, .. } => Some(attrs),
            NodeData::Text(_) => None,
        }
    }

    pub fn attrs_mut(&mut self) -> Option<&mut Attrs> {
        match &mut self.data {
            NodeData::Element { attrs, .. } => Some(attrs),
            NodeData::Text(_) => None,
        }
    }
}

// =============================================================================
// Dom
// =============================================================================

/// Arena of nodes rooted at a single element.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<DomNode>,
    ids: FxHashMap<CompactString, NodeId>,
}

impl Dom {
    /// Flatten a builder tree. The root element becomes `NodeId(0)`.
    ///
    /// Elements without an explicit layout inherit their parent's top with
    /// zero height. The first element carrying a given `id` wins.
    pub fn from_root(root: Element) -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            ids: FxHashMap::default(),
        };
        dom.insert_element(root, None, Layout::default());
        dom
    }

    fn insert_element(&mut self, elem: Element, parent: Option<NodeId>, parent_layout: Layout) -> NodeId {
        let id = self.push(DomNode {
            data: NodeData::Element {
                tag: CompactString::new(&elem.tag),
                attrs: Vec::new(),
            },
            parent,
            children: SmallVec::new(),
            layout: elem.layout.unwrap_or(Layout {
                top: parent_layout.top,
                height: 0.0,
            }),
        });

        if let Some(html_id) = elem.attrs.get_attr("id") {
            self.ids.entry(CompactString::new(html_id)).or_insert(id);
        }
        let layout = self.nodes[id.index()].layout;
        if let Some(attrs) = self.nodes[id.index()].attrs_mut() {
            *attrs = elem.attrs;
        }

        for child in elem.children {
            let child_id = match child {
                Node::Element(e) => self.insert_element(*e, Some(id), layout),
                Node::Text(t) => self.push(DomNode {
                    data: NodeData::Text(t),
                    parent: Some(id),
                    children: SmallVec::new(),
                    layout,
                }),
            };
            self.nodes[id.index()].children.push(child_id);
        }
        id
    }

    fn push(&mut self, node: DomNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DomNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn by_id(&self, html_id: &str) -> Option<NodeId> {
        self.ids.get(html_id).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Element children only.
    pub fn element_children(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        self.get(id)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.get(*c).is_some_and(DomNode::is_element))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::tag)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.attrs()?.get_attr(name)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(DomNode::attrs)
            .is_some_and(|a| a.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(attrs) = self.get_mut(id).and_then(DomNode::attrs_mut) {
            attrs.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(attrs) = self.get_mut(id).and_then(DomNode::attrs_mut) {
            attrs.remove_class(class);
        }
    }

    pub fn layout(&self, id: NodeId) -> Layout {
        self.get(id).map(|n| n.layout).unwrap_or_default()
    }

    /// Move an element to a new document offset (simulated reflow).
    pub fn set_layout(&mut self, id: NodeId, top: f64, height: f64) {
        if let Some(node) = self.get_mut(id) {
            node.layout = Layout { top, height };
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.collect_text(id, &mut buf);
        buf
    }

    fn collect_text(&self, id: NodeId, buf: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(t) => buf.push_str(t),
            NodeData::Element { .. } => {
                for child in &node.children {
                    self.collect_text(*child, buf);
                }
            }
        }
    }

    /// Iterate over all element ids in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        // Arena insertion is a pre-order walk
        (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|id| self.nodes[id.index()].is_element())
    }

    /// Find all elements matching predicate, in document order.
    pub fn find_all<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.elements()
            .filter(|id| predicate(&self.nodes[id.index()]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dom {
        Dom::from_root(
            Element::new("html")
                .child(
                    Element::new("div")
                        .with_id("content")
                        .at(100.0, 900.0)
                        .child(Element::new("p").text("one"))
                        .child(Element::new("h2").with_id("a").at(300.0, 30.0).text("A")),
                )
                .child(Element::new("div").with_id("toc")),
        )
    }

    #[test]
    fn test_flatten_preorder() {
        let dom = sample();
        let tags: Vec<_> = dom.elements().filter_map(|id| dom.tag(id)).collect();
        assert_eq!(tags, vec!["html", "div", "p", "h2", "div"]);
        assert_eq!(dom.root(), NodeId(0));
    }

    #[test]
    fn test_parent_links_and_ids() {
        let dom = sample();
        let content = dom.by_id("content").unwrap();
        let heading = dom.by_id("a").unwrap();
        assert_eq!(dom.parent(heading), Some(content));
        assert_eq!(dom.parent(content), Some(dom.root()));
        assert_eq!(dom.parent(dom.root()), None);
        assert_eq!(dom.element_children(content).len(), 2);
    }

    #[test]
    fn test_layout_inheritance() {
        let dom = sample();
        let content = dom.by_id("content").unwrap();
        let p = dom.element_children(content)[0];
        assert_eq!(dom.layout(p), Layout { top: 100.0, height: 0.0 });
        assert_eq!(dom.layout(dom.by_id("a").unwrap()).top, 300.0);
    }

    #[test]
    fn test_class_markers() {
        let mut dom = sample();
        let toc = dom.by_id("toc").unwrap();
        dom.add_class(toc, "fixed-toc");
        assert!(dom.has_class(toc, "fixed-toc"));
        dom.remove_class(toc, "fixed-toc");
        assert!(!dom.has_class(toc, "fixed-toc"));
        assert_eq!(dom.attr(toc, "class"), None);
    }

    #[test]
    fn test_text_content() {
        let dom = sample();
        assert_eq!(dom.text_content(dom.by_id("content").unwrap()), "oneA");
    }
}
