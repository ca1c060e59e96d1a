//! Element builder - the tree form of a simulated page
//!
//! Pages are described as nested `Element` values and then flattened into a
//! [`Dom`](super::Dom) arena. Layout is explicit: each element may declare
//! its document offset and height; elements without one sit at their
//! parent's offset with zero height.

use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};

// =============================================================================
// Node
// =============================================================================

/// Builder node - either an element or a run of text.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Box<Element>),
    Text(String),
}

impl Node {
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Document-relative vertical box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub top: f64,
    pub height: f64,
}

// =============================================================================
// Element
// =============================================================================

/// HTML element with attributes, children and optional layout box.
#[derive(Debug, Clone)]
pub struct Element {
    /// Lowercase HTML tag name
    pub tag: String,
    pub attrs: Attrs,
    pub children: SmallVec<[Node; 8]>,
    pub layout: Option<Layout>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: SmallVec::new(),
            layout: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.add_class(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(Box::new(child)));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(|c| Node::Element(Box::new(c))));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Place the element at `top` in document coordinates with `height`.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.layout = Some(Layout { top, height });
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shorthands for documentation markup
    // ─────────────────────────────────────────────────────────────────────────

    /// `<a href="...">text</a>`
    pub fn link(href: &str, text: &str) -> Self {
        Self::new("a").attr("href", href).text(text)
    }

    /// Section heading `<hN id="id"><a class="anchor" href="#id"></a>title</hN>`
    /// placed at `top`.
    pub fn heading(level: u8, id: &str, title: &str, top: f64) -> Self {
        Self::new(format!("h{level}"))
            .with_id(id)
            .child(
                Self::new("a")
                    .with_class("anchor")
                    .attr("href", format!("#{id}")),
            )
            .text(title)
            .at(top, 30.0)
    }

    /// Outline item `<li><a href="#id">title</a>[nested]</li>`
    pub fn toc_item(id: &str, title: &str) -> Self {
        Self::new("li").child(Self::link(&format!("#{id}"), title))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(t),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }
}
