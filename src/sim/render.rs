//! HTML rendering for the simulated page
//!
//! Renders an arena subtree back to markup, markers included. Used to inspect
//! engine output in tests and debug logs.

use crate::attr::Attrs;

use super::dom::{Dom, NodeData, NodeId};

/// Configuration for HTML rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Append a `data-top` attribute with each element's layout offset.
    pub emit_layout: bool,
}

impl RenderConfig {
    /// Markup only.
    pub const PLAIN: Self = Self { emit_layout: false };

    /// Markup plus layout offsets.
    pub const DEBUG: Self = Self { emit_layout: true };
}

/// Render the subtree rooted at `id` to an HTML string.
pub fn render_subtree(dom: &Dom, id: NodeId, config: &RenderConfig) -> String {
    let mut output = String::new();
    render_node(dom, id, config, &mut output);
    output
}

fn render_node(dom: &Dom, id: NodeId, config: &RenderConfig, output: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Text(text) => output.push_str(&escape_html(text)),
        NodeData::Element { tag, attrs } => {
            output.push('<');
            output.push_str(tag);
            render_attrs(attrs, output);
            if config.emit_layout {
                output.push_str(&format!(" data-top=\"{}\"", node.layout.top));
            }

            if is_void_element(tag) {
                output.push_str(" />");
                return;
            }
            output.push('>');
            for child in &node.children {
                render_node(dom, *child, config, output);
            }
            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
    }
}

/// Render attributes to HTML.
fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Element;

    #[test]
    fn test_render_outline() {
        let dom = Dom::from_root(
            Element::new("ul")
                .with_class("sectlevel1")
                .child(Element::toc_item("intro", "Intro & Overview").with_class("active")),
        );
        let html = render_subtree(&dom, dom.root(), &RenderConfig::PLAIN);
        assert_eq!(
            html,
            "<ul class=\"sectlevel1\"><li class=\"active\"><a href=\"#intro\">Intro &amp; Overview</a></li></ul>"
        );
    }

    #[test]
    fn test_render_layout_and_void() {
        let dom = Dom::from_root(Element::new("div").at(12.0, 4.0).child(Element::new("hr")));
        let html = render_subtree(&dom, dom.root(), &RenderConfig::DEBUG);
        assert_eq!(html, "<div data-top=\"12\"><hr data-top=\"12\" /></div>");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("<h2>"), "&lt;h2&gt;");
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }
}
