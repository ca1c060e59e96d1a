//! Panel visibility toggle for narrow layouts.
//!
//! The toggle flips a document-level marker. While the panel is shown, a
//! document click listener is bound so that a click anywhere else hides it
//! again; the listener is revoked on hide.

use crate::page::{EventKind, ListenerId, ListenerTarget, Page, Propagation};

#[derive(Debug, Clone)]
pub struct PanelToggle<N> {
    button: N,
    panel: N,
    button_listener: ListenerId,
    /// Bound only while the panel is shown
    outside_listener: Option<ListenerId>,
}

impl<N: Copy + Eq> PanelToggle<N> {
    /// Bind the toggle button's click listener.
    pub fn attach<P: Page<Node = N>>(page: &mut P, button: N, panel: N) -> Self {
        let button_listener = page.add_listener(ListenerTarget::Element(button), EventKind::Click);
        Self {
            button,
            panel,
            button_listener,
            outside_listener: None,
        }
    }

    pub fn button(&self) -> N {
        self.button
    }

    pub fn is_shown(&self) -> bool {
        self.outside_listener.is_some()
    }

    /// Handle a click on the toggle button.
    ///
    /// Always asks the host to stop propagation: the click must not reach
    /// the outside-click listener this very call may have bound.
    pub fn on_button_click<P: Page<Node = N>>(&mut self, page: &mut P, shown_class: &str) -> Propagation {
        if self.is_shown() {
            self.hide(page, shown_class);
        } else {
            self.show(page, shown_class);
        }
        Propagation::Stop
    }

    /// Handle a document-level click. Hides the panel when the click
    /// landed outside both the panel and the button.
    ///
    /// Returns whether the panel was hidden.
    pub fn on_document_click<P: Page<Node = N>>(&mut self, page: &mut P, target: N, shown_class: &str) -> bool {
        if !self.is_shown() || page.contains(self.panel, target) || page.contains(self.button, target) {
            return false;
        }
        self.hide(page, shown_class);
        true
    }

    /// Revoke every listener this toggle bound and clear the marker.
    pub fn detach<P: Page<Node = N>>(mut self, page: &mut P, shown_class: &str) {
        self.hide(page, shown_class);
        page.remove_listener(self.button_listener);
    }

    fn show<P: Page<Node = N>>(&mut self, page: &mut P, shown_class: &str) {
        let root = page.document_element();
        page.add_class(root, shown_class);
        if self.outside_listener.is_none() {
            self.outside_listener = Some(page.add_listener(ListenerTarget::Document, EventKind::Click));
        }
        tracing::debug!("outline panel shown");
    }

    fn hide<P: Page<Node = N>>(&mut self, page: &mut P, shown_class: &str) {
        let root = page.document_element();
        page.remove_class(root, shown_class);
        if let Some(listener) = self.outside_listener.take() {
            page.remove_listener(listener);
            tracing::debug!("outline panel hidden");
        }
    }
}

#[cfg(all(test, feature = "sim"))]
mod tests {
    use super::*;
    use crate::sim::{Element, NodeId, SimPage};

    fn setup() -> (SimPage, PanelToggle<NodeId>) {
        let mut page = SimPage::new(
            Element::new("html")
                .child(Element::new("button").with_id("toc-toggle").child(Element::new("span").with_id("icon")))
                .child(Element::new("div").with_id("toc").child(Element::new("ul").with_id("list")))
                .child(Element::new("div").with_id("content").child(Element::new("p").with_id("para"))),
        );
        let button = page.id("toc-toggle").unwrap();
        let panel = page.id("toc").unwrap();
        let toggle = PanelToggle::attach(&mut page, button, panel);
        (page, toggle)
    }

    #[test]
    fn test_toggle_binds_outside_listener_only_while_shown() {
        let (mut page, mut toggle) = setup();
        let root = page.document_element();
        assert_eq!(page.listener_count(), 1);

        assert_eq!(toggle.on_button_click(&mut page, "show-toc"), Propagation::Stop);
        assert!(toggle.is_shown());
        assert!(page.has_class(root, "show-toc"));
        assert!(page.has_listener(ListenerTarget::Document, EventKind::Click));

        toggle.on_button_click(&mut page, "show-toc");
        assert!(!toggle.is_shown());
        assert!(!page.has_class(root, "show-toc"));
        assert!(!page.has_listener(ListenerTarget::Document, EventKind::Click));
        assert_eq!(page.listener_count(), 1);
    }

    #[test]
    fn test_outside_click_hides() {
        let (mut page, mut toggle) = setup();
        toggle.on_button_click(&mut page, "show-toc");

        let list = page.id("list").unwrap();
        let icon = page.id("icon").unwrap();
        assert!(!toggle.on_document_click(&mut page, list, "show-toc"));
        assert!(!toggle.on_document_click(&mut page, icon, "show-toc"));
        assert!(toggle.is_shown());

        let para = page.id("para").unwrap();
        assert!(toggle.on_document_click(&mut page, para, "show-toc"));
        assert!(!toggle.is_shown());
        assert!(!page.has_listener(ListenerTarget::Document, EventKind::Click));
    }

    #[test]
    fn test_outside_click_ignored_while_hidden() {
        let (mut page, mut toggle) = setup();
        let para = page.id("para").unwrap();
        assert!(!toggle.on_document_click(&mut page, para, "show-toc"));
    }

    #[test]
    fn test_detach_revokes_everything() {
        let (mut page, mut toggle) = setup();
        toggle.on_button_click(&mut page, "show-toc");
        toggle.detach(&mut page, "show-toc");
        assert_eq!(page.listener_count(), 0);
        assert!(!page.has_class(page.document_element(), "show-toc"));
    }
}
