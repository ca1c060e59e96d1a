//! Outline model: headings, outline entries and the correspondence between
//! them.
//!
//! - `headings` - ordered heading index of the content region
//! - `entries` - arena of outline entries with resolved ancestor chains
//! - `index` - fragment / heading / item → entry lookups
//!
//! Everything here is built once when the engine attaches and is read-only
//! afterwards. Only heading offsets are re-read, through the page.

mod entries;
mod headings;
mod index;

pub use entries::{EntryId, OutlineEntries, OutlineEntry};
pub use headings::{HeadingEntry, HeadingIndex, heading_tag_level, max_list_depth};
pub use index::CorrespondenceIndex;

use std::hash::Hash;

use crate::config::SyncConfig;
use crate::error::{OutlineError, OutlineResult};
use crate::fragment::Fragment;
use crate::page::Page;

/// The built outline of one page.
#[derive(Debug, Clone)]
pub struct Outline<N> {
    pub panel: N,
    pub content: N,
    pub headings: HeadingIndex<N>,
    pub entries: OutlineEntries<N>,
    pub index: CorrespondenceIndex<N>,
}

impl<N: Copy + Eq + Hash> Outline<N> {
    /// Locate panel and content by id and build every index.
    pub fn build<P: Page<Node = N>>(page: &P, config: &SyncConfig) -> OutlineResult<Self> {
        let panel = page
            .element_by_id(&config.panel_id)
            .ok_or_else(|| OutlineError::MissingPanel(config.panel_id.to_string()))?;
        let content = page
            .element_by_id(&config.content_id)
            .ok_or_else(|| OutlineError::MissingContent(config.content_id.to_string()))?;

        let mut headings = HeadingIndex::build(page, panel, content)?;
        let entries = OutlineEntries::build(page, panel);
        let index = CorrespondenceIndex::build(&headings, &entries);
        headings.assign_levels(|pos| {
            index
                .entry_for_heading(pos)
                .and_then(|id| entries.get(id))
                .map(|entry| entry.depth.saturating_sub(1))
        });

        Ok(Self {
            panel,
            content,
            headings,
            entries,
            index,
        })
    }

    pub fn entry(&self, id: EntryId) -> Option<&OutlineEntry<N>> {
        self.entries.get(id)
    }

    pub fn entry_for_fragment(&self, fragment: &Fragment) -> Option<EntryId> {
        self.index.entry_for_fragment(fragment)
    }

    pub fn entry_for_heading(&self, position: usize) -> Option<EntryId> {
        self.index.entry_for_heading(position)
    }

    /// The heading node an entry points at.
    pub fn heading_node(&self, entry: EntryId) -> Option<N> {
        self.index
            .heading_for_entry(entry)
            .and_then(|pos| self.headings.get(pos))
            .map(|h| h.node)
    }

    /// The heading a fragment's self-link points at.
    ///
    /// Lookup goes through heading self-links, not ids, so it agrees with
    /// what the outline links name.
    pub fn heading_for_fragment(&self, fragment: &Fragment) -> Option<N> {
        self.headings
            .find_by_link(fragment)
            .and_then(|pos| self.headings.get(pos))
            .map(|h| h.node)
    }
}

#[cfg(all(test, feature = "sim"))]
mod tests {
    use super::*;
    use crate::sim::{Element, SimPage};

    #[test]
    fn test_missing_prerequisites() {
        let config = SyncConfig::default();

        let page = SimPage::new(Element::new("html").child(Element::new("div").with_id("content")));
        assert_eq!(
            Outline::build(&page, &config).unwrap_err(),
            OutlineError::MissingPanel("toc".into())
        );

        let page = SimPage::new(Element::new("html").child(Element::new("div").with_id("toc")));
        assert_eq!(
            Outline::build(&page, &config).unwrap_err(),
            OutlineError::MissingContent("content".into())
        );
    }

    #[test]
    fn test_build_links_everything() {
        let page = SimPage::new(
            Element::new("html")
                .child(
                    Element::new("div")
                        .with_id("toc")
                        .child(Element::new("ul").child(Element::toc_item("intro", "Intro"))),
                )
                .child(
                    Element::new("div")
                        .with_id("content")
                        .child(Element::heading(2, "intro", "Intro", 0.0)),
                ),
        );
        let outline = Outline::build(&page, &SyncConfig::default()).unwrap();
        let frag = Fragment::from_href("#intro").unwrap();
        let entry = outline.entry_for_fragment(&frag).unwrap();
        assert_eq!(outline.heading_node(entry), page.id("intro"));
        assert_eq!(outline.heading_for_fragment(&frag), page.id("intro"));
        assert_eq!(outline.entry_for_heading(0), Some(entry));
    }

    #[test]
    fn test_heading_level_follows_outline_nesting() {
        let page = SimPage::new(
            Element::new("html")
                .child(
                    Element::new("div").with_id("toc").child(
                        Element::new("ul")
                            .child(Element::toc_item("intro", "Intro"))
                            // Nested entry for an h2 sitting under the h2 above
                            .child(Element::toc_item("setup", "Setup").child(
                                Element::new("ul").child(Element::toc_item("install", "Install")),
                            )),
                    ),
                )
                .child(
                    Element::new("div")
                        .with_id("content")
                        .child(Element::heading(1, "intro", "Intro", 0.0))
                        .child(Element::heading(2, "setup", "Setup", 100.0))
                        .child(Element::heading(2, "install", "Install", 200.0))
                        .child(Element::heading(3, "notes", "Notes", 300.0)),
                ),
        );
        let outline = Outline::build(&page, &SyncConfig::default()).unwrap();
        let levels: Vec<_> = outline.headings.iter().map(|h| h.level).collect();
        // notes has no entry and keeps its tag level
        assert_eq!(levels, vec![0, 0, 1, 2]);
    }
}
