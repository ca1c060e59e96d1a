//! Correspondence between headings, fragments and outline entries.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::fragment::Fragment;

use super::entries::{EntryId, OutlineEntries};
use super::headings::HeadingIndex;

/// Read-only lookup tables built once from the heading index and the
/// outline entries.
#[derive(Debug, Clone)]
pub struct CorrespondenceIndex<N> {
    by_fragment: FxHashMap<Fragment, EntryId>,
    /// Heading position → entry
    by_heading: FxHashMap<usize, EntryId>,
    /// Entry → first heading whose self-link names the entry's fragment
    heading_of: FxHashMap<EntryId, usize>,
    by_item: FxHashMap<N, EntryId>,
}

impl<N: Copy + Eq + Hash> CorrespondenceIndex<N> {
    pub fn build(headings: &HeadingIndex<N>, entries: &OutlineEntries<N>) -> Self {
        let mut by_fragment = FxHashMap::default();
        let mut by_item = FxHashMap::default();
        for (id, entry) in entries.iter() {
            // Later links win on duplicate fragments
            by_fragment.insert(entry.fragment.clone(), id);
            by_item.insert(entry.item, id);
        }

        let mut by_heading = FxHashMap::default();
        let mut heading_of = FxHashMap::default();
        for (pos, heading) in headings.iter().enumerate() {
            let Some(entry) = heading
                .self_link
                .as_ref()
                .and_then(|f| by_fragment.get(f).copied())
            else {
                continue;
            };
            by_heading.insert(pos, entry);
            heading_of.entry(entry).or_insert(pos);
        }

        tracing::debug!(
            entries = by_fragment.len(),
            mapped_headings = by_heading.len(),
            unmapped_headings = headings.len() - by_heading.len(),
            "built outline correspondence"
        );

        Self {
            by_fragment,
            by_heading,
            heading_of,
            by_item,
        }
    }

    pub fn entry_for_fragment(&self, fragment: &Fragment) -> Option<EntryId> {
        self.by_fragment.get(fragment).copied()
    }

    pub fn entry_for_heading(&self, position: usize) -> Option<EntryId> {
        self.by_heading.get(&position).copied()
    }

    /// The heading an entry points at, if the content has one.
    pub fn heading_for_entry(&self, entry: EntryId) -> Option<usize> {
        self.heading_of.get(&entry).copied()
    }

    /// The entry whose list item is `item`.
    pub fn entry_for_item(&self, item: N) -> Option<EntryId> {
        self.by_item.get(&item).copied()
    }

    pub fn mapped_heading_count(&self) -> usize {
        self.by_heading.len()
    }
}

#[cfg(all(test, feature = "sim"))]
mod tests {
    use super::*;
    use crate::sim::{Element, SimPage};

    fn page() -> SimPage {
        SimPage::new(
            Element::new("html")
                .child(
                    Element::new("div").with_id("toc").child(
                        Element::new("ul")
                            .child(Element::toc_item("intro", "Intro"))
                            .child(Element::toc_item("setup", "Setup").with_id("first-setup"))
                            .child(Element::toc_item("setup", "Setup again").with_id("second-setup"))
                            .child(Element::toc_item("orphan", "No heading")),
                    ),
                )
                .child(
                    Element::new("div")
                        .with_id("content")
                        .child(Element::heading(2, "intro", "Intro", 0.0))
                        .child(Element::heading(2, "setup", "Setup", 100.0))
                        .child(Element::new("h2").with_id("bare").text("No self-link").at(200.0, 30.0))
                        .child(Element::heading(2, "unlisted", "Not in outline", 300.0)),
                ),
        )
    }

    fn build(page: &SimPage) -> (HeadingIndex<crate::sim::NodeId>, OutlineEntries<crate::sim::NodeId>) {
        let toc = page.id("toc").unwrap();
        let content = page.id("content").unwrap();
        (
            HeadingIndex::build(page, toc, content).unwrap(),
            OutlineEntries::build(page, toc),
        )
    }

    #[test]
    fn test_fragment_lookup_last_link_wins() {
        let page = page();
        let (headings, entries) = build(&page);
        let index = CorrespondenceIndex::build(&headings, &entries);

        let setup = index.entry_for_fragment(&Fragment::from_href("#setup").unwrap()).unwrap();
        assert_eq!(entries.get(setup).unwrap().item, page.id("second-setup").unwrap());
        assert!(index.entry_for_fragment(&Fragment::from_href("#missing").unwrap()).is_none());
    }

    #[test]
    fn test_unmapped_headings_are_absent() {
        let page = page();
        let (headings, entries) = build(&page);
        let index = CorrespondenceIndex::build(&headings, &entries);

        assert_eq!(headings.len(), 4);
        assert_eq!(index.mapped_heading_count(), 2);
        assert!(index.entry_for_heading(0).is_some());
        assert!(index.entry_for_heading(2).is_none()); // no self-link
        assert!(index.entry_for_heading(3).is_none()); // no outline entry
    }

    #[test]
    fn test_entry_to_heading_and_item() {
        let page = page();
        let (headings, entries) = build(&page);
        let index = CorrespondenceIndex::build(&headings, &entries);

        let orphan = index.entry_for_fragment(&Fragment::from_href("#orphan").unwrap()).unwrap();
        assert_eq!(index.heading_for_entry(orphan), None);

        let intro = index.entry_for_heading(0).unwrap();
        assert_eq!(index.heading_for_entry(intro), Some(0));
        let item = entries.get(intro).unwrap().item;
        assert_eq!(index.entry_for_item(item), Some(intro));
    }
}
