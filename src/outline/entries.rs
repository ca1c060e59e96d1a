//! Outline entries: the navigable items of the outline panel.
//!
//! Each `li > a[href="#..."]` becomes one entry in a flat arena. The chain of
//! ancestor elements between the item and the panel is resolved once, at
//! build time, so activation never re-walks the tree.

use std::fmt;

use smallvec::SmallVec;

use crate::fragment::Fragment;
use crate::page::Page;

/// Index of an entry in [`OutlineEntries`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u32);

impl EntryId {
    #[inline]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

/// One outline list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry<N> {
    /// The `li` element that receives the active marker
    pub item: N,
    /// The link inside `item`
    pub link: N,
    pub fragment: Fragment,
    /// Ancestors of `item`, nearest first, up to but excluding the panel.
    ///
    /// If the walk lost the parent chain before reaching the panel, this
    /// holds whatever was found before the break.
    pub ancestors: SmallVec<[N; 6]>,
    /// Number of lists enclosing the item (1 for top-level entries)
    pub depth: u8,
}

/// Flat arena of outline entries in document order.
#[derive(Debug, Clone)]
pub struct OutlineEntries<N> {
    entries: Vec<OutlineEntry<N>>,
}

impl<N: Copy + Eq> OutlineEntries<N> {
    /// Collect every fragment link whose parent is a list item.
    pub fn build<P: Page<Node = N>>(page: &P, panel: N) -> Self {
        let entries = page
            .descendants(panel)
            .into_iter()
            .filter(|n| page.is_tag(*n, "a"))
            .filter_map(|link| {
                let item = page.parent(link).filter(|p| page.is_tag(*p, "li"))?;
                let fragment = Fragment::from_href(&page.attribute(link, "href")?)?;
                let ancestors = ancestor_chain(page, item, panel);
                let depth = ancestors
                    .iter()
                    .filter(|a| page.is_tag(**a, "ul") || page.is_tag(**a, "ol"))
                    .count()
                    .min(u8::MAX as usize) as u8;
                Some(OutlineEntry {
                    item,
                    link,
                    fragment,
                    ancestors,
                    depth,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&OutlineEntry<N>> {
        self.entries.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &OutlineEntry<N>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntryId(i as u32), e))
    }
}

/// Parents of `node` up to, not including, `panel`.
fn ancestor_chain<P: Page>(page: &P, node: P::Node, panel: P::Node) -> SmallVec<[P::Node; 6]> {
    let mut chain = SmallVec::new();
    let mut current = page.parent(node);
    while let Some(parent) = current {
        if parent == panel {
            break;
        }
        chain.push(parent);
        current = page.parent(parent);
    }
    chain
}
