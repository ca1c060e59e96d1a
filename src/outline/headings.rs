//! Heading index: the section headings of the content region, in document
//! order.
//!
//! The outline decides how deep to look. A panel whose lists nest `n` levels
//! deep indexes `h1` through `h(n+1)`; anything deeper can never have an
//! outline entry.

use compact_str::CompactString;

use crate::error::{OutlineError, OutlineResult};
use crate::fragment::Fragment;
use crate::page::Page;

// =============================================================================
// HeadingEntry
// =============================================================================

/// One indexed section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry<N> {
    pub node: N,
    /// The heading's `id` attribute
    pub id: CompactString,
    /// 0-based nesting level: the list depth of the heading's outline entry
    /// minus one, or the tag level (`h1` → 0) when no entry maps to it
    pub level: u8,
    /// Fragment of the heading's embedded self-link, if it has one
    pub self_link: Option<Fragment>,
}

impl<N: Copy> HeadingEntry<N> {
    /// Current document offset. Always read live: reflow moves headings.
    pub fn offset<P: Page<Node = N>>(&self, page: &P) -> f64 {
        page.offset_top(self.node)
    }
}

/// Level of a heading tag: `"h3"` → `Some(3)`, anything else → `None`.
pub fn heading_tag_level(tag: &str) -> Option<u8> {
    let bytes = tag.as_bytes();
    match bytes {
        [b'h' | b'H', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

// =============================================================================
// HeadingIndex
// =============================================================================

/// Ordered, build-once index of the content region's headings.
#[derive(Debug, Clone)]
pub struct HeadingIndex<N> {
    headings: Vec<HeadingEntry<N>>,
    /// Deepest list nesting found in the outline (at least 1)
    list_depth: u8,
}

impl<N: Copy + Eq> HeadingIndex<N> {
    /// Scan `content` for headings bounded by the list depth of `panel`.
    ///
    /// Fails with [`OutlineError::NoHeadings`] when nothing qualifies.
    pub fn build<P: Page<Node = N>>(page: &P, panel: N, content: N) -> OutlineResult<Self> {
        let list_depth = max_list_depth(page, panel);
        let max_tag_level = list_depth.saturating_add(1).min(6);

        let headings: Vec<_> = page
            .descendants(content)
            .into_iter()
            .filter_map(|node| {
                let tag_level = heading_tag_level(&page.tag_name(node))?;
                if tag_level > max_tag_level {
                    return None;
                }
                let id = page.attribute(node, "id")?;
                Some(HeadingEntry {
                    node,
                    id,
                    level: tag_level - 1,
                    self_link: self_link(page, node),
                })
            })
            .collect();

        if headings.is_empty() {
            return Err(OutlineError::NoHeadings {
                max_level: max_tag_level,
            });
        }

        tracing::debug!(
            count = headings.len(),
            list_depth,
            "indexed headings h1..h{}",
            max_tag_level
        );
        Ok(Self { headings, list_depth })
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HeadingEntry<N>> {
        self.headings.get(index)
    }

    /// Overwrite levels with outline-derived ones where `level_of` knows
    /// the heading position.
    pub(crate) fn assign_levels(&mut self, level_of: impl Fn(usize) -> Option<u8>) {
        for (pos, heading) in self.headings.iter_mut().enumerate() {
            if let Some(level) = level_of(pos) {
                heading.level = level;
            }
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &HeadingEntry<N>> {
        self.headings.iter()
    }

    pub fn list_depth(&self) -> u8 {
        self.list_depth
    }

    /// First heading whose self-link points at `fragment`.
    pub fn find_by_link(&self, fragment: &Fragment) -> Option<usize> {
        self.headings
            .iter()
            .position(|h| h.self_link.as_ref() == Some(fragment))
    }

    /// Live offsets of all headings, in document order.
    pub fn offsets<'a, P: Page<Node = N>>(&'a self, page: &'a P) -> impl Iterator<Item = f64> + 'a {
        self.headings.iter().map(move |h| h.offset(page))
    }
}

/// Deepest `ul`/`ol` nesting inside `panel`, never less than 1.
pub fn max_list_depth<P: Page>(page: &P, panel: P::Node) -> u8 {
    page.descendants(panel)
        .into_iter()
        .filter(|n| is_list(page, *n))
        .filter_map(|list| list_depth(page, list, panel))
        .fold(1, u8::max)
}

/// Number of lists from `node` up to `panel`, `node` included.
///
/// `None` when the parent chain never reaches `panel`.
fn list_depth<P: Page>(page: &P, node: P::Node, panel: P::Node) -> Option<u8> {
    let mut depth: u8 = 0;
    let mut current = Some(node);
    while let Some(n) = current {
        if n == panel {
            return Some(depth);
        }
        if is_list(page, n) {
            depth = depth.saturating_add(1);
        }
        current = page.parent(n);
    }
    None
}

fn is_list<P: Page>(page: &P, node: P::Node) -> bool {
    page.is_tag(node, "ul") || page.is_tag(node, "ol")
}

/// Fragment of the first `a[href]` beneath `node`.
pub(crate) fn self_link<P: Page>(page: &P, node: P::Node) -> Option<Fragment> {
    page.descendants(node)
        .into_iter()
        .filter(|n| page.is_tag(*n, "a"))
        .find_map(|a| page.attribute(a, "href"))
        .and_then(|href| Fragment::from_href(&href))
}
