//! Activation state machine.
//!
//! At most one outline entry is active. The active entry carries the active
//! marker; every element on its ancestor chain carries the expanded marker;
//! nothing else does. Transitions unwind the previous entry's markers before
//! applying the next entry's, so ancestors shared by both end up expanded.

use crate::config::Markers;
use crate::outline::{EntryId, Outline, OutlineEntry};
use crate::page::Page;

/// Which entry, if any, is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Inactive,
    Active(EntryId),
}

/// Owner of the active/expanded markers.
#[derive(Debug, Clone, Default)]
pub struct Activation {
    state: ActivationState,
    transitions: u64,
}

impl Activation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn active(&self) -> Option<EntryId> {
        match self.state {
            ActivationState::Inactive => None,
            ActivationState::Active(id) => Some(id),
        }
    }

    /// Number of transitions performed so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Make `entry` the active entry.
    ///
    /// Returns `false` without touching the page when `entry` is already
    /// active or unknown to `outline`.
    pub fn activate<P: Page>(
        &mut self,
        page: &mut P,
        outline: &Outline<P::Node>,
        markers: &Markers,
        entry: EntryId,
    ) -> bool {
        if self.active() == Some(entry) {
            return false;
        }
        let Some(next) = outline.entry(entry) else {
            return false;
        };

        if let Some(previous) = self.active().and_then(|id| outline.entry(id)) {
            unmark(page, previous, markers);
        }
        mark(page, next, markers);
        self.state = ActivationState::Active(entry);
        self.transitions += 1;

        tracing::debug!(
            fragment = %next.fragment,
            "activating {}",
            page.text_content(next.link).trim()
        );
        true
    }

    /// Clear the active entry and unwind its markers.
    pub fn deactivate<P: Page>(&mut self, page: &mut P, outline: &Outline<P::Node>, markers: &Markers) {
        if let Some(previous) = self.active().and_then(|id| outline.entry(id)) {
            unmark(page, previous, markers);
        }
        self.state = ActivationState::Inactive;
    }
}

fn mark<P: Page>(page: &mut P, entry: &OutlineEntry<P::Node>, markers: &Markers) {
    page.add_class(entry.item, &markers.active);
    for ancestor in &entry.ancestors {
        page.add_class(*ancestor, &markers.expanded);
    }
}

fn unmark<P: Page>(page: &mut P, entry: &OutlineEntry<P::Node>, markers: &Markers) {
    page.remove_class(entry.item, &markers.active);
    for ancestor in &entry.ancestors {
        page.remove_class(*ancestor, &markers.expanded);
    }
}
