//! Event coordinator: the outline synchronization engine.
//!
//! `OutlineSync` is the single context object that owns every piece of
//! mutable state (active entry, suppression, fixed-position flag, rate
//! limiters, listener handles). The host forwards page events to it together
//! with the page itself and the current time:
//!
//! ```text
//!   load ──────────┐
//!   hashchange ────┤                       ┌──► fixed-position marker
//!   scroll ──► throttle ──┬────────────────┤
//!   resize ──► throttle ──┘                └──► ScrollTracker ──► Activation
//!   scroll ──► debounce ──► settle ──────────────────┘              ▲
//!   outline click ───────────────────────────────────────────────────┘
//! ```
//!
//! Fragment and click navigation set the suppression flag so that scroll
//! events caused by the browser's own scroll-into-view cannot override the
//! reader's choice. Settlement clears it and re-checks the active heading.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tola_outline::{Event, OutlineSync, SyncConfig};
//! use tola_outline::sim::{Element, SimPage};
//!
//! let mut page = SimPage::new(
//!     Element::new("html")
//!         .child(Element::new("div").with_id("toc").child(
//!             Element::new("ul")
//!                 .child(Element::toc_item("intro", "Intro"))
//!                 .child(Element::toc_item("usage", "Usage")),
//!         ))
//!         .child(Element::new("div").with_id("content")
//!             .child(Element::heading(2, "intro", "Intro", 100.0))
//!             .child(Element::heading(2, "usage", "Usage", 900.0))),
//! );
//!
//! let mut sync = OutlineSync::attach(&mut page, SyncConfig::default()).unwrap();
//! sync.handle(&mut page, Event::Load, Duration::ZERO);
//! assert_eq!(sync.active_fragment().unwrap().name(), "intro");
//!
//! page.scroll_to(900.0);
//! sync.handle(&mut page, Event::Scroll, Duration::from_millis(100));
//! assert_eq!(sync.active_fragment().unwrap().name(), "usage");
//! ```

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use smallvec::SmallVec;

use crate::activation::{Activation, ActivationState};
use crate::config::{SyncConfig, parse_pixels};
use crate::error::OutlineResult;
use crate::fragment::Fragment;
use crate::outline::{EntryId, Outline};
use crate::page::{EventKind, ListenerId, ListenerTarget, Page, Propagation};
use crate::timing::RateLimiter;
use crate::toggle::PanelToggle;
use crate::tracker::ScrollTracker;

// =============================================================================
// Event
// =============================================================================

/// A page event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<N> {
    /// Window finished loading
    Load,
    /// Location fragment changed
    FragmentChange,
    Scroll,
    Resize,
    /// Click inside the outline panel
    PanelClick { target: N },
    /// Click on the panel visibility toggle
    ToggleClick,
    /// Click caught by the document-level outside-click listener
    DocumentClick { target: N },
    /// Timer callback; the host schedules it at [`OutlineSync::next_deadline`]
    Tick,
}

// =============================================================================
// SyncStats
// =============================================================================

/// Counters describing what the engine did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    /// Fixed-position marker recomputations
    pub fixed_updates: u64,
    /// Activation transitions (no-op activations excluded)
    pub activations: u64,
    /// Scroll or resize events dropped by a throttle
    pub throttled_events: u64,
    /// Throttled scroll ticks that skipped the tracker due to suppression
    pub suppressed_ticks: u64,
    /// Settle callbacks that ran
    pub settlements: u64,
}

// =============================================================================
// OutlineSync
// =============================================================================

/// The outline synchronization engine for one page.
pub struct OutlineSync<N> {
    config: SyncConfig,
    outline: Outline<N>,
    tracker: ScrollTracker,
    activation: Activation,
    /// Programmatic navigation in flight; scroll must not override it
    suppressed: bool,
    fixed: bool,
    /// Panel offset captured on first use when no banner height is styled
    fallback_threshold: Option<f64>,
    scroll_throttle: RateLimiter,
    resize_throttle: RateLimiter,
    settle: RateLimiter,
    toggle: Option<PanelToggle<N>>,
    listeners: SmallVec<[ListenerId; 6]>,
    loaded: bool,
    stats: SyncStats,
}

impl<N: Copy + Eq + Hash + fmt::Debug> OutlineSync<N> {
    /// Build the engine and bind its startup listeners.
    ///
    /// Returns `None`, binding nothing, when the page lacks the outline panel,
    /// the content region or any indexable heading.
    pub fn attach<P: Page<Node = N>>(page: &mut P, config: SyncConfig) -> Option<Self> {
        match Self::try_attach(page, config) {
            Ok(sync) => Some(sync),
            Err(err) => {
                tracing::debug!(%err, "outline sync disabled");
                None
            }
        }
    }

    /// Like [`OutlineSync::attach`], reporting why the engine cannot run.
    pub fn try_attach<P: Page<Node = N>>(page: &mut P, config: SyncConfig) -> OutlineResult<Self> {
        let outline = Outline::build(page, &config)?;

        let mut listeners = SmallVec::new();
        listeners.push(page.add_listener(ListenerTarget::Element(outline.panel), EventKind::Click));
        listeners.push(page.add_listener(ListenerTarget::Window, EventKind::Load));

        let toggle = page
            .element_by_id(&config.toggle_id)
            .map(|button| PanelToggle::attach(page, button, outline.panel));

        tracing::debug!(
            headings = outline.headings.len(),
            entries = outline.entries.len(),
            toggle = toggle.is_some(),
            "outline sync attached"
        );

        Ok(Self {
            tracker: ScrollTracker::new(config.activation_offset),
            scroll_throttle: RateLimiter::throttle(config.throttle_window),
            resize_throttle: RateLimiter::throttle(config.throttle_window),
            settle: RateLimiter::debounce(config.settle_window),
            config,
            outline,
            activation: Activation::new(),
            suppressed: false,
            fixed: false,
            fallback_threshold: None,
            toggle,
            listeners,
            loaded: false,
            stats: SyncStats::default(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Route an event to its handler.
    pub fn handle<P: Page<Node = N>>(&mut self, page: &mut P, event: Event<N>, now: Duration) -> Propagation {
        match event {
            Event::Load => self.on_load(page, now),
            Event::FragmentChange => self.on_fragment_change(page, now),
            Event::Scroll => self.on_scroll(page, now),
            Event::Resize => self.on_resize(page, now),
            Event::PanelClick { target } => self.on_panel_click(page, target),
            Event::ToggleClick => return self.on_toggle_click(page),
            Event::DocumentClick { target } => self.on_document_click(page, target),
            Event::Tick => self.poll(page, now),
        }
        Propagation::Continue
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Window load: bind navigation listeners and resolve the initial entry.
    pub fn on_load<P: Page<Node = N>>(&mut self, page: &mut P, now: Duration) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        for kind in [EventKind::HashChange, EventKind::Scroll, EventKind::Resize] {
            self.listeners.push(page.add_listener(ListenerTarget::Window, kind));
        }

        self.on_fragment_change(page, now);
        if self.activation.active().is_none() {
            self.activate_current_heading(page);
        }
    }

    /// Location fragment changed (also run once on load).
    pub fn on_fragment_change<P: Page<Node = N>>(&mut self, page: &mut P, now: Duration) {
        self.update_fixed_position(page);

        let target = page
            .location_hash()
            .and_then(|hash| Fragment::from_href(&hash))
            .and_then(|fragment| {
                let entry = self.outline.entry_for_fragment(&fragment)?;
                let heading = self.outline.heading_for_fragment(&fragment)?;
                Some((entry, heading))
            });

        if let Some((entry, heading)) = target
            && page.is_in_viewport(heading)
        {
            self.suppressed = true;
            tracing::debug!("activating window location hash");
            self.activate(page, entry);
        }
        self.settle.call(now);
    }

    /// Scroll: throttled marker and tracker update, settle re-armed.
    pub fn on_scroll<P: Page<Node = N>>(&mut self, page: &mut P, now: Duration) {
        self.settle.call(now);
        if !self.scroll_throttle.call(now) {
            self.stats.throttled_events += 1;
            return;
        }
        self.update_fixed_position(page);
        if self.suppressed {
            self.stats.suppressed_ticks += 1;
            tracing::trace!("scroll activation suppressed");
        } else {
            self.activate_current_heading(page);
        }
    }

    /// Resize: throttled marker update only.
    pub fn on_resize<P: Page<Node = N>>(&mut self, page: &mut P, now: Duration) {
        if self.resize_throttle.call(now) {
            self.update_fixed_position(page);
        } else {
            self.stats.throttled_events += 1;
        }
    }

    /// Advance timers; runs the settle callback when its quiet window passed.
    pub fn poll<P: Page<Node = N>>(&mut self, page: &mut P, now: Duration) {
        self.scroll_throttle.poll(now);
        self.resize_throttle.poll(now);
        if self.settle.poll(now) {
            self.on_settle(page);
        }
    }

    /// Click inside the panel. Click intent wins even when the target
    /// heading is off-screen.
    pub fn on_panel_click<P: Page<Node = N>>(&mut self, page: &mut P, target: N) {
        let panel = self.outline.panel;
        if !page.contains(panel, target) {
            return;
        }
        let Some(link) = page.closest_tag(target, "a", panel) else {
            return;
        };
        let Some(item) = page.parent(link) else {
            return;
        };
        if page
            .attribute(item, "id")
            .is_some_and(|id| id == self.config.back_to_index_id)
        {
            return;
        }
        let Some(entry) = self.outline.index.entry_for_item(item) else {
            return;
        };
        self.suppressed = true;
        tracing::debug!("activating clicked toc element");
        self.activate(page, entry);
    }

    /// Click on the visibility toggle.
    pub fn on_toggle_click<P: Page<Node = N>>(&mut self, page: &mut P) -> Propagation {
        match self.toggle.as_mut() {
            Some(toggle) => toggle.on_button_click(page, &self.config.markers.shown),
            None => Propagation::Continue,
        }
    }

    /// Document-level click while the panel is shown.
    pub fn on_document_click<P: Page<Node = N>>(&mut self, page: &mut P, target: N) {
        if let Some(toggle) = self.toggle.as_mut() {
            toggle.on_document_click(page, target, &self.config.markers.shown);
        }
    }

    /// Revoke every listener and remove the markers the engine set.
    pub fn detach<P: Page<Node = N>>(mut self, page: &mut P) {
        for listener in self.listeners.drain(..) {
            page.remove_listener(listener);
        }
        if let Some(toggle) = self.toggle.take() {
            toggle.detach(page, &self.config.markers.shown);
        }
        self.scroll_throttle.cancel();
        self.resize_throttle.cancel();
        self.settle.cancel();
        self.activation
            .deactivate(page, &self.outline, &self.config.markers);
        let root = page.document_element();
        page.remove_class(root, &self.config.markers.fixed);
        tracing::debug!("outline sync detached");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn on_settle<P: Page<Node = N>>(&mut self, page: &mut P) {
        tracing::debug!("scrolling ended");
        self.stats.settlements += 1;
        self.update_fixed_position(page);
        self.suppressed = false;

        let still_visible = self
            .activation
            .active()
            .and_then(|entry| self.outline.heading_node(entry))
            .is_some_and(|heading| page.is_in_viewport(heading));
        if !still_visible {
            self.activate_current_heading(page);
        }
    }

    fn activate_current_heading<P: Page<Node = N>>(&mut self, page: &mut P) {
        tracing::trace!("activating top heading");
        let entry = self
            .tracker
            .current_heading(page, &self.outline.headings)
            .and_then(|pos| self.outline.entry_for_heading(pos));
        if let Some(entry) = entry {
            self.activate(page, entry);
        }
    }

    fn activate<P: Page<Node = N>>(&mut self, page: &mut P, entry: EntryId) {
        if self
            .activation
            .activate(page, &self.outline, &self.config.markers, entry)
        {
            self.stats.activations += 1;
        }
    }

    fn update_fixed_position<P: Page<Node = N>>(&mut self, page: &mut P) {
        let threshold = self.fixed_threshold(page);
        let fixed = page.scroll_top() > threshold;
        let root = page.document_element();
        if fixed {
            page.add_class(root, &self.config.markers.fixed);
        } else {
            page.remove_class(root, &self.config.markers.fixed);
        }
        self.fixed = fixed;
        self.stats.fixed_updates += 1;
    }

    fn fixed_threshold<P: Page<Node = N>>(&mut self, page: &P) -> f64 {
        if let Some(banner) = page
            .style_property(&self.config.banner_height_property)
            .and_then(|raw| parse_pixels(&raw).ok())
        {
            return banner;
        }
        *self
            .fallback_threshold
            .get_or_insert_with(|| page.offset_top(self.outline.panel))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn outline(&self) -> &Outline<N> {
        &self.outline
    }

    pub fn activation_state(&self) -> ActivationState {
        self.activation.state()
    }

    pub fn active_entry(&self) -> Option<EntryId> {
        self.activation.active()
    }

    /// Fragment of the active entry's link.
    pub fn active_fragment(&self) -> Option<&Fragment> {
        self.active_entry()
            .and_then(|id| self.outline.entry(id))
            .map(|e| &e.fragment)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_panel_shown(&self) -> bool {
        self.toggle.as_ref().is_some_and(PanelToggle::is_shown)
    }

    /// When the host should deliver the next [`Event::Tick`].
    pub fn next_deadline(&self) -> Option<Duration> {
        self.settle.pending_deadline()
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }
}

impl<N: fmt::Debug> fmt::Debug for OutlineSync<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineSync")
            .field("panel", &self.outline.panel)
            .field("active", &self.activation.state())
            .field("suppressed", &self.suppressed)
            .field("fixed", &self.fixed)
            .field("loaded", &self.loaded)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
