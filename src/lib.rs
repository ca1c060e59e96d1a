//! tola-outline - Table-of-contents synchronization for documentation pages
//!
//! ## Core Concepts
//!
//! **Outline model**: the outline panel's links and the content region's
//! headings are indexed once, when the engine attaches, and correlated
//! through URL fragments (`#section-id`).
//!
//! **Activation**: exactly one outline entry is active at a time. Its item
//! carries the active marker and its ancestor chain carries the expanded
//! marker. The entry is chosen from the scroll position, from the URL
//! fragment, or from a click on the outline, whichever happened last.
//!
//! **Host-driven events**: the engine never owns a clock or an event loop.
//! The host forwards page events with the current time and delivers
//! [`Event::Tick`] at [`OutlineSync::next_deadline`].
//!
//! ## Modules
//! - `page`: the `Page` capability trait the engine reads and writes through
//! - `outline`: heading index, outline entries, correspondence index
//! - `tracker`: scroll position → current heading
//! - `activation`: active/expanded marker state machine
//! - `timing`: throttle and debounce rate limiters
//! - `toggle`: panel visibility toggle
//! - `sync`: the event coordinator tying it all together
//! - `sim`: in-memory page for tests and headless use
//!
//! ## Usage
//!
//! ```ignore
//! use tola_outline::prelude::*;
//!
//! let mut sync = OutlineSync::attach(&mut page, SyncConfig::default())?;
//! sync.handle(&mut page, Event::Load, clock.now());
//! // ... forward scroll, resize, hashchange and click events ...
//! if let Some(deadline) = sync.next_deadline() {
//!     timer.schedule(deadline, Event::Tick);
//! }
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Page capability trait and geometry types
pub mod page;

/// URL fragments
pub mod fragment;

/// Heading index, outline entries and their correspondence
pub mod outline;

/// Scroll position → current heading
pub mod tracker;

/// Active/expanded marker state machine
pub mod activation;

/// Throttle and debounce
pub mod timing;

/// Panel visibility toggle
pub mod toggle;

/// Event coordinator
pub mod sync;

/// Engine configuration
pub mod config;

/// Attribute helpers
pub mod attr;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

/// In-memory page
#[cfg(feature = "sim")]
pub mod sim;

// =============================================================================
// Re-exports
// =============================================================================

// Engine
pub use sync::{Event, OutlineSync, SyncStats};

// Building blocks
pub use activation::{Activation, ActivationState};
pub use outline::{CorrespondenceIndex, EntryId, HeadingEntry, HeadingIndex, Outline, OutlineEntry};
pub use timing::{Edge, RateLimiter};
pub use toggle::PanelToggle;
pub use tracker::{ScrollTracker, select_heading};

// Page abstraction
pub use fragment::Fragment;
pub use page::{EventKind, ListenerId, ListenerTarget, Page, Propagation, Rect};

// Configuration
pub use config::{Markers, SyncConfig};

// Error types
pub use error::{OutlineError, OutlineResult};
