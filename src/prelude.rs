//! Prelude for common imports.
//!
//! ```ignore
//! use tola_outline::prelude::*;
//! ```

// Engine
pub use crate::sync::{Event, OutlineSync, SyncStats};

// Page abstraction
pub use crate::fragment::Fragment;
pub use crate::page::{EventKind, ListenerId, ListenerTarget, Page, Propagation, Rect};

// Outline model
pub use crate::activation::ActivationState;
pub use crate::outline::{EntryId, Outline};

// Configuration
pub use crate::config::{Markers, SyncConfig};

// Error
pub use crate::error::{OutlineError, OutlineResult};

// Simulation
#[cfg(feature = "sim")]
pub use crate::sim::{Element, NodeId, SimPage};
