//! Simulated page.
//!
//! A deterministic stand-in for a rendered browser page:
//!
//! - `Element` - builder tree used to describe the page markup and layout
//! - `Dom` - arena with parent links, what the page mutates
//! - `SimPage` - [`Page`](crate::Page) implementation with a scriptable
//!   viewport, scroll offset, location hash and style properties
//! - `render` - markup output for inspection
//!
//! # Example
//!
//! ```
//! use tola_outline::sim::{Element, SimPage};
//!
//! let page = SimPage::new(
//!     Element::new("html")
//!         .child(Element::new("div").with_id("toc"))
//!         .child(Element::new("div").with_id("content")),
//! );
//! assert!(page.id("toc").is_some());
//! ```

mod dom;
mod element;
mod page;
pub mod render;

pub use dom::{Dom, DomNode, NodeData, NodeId};
pub use element::{Element, Layout, Node};
pub use page::{Listener, SimPage};
pub use render::RenderConfig;
