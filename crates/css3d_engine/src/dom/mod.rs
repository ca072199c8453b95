//! Presentation-surface element model
//!
//! The renderer does not talk to a browser directly. It writes into an
//! [`ElementStore`]: an arena of elements holding the handful of style
//! properties this engine touches plus a parent link. The store is the
//! canonical state (and the write-counting instrumentation the tests rely
//! on); an optional [`DomBackend`] observer mirrors every mutation into a
//! real presentation layer.
//!
//! Elements are externally owned: scene nodes hold element keys, and
//! detaching a node never deletes its element from the store.

mod element;

#[cfg(feature = "web")]
mod web;

pub use element::{ElementKey, ElementState, ElementStore, ElementStyle, StyleProperty};

#[cfg(feature = "web")]
pub use web::WebDomBackend;

/// Observer for element mutations, used to mirror the in-memory store into
/// a real presentation layer.
///
/// Callbacks fire after the canonical state in the [`ElementStore`] has
/// been updated. Implementations must not call back into the store.
pub trait DomBackend {
    /// A style property changed on an element. `property` is the CSS
    /// property name (`"transform"`, `"display"`, ...).
    fn style_changed(&mut self, element: ElementKey, property: &str, value: &str);

    /// An element was reparented. `parent` is `None` when the element was
    /// removed from its previous parent without a replacement.
    fn parent_changed(&mut self, element: ElementKey, parent: Option<ElementKey>);
}
