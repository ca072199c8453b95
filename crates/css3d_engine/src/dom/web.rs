//! Browser DOM mirroring via `web-sys`
//!
//! Forwards [`ElementStore`](super::ElementStore) mutations to real
//! `HtmlElement`s on wasm targets. The store remains the canonical state;
//! JS-side failures are logged and otherwise ignored, matching the
//! engine's write-and-forget error model.

use std::collections::HashMap;

use web_sys::HtmlElement;

use super::{DomBackend, ElementKey};

/// [`DomBackend`] that mirrors element writes into the browser DOM
///
/// Bind each engine element to the `HtmlElement` it represents, then
/// install the backend on the store:
///
/// ```ignore
/// let mut backend = WebDomBackend::new();
/// backend.bind(renderer.root_element(), container.clone());
/// backend.bind(card_element, card_div.clone());
/// dom.set_backend(Box::new(backend));
/// ```
///
/// Writes to unbound elements are skipped.
#[derive(Default)]
pub struct WebDomBackend {
    bindings: HashMap<ElementKey, HtmlElement>,
}

impl WebDomBackend {
    /// Create a backend with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate an engine element with a browser element
    pub fn bind(&mut self, element: ElementKey, node: HtmlElement) {
        self.bindings.insert(element, node);
    }

    /// Drop the association for an engine element
    pub fn unbind(&mut self, element: ElementKey) {
        self.bindings.remove(&element);
    }
}

impl DomBackend for WebDomBackend {
    fn style_changed(&mut self, element: ElementKey, property: &str, value: &str) {
        let Some(node) = self.bindings.get(&element) else {
            return;
        };
        if node.style().set_property(property, value).is_err() {
            log::warn!("failed to set {property} on bound element {element:?}");
        }
    }

    fn parent_changed(&mut self, element: ElementKey, parent: Option<ElementKey>) {
        let Some(node) = self.bindings.get(&element) else {
            return;
        };
        match parent.and_then(|key| self.bindings.get(&key)) {
            Some(new_parent) => {
                if new_parent.append_child(node).is_err() {
                    log::warn!("failed to reparent bound element {element:?}");
                }
            }
            None => {
                if let Some(old_parent) = node.parent_node() {
                    let _ = old_parent.remove_child(node);
                }
            }
        }
    }
}
