//! Element arena and style state

use slotmap::{new_key_type, SlotMap};

use super::DomBackend;

new_key_type! {
    /// Stable handle to an element in an [`ElementStore`]
    pub struct ElementKey;
}

/// Style properties the engine writes
///
/// This is the full contractual surface: consumers (visual regression
/// tests, nested content) depend on exactly these properties being set and
/// on the string grammar written into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// `position` (object elements are absolutely positioned)
    Position,
    /// `overflow` on the root container
    Overflow,
    /// `width` on the containers
    Width,
    /// `height` on the containers
    Height,
    /// `perspective` on the root container
    Perspective,
    /// `transform` on the camera container and object elements
    Transform,
    /// `transform-style` on the camera container
    TransformStyle,
    /// `pointer-events` on the camera container and object elements
    PointerEvents,
    /// `display` on object elements
    Display,
}

impl StyleProperty {
    /// The CSS property name written to the presentation layer
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Overflow => "overflow",
            Self::Width => "width",
            Self::Height => "height",
            Self::Perspective => "perspective",
            Self::Transform => "transform",
            Self::TransformStyle => "transform-style",
            Self::PointerEvents => "pointer-events",
            Self::Display => "display",
        }
    }
}

/// The style values currently set on one element
///
/// Unset properties hold the empty string, mirroring an empty inline style
/// declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    /// `position` value
    pub position: String,
    /// `overflow` value
    pub overflow: String,
    /// `width` value
    pub width: String,
    /// `height` value
    pub height: String,
    /// `perspective` value
    pub perspective: String,
    /// `transform` value
    pub transform: String,
    /// `transform-style` value
    pub transform_style: String,
    /// `pointer-events` value
    pub pointer_events: String,
    /// `display` value
    pub display: String,
}

impl ElementStyle {
    fn slot_mut(&mut self, property: StyleProperty) -> &mut String {
        match property {
            StyleProperty::Position => &mut self.position,
            StyleProperty::Overflow => &mut self.overflow,
            StyleProperty::Width => &mut self.width,
            StyleProperty::Height => &mut self.height,
            StyleProperty::Perspective => &mut self.perspective,
            StyleProperty::Transform => &mut self.transform,
            StyleProperty::TransformStyle => &mut self.transform_style,
            StyleProperty::PointerEvents => &mut self.pointer_events,
            StyleProperty::Display => &mut self.display,
        }
    }

    /// Read one property value
    pub fn value(&self, property: StyleProperty) -> &str {
        match property {
            StyleProperty::Position => &self.position,
            StyleProperty::Overflow => &self.overflow,
            StyleProperty::Width => &self.width,
            StyleProperty::Height => &self.height,
            StyleProperty::Perspective => &self.perspective,
            StyleProperty::Transform => &self.transform,
            StyleProperty::TransformStyle => &self.transform_style,
            StyleProperty::PointerEvents => &self.pointer_events,
            StyleProperty::Display => &self.display,
        }
    }
}

/// One element: its style, its parent link, and write counters
#[derive(Debug, Default)]
pub struct ElementState {
    /// Current style values
    pub style: ElementStyle,

    /// Parent element, if attached
    pub parent: Option<ElementKey>,

    /// Number of `transform` property writes received
    pub transform_writes: u64,

    /// Number of style property writes received, across all properties
    pub style_writes: u64,
}

/// Arena of presentation elements
///
/// All writes count calls, not value changes: the caching layers above the
/// store are responsible for suppressing redundant writes, and the counters
/// exist to verify that they do. Writes addressed to a key that is no
/// longer in the store are silently inert, matching a write to a detached
/// DOM element.
#[derive(Default)]
pub struct ElementStore {
    elements: SlotMap<ElementKey, ElementState>,
    backend: Option<Box<dyn DomBackend>>,
}

impl ElementStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the backend that mirrors mutations into a real
    /// presentation layer. Replaces any previous backend.
    pub fn set_backend(&mut self, backend: Box<dyn DomBackend>) {
        self.backend = Some(backend);
    }

    /// Create a new element with empty style and no parent
    pub fn create(&mut self) -> ElementKey {
        self.elements.insert(ElementState::default())
    }

    /// Remove an element from the store
    ///
    /// Children are not tracked, so removing a parent leaves dangling
    /// parent links in its children; subsequent writes through those
    /// children still resolve normally.
    pub fn remove(&mut self, element: ElementKey) {
        self.elements.remove(element);
    }

    /// Whether `element` is still in the store
    pub fn contains(&self, element: ElementKey) -> bool {
        self.elements.contains_key(element)
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the store holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element's current style, if it is live
    pub fn style(&self, element: ElementKey) -> Option<&ElementStyle> {
        self.elements.get(element).map(|state| &state.style)
    }

    /// The element's parent link, if it is live and attached
    pub fn parent(&self, element: ElementKey) -> Option<ElementKey> {
        self.elements.get(element).and_then(|state| state.parent)
    }

    /// Number of `transform` writes the element has received (0 for
    /// unknown keys)
    pub fn transform_writes(&self, element: ElementKey) -> u64 {
        self.elements
            .get(element)
            .map_or(0, |state| state.transform_writes)
    }

    /// Number of style writes the element has received across all
    /// properties (0 for unknown keys)
    pub fn style_writes(&self, element: ElementKey) -> u64 {
        self.elements
            .get(element)
            .map_or(0, |state| state.style_writes)
    }

    /// Write one style property
    pub fn set_property(&mut self, element: ElementKey, property: StyleProperty, value: &str) {
        let Some(state) = self.elements.get_mut(element) else {
            return;
        };
        state.style_writes += 1;
        if property == StyleProperty::Transform {
            state.transform_writes += 1;
        }
        let slot = state.style.slot_mut(property);
        slot.clear();
        slot.push_str(value);
        if let Some(backend) = self.backend.as_mut() {
            backend.style_changed(element, property.css_name(), value);
        }
    }

    /// Write the `transform` property
    pub fn set_transform(&mut self, element: ElementKey, value: &str) {
        self.set_property(element, StyleProperty::Transform, value);
    }

    /// Write the `display` property
    pub fn set_display(&mut self, element: ElementKey, value: &str) {
        self.set_property(element, StyleProperty::Display, value);
    }

    /// Write the `perspective` property
    pub fn set_perspective(&mut self, element: ElementKey, value: &str) {
        self.set_property(element, StyleProperty::Perspective, value);
    }

    /// Write `width` and `height` as pixel lengths
    pub fn set_box_size(&mut self, element: ElementKey, width: f64, height: f64) {
        self.set_property(element, StyleProperty::Width, &format!("{width}px"));
        self.set_property(element, StyleProperty::Height, &format!("{height}px"));
    }

    /// Attach `child` under `parent`, detaching it from any previous parent
    ///
    /// Inert when either key is no longer live.
    pub fn append_child(&mut self, parent: ElementKey, child: ElementKey) {
        if !self.elements.contains_key(parent) {
            return;
        }
        let Some(state) = self.elements.get_mut(child) else {
            return;
        };
        state.parent = Some(parent);
        if let Some(backend) = self.backend.as_mut() {
            backend.parent_changed(child, Some(parent));
        }
    }

    /// Detach `child` from its parent, if it has one
    pub fn remove_from_parent(&mut self, child: ElementKey) {
        let Some(state) = self.elements.get_mut(child) else {
            return;
        };
        if state.parent.take().is_some() {
            if let Some(backend) = self.backend.as_mut() {
                backend.parent_changed(child, None);
            }
        }
    }
}

impl std::fmt::Debug for ElementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementStore")
            .field("elements", &self.elements)
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_update_style_and_counters() {
        let mut dom = ElementStore::new();
        let element = dom.create();

        dom.set_transform(element, "matrix3d(1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1)");
        dom.set_display(element, "none");

        let style = dom.style(element).unwrap();
        assert_eq!(style.transform, "matrix3d(1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1)");
        assert_eq!(style.display, "none");
        assert_eq!(dom.transform_writes(element), 1);
        assert_eq!(dom.style_writes(element), 2);
    }

    #[test]
    fn writes_to_removed_elements_are_inert() {
        let mut dom = ElementStore::new();
        let element = dom.create();
        dom.remove(element);

        dom.set_transform(element, "translateZ(1px)");
        dom.append_child(element, element);

        assert!(!dom.contains(element));
        assert_eq!(dom.transform_writes(element), 0);
    }

    #[test]
    fn reparenting_tracks_parent_links() {
        let mut dom = ElementStore::new();
        let parent = dom.create();
        let child = dom.create();

        dom.append_child(parent, child);
        assert_eq!(dom.parent(child), Some(parent));

        dom.remove_from_parent(child);
        assert_eq!(dom.parent(child), None);
    }

    #[test]
    fn box_size_writes_pixel_lengths() {
        let mut dom = ElementStore::new();
        let element = dom.create();
        dom.set_box_size(element, 800.0, 600.0);

        let style = dom.style(element).unwrap();
        assert_eq!(style.width, "800px");
        assert_eq!(style.height, "600px");
    }

    #[test]
    fn backend_observes_writes() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<Vec<String>>>);

        impl crate::dom::DomBackend for Recorder {
            fn style_changed(&mut self, _element: ElementKey, property: &str, value: &str) {
                self.0.borrow_mut().push(format!("{property}={value}"));
            }

            fn parent_changed(&mut self, _element: ElementKey, parent: Option<ElementKey>) {
                self.0
                    .borrow_mut()
                    .push(format!("parent={}", parent.is_some()));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dom = ElementStore::new();
        dom.set_backend(Box::new(Recorder(Rc::clone(&log))));

        let parent = dom.create();
        let child = dom.create();
        dom.set_display(child, "none");
        dom.append_child(parent, child);

        assert_eq!(log.borrow().as_slice(), ["display=none", "parent=true"]);
    }
}
