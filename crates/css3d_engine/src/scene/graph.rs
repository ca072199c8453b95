//! Arena-backed scene graph
//!
//! Nodes live in a slotmap; keys are generational, so a key to a detached
//! node can never alias a later node that reuses the slot. Side tables
//! keyed by `NodeKey` (such as the renderer's transform cache) therefore
//! act as weak associations: they never keep a node alive, and their
//! entries are reclaimed once the slot is freed.

use slotmap::{new_key_type, SlotMap};

use crate::dom::{ElementKey, ElementStore, StyleProperty};
use crate::foundation::math::Mat4;
use crate::scene::{NodeKind, SceneError, SceneNode};

new_key_type! {
    /// Stable handle to a node in a [`Scene`]
    pub struct NodeKey;
}

/// The scene graph: a tree of [`SceneNode`]s rooted at a grouping node
///
/// The graph owns structure and node lifetimes. Presentation elements
/// referenced by renderable nodes are owned by the caller's
/// [`ElementStore`] and survive their node.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,

    /// When set (the default), [`render`](crate::render::Css3dRenderer::render)
    /// runs the world-matrix update pass before traversing. Clear it if
    /// world matrices are kept up to date externally.
    pub auto_update: bool,
}

impl Scene {
    /// Create a scene containing only the root grouping node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(NodeKind::Group));
        Self {
            nodes,
            root,
            auto_update: true,
        }
    }

    /// The root grouping node
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Whether `key` refers to a live node in this scene
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Borrow a node
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Add a grouping node under `parent`
    ///
    /// # Errors
    /// [`SceneError::UnknownNode`] when `parent` is not live.
    pub fn add_group(&mut self, parent: NodeKey) -> Result<NodeKey, SceneError> {
        self.add_node(parent, NodeKind::Group)
    }

    /// Add a renderable object node under `parent`
    ///
    /// When `element` is `None` a fresh empty element is allocated in
    /// `dom`. Either way the element receives the object styling defaults
    /// (`position: absolute`, `pointer-events: auto`).
    ///
    /// # Errors
    /// [`SceneError::UnknownNode`] when `parent` is not live.
    pub fn add_object(
        &mut self,
        parent: NodeKey,
        element: Option<ElementKey>,
        dom: &mut ElementStore,
    ) -> Result<NodeKey, SceneError> {
        let element = Self::prepare_element(element, dom);
        self.add_node(parent, NodeKind::Object { element })
    }

    /// Add a billboard node under `parent`
    ///
    /// `rotation` is the in-plane rotation in radians applied after
    /// camera-facing alignment; pass 0.0 for a plain camera-facing
    /// billboard. Element handling is as in [`Self::add_object`].
    ///
    /// # Errors
    /// [`SceneError::UnknownNode`] when `parent` is not live.
    pub fn add_billboard(
        &mut self,
        parent: NodeKey,
        element: Option<ElementKey>,
        rotation: f64,
        dom: &mut ElementStore,
    ) -> Result<NodeKey, SceneError> {
        let element = Self::prepare_element(element, dom);
        self.add_node(parent, NodeKind::Billboard { element, rotation })
    }

    fn prepare_element(element: Option<ElementKey>, dom: &mut ElementStore) -> ElementKey {
        let element = element.unwrap_or_else(|| dom.create());
        dom.set_property(element, StyleProperty::Position, "absolute");
        dom.set_property(element, StyleProperty::PointerEvents, "auto");
        element
    }

    fn add_node(&mut self, parent: NodeKey, kind: NodeKind) -> Result<NodeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let mut node = SceneNode::new(kind);
        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(key);
        }
        Ok(key)
    }

    /// Detach and destroy the subtree rooted at `key`
    ///
    /// Unlinks the node from its parent, frees the subtree's arena slots,
    /// and removes every subtree element that is still attached to a
    /// presentation parent from that parent. The elements themselves stay
    /// in `dom`; their owner decides when to drop them.
    ///
    /// # Errors
    /// [`SceneError::DetachRoot`] for the root,
    /// [`SceneError::UnknownNode`] for a stale key.
    pub fn detach(&mut self, key: NodeKey, dom: &mut ElementStore) -> Result<(), SceneError> {
        if key == self.root {
            return Err(SceneError::DetachRoot);
        }
        let parent = self
            .nodes
            .get(key)
            .ok_or(SceneError::UnknownNode(key))?
            .parent;
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_node.children.retain(|&child| child != key);
        }

        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            if let Some(element) = node.kind.element() {
                if dom.parent(element).is_some() {
                    dom.remove_from_parent(element);
                }
            }
            pending.extend(node.children);
        }
        log::trace!("detached subtree at {key:?}");
        Ok(())
    }

    /// Recompute every node's world matrix from the root down
    ///
    /// `world = parent_world * local`, children visited in insertion
    /// order.
    pub fn update_world_transforms(&mut self) {
        self.update_subtree(self.root, Mat4::identity());
    }

    fn update_subtree(&mut self, key: NodeKey, parent_world: Mat4) {
        let (world, children) = {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            let world = parent_world * node.transform.to_matrix();
            node.world = world;
            (world, node.children.clone())
        };
        for child in children {
            self.update_subtree(child, world);
        }
    }

    pub(crate) fn fire_before_hook(&mut self, key: NodeKey) {
        if let Some(mut hook) = self
            .nodes
            .get_mut(key)
            .and_then(|node| node.hooks.before.take())
        {
            hook(key);
            if let Some(node) = self.nodes.get_mut(key) {
                node.hooks.before = Some(hook);
            }
        }
    }

    pub(crate) fn fire_after_hook(&mut self, key: NodeKey) {
        if let Some(mut hook) = self
            .nodes
            .get_mut(key)
            .and_then(|node| node.hooks.after.take())
        {
            hook(key);
            if let Some(node) = self.nodes.get_mut(key) {
                node.hooks.after = Some(hook);
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
