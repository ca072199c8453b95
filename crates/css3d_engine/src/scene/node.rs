//! Scene node representation
//!
//! A node is a local transform plus a kind: a plain grouping node, an
//! element-carrying object, or an element-carrying billboard that is
//! re-oriented toward the camera every frame. The kind is a tagged
//! variant resolved with one `match` per node during traversal; there is
//! no runtime type inspection.

use crate::dom::ElementKey;
use crate::foundation::math::{Mat4, Transform};
use crate::scene::{NodeKey, SceneError};

/// Informational render callback, fired around a renderable node's style
/// writes. Hooks receive the node's key and must not touch the scene.
pub type RenderHook = Box<dyn FnMut(NodeKey)>;

/// What a node contributes to the presentation tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Grouping node with no element of its own; its children are still
    /// visited
    Group,

    /// Renderable node positioned by its world matrix
    Object {
        /// The presentation element this node positions
        element: ElementKey,
    },

    /// Renderable node re-oriented to face the camera every frame
    Billboard {
        /// The presentation element this node positions
        element: ElementKey,
        /// In-plane rotation in radians, applied after camera-facing
        /// alignment
        rotation: f64,
    },
}

impl NodeKind {
    /// The presentation element, for renderable kinds
    pub fn element(self) -> Option<ElementKey> {
        match self {
            Self::Group => None,
            Self::Object { element } | Self::Billboard { element, .. } => Some(element),
        }
    }
}

/// Pre/post render hooks attached to a node
#[derive(Default)]
pub struct RenderHooks {
    pub(crate) before: Option<RenderHook>,
    pub(crate) after: Option<RenderHook>,
}

impl std::fmt::Debug for RenderHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderHooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// One node in the scene graph
#[derive(Debug)]
pub struct SceneNode {
    /// Local transform, composed with ancestor transforms by the world
    /// update pass
    pub transform: Transform,

    /// Whether the node's element is displayed; does not affect children
    pub visible: bool,

    pub(crate) kind: NodeKind,
    pub(crate) world: Mat4,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) hooks: RenderHooks,
}

impl SceneNode {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            transform: Transform::identity(),
            visible: true,
            kind,
            world: Mat4::identity(),
            parent: None,
            children: Vec::new(),
            hooks: RenderHooks::default(),
        }
    }

    /// The node's kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The node's presentation element, for renderable kinds
    pub fn element(&self) -> Option<ElementKey> {
        self.kind.element()
    }

    /// The world matrix computed by the last update pass
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// The node's parent, `None` for the root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Update the in-plane rotation of a billboard node
    ///
    /// # Errors
    /// [`SceneError::NotABillboard`] when the node is not a billboard.
    pub fn set_billboard_rotation(&mut self, angle: f64) -> Result<(), SceneError> {
        match &mut self.kind {
            NodeKind::Billboard { rotation, .. } => {
                *rotation = angle;
                Ok(())
            }
            _ => Err(SceneError::NotABillboard),
        }
    }

    /// Install or clear the pre-render hook
    pub fn set_on_before_render(&mut self, hook: Option<RenderHook>) {
        self.hooks.before = hook;
    }

    /// Install or clear the post-render hook
    pub fn set_on_after_render(&mut self, hook: Option<RenderHook>) {
        self.hooks.after = hook;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billboard_rotation_rejects_other_kinds() {
        let mut group = SceneNode::new(NodeKind::Group);
        assert!(group.set_billboard_rotation(1.0).is_err());
    }

    #[test]
    fn billboard_rotation_updates_payload() {
        let element = ElementKey::default();
        let mut node = SceneNode::new(NodeKind::Billboard {
            element,
            rotation: 0.0,
        });
        node.set_billboard_rotation(0.5).unwrap();
        assert_eq!(
            node.kind(),
            NodeKind::Billboard {
                element,
                rotation: 0.5
            }
        );
    }
}
