//! Scene management system
//!
//! Provides the retained node tree the renderer traverses every frame:
//! an arena-backed graph of transformable nodes, a subset of which carry a
//! presentation element, plus the camera that projects them.
//!
//! ## Architecture
//!
//! ```text
//! Scene (node arena, world-matrix update pass)
//!      ↓
//! Css3dRenderer (traversal, caches)
//!      ↓
//! ElementStore (style writes)
//! ```
//!
//! The scene owns structure (parent/child links, node lifetimes) and local
//! transforms; elements referenced by nodes are owned by the caller's
//! [`ElementStore`](crate::dom::ElementStore).

mod camera;
mod graph;
mod node;

use thiserror::Error;

pub use camera::{Camera, Projection};
pub use graph::{NodeKey, Scene};
pub use node::{NodeKind, RenderHook, SceneNode};

/// Errors from scene graph structure operations
///
/// The render path itself is total and never returns these; they cover
/// misuse of the graph-mutation API (stale keys, detaching the root,
/// billboard operations on non-billboard nodes).
#[derive(Error, Debug)]
pub enum SceneError {
    /// The node key does not refer to a live node in this scene
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeKey),

    /// The scene root cannot be detached
    #[error("the scene root cannot be detached")]
    DetachRoot,

    /// The operation requires a billboard node
    #[error("node is not a billboard")]
    NotABillboard,
}
