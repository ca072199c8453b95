//! # CSS 3D Engine
//!
//! Projects a 3D scene graph onto a 2D presentation surface built from
//! nested DOM-like elements, by converting 4x4 transform matrices into CSS
//! 3D transform strings. The output composites consistently with a WebGL
//! render pass sharing the same camera.
//!
//! ## Features
//!
//! - **Camera Projection**: perspective and orthographic cameras mapped to
//!   CSS `perspective`/`transform` pairs
//! - **Scene Graph**: arena-backed node tree with local transforms and a
//!   per-frame world-matrix update pass
//! - **Billboards**: camera-facing nodes with an optional in-plane rotation
//! - **Write Caching**: per-node and per-camera string caches that suppress
//!   redundant style writes frame-to-frame
//! - **Pluggable DOM**: an in-memory element store with an observer trait;
//!   the `web` feature mirrors writes into a real browser DOM
//!
//! ## Quick Start
//!
//! ```rust
//! use css3d_engine::prelude::*;
//!
//! let mut dom = ElementStore::new();
//! let mut scene = Scene::new();
//! let mut renderer = Css3dRenderer::new(&mut dom);
//! renderer.set_size(800.0, 600.0, &mut dom);
//!
//! let card = scene.add_object(scene.root(), None, &mut dom).unwrap();
//! scene.node_mut(card).unwrap().transform.position.z = -200.0;
//!
//! let mut camera = Camera::perspective(45.0, 800.0 / 600.0, 0.1, 1000.0);
//! camera.look_at(
//!     Point3::new(0.0, 0.0, 400.0),
//!     Point3::origin(),
//!     Vec3::y(),
//! );
//!
//! renderer.render(&mut scene, &camera, &mut dom);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::float_cmp)]

pub mod foundation;
pub mod scene;
pub mod dom;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        dom::{DomBackend, ElementKey, ElementStore, StyleProperty},
        foundation::math::{Mat4, Point3, Quat, Transform, Vec3},
        render::Css3dRenderer,
        scene::{Camera, NodeKey, NodeKind, Projection, Scene, SceneError, SceneNode},
    };
}
