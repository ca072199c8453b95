//! Transform-projection engine
//!
//! Converts world matrices into CSS 3D transform strings and walks the
//! scene once per frame, writing only the styles that actually changed:
//!
//! 1. [`Css3dRenderer::render`] recomputes the frustum/camera CSS (on
//!    cache miss)
//! 2. the traversal visits nodes depth-first, pre-order
//! 3. each renderable node's world matrix (or camera-facing billboard
//!    matrix) is serialized by the [`css`] formatters
//! 4. the per-node string cache decides whether the write reaches the
//!    element

pub mod billboard;
pub mod css;

mod renderer;

pub use renderer::Css3dRenderer;
