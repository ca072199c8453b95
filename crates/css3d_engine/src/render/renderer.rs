//! Renderer: camera projection, scene traversal, and write caches
//!
//! One renderer instance owns one root container element and one nested
//! camera container element. The camera's CSS transform goes on the camera
//! container; every renderable element is flattened into that container
//! regardless of scene-graph depth, so the camera transform cascades to
//! everything and scene-graph reparenting never forces presentation-tree
//! reparenting.
//!
//! All caches are instance state — two renderers over disjoint element
//! stores never interfere.

use slotmap::SecondaryMap;

use crate::dom::{ElementKey, ElementStore, StyleProperty};
use crate::render::billboard::billboard_matrix;
use crate::render::css::{camera_css_matrix, object_css_matrix, stabilize};
use crate::scene::{Camera, NodeKey, NodeKind, Projection, Scene};

/// Last-written camera state, compared every frame to skip redundant
/// writes to the container elements
#[derive(Debug, Default)]
struct CameraCache {
    frustum: f64,
    style: String,
}

/// Projects a scene onto nested presentation elements via CSS transforms
///
/// Construction creates the two container elements in the given store;
/// the caller is responsible for attaching the root container (see
/// [`Css3dRenderer::root_element`]) to a visible location in its
/// presentation layer.
#[derive(Debug)]
pub struct Css3dRenderer {
    root_element: ElementKey,
    camera_element: ElementKey,

    width: f64,
    height: f64,
    width_half: f64,
    height_half: f64,

    camera_cache: CameraCache,
    object_cache: SecondaryMap<NodeKey, String>,
}

impl Css3dRenderer {
    /// Create a renderer, allocating its container elements in `dom`
    pub fn new(dom: &mut ElementStore) -> Self {
        let root_element = dom.create();
        dom.set_property(root_element, StyleProperty::Overflow, "hidden");

        let camera_element = dom.create();
        dom.set_property(camera_element, StyleProperty::TransformStyle, "preserve-3d");
        dom.set_property(camera_element, StyleProperty::PointerEvents, "none");
        dom.append_child(root_element, camera_element);

        Self {
            root_element,
            camera_element,
            width: 0.0,
            height: 0.0,
            width_half: 0.0,
            height_half: 0.0,
            camera_cache: CameraCache::default(),
            object_cache: SecondaryMap::new(),
        }
    }

    /// The current viewport dimensions
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The root container element (overflow-hidden viewport)
    pub fn root_element(&self) -> ElementKey {
        self.root_element
    }

    /// The camera container element all renderable elements end up under
    pub fn camera_element(&self) -> ElementKey {
        self.camera_element
    }

    /// Resize the viewport
    ///
    /// Writes the box dimensions of both containers and updates the
    /// half-extents used by the projection math. Idempotent; does not
    /// trigger a render.
    pub fn set_size(&mut self, width: f64, height: f64, dom: &mut ElementStore) {
        self.width = width;
        self.height = height;
        self.width_half = width / 2.0;
        self.height_half = height / 2.0;

        dom.set_box_size(self.root_element, self.width, self.height);
        dom.set_box_size(self.camera_element, self.width, self.height);
        log::debug!("renderer resized to {width}x{height}");
    }

    /// Render one frame
    ///
    /// Recomputes the frustum and camera CSS (writing them only on cache
    /// miss), runs the scene's world update pass when
    /// [`Scene::auto_update`] is set, then traverses the graph writing
    /// each renderable element's transform (on cache miss), display
    /// (every frame) and parent link (on first encounter).
    pub fn render(&mut self, scene: &mut Scene, camera: &Camera, dom: &mut ElementStore) {
        let frustum = camera.projection_matrix()[(1, 1)] * self.height_half;

        if self.camera_cache.frustum != frustum {
            let perspective = if camera.is_perspective() {
                format!("{frustum}px")
            } else {
                String::new()
            };
            dom.set_perspective(self.root_element, &perspective);
            self.camera_cache.frustum = frustum;
            log::trace!("frustum updated to {frustum}");
        }

        if scene.auto_update {
            scene.update_world_transforms();
        }

        let camera_css = match *camera.projection() {
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                ..
            } => {
                let tx = -(right + left) / 2.0;
                let ty = (top + bottom) / 2.0;
                format!(
                    "scale({})translate({}px,{}px){}",
                    frustum,
                    stabilize(tx),
                    stabilize(ty),
                    camera_css_matrix(camera.world_inverse())
                )
            }
            Projection::Perspective { .. } => format!(
                "translateZ({}px){}",
                frustum,
                camera_css_matrix(camera.world_inverse())
            ),
        };

        let style = format!(
            "{}translate({}px,{}px)",
            camera_css, self.width_half, self.height_half
        );
        if self.camera_cache.style != style {
            dom.set_transform(self.camera_element, &style);
            self.camera_cache.style = style;
        }

        // Reclaim cache entries whose node slots were freed by a detach.
        self.object_cache.retain(|key, _| scene.contains(key));

        self.render_node(scene.root(), scene, camera, dom);
    }

    /// Recursive depth-first, pre-order traversal
    fn render_node(
        &mut self,
        key: NodeKey,
        scene: &mut Scene,
        camera: &Camera,
        dom: &mut ElementStore,
    ) {
        let Some(node) = scene.node(key) else {
            return;
        };
        let kind = node.kind();
        let children = node.children().to_vec();

        match kind {
            NodeKind::Group => {}
            NodeKind::Object { element } => {
                scene.fire_before_hook(key);
                if let Some(node) = scene.node(key) {
                    let style = object_css_matrix(node.world_matrix());
                    let visible = node.visible;
                    self.apply_object_style(key, element, &style, visible, dom);
                }
                scene.fire_after_hook(key);
            }
            NodeKind::Billboard { element, rotation } => {
                scene.fire_before_hook(key);
                if let Some(node) = scene.node(key) {
                    let matrix =
                        billboard_matrix(camera.world_inverse(), node.world_matrix(), rotation);
                    let style = object_css_matrix(&matrix);
                    let visible = node.visible;
                    self.apply_object_style(key, element, &style, visible, dom);
                }
                scene.fire_after_hook(key);
            }
        }

        for child in children {
            self.render_node(child, scene, camera, dom);
        }
    }

    /// Write one renderable element's styles, consulting the object cache
    fn apply_object_style(
        &mut self,
        key: NodeKey,
        element: ElementKey,
        style: &str,
        visible: bool,
        dom: &mut ElementStore,
    ) {
        let changed = self
            .object_cache
            .get(key)
            .map_or(true, |cached| cached != style);
        if changed {
            dom.set_transform(element, style);
            self.object_cache.insert(key, style.to_owned());
        }

        // Unconditional: visibility can change without a matrix change,
        // and the write is cheap relative to a transform write.
        dom.set_display(element, if visible { "" } else { "none" });

        if dom.parent(element) != Some(self.camera_element) {
            dom.append_child(self.camera_element, element);
        }
    }
}
