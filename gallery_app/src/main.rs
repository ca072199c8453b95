//! Card gallery demo
//!
//! Builds a ring of cards with a spinning billboard badge at the center,
//! orbits a perspective camera around it for a fixed number of frames, and
//! reports how many DOM style writes the renderer's caches suppressed.
//! Everything runs against the in-memory element store, so the demo works
//! headless; on a wasm target the same scene can be mirrored into a real
//! page via the `web` feature's `WebDomBackend`.

mod config;

use std::error::Error;
use std::f64::consts::TAU;

use css3d_engine::prelude::*;

use crate::config::GalleryConfig;

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        css3d_engine::foundation::logging::init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = GalleryConfig::load();

    let mut dom = ElementStore::new();
    let mut scene = Scene::new();
    let mut renderer = Css3dRenderer::new(&mut dom);
    renderer.set_size(config.viewport.width, config.viewport.height, &mut dom);

    let mut camera = Camera::perspective(
        config.camera.fov_y_degrees,
        config.viewport.width / config.viewport.height,
        0.1,
        5000.0,
    );

    // Ring of cards, rotated in place so each faces outward.
    let ring = scene.add_group(scene.root())?;
    let mut card_elements = Vec::with_capacity(config.ring.cards);
    for index in 0..config.ring.cards {
        let angle = TAU * index as f64 / config.ring.cards as f64;
        let card = scene.add_object(ring, None, &mut dom)?;
        let node = scene.node_mut(card).expect("card was just added");
        node.transform.position = Vec3::new(
            config.ring.radius * angle.sin(),
            0.0,
            config.ring.radius * angle.cos(),
        );
        node.transform.rotation = Quat::from_axis_angle(&Vec3::y_axis(), angle);
        card_elements.push(node.element().expect("objects carry an element"));
    }

    // Center badge: billboarded, so it faces the camera from every orbit
    // position.
    let badge = scene.add_billboard(scene.root(), None, 0.0, &mut dom)?;
    scene
        .node_mut(badge)
        .expect("badge was just added")
        .transform
        .position = Vec3::new(0.0, 40.0, 0.0);
    let badge_element = scene
        .node(badge)
        .and_then(SceneNode::element)
        .expect("billboards carry an element");

    log::info!(
        "rendering {} frames of {} cards at {}x{}",
        config.frames,
        config.ring.cards,
        config.viewport.width,
        config.viewport.height
    );

    for frame in 0..config.frames {
        let t = f64::from(frame);

        let orbit = t * config.camera.orbit_step;
        camera.look_at(
            Point3::new(
                config.camera.orbit_radius * orbit.sin(),
                config.camera.orbit_height,
                config.camera.orbit_radius * orbit.cos(),
            ),
            Point3::origin(),
            Vec3::y(),
        );

        scene
            .node_mut(badge)
            .expect("badge stays in the scene")
            .set_billboard_rotation(t * config.ring.badge_spin)?;

        renderer.render(&mut scene, &camera, &mut dom);
    }

    report(&config, &dom, &renderer, &card_elements, badge_element);
    Ok(())
}

/// Summarize how much DOM traffic the string caches suppressed
fn report(
    config: &GalleryConfig,
    dom: &ElementStore,
    renderer: &Css3dRenderer,
    card_elements: &[ElementKey],
    badge_element: ElementKey,
) {
    let frames = u64::from(config.frames);
    let card_writes: u64 = card_elements
        .iter()
        .map(|&element| dom.transform_writes(element))
        .sum();
    let badge_writes = dom.transform_writes(badge_element);
    let camera_writes = dom.transform_writes(renderer.camera_element());
    let naive = frames * (card_elements.len() as u64 + 2);

    log::info!(
        "transform writes: {} cards + {} badge + {} camera = {} (naive per-frame writing: {})",
        card_writes,
        badge_writes,
        camera_writes,
        card_writes + badge_writes + camera_writes,
        naive
    );
    log::info!(
        "camera container transform: {}",
        dom.style(renderer.camera_element())
            .map_or("<missing>", |style| style.transform.as_str())
    );
}
