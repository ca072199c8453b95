//! Gallery demo configuration
//!
//! Loaded from a RON file so the scene layout can be tweaked without
//! recompiling; falls back to built-in defaults when no file is found.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

/// Orbiting perspective camera parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f64,
    /// Distance of the orbit from the scene center
    pub orbit_radius: f64,
    /// Camera height above the ring plane
    pub orbit_height: f64,
    /// Orbit angle advanced per frame, in radians
    pub orbit_step: f64,
}

/// Card ring layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of cards around the ring
    pub cards: usize,
    /// Ring radius in CSS pixels
    pub radius: f64,
    /// In-plane rotation advanced per frame on the center billboard
    pub badge_spin: f64,
}

/// Top-level demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub ring: RingConfig,
    /// Number of frames to simulate
    pub frames: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig {
                width: 1280.0,
                height: 720.0,
            },
            camera: CameraConfig {
                fov_y_degrees: 40.0,
                orbit_radius: 900.0,
                orbit_height: 160.0,
                orbit_step: 0.01,
            },
            ring: RingConfig {
                cards: 12,
                radius: 420.0,
                badge_spin: 0.004,
            },
            frames: 240,
        }
    }
}

impl GalleryConfig {
    /// Load the configuration, trying common locations relative to the
    /// working directory before falling back to the defaults
    pub fn load() -> Self {
        let candidates = ["gallery.ron", "gallery_app/gallery.ron"];

        for candidate in candidates {
            if !Path::new(candidate).exists() {
                continue;
            }
            match std::fs::read_to_string(candidate) {
                Ok(text) => match ron::from_str(&text) {
                    Ok(config) => {
                        log::info!("loaded gallery config from {candidate}");
                        return config;
                    }
                    Err(error) => {
                        log::warn!("ignoring malformed {candidate}: {error}");
                    }
                },
                Err(error) => {
                    log::warn!("could not read {candidate}: {error}");
                }
            }
        }

        log::info!("no gallery.ron found, using built-in defaults");
        Self::default()
    }
}
