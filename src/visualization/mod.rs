//! Visualization module
//!
//! Presentation adapter for the body hierarchy: body meshes, rings, glow,
//! orbit circles, starfield and lighting.

use bevy::prelude::*;

pub mod bodies;
pub mod config;
pub mod glow;
pub mod lighting;
pub mod orbits;
pub mod stars;

pub use bodies::{BodySpin, Hovered};
pub use config::SceneConfig;
pub use lighting::SunLight;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(
                Startup,
                (
                    (bodies::spawn_solar_system, glow::spawn_glow).chain(),
                    stars::spawn_starfield,
                ),
            )
            .add_systems(
                Update,
                (
                    bodies::sync_body_transforms.after(crate::orbital::advance_solar_system),
                    glow::animate_glow,
                    orbits::draw_orbit_gizmos,
                    stars::update_starfield_visibility,
                    lighting::apply_lighting_settings,
                    lighting::apply_background,
                ),
            );
    }
}
