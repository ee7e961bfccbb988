//! Orbit circles for root bodies

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::orbital::SolarSystem;
use crate::ui::ControlSettings;
use crate::visualization::config::SceneConfig;

/// Radii of the orbit circles to draw: one per root with a non-zero distance.
pub fn orbit_radii(system: &SolarSystem) -> Vec<f32> {
    system
        .roots()
        .iter()
        .filter(|body| body.orbital_distance() > 0.0)
        .map(|body| body.orbital_distance() as f32)
        .collect()
}

pub fn draw_orbit_gizmos(
    mut gizmos: Gizmos,
    system: Res<SolarSystem>,
    settings: Res<ControlSettings>,
    cfg: Res<SceneConfig>,
) {
    if !settings.show_orbits {
        return;
    }
    // gizmo circles are drawn in the local XY plane
    let isometry = Isometry3d::new(Vec3::ZERO, Quat::from_rotation_x(FRAC_PI_2));
    for radius in orbit_radii(&system) {
        gizmos
            .circle(isometry, radius, cfg.orbit_color)
            .resolution(cfg.orbit_resolution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::{Body, Hierarchy};

    #[test]
    fn test_only_orbiting_roots_get_circles() {
        let earth = Body::new("Earth", 2.0, 23.0).with_satellite(Body::new("Moon", 0.5, 3.0));
        let system = SolarSystem(Hierarchy::new(vec![
            Body::new("Sun", 7.0, 0.0),
            Body::new("Mercury", 1.0, 12.0),
            earth,
        ]));
        assert_eq!(orbit_radii(&system), vec![12.0, 23.0]);
    }
}
