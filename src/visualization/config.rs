//! Visualization configuration

use bevy::prelude::*;

/// Scene tuning resource
#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    /// Asset subdirectory holding body textures
    pub texture_dir: String,
    pub ring_texture: String,
    pub glow_texture: String,
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
    /// Ring inner and outer radius as multiples of the body radius
    pub ring_inner_factor: f32,
    pub ring_outer_factor: f32,
    pub ring_opacity: f32,
    pub emissive_color: LinearRgba,
    pub hover_scale: f32,
    pub star_count: usize,
    pub star_shell_min: f32,
    pub star_shell_max: f32,
    pub orbit_color: Color,
    pub orbit_resolution: u32,
    pub glow_color: Color,
    pub glow_min_scale: f32,
    pub glow_max_scale: f32,
    /// Scale change per pulse step
    pub glow_step: f32,
    /// Pulse steps per second of wall time
    pub glow_steps_per_second: f32,
    /// Point light intensity at "night"
    pub night_point_light: f32,
    /// Lumens per control-panel unit of point light
    pub point_light_lumens_per_unit: f32,
    /// Ambient brightness per control-panel unit
    pub ambient_brightness_per_unit: f32,
    pub camera_start: Vec3,
    pub camera_min_distance: f32,
    pub camera_max_distance: f32,
    pub camera_far: f32,
    /// Camera distance from a body after a double-click focus
    pub focus_radius: f32,
    /// Focus animation speed as fraction per 60 Hz frame
    pub focus_smoothing: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: "textures".to_string(),
            ring_texture: "8k_saturn_ring_alpha.png".to_string(),
            glow_texture: "sun_glow.png".to_string(),
            sphere_sectors: 32,
            sphere_stacks: 32,
            ring_inner_factor: 1.5,
            ring_outer_factor: 2.5,
            ring_opacity: 0.8,
            emissive_color: LinearRgba::rgb(1.0, 1.0, 0.0),
            hover_scale: 1.2,
            star_count: 2000,
            star_shell_min: 400.0,
            star_shell_max: 800.0,
            orbit_color: Color::srgba(0.53, 0.53, 0.53, 0.4),
            orbit_resolution: 128,
            glow_color: Color::srgba(1.0, 1.0, 0.6, 0.7),
            glow_min_scale: 19.0,
            glow_max_scale: 23.0,
            glow_step: 0.04,
            glow_steps_per_second: 60.0,
            night_point_light: 0.1,
            point_light_lumens_per_unit: 10_000_000.0,
            ambient_brightness_per_unit: 750.0,
            camera_start: Vec3::new(0.0, 40.0, 100.0),
            camera_min_distance: 20.0,
            camera_max_distance: 300.0,
            camera_far: 2_000.0,
            focus_radius: 20.0,
            focus_smoothing: 0.03,
        }
    }
}

impl SceneConfig {
    pub fn texture_path(&self, file: &str) -> String {
        format!("{}/{}", self.texture_dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_path() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.texture_path("earth.jpg"), "textures/earth.jpg");
    }

    #[test]
    fn test_defaults_are_consistent() {
        let cfg = SceneConfig::default();
        assert!(cfg.ring_inner_factor < cfg.ring_outer_factor);
        assert!(cfg.star_shell_min < cfg.star_shell_max);
        assert!(cfg.glow_min_scale < cfg.glow_max_scale);
        assert!(cfg.camera_min_distance < cfg.camera_max_distance);
        assert!(cfg.camera_far > cfg.star_shell_max);
    }
}
