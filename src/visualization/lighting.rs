//! Lighting configuration systems

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::ui::ControlSettings;
use crate::visualization::bodies::EmissiveBody;
use crate::visualization::config::SceneConfig;

/// Marker component for the point light at the emissive body
#[derive(Component)]
pub struct SunLight;

/// Point light intensity in control-panel units, after the day/night switch
pub fn effective_point_light(settings: &ControlSettings, cfg: &SceneConfig) -> f32 {
    if settings.day {
        settings.point_light as f32
    } else {
        cfg.night_point_light
    }
}

/// Push light values from the control settings into the scene
pub fn apply_lighting_settings(
    settings: Res<ControlSettings>,
    cfg: Res<SceneConfig>,
    mut ambient: ResMut<GlobalAmbientLight>,
    mut lights: Query<&mut PointLight, With<SunLight>>,
    emissive: Query<&MeshMaterial3d<StandardMaterial>, With<EmissiveBody>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !settings.is_changed() {
        return;
    }

    ambient.brightness = settings.ambient_light as f32 * cfg.ambient_brightness_per_unit;

    let intensity = effective_point_light(&settings, &cfg) * cfg.point_light_lumens_per_unit;
    for mut light in lights.iter_mut() {
        light.intensity = intensity;
    }

    let glow = if settings.day {
        cfg.emissive_color
    } else {
        LinearRgba::BLACK
    };
    for handle in emissive.iter() {
        if let Some(material) = materials.get_mut(&handle.0)
            && material.emissive != glow
        {
            material.emissive = glow;
        }
    }
}

/// Keep the clear colour in step with the background cycle
pub fn apply_background(settings: Res<ControlSettings>, mut clear: ResMut<ClearColor>) {
    if !settings.is_changed() {
        return;
    }
    let (_, color) = settings.background();
    if clear.0 != color {
        clear.0 = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_overrides_point_light() {
        let cfg = SceneConfig::default();
        let mut settings = ControlSettings {
            point_light: 4.0,
            ..Default::default()
        };
        assert_eq!(effective_point_light(&settings, &cfg), 4.0);
        settings.day = false;
        assert!((effective_point_light(&settings, &cfg) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_lighting_follows_settings() {
        let mut app = App::new();
        app.init_resource::<SceneConfig>()
            .init_resource::<ControlSettings>()
            .init_resource::<GlobalAmbientLight>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, apply_lighting_settings);

        let light = app
            .world_mut()
            .spawn((PointLight::default(), SunLight))
            .id();
        app.update();

        let cfg = SceneConfig::default();
        let world = app.world_mut();
        let lumens = world.get::<PointLight>(light).map(|l| l.intensity);
        assert_eq!(lumens, Some(2.0 * cfg.point_light_lumens_per_unit));
        let brightness = world.resource::<GlobalAmbientLight>().brightness;
        assert!((brightness - 0.2 * cfg.ambient_brightness_per_unit).abs() < 1e-3);

        world.resource_mut::<ControlSettings>().day = false;
        app.update();
        let lumens = app.world().get::<PointLight>(light).map(|l| l.intensity);
        assert_eq!(lumens, Some(cfg.night_point_light * cfg.point_light_lumens_per_unit));
    }
}
