//! Pulsing halo around emissive bodies

use bevy::light::NotShadowCaster;
use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::visualization::bodies::{CelestialBody, EmissiveBody};
use crate::visualization::config::SceneConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulsePhase {
    Growing,
    Shrinking,
}

/// Scale oscillator. The phase flips once the scale leaves `[min, max]`.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct GlowPulse {
    pub scale: f32,
    pub phase: PulsePhase,
    /// Fractional pulse steps carried between frames
    carry: f32,
}

impl GlowPulse {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            phase: PulsePhase::Growing,
            carry: 0.0,
        }
    }

    /// One pulse step.
    pub fn step(&mut self, step: f32, min: f32, max: f32) {
        match self.phase {
            PulsePhase::Growing => {
                self.scale += step;
                if self.scale > max {
                    self.phase = PulsePhase::Shrinking;
                }
            }
            PulsePhase::Shrinking => {
                self.scale -= step;
                if self.scale < min {
                    self.phase = PulsePhase::Growing;
                }
            }
        }
    }

    /// Run as many whole steps as `steps` (fractional) accumulates to.
    pub fn advance(&mut self, steps: f32, step: f32, min: f32, max: f32) {
        self.carry += steps.max(0.0);
        while self.carry >= 1.0 {
            self.carry -= 1.0;
            self.step(step, min, max);
        }
    }
}

/// Attach a glow quad to every emissive body's frame
pub fn spawn_glow(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    cfg: Res<SceneConfig>,
    emissive: Query<&ChildOf, With<EmissiveBody>>,
    frames: Query<&CelestialBody>,
) {
    if emissive.is_empty() {
        return;
    }
    let mesh = meshes.add(Rectangle::new(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: cfg.glow_color,
        base_color_texture: Some(asset_server.load(cfg.texture_path(&cfg.glow_texture))),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    for child_of in emissive.iter() {
        let frame = child_of.parent();
        let name = frames
            .get(frame)
            .map(|body| body.name.clone())
            .unwrap_or_default();
        let pulse = GlowPulse::new(cfg.glow_min_scale + 1.0);
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_scale(Vec3::new(pulse.scale, pulse.scale, 1.0)),
            pulse,
            Pickable::IGNORE,
            NotShadowCaster,
            ChildOf(frame),
            Name::new(format!("{name} glow")),
        ));
    }
}

/// Pulse the halo and keep it facing the camera
pub fn animate_glow(
    time: Res<Time>,
    cfg: Res<SceneConfig>,
    camera: Query<&GlobalTransform, With<Camera3d>>,
    mut glows: Query<(&mut GlowPulse, &mut Transform)>,
) {
    let steps = time.delta_secs() * cfg.glow_steps_per_second;
    let facing = camera.iter().next().map(|cam| cam.rotation());

    for (mut pulse, mut transform) in glows.iter_mut() {
        pulse.advance(steps, cfg.glow_step, cfg.glow_min_scale, cfg.glow_max_scale);
        transform.scale = Vec3::new(pulse.scale, pulse.scale, 1.0);
        // frames never rotate, so a local rotation equal to the camera's
        // world rotation yields a billboard
        if let Some(rotation) = facing {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_turns_at_bounds() {
        let mut pulse = GlowPulse::new(22.98);
        pulse.step(0.04, 19.0, 23.0);
        assert_eq!(pulse.phase, PulsePhase::Shrinking);
        pulse.step(0.04, 19.0, 23.0);
        assert!((pulse.scale - 22.98).abs() < 1e-4);
        assert_eq!(pulse.phase, PulsePhase::Shrinking);
    }

    #[test]
    fn test_pulse_stays_near_band() {
        let mut pulse = GlowPulse::new(20.0);
        let mut phases_seen = (false, false);
        for _ in 0..1000 {
            pulse.step(0.04, 19.0, 23.0);
            assert!(pulse.scale > 19.0 - 0.05 && pulse.scale < 23.0 + 0.05);
            match pulse.phase {
                PulsePhase::Growing => phases_seen.0 = true,
                PulsePhase::Shrinking => phases_seen.1 = true,
            }
        }
        assert!(phases_seen.0 && phases_seen.1);
    }

    #[test]
    fn test_advance_accumulates_fractional_steps() {
        let mut pulse = GlowPulse::new(20.0);
        pulse.advance(0.5, 0.04, 19.0, 23.0);
        assert_eq!(pulse.scale, 20.0);
        pulse.advance(0.5, 0.04, 19.0, 23.0);
        assert!((pulse.scale - 20.04).abs() < 1e-5);

        pulse.advance(3.0, 0.04, 19.0, 23.0);
        assert!((pulse.scale - 20.16).abs() < 1e-4);
    }
}
