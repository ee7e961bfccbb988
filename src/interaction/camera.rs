//! Camera focus and follow for double-clicked bodies

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::interaction::picking::BodyClicked;
use crate::orbital::BodyPath;
use crate::visualization::{BodySpin, SceneConfig};

/// Marker for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Body the camera is following, if any
#[derive(Resource, Default, Debug)]
pub struct CameraFocus {
    pub name: Option<String>,
    pub path: Option<BodyPath>,
}

impl CameraFocus {
    pub fn release(&mut self) {
        self.name = None;
        self.path = None;
    }
}

/// Per-frame blend factor for a smoothing constant tuned at 60 fps
pub fn lerp_factor(smoothing: f32, dt: f32) -> f32 {
    (1.0 - (1.0 - smoothing.clamp(0.0, 1.0)).powf(dt * 60.0)).clamp(0.0, 1.0)
}

pub fn start_focus_on_double_click(
    mut clicks: MessageReader<BodyClicked>,
    mut focus: ResMut<CameraFocus>,
    cfg: Res<SceneConfig>,
    mut q_camera: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    for click in clicks.read() {
        if !click.double {
            continue;
        }
        focus.name = Some(click.name.clone());
        focus.path = Some(click.path.clone());
        if let Ok(mut poc) = q_camera.single_mut() {
            poc.target_radius = cfg.focus_radius;
        }
        info!("Camera following {}", click.name);
    }
}

/// System to continuously track the focused body with the camera
pub fn follow_focused_body(
    time: Res<Time>,
    cfg: Res<SceneConfig>,
    focus: Res<CameraFocus>,
    spins: Query<(&BodySpin, &GlobalTransform)>,
    mut q_camera: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    let Some(path) = &focus.path else {
        return;
    };
    let Some(target) = spins
        .iter()
        .find(|(spin, _)| &spin.path == path)
        .map(|(_, transform)| transform.translation())
    else {
        return;
    };
    let Ok(mut poc) = q_camera.single_mut() else {
        return;
    };

    let t = lerp_factor(cfg.focus_smoothing, time.delta_secs());
    poc.target_focus = poc.target_focus.lerp(target, t);
}

/// Escape hands the camera back to the origin
pub fn release_focus_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut focus: ResMut<CameraFocus>,
    mut q_camera: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    if !keys.just_pressed(KeyCode::Escape) || focus.path.is_none() {
        return;
    }
    focus.release();
    if let Ok(mut poc) = q_camera.single_mut() {
        poc.target_focus = Vec3::ZERO;
    }
    info!("Camera focus released");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_factor_at_60fps_matches_smoothing() {
        assert!((lerp_factor(0.03, 1.0 / 60.0) - 0.03).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_factor_bounds() {
        assert_eq!(lerp_factor(0.5, 0.0), 0.0);
        assert!(lerp_factor(0.03, 10.0) > 0.99);
        assert_eq!(lerp_factor(1.0, 1.0 / 60.0), 1.0);
    }

    #[test]
    fn test_release_clears_focus() {
        let mut focus = CameraFocus {
            name: Some("Mars".into()),
            path: Some(BodyPath::root(4)),
        };
        focus.release();
        assert!(focus.name.is_none() && focus.path.is_none());
    }
}
