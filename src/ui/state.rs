//! UI state management

use bevy::prelude::*;

use crate::orbital::BodyPath;

/// Panel visibility
#[derive(Resource, Debug)]
pub struct UIState {
    pub show_controls: bool,
    pub show_project_info: bool,
    /// Body whose info card is open
    pub info_body: Option<BodyPath>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            show_controls: true,
            show_project_info: false,
            info_body: None,
        }
    }
}

/// Background colours cycled by the control panel
pub const BACKGROUND_COLORS: [(&str, Color); 5] = [
    ("Black", Color::srgb(0.0, 0.0, 0.0)),
    ("Midnight", Color::srgb(0.02, 0.02, 0.1)),
    ("Nebula", Color::srgb(0.08, 0.03, 0.12)),
    ("Deep teal", Color::srgb(0.0, 0.07, 0.08)),
    ("Slate", Color::srgb(0.12, 0.12, 0.14)),
];

/// Stepped numeric controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knob {
    PlanetScale,
    OrbitRate,
    RotationRate,
    AmbientLight,
    PointLight,
    TimeScale,
}

impl Knob {
    pub const ALL: [Knob; 6] = [
        Knob::PlanetScale,
        Knob::OrbitRate,
        Knob::RotationRate,
        Knob::AmbientLight,
        Knob::PointLight,
        Knob::TimeScale,
    ];

    /// (min, max, step)
    pub fn range(self) -> (f64, f64, f64) {
        match self {
            Knob::PlanetScale => (0.1, 2.0, 0.1),
            Knob::OrbitRate => (0.001, 0.1, 0.001),
            Knob::RotationRate => (0.001, 0.2, 0.001),
            Knob::AmbientLight => (0.0, 1.0, 0.1),
            Knob::PointLight => (0.0, 5.0, 0.1),
            Knob::TimeScale => (0.0, 20.0, 0.25),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Knob::PlanetScale => "Planet scale",
            Knob::OrbitRate => "Orbit speed",
            Knob::RotationRate => "Rotation speed",
            Knob::AmbientLight => "Ambient light",
            Knob::PointLight => "Point light",
            Knob::TimeScale => "Time scale",
        }
    }

    fn decimals(self) -> usize {
        match self {
            Knob::OrbitRate | Knob::RotationRate => 3,
            Knob::TimeScale => 2,
            _ => 1,
        }
    }
}

/// A single control-panel or keyboard request
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    ToggleOrbits,
    ToggleStars,
    ToggleDayNight,
    CycleBackground,
    TogglePause,
    /// Move a knob by `steps` increments (negative to decrease)
    Nudge(Knob, i32),
}

/// What a control action changed, so callers know which side effects to run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlChange {
    Unchanged,
    Display,
    Lighting,
    Background,
    Pause(bool),
    PlanetScale(f64),
    OrbitRate(f64),
    RotationRate(f64),
    TimeScale(f64),
}

/// Runtime values behind the control panel
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ControlSettings {
    pub show_orbits: bool,
    pub show_stars: bool,
    pub day: bool,
    pub paused: bool,
    pub planet_scale: f64,
    pub orbit_rate: f64,
    pub rotation_rate: f64,
    pub background_index: usize,
    pub ambient_light: f64,
    pub point_light: f64,
    pub time_scale: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            show_orbits: true,
            show_stars: true,
            day: true,
            paused: false,
            planet_scale: 1.0,
            orbit_rate: 0.01,
            rotation_rate: 0.02,
            background_index: 0,
            ambient_light: 0.2,
            point_light: 2.0,
            time_scale: 1.0,
        }
    }
}

impl ControlSettings {
    pub fn value(&self, knob: Knob) -> f64 {
        match knob {
            Knob::PlanetScale => self.planet_scale,
            Knob::OrbitRate => self.orbit_rate,
            Knob::RotationRate => self.rotation_rate,
            Knob::AmbientLight => self.ambient_light,
            Knob::PointLight => self.point_light,
            Knob::TimeScale => self.time_scale,
        }
    }

    fn value_mut(&mut self, knob: Knob) -> &mut f64 {
        match knob {
            Knob::PlanetScale => &mut self.planet_scale,
            Knob::OrbitRate => &mut self.orbit_rate,
            Knob::RotationRate => &mut self.rotation_rate,
            Knob::AmbientLight => &mut self.ambient_light,
            Knob::PointLight => &mut self.point_light,
            Knob::TimeScale => &mut self.time_scale,
        }
    }

    pub fn background(&self) -> (&'static str, Color) {
        BACKGROUND_COLORS[self.background_index % BACKGROUND_COLORS.len()]
    }

    /// Apply an action, clamping stepped values to their ranges.
    pub fn apply(&mut self, action: ControlAction) -> ControlChange {
        match action {
            ControlAction::ToggleOrbits => {
                self.show_orbits = !self.show_orbits;
                ControlChange::Display
            }
            ControlAction::ToggleStars => {
                self.show_stars = !self.show_stars;
                ControlChange::Display
            }
            ControlAction::ToggleDayNight => {
                self.day = !self.day;
                ControlChange::Lighting
            }
            ControlAction::CycleBackground => {
                self.background_index = (self.background_index + 1) % BACKGROUND_COLORS.len();
                ControlChange::Background
            }
            ControlAction::TogglePause => {
                self.paused = !self.paused;
                ControlChange::Pause(self.paused)
            }
            ControlAction::Nudge(knob, steps) => {
                let (min, max, step) = knob.range();
                let current = self.value(knob);
                let next = snap_to_step(current + f64::from(steps) * step, min, max, step);
                if (next - current).abs() < step * 1e-6 {
                    return ControlChange::Unchanged;
                }
                *self.value_mut(knob) = next;
                match knob {
                    Knob::PlanetScale => ControlChange::PlanetScale(next),
                    Knob::OrbitRate => ControlChange::OrbitRate(next),
                    Knob::RotationRate => ControlChange::RotationRate(next),
                    Knob::AmbientLight | Knob::PointLight => ControlChange::Lighting,
                    Knob::TimeScale => ControlChange::TimeScale(next),
                }
            }
        }
    }

    /// Text shown next to a knob
    pub fn readout(&self, knob: Knob) -> String {
        format!(
            "{}: {:.*}",
            knob.label(),
            knob.decimals(),
            self.value(knob)
        )
    }
}

/// Clamp to `[min, max]` and round onto the `min + k * step` grid.
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    let clamped = value.clamp(min, max);
    let snapped = min + ((clamped - min) / step).round() * step;
    snapped.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_defaults_match_panel() {
        let s = ControlSettings::default();
        assert!(s.show_orbits && s.show_stars && s.day);
        assert_eq!(s.planet_scale, 1.0);
        assert_eq!(s.ambient_light, 0.2);
        assert_eq!(s.point_light, 2.0);
        assert_eq!(s.background().0, "Black");
    }

    #[test]
    fn test_toggles_report_changes() {
        let mut s = ControlSettings::default();
        assert_eq!(s.apply(ControlAction::ToggleOrbits), ControlChange::Display);
        assert!(!s.show_orbits);
        assert_eq!(s.apply(ControlAction::ToggleDayNight), ControlChange::Lighting);
        assert!(!s.day);
        assert_eq!(s.apply(ControlAction::TogglePause), ControlChange::Pause(true));
    }

    #[test]
    fn test_nudge_steps_and_clamps() {
        let mut s = ControlSettings::default();
        match s.apply(ControlAction::Nudge(Knob::PlanetScale, 3)) {
            ControlChange::PlanetScale(v) => assert!((v - 1.3).abs() < EPS),
            other => panic!("unexpected change {other:?}"),
        }

        s.apply(ControlAction::Nudge(Knob::PlanetScale, 100));
        assert!((s.planet_scale - 2.0).abs() < EPS);
        assert_eq!(
            s.apply(ControlAction::Nudge(Knob::PlanetScale, 1)),
            ControlChange::Unchanged
        );

        s.apply(ControlAction::Nudge(Knob::PlanetScale, -100));
        assert!((s.planet_scale - 0.1).abs() < EPS);
    }

    #[test]
    fn test_rate_knobs_report_new_rate() {
        let mut s = ControlSettings::default();
        match s.apply(ControlAction::Nudge(Knob::OrbitRate, -5)) {
            ControlChange::OrbitRate(v) => assert!((v - 0.005).abs() < EPS),
            other => panic!("unexpected change {other:?}"),
        }
        match s.apply(ControlAction::Nudge(Knob::RotationRate, 1000)) {
            ControlChange::RotationRate(v) => assert!((v - 0.2).abs() < EPS),
            other => panic!("unexpected change {other:?}"),
        }
    }

    #[test]
    fn test_background_cycle_wraps() {
        let mut s = ControlSettings::default();
        for _ in 0..BACKGROUND_COLORS.len() {
            s.apply(ControlAction::CycleBackground);
        }
        assert_eq!(s.background_index, 0);
    }

    #[test]
    fn test_snap_to_step() {
        assert!((snap_to_step(0.33, 0.0, 1.0, 0.1) - 0.3).abs() < EPS);
        assert!((snap_to_step(-4.0, 0.0, 1.0, 0.1)).abs() < EPS);
        assert!((snap_to_step(0.0101, 0.001, 0.1, 0.001) - 0.010).abs() < EPS);
        assert_eq!(snap_to_step(f64::NAN, 0.1, 2.0, 0.1), 0.1);
    }

    #[test]
    fn test_readout_precision() {
        let s = ControlSettings::default();
        assert_eq!(s.readout(Knob::OrbitRate), "Orbit speed: 0.010");
        assert_eq!(s.readout(Knob::PointLight), "Point light: 2.0");
    }
}
