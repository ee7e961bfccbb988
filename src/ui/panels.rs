//! UI panel layout and text builders
use bevy::prelude::*;
use bevy_feathers::palette;

use crate::catalog::CatalogStatus;
use crate::orbital::{BodyPath, BodySnapshot, Hierarchy};
use crate::ui::state::{ControlAction, ControlSettings, Knob};

const PANEL_BG: Color = Color::srgba(0.02, 0.04, 0.06, 0.85);
pub const BUTTON_BG: Color = Color::srgba(0.06, 0.12, 0.16, 0.9);
pub const BUTTON_BG_HOVER: Color = Color::srgba(0.08, 0.2, 0.26, 0.95);
pub const BUTTON_BG_PRESSED: Color = Color::srgba(0.1, 0.26, 0.32, 0.95);
const HEADING_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;

#[derive(Component)]
pub struct ControlPanel;

#[derive(Component)]
pub struct InfoPanel;

#[derive(Component)]
pub struct InfoText;

#[derive(Component)]
pub struct ProjectInfoPanel;

/// Button that emits a control action when pressed
#[derive(Component, Clone, Copy, Debug)]
pub struct ControlButton(pub ControlAction);

#[derive(Component)]
pub struct CloseInfoButton;

#[derive(Component)]
pub struct ProjectInfoToggle;

/// Text showing a knob's current value
#[derive(Component, Clone, Copy)]
pub struct KnobReadout(pub Knob);

/// Text on a toggle button
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleLabel {
    Orbits,
    Stars,
    DayNight,
    Background,
    Pause,
}

impl ToggleLabel {
    pub fn text(self, settings: &ControlSettings) -> String {
        let on_off = |on: bool| if on { "On" } else { "Off" };
        match self {
            ToggleLabel::Orbits => format!("Orbits: {}", on_off(settings.show_orbits)),
            ToggleLabel::Stars => format!("Stars: {}", on_off(settings.show_stars)),
            ToggleLabel::DayNight => {
                format!("Day/Night: {}", if settings.day { "Day" } else { "Night" })
            }
            ToggleLabel::Background => format!("Background: {}", settings.background().0),
            ToggleLabel::Pause => {
                if settings.paused {
                    "Resume".to_string()
                } else {
                    "Pause".to_string()
                }
            }
        }
    }

    fn action(self) -> ControlAction {
        match self {
            ToggleLabel::Orbits => ControlAction::ToggleOrbits,
            ToggleLabel::Stars => ControlAction::ToggleStars,
            ToggleLabel::DayNight => ControlAction::ToggleDayNight,
            ToggleLabel::Background => ControlAction::CycleBackground,
            ToggleLabel::Pause => ControlAction::TogglePause,
        }
    }
}

fn text(value: impl Into<String>, size: f32) -> impl Bundle {
    colored_text(value, size, palette::LIGHT_GRAY_1)
}

fn colored_text(value: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn panel_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(6.0),
        padding: UiRect::all(Val::Px(12.0)),
        ..default()
    }
}

pub fn spawn_control_panel(mut commands: Commands, settings: Res<ControlSettings>) {
    commands
        .spawn((
            Node {
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                min_width: Val::Px(240.0),
                ..panel_node()
            },
            BackgroundColor(PANEL_BG),
            ControlPanel,
            Name::new("Control panel"),
        ))
        .with_children(|panel| {
            panel.spawn(text("Controls", HEADING_SIZE));

            for toggle in [
                ToggleLabel::Orbits,
                ToggleLabel::Stars,
                ToggleLabel::DayNight,
                ToggleLabel::Background,
                ToggleLabel::Pause,
            ] {
                panel
                    .spawn((
                        Button,
                        button_node(),
                        BackgroundColor(BUTTON_BG),
                        ControlButton(toggle.action()),
                    ))
                    .with_children(|button| {
                        button.spawn((text(toggle.text(&settings), BODY_SIZE), toggle));
                    });
            }

            for knob in Knob::ALL {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        for (label, steps) in [("-", -1), ("+", 1)] {
                            row.spawn((
                                Button,
                                Node {
                                    width: Val::Px(24.0),
                                    ..button_node()
                                },
                                BackgroundColor(BUTTON_BG),
                                ControlButton(ControlAction::Nudge(knob, steps)),
                            ))
                            .with_children(|button| {
                                button.spawn(text(label, BODY_SIZE));
                            });
                        }
                        row.spawn((text(settings.readout(knob), BODY_SIZE), KnobReadout(knob)));
                    });
            }

            panel.spawn(colored_text(
                "Click: info  Double-click: follow  Esc: release",
                BODY_SIZE - 2.0,
                palette::LIGHT_GRAY_2,
            ));
        });
}

pub fn spawn_info_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                bottom: Val::Px(12.0),
                left: Val::Px(12.0),
                max_width: Val::Px(300.0),
                display: Display::None,
                ..panel_node()
            },
            BackgroundColor(PANEL_BG),
            InfoPanel,
            Name::new("Info panel"),
        ))
        .with_children(|panel| {
            panel.spawn((text("", BODY_SIZE), InfoText));
            panel
                .spawn((
                    Button,
                    button_node(),
                    BackgroundColor(BUTTON_BG),
                    CloseInfoButton,
                ))
                .with_children(|button| {
                    button.spawn(text("Close", BODY_SIZE));
                });
        });
}

pub fn spawn_project_info(mut commands: Commands, status: Option<Res<CatalogStatus>>) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                width: Val::Px(36.0),
                height: Val::Px(36.0),
                ..button_node()
            },
            BackgroundColor(BUTTON_BG),
            ProjectInfoToggle,
        ))
        .with_children(|button| {
            button.spawn(colored_text("i", HEADING_SIZE, palette::ACCENT));
        });

    let status_line = status
        .map(|s| catalog_status_text(&s))
        .unwrap_or_else(|| "Catalog: unavailable".to_string());

    commands
        .spawn((
            Node {
                top: Val::Px(56.0),
                left: Val::Px(12.0),
                max_width: Val::Px(340.0),
                display: Display::None,
                ..panel_node()
            },
            BackgroundColor(PANEL_BG),
            ProjectInfoPanel,
            Name::new("Project info"),
        ))
        .with_children(|panel| {
            panel.spawn(text("Bevy Orrery", HEADING_SIZE + 4.0));
            panel.spawn(colored_text(
                "An interactive 3D model of a solar system",
                BODY_SIZE,
                palette::LIGHT_GRAY_2,
            ));
            panel.spawn(text("Features", HEADING_SIZE));
            panel.spawn(text(
                "- Orbits and rotations driven by the body catalog\n\
                 - Satellites orbit their parent body\n\
                 - Orbit camera with follow on double-click\n\
                 - Day/night lighting\n\
                 - Body information on click\n\
                 - Adjustable speeds, scale and lighting",
                BODY_SIZE,
            ));
            panel.spawn(text("Keys", HEADING_SIZE));
            panel.spawn(text(
                "O orbits   S stars   N day/night   B background\n\
                 P pause   [ ] time scale   - = planet scale\n\
                 H controls   I this panel   Esc close/release",
                BODY_SIZE,
            ));
            panel.spawn(colored_text(status_line, BODY_SIZE - 2.0, palette::LIGHT_GRAY_2));
        });
}

pub fn catalog_status_text(status: &CatalogStatus) -> String {
    let mut line = format!("Catalog: {} ({} bodies)", status.source, status.body_count);
    if let Some(reason) = &status.fallback_reason {
        line.push_str(&format!("\nUser catalog rejected: {reason}"));
    }
    line
}

fn describe_snapshot(snapshot: &BodySnapshot, parent: Option<&str>) -> String {
    let mut lines = vec![snapshot.name.clone(), format!("Radius: {:.2}", snapshot.radius)];
    match parent {
        Some(parent) => lines.push(format!(
            "Orbits {} at {:.1}",
            parent, snapshot.orbital_distance
        )),
        None if snapshot.orbital_distance > 0.0 => {
            lines.push(format!("Orbital distance: {:.1}", snapshot.orbital_distance))
        }
        None => lines.push("Fixed at the centre".to_string()),
    }
    lines.push(format!("Rotation rate: {:.4} rad/unit", snapshot.rotation_rate));
    if snapshot.orbital_distance > 0.0 {
        lines.push(format!("Orbit rate: {:.4} rad/unit", snapshot.orbit_rate));
        lines.push(format!(
            "Orbit angle: {:.1} deg",
            snapshot.orbit_angle.to_degrees()
        ));
    }
    if snapshot.emissive {
        lines.push("Emits light".to_string());
    }
    if snapshot.has_rings {
        lines.push("Has rings".to_string());
    }
    if !snapshot.satellites.is_empty() {
        let names: Vec<&str> = snapshot.satellites.iter().map(|s| s.name.as_str()).collect();
        lines.push(format!("Satellites: {}", names.join(", ")));
    }
    lines.join("\n")
}

/// Info card text for the body at `path`, or `None` if nothing is there
pub fn describe_body(system: &Hierarchy, path: &BodyPath) -> Option<String> {
    let body = system.get(path)?;
    let parent = path.parent().and_then(|p| system.get(&p)).map(|p| p.name());
    Some(describe_snapshot(&body.snapshot(), parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::orbital::Body;

    fn system() -> Hierarchy {
        let earth = Body::new("Earth", 2.0, 23.0)
            .with_speeds(0.02, 0.01)
            .with_satellite(Body::new("Moon", 0.5, 3.0).with_speeds(0.01, 0.04));
        let sun = Body::new("Sun", 7.0, 0.0).with_emissive(true);
        Hierarchy::new(vec![sun, earth])
    }

    fn describe(system: &Hierarchy, name: &str) -> Option<String> {
        describe_body(system, &system.path_of(name)?)
    }

    #[test]
    fn test_describe_satellite_names_parent() {
        let text = describe(&system(), "Moon").expect("moon known");
        assert!(text.starts_with("Moon\n"));
        assert!(text.contains("Orbits Earth at 3.0"));
        assert!(text.contains("Orbit rate: 0.0400"));
    }

    #[test]
    fn test_describe_root_lists_satellites() {
        let text = describe(&system(), "Earth").expect("earth known");
        assert!(text.contains("Orbital distance: 23.0"));
        assert!(text.contains("Satellites: Moon"));
    }

    #[test]
    fn test_describe_centre_body() {
        let text = describe(&system(), "Sun").expect("sun known");
        assert!(text.contains("Fixed at the centre"));
        assert!(text.contains("Emits light"));
        assert!(!text.contains("Orbit rate"));
    }

    #[test]
    fn test_describe_unknown_body() {
        assert!(describe(&system(), "Pluto").is_none());
        assert!(describe_body(&system(), &BodyPath::root(1).child(4)).is_none());
    }

    #[test]
    fn test_describe_shadowed_duplicate_by_path() {
        let earth = Body::new("Twin", 2.0, 23.0)
            .with_satellite(Body::new("Twin", 0.5, 3.0).with_speeds(0.0, 0.04));
        let system = Hierarchy::new(vec![Body::new("Sun", 7.0, 0.0), earth]);

        let outer = describe_body(&system, &BodyPath::root(1)).expect("outer twin");
        assert!(outer.contains("Orbital distance: 23.0"));
        let inner = describe_body(&system, &BodyPath::root(1).child(0)).expect("inner twin");
        assert!(inner.contains("Orbits Twin at 3.0"));
        assert!(inner.contains("Radius: 0.50"));
    }

    #[test]
    fn test_toggle_label_text() {
        let mut settings = ControlSettings::default();
        assert_eq!(ToggleLabel::Orbits.text(&settings), "Orbits: On");
        settings.day = false;
        assert_eq!(ToggleLabel::DayNight.text(&settings), "Day/Night: Night");
        settings.paused = true;
        assert_eq!(ToggleLabel::Pause.text(&settings), "Resume");
    }

    #[test]
    fn test_catalog_status_text() {
        let status = CatalogStatus {
            source: CatalogSource::BuiltIn,
            body_count: 11,
            fallback_reason: Some("bad.json: body 'Ghost' has no radius".into()),
            fatal: None,
        };
        let text = catalog_status_text(&status);
        assert!(text.starts_with("Catalog: built-in catalog (11 bodies)"));
        assert!(text.contains("Ghost"));
    }
}
