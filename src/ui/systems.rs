//! UI interaction systems

use bevy::prelude::*;

use crate::interaction::BodyClicked;
use crate::orbital::{Hierarchy, SimulationTime, SolarSystem};
use crate::ui::panels::{
    BUTTON_BG, BUTTON_BG_HOVER, BUTTON_BG_PRESSED, CloseInfoButton, ControlButton, ControlPanel,
    InfoPanel, InfoText, KnobReadout, ProjectInfoPanel, ProjectInfoToggle, ToggleLabel,
    describe_body,
};
use crate::ui::state::{ControlAction, ControlChange, ControlSettings, Knob, UIState};

/// Set the orbit rate of every non-emissive root; returns how many changed.
pub fn override_orbit_rates(system: &mut Hierarchy, orbit_rate: f64) -> usize {
    let mut changed = 0;
    for root in system.roots_mut() {
        if root.is_emissive() {
            continue;
        }
        let rotation_rate = root.rotation_rate();
        root.set_speeds(rotation_rate, orbit_rate);
        changed += 1;
    }
    changed
}

/// Set the rotation rate of every root; returns how many changed.
pub fn override_rotation_rates(system: &mut Hierarchy, rotation_rate: f64) -> usize {
    let mut changed = 0;
    for root in system.roots_mut() {
        let orbit_rate = root.orbit_rate();
        root.set_speeds(rotation_rate, orbit_rate);
        changed += 1;
    }
    changed
}

/// Apply one action to the settings and run its side effects on the model
pub fn apply_control_action(
    action: ControlAction,
    settings: &mut ControlSettings,
    system: &mut Hierarchy,
    sim_time: &mut SimulationTime,
) -> ControlChange {
    let change = settings.apply(action);
    match change {
        ControlChange::OrbitRate(rate) => {
            let n = override_orbit_rates(system, rate);
            debug!("Orbit rate {:.3} applied to {} bodies", rate, n);
        }
        ControlChange::RotationRate(rate) => {
            let n = override_rotation_rates(system, rate);
            debug!("Rotation rate {:.3} applied to {} bodies", rate, n);
        }
        ControlChange::TimeScale(scale) => sim_time.set_time_scale(scale),
        ControlChange::Pause(paused) => sim_time.paused = paused,
        _ => {}
    }
    change
}

pub fn apply_control_actions(
    mut actions: MessageReader<ControlAction>,
    mut settings: ResMut<ControlSettings>,
    mut system: ResMut<SolarSystem>,
    mut sim_time: ResMut<SimulationTime>,
) {
    for action in actions.read() {
        apply_control_action(*action, &mut settings, &mut system, &mut sim_time);
    }
}

pub fn handle_control_buttons(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut actions: MessageWriter<ControlAction>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            actions.write(button.0);
        }
    }
}

pub fn handle_panel_buttons(
    close: Query<&Interaction, (Changed<Interaction>, With<CloseInfoButton>)>,
    toggle: Query<&Interaction, (Changed<Interaction>, With<ProjectInfoToggle>)>,
    mut ui_state: ResMut<UIState>,
) {
    if close.iter().any(|i| *i == Interaction::Pressed) {
        ui_state.info_body = None;
    }
    if toggle.iter().any(|i| *i == Interaction::Pressed) {
        ui_state.show_project_info = !ui_state.show_project_info;
    }
}

pub fn button_hover_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        color.0 = match interaction {
            Interaction::Pressed => BUTTON_BG_PRESSED,
            Interaction::Hovered => BUTTON_BG_HOVER,
            Interaction::None => BUTTON_BG,
        };
    }
}

fn shortcut_action(key: KeyCode) -> Option<ControlAction> {
    let action = match key {
        KeyCode::KeyO => ControlAction::ToggleOrbits,
        KeyCode::KeyS => ControlAction::ToggleStars,
        KeyCode::KeyN => ControlAction::ToggleDayNight,
        KeyCode::KeyB => ControlAction::CycleBackground,
        KeyCode::KeyP | KeyCode::Space => ControlAction::TogglePause,
        KeyCode::BracketLeft => ControlAction::Nudge(Knob::TimeScale, -1),
        KeyCode::BracketRight => ControlAction::Nudge(Knob::TimeScale, 1),
        KeyCode::Minus => ControlAction::Nudge(Knob::PlanetScale, -1),
        KeyCode::Equal => ControlAction::Nudge(Knob::PlanetScale, 1),
        _ => return None,
    };
    Some(action)
}

pub fn handle_keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut actions: MessageWriter<ControlAction>,
    mut ui_state: ResMut<UIState>,
) {
    for key in keys.get_just_pressed() {
        if let Some(action) = shortcut_action(*key) {
            actions.write(action);
            continue;
        }
        match key {
            KeyCode::KeyH => ui_state.show_controls = !ui_state.show_controls,
            KeyCode::KeyI => ui_state.show_project_info = !ui_state.show_project_info,
            KeyCode::Escape => ui_state.info_body = None,
            _ => {}
        }
    }
}

/// Open the info card for whatever body was clicked
pub fn open_info_on_click(mut clicks: MessageReader<BodyClicked>, mut ui_state: ResMut<UIState>) {
    if let Some(click) = clicks.read().last() {
        ui_state.info_body = Some(click.path.clone());
    }
}

pub fn update_control_labels(
    settings: Res<ControlSettings>,
    mut readouts: Query<(&mut Text, &KnobReadout), Without<ToggleLabel>>,
    mut toggles: Query<(&mut Text, &ToggleLabel), Without<KnobReadout>>,
) {
    if !settings.is_changed() {
        return;
    }
    for (mut text, readout) in readouts.iter_mut() {
        text.0 = settings.readout(readout.0);
    }
    for (mut text, toggle) in toggles.iter_mut() {
        text.0 = toggle.text(&settings);
    }
}

pub fn update_info_panel(
    ui_state: Res<UIState>,
    system: Res<SolarSystem>,
    mut panel: Query<&mut Node, With<InfoPanel>>,
    mut info_text: Query<&mut Text, With<InfoText>>,
) {
    let description = ui_state
        .info_body
        .as_ref()
        .and_then(|path| describe_body(&system, path));

    for mut node in panel.iter_mut() {
        let display = if description.is_some() {
            Display::Flex
        } else {
            Display::None
        };
        if node.display != display {
            node.display = display;
        }
    }

    // angles move every frame, so refresh while open
    if let Some(description) = description {
        for mut text in info_text.iter_mut() {
            if text.0 != description {
                text.0 = description.clone();
            }
        }
    }
}

pub fn update_panel_visibility(
    ui_state: Res<UIState>,
    mut controls: Query<&mut Node, (With<ControlPanel>, Without<ProjectInfoPanel>)>,
    mut project: Query<&mut Node, (With<ProjectInfoPanel>, Without<ControlPanel>)>,
) {
    if !ui_state.is_changed() {
        return;
    }
    let display = |visible: bool| if visible { Display::Flex } else { Display::None };
    for mut node in controls.iter_mut() {
        node.display = display(ui_state.show_controls);
    }
    for mut node in project.iter_mut() {
        node.display = display(ui_state.show_project_info);
    }
}
