//! User interface module
//!
//! Control panel, body info card and project info overlay, built with
//! `bevy_ui` nodes and the feathers palette.

use bevy::prelude::*;

pub mod panels;
pub mod state;
pub mod systems;

pub use state::{ControlAction, ControlSettings, UIState};

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UIState>()
            .init_resource::<ControlSettings>()
            .add_message::<ControlAction>()
            .add_systems(
                Startup,
                (
                    panels::spawn_control_panel,
                    panels::spawn_info_panel,
                    panels::spawn_project_info,
                ),
            )
            .add_systems(
                Update,
                (
                    (
                        systems::handle_control_buttons,
                        systems::handle_keyboard_shortcuts,
                    ),
                    systems::apply_control_actions,
                    systems::update_control_labels,
                )
                    .chain()
                    .before(crate::orbital::advance_solar_system),
            )
            .add_systems(
                Update,
                (
                    systems::handle_panel_buttons,
                    systems::button_hover_colors,
                    systems::open_info_on_click.after(crate::interaction::picking::handle_body_clicks),
                    systems::update_info_panel
                        .after(systems::open_info_on_click)
                        .after(systems::handle_panel_buttons),
                    systems::update_panel_visibility,
                ),
            );
    }
}
