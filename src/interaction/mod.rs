//! Pointer interaction and camera control

use bevy::prelude::*;

pub mod camera;
pub mod picking;

pub use camera::{CameraFocus, MainCamera};
pub use picking::{BodyClicked, DoubleClickTracker, Selection};

/// Plugin for body picking and camera follow
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<DoubleClickTracker>()
            .init_resource::<CameraFocus>()
            .add_message::<BodyClicked>()
            .add_systems(
                Update,
                (
                    picking::handle_body_hover,
                    picking::handle_body_clicks,
                    camera::start_focus_on_double_click.after(picking::handle_body_clicks),
                    camera::follow_focused_body.after(camera::start_focus_on_double_click),
                    camera::release_focus_on_escape,
                ),
            );
    }
}
