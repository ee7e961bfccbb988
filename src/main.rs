use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod catalog;
mod interaction;
mod orbital;
mod sound;
mod ui;
mod visualization;

use catalog::CatalogPlugin;
use interaction::{InteractionPlugin, MainCamera};
use orbital::OrbitalPlugin;
use sound::SoundPlugin;
use ui::UiPlugin;
use visualization::{SceneConfig, SunLight, VisualizationPlugin};

// Setup scene and cameras
pub fn setup(mut commands: Commands, cfg: Res<SceneConfig>) {
    // Real brightness comes from the control panel on the first frame
    commands.insert_resource(GlobalAmbientLight {
        brightness: 150.0,
        ..default()
    });
    commands.insert_resource(ClearColor(Color::BLACK));

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(cfg.camera_start.length()),
        zoom_lower_limit: cfg.camera_min_distance,
        zoom_upper_limit: Some(cfg.camera_max_distance),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.1,
            far: cfg.camera_far,
            ..default()
        }),
        Camera {
            order: 0,
            // follow the ClearColor resource so the background cycle shows
            clear_color: ClearColorConfig::Default,
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(cfg.camera_start).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // The light sits inside the emissive body at the origin
    commands.spawn((
        PointLight {
            range: cfg.camera_far,
            shadows_enabled: true,
            ..default()
        },
        SunLight,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Name::new("Sun light"),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Bevy Orrery".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Feathers initializes `UiTheme` but does not populate it by default.
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", palette::LIGHT_GRAY_1);
    theme.set_color("feathers.text.dim", palette::LIGHT_GRAY_2);
    theme.set_color("feathers.focus", palette::ACCENT);
    theme.set_color("feathers.button.bg", ui::panels::BUTTON_BG);
    theme.set_color("feathers.button.bg.hover", ui::panels::BUTTON_BG_HOVER);
    theme.set_color("feathers.button.bg.pressed", ui::panels::BUTTON_BG_PRESSED);
    theme.set_color("feathers.button.txt", Color::srgba(0.6, 1.0, 1.0, 1.0));
    app.insert_resource(theme);

    app.add_plugins(FeathersPlugins);
    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    // Catalog first: later plugins read the SolarSystem it inserts
    app.add_plugins(CatalogPlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(InteractionPlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(SoundPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
