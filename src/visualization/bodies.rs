//! Body entities and their per-frame sync from the hierarchy
//!
//! Every body gets two entities: a frame that only carries the orbital
//! translation, and a child spin entity holding the mesh, spin and display
//! scale. Satellite frames are children of their parent's frame, so they
//! follow the parent's orbit without inheriting its spin.

use bevy::light::NotShadowCaster;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::orbital::{Body, BodyPath, SolarSystem};
use crate::ui::ControlSettings;
use crate::visualization::config::SceneConfig;

/// Orbital frame of a body
#[derive(Component, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub path: BodyPath,
}

/// Mesh entity of a body
#[derive(Component, Debug)]
pub struct BodySpin {
    pub name: String,
    pub path: BodyPath,
}

/// Marker for the spin entity of an emissive body
#[derive(Component)]
pub struct EmissiveBody;

/// Present while the pointer is over the body
#[derive(Component)]
pub struct Hovered;

#[derive(Component)]
pub struct BodyRings;

struct SpawnContext<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    asset_server: &'a AssetServer,
    cfg: &'a SceneConfig,
    ring_material: Option<Handle<StandardMaterial>>,
}

impl SpawnContext<'_> {
    fn ring_material(&mut self) -> Handle<StandardMaterial> {
        if let Some(handle) = &self.ring_material {
            return handle.clone();
        }
        let handle = self.materials.add(StandardMaterial {
            base_color: Color::WHITE.with_alpha(self.cfg.ring_opacity),
            base_color_texture: Some(
                self.asset_server
                    .load(self.cfg.texture_path(&self.cfg.ring_texture)),
            ),
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            double_sided: true,
            perceptual_roughness: 1.0,
            ..default()
        });
        self.ring_material = Some(handle.clone());
        handle
    }
}

/// Spawn frame and spin entities for every body in the hierarchy
pub fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    cfg: Res<SceneConfig>,
    system: Res<SolarSystem>,
) {
    let mut ctx = SpawnContext {
        meshes: &mut meshes,
        materials: &mut materials,
        asset_server: &asset_server,
        cfg: &cfg,
        ring_material: None,
    };

    for (i, root) in system.roots().iter().enumerate() {
        spawn_body(&mut commands, &mut ctx, root, BodyPath::root(i), None);
    }
    info!("Spawned {} bodies", system.len());
}

fn spawn_body(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    body: &Body,
    path: BodyPath,
    parent: Option<Entity>,
) {
    let mut frame = commands.spawn((
        CelestialBody {
            name: body.name().to_string(),
            path: path.clone(),
        },
        Transform::from_translation(body.local_position().as_vec3()),
        Visibility::default(),
        Name::new(body.name().to_string()),
    ));
    if let Some(parent) = parent {
        frame.insert(ChildOf(parent));
    }
    let frame = frame.id();

    let radius = body.radius() as f32;
    let mesh = ctx
        .meshes
        .add(Sphere::new(radius).mesh().uv(ctx.cfg.sphere_sectors, ctx.cfg.sphere_stacks));
    let material = ctx
        .materials
        .add(body_material(body, ctx.cfg, ctx.asset_server));

    let mut spin = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_rotation(body_rotation(body)),
        BodySpin {
            name: body.name().to_string(),
            path: path.clone(),
        },
        ChildOf(frame),
        Name::new(format!("{} mesh", body.name())),
    ));
    if body.is_emissive() {
        // the point light sits inside the emissive body
        spin.insert((EmissiveBody, NotShadowCaster));
    }
    let spin = spin.id();

    if body.has_rings() {
        let ring_mesh = ctx.meshes.add(
            Annulus::new(
                radius * ctx.cfg.ring_inner_factor,
                radius * ctx.cfg.ring_outer_factor,
            )
            .mesh()
            .resolution(64),
        );
        let ring_material = ctx.ring_material();
        commands.spawn((
            Mesh3d(ring_mesh),
            MeshMaterial3d(ring_material),
            // annulus is built in the XY plane; lay it into the orbital plane
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            BodyRings,
            ChildOf(spin),
            Name::new(format!("{} rings", body.name())),
        ));
    }

    for (i, sat) in body.satellites().iter().enumerate() {
        spawn_body(commands, ctx, sat, path.child(i), Some(frame));
    }
}

fn body_material(body: &Body, cfg: &SceneConfig, asset_server: &AssetServer) -> StandardMaterial {
    let texture: Option<Handle<Image>> = body
        .texture()
        .map(|file| asset_server.load(cfg.texture_path(file)));

    if body.is_emissive() {
        return StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: texture.clone(),
            emissive: cfg.emissive_color,
            emissive_texture: texture,
            perceptual_roughness: 1.0,
            ..default()
        };
    }

    StandardMaterial {
        base_color: if texture.is_some() {
            Color::WHITE
        } else {
            Color::srgb(0.6, 0.6, 0.65)
        },
        base_color_texture: texture,
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

/// Spin about the local Y axis
pub fn body_rotation(body: &Body) -> Quat {
    Quat::from_rotation_y(body.rotation_angle() as f32)
}

/// Uniform display scale for a body mesh
pub fn display_scale(planet_scale: f64, hovered: bool, hover_scale: f32) -> f32 {
    let scale = planet_scale as f32;
    if hovered { scale * hover_scale } else { scale }
}

/// Copy positions and spins from the hierarchy onto the entities
pub fn sync_body_transforms(
    system: Res<SolarSystem>,
    settings: Res<ControlSettings>,
    cfg: Res<SceneConfig>,
    mut frames: Query<(&CelestialBody, &mut Transform), Without<BodySpin>>,
    mut spins: Query<(&BodySpin, &mut Transform, Has<Hovered>), Without<CelestialBody>>,
) {
    for (frame, mut transform) in &mut frames {
        if let Some(body) = system.get(&frame.path) {
            transform.translation = body.local_position().as_vec3();
        }
    }

    for (spin, mut transform, hovered) in &mut spins {
        if let Some(body) = system.get(&spin.path) {
            transform.rotation = body_rotation(body);
        }
        transform.scale = Vec3::splat(display_scale(
            settings.planet_scale,
            hovered,
            cfg.hover_scale,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_display_scale() {
        assert_eq!(display_scale(1.0, false, 1.2), 1.0);
        assert!((display_scale(1.0, true, 1.2) - 1.2).abs() < 1e-6);
        assert!((display_scale(0.5, true, 1.2) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_body_rotation_follows_spin_angle() {
        let mut body = Body::new("Spinner", 1.0, 0.0).with_speeds(PI / 2.0, 0.0);
        body.advance(1.0);
        let rotated = body_rotation(&body) * Vec3::X;
        // quarter turn about +Y maps +X onto -Z
        assert!((rotated - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_spawned_entities_mirror_hierarchy() {
        let moon = Body::new("Moon", 0.5, 3.0).with_speeds(0.0, 0.04);
        let earth = Body::new("Earth", 2.0, 23.0)
            .with_speeds(0.02, 0.01)
            .with_satellite(moon);
        let sun = Body::new("Sun", 7.0, 0.0).with_emissive(true);
        let system = SolarSystem(crate::orbital::Hierarchy::new(vec![sun, earth]));

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Image>()
            .insert_resource(system)
            .init_resource::<SceneConfig>()
            .init_resource::<ControlSettings>()
            .add_systems(Startup, spawn_solar_system)
            .add_systems(Update, sync_body_transforms);
        app.update();

        let world = app.world_mut();
        let mut frames = world.query::<(&CelestialBody, Option<&ChildOf>)>();
        let frames: Vec<_> = frames
            .iter(world)
            .map(|(body, parent)| (body.name.clone(), parent.is_some()))
            .collect();
        assert_eq!(frames.len(), 3);
        assert!(frames.contains(&("Moon".to_string(), true)));
        assert!(frames.contains(&("Earth".to_string(), false)));

        let mut emissive = world.query_filtered::<&BodySpin, With<EmissiveBody>>();
        let names: Vec<_> = emissive.iter(world).map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["Sun".to_string()]);
    }
}
