//! Background starfield

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::picking::Pickable;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::ui::ControlSettings;
use crate::visualization::config::SceneConfig;

#[derive(Component)]
pub struct Starfield;

/// Points uniformly distributed over directions, with radius drawn from
/// `[min_radius, max_radius)`.
pub fn star_positions(
    rng: &mut impl Rng,
    count: usize,
    min_radius: f32,
    max_radius: f32,
) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let r = if max_radius > min_radius {
                rng.gen_range(min_radius..max_radius)
            } else {
                min_radius
            };
            let theta = rng.gen_range(0.0..TAU);
            // uniform in cos(phi) so points do not bunch at the poles
            let phi = rng.gen_range(-1.0f32..1.0).acos();
            let (sin_phi, cos_phi) = phi.sin_cos();
            Vec3::new(
                r * sin_phi * theta.cos(),
                r * sin_phi * theta.sin(),
                r * cos_phi,
            )
        })
        .collect()
}

fn starfield_mesh(positions: Vec<Vec3>) -> Mesh {
    let normals: Vec<[f32; 3]> = positions
        .iter()
        .map(|p| (-p.normalize_or_zero()).to_array())
        .collect();
    let positions: Vec<[f32; 3]> = positions.iter().map(|p| p.to_array()).collect();
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<SceneConfig>,
) {
    let mut rng = rand::thread_rng();
    let positions = star_positions(
        &mut rng,
        cfg.star_count,
        cfg.star_shell_min,
        cfg.star_shell_max,
    );

    commands.spawn((
        Mesh3d(meshes.add(starfield_mesh(positions))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Visibility::Visible,
        Pickable::IGNORE,
        Starfield,
        Name::new("Starfield"),
    ));
}

pub fn update_starfield_visibility(
    settings: Res<ControlSettings>,
    mut stars: Query<&mut Visibility, With<Starfield>>,
) {
    if !settings.is_changed() {
        return;
    }
    let target = if settings.show_stars {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in stars.iter_mut() {
        visibility.set_if_neq(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_star_positions_lie_in_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = star_positions(&mut rng, 2000, 400.0, 800.0);
        assert_eq!(stars.len(), 2000);
        for p in &stars {
            let r = p.length();
            assert!((399.9..800.1).contains(&r), "radius {r} outside shell");
        }
    }

    #[test]
    fn test_star_positions_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let stars = star_positions(&mut rng, 1000, 400.0, 800.0);
        let north = stars.iter().filter(|p| p.z > 0.0).count();
        assert!((350..650).contains(&north), "north count {north}");
    }

    #[test]
    fn test_degenerate_shell() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = star_positions(&mut rng, 10, 500.0, 500.0);
        assert!(stars.iter().all(|p| (p.length() - 500.0).abs() < 1e-2));
    }

    #[test]
    fn test_starfield_mesh_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mesh = starfield_mesh(star_positions(&mut rng, 25, 1.0, 2.0));
        assert_eq!(mesh.count_vertices(), 25);
    }
}
