//! Orbital mechanics module
//!
//! Kinematic body model, the body hierarchy, and the simulation clock that
//! drives both.

use bevy::prelude::*;

pub mod body;
pub mod hierarchy;
pub mod time;

pub use body::{Body, BodySnapshot, OrbitRateLaw};
pub use hierarchy::{BodyPath, Hierarchy};
pub use time::{SimulationTime, advance_simulation_clock};

/// The live body hierarchy
#[derive(Resource, Deref, DerefMut, Default, Debug)]
pub struct SolarSystem(pub Hierarchy);

/// Plugin for orbital mechanics and time management
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .init_resource::<SolarSystem>()
            .add_systems(
                Update,
                (advance_simulation_clock, advance_solar_system).chain(),
            );
    }
}

/// Step every body by the clock's last frame delta
pub fn advance_solar_system(sim_time: Res<SimulationTime>, mut system: ResMut<SolarSystem>) {
    if sim_time.frame_dt == 0.0 {
        return;
    }
    system.advance(sim_time.frame_dt);
}
