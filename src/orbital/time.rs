//! Simulation clock

use bevy::prelude::*;

/// Simulated time units per wall-clock second at time scale 1.
///
/// Catalog rates are radians per unit; one unit roughly matches one rendered
/// frame at 60 Hz.
pub const UNITS_PER_SECOND: f64 = 60.0;

pub const MIN_TIME_SCALE: f64 = 0.0;
pub const MAX_TIME_SCALE: f64 = 20.0;

/// Simulation time resource
#[derive(Resource, Debug)]
pub struct SimulationTime {
    pub time_scale: f64,
    pub paused: bool,
    pub units_per_second: f64,
    /// Total simulated units since startup
    pub elapsed: f64,
    /// Units advanced during the last tick
    pub frame_dt: f64,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            paused: false,
            units_per_second: UNITS_PER_SECOND,
            elapsed: 0.0,
            frame_dt: 0.0,
        }
    }
}

impl SimulationTime {
    /// Advance by `wall_secs` of real time and return the simulated step.
    pub fn step(&mut self, wall_secs: f64) -> f64 {
        let dt = if self.paused {
            0.0
        } else {
            wall_secs.max(0.0) * self.time_scale * self.units_per_second
        };
        self.frame_dt = dt;
        self.elapsed += dt;
        dt
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

/// System to advance the simulation clock by the frame delta
pub fn advance_simulation_clock(time: Res<Time>, mut sim_time: ResMut<SimulationTime>) {
    sim_time.step(time.delta_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_time_default() {
        let sim_time = SimulationTime::default();
        assert_eq!(sim_time.time_scale, 1.0);
        assert!(!sim_time.paused);
        assert_eq!(sim_time.elapsed, 0.0);
    }

    #[test]
    fn test_step_scales_wall_time() {
        let mut sim_time = SimulationTime::default();
        let dt = sim_time.step(0.5);
        assert!((dt - 30.0).abs() < 1e-12);

        sim_time.set_time_scale(2.0);
        let dt = sim_time.step(0.5);
        assert!((dt - 60.0).abs() < 1e-12);
        assert!((sim_time.elapsed - 90.0).abs() < 1e-12);
        assert_eq!(sim_time.frame_dt, dt);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut sim_time = SimulationTime::default();
        sim_time.toggle_pause();
        assert_eq!(sim_time.step(1.0), 0.0);
        assert_eq!(sim_time.elapsed, 0.0);
        sim_time.toggle_pause();
        assert!(sim_time.step(1.0) > 0.0);
    }

    #[test]
    fn test_time_scale_is_clamped() {
        let mut sim_time = SimulationTime::default();
        sim_time.set_time_scale(-3.0);
        assert_eq!(sim_time.time_scale, MIN_TIME_SCALE);
        sim_time.set_time_scale(1e6);
        assert_eq!(sim_time.time_scale, MAX_TIME_SCALE);
    }

    #[test]
    fn test_negative_wall_delta_is_ignored() {
        let mut sim_time = SimulationTime::default();
        assert_eq!(sim_time.step(-0.2), 0.0);
    }
}
