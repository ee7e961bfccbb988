//! A single orbiting, self-rotating body and the satellites it owns.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

/// Simplified Kepler-like rule: `orbit_rate = k * sqrt(1 / distance)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitRateLaw {
    pub k: f64,
    /// Re-derive satellite speeds too, not just root bodies.
    #[serde(default)]
    pub include_satellites: bool,
}

impl OrbitRateLaw {
    pub fn new(k: f64) -> Self {
        Self {
            k,
            include_satellites: false,
        }
    }

    /// Orbit rate for a body at `distance`, or `None` for the stationary center.
    pub fn rate_for(&self, distance: f64) -> Option<f64> {
        (distance > 0.0).then(|| self.k * (1.0 / distance).sqrt())
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Position on a circle of radius `distance` in the XZ plane.
pub fn orbit_position(orbit_angle: f64, distance: f64) -> DVec3 {
    if distance <= 0.0 {
        return DVec3::ZERO;
    }
    let (sin, cos) = orbit_angle.sin_cos();
    DVec3::new(cos * distance, 0.0, sin * distance)
}

/// Orbiting body with kinematic rotation and orbit state.
///
/// `local_position` is relative to the parent body (or the world origin for
/// roots). Satellites are owned outright; there is no way to detach or
/// reparent one once attached.
#[derive(Clone, Debug)]
pub struct Body {
    name: String,
    radius: f64,
    orbital_distance: f64,
    rotation_rate: f64,
    orbit_rate: f64,
    orbit_angle: f64,
    rotation_angle: f64,
    emissive: bool,
    has_rings: bool,
    texture: Option<String>,
    satellites: Vec<Body>,
    local_position: DVec3,
}

impl Body {
    pub fn new(name: impl Into<String>, radius: f64, orbital_distance: f64) -> Self {
        let orbital_distance = orbital_distance.max(0.0);
        Self {
            name: name.into(),
            radius,
            orbital_distance,
            rotation_rate: 0.0,
            orbit_rate: 0.0,
            orbit_angle: 0.0,
            rotation_angle: 0.0,
            emissive: false,
            has_rings: false,
            texture: None,
            satellites: Vec::new(),
            local_position: orbit_position(0.0, orbital_distance),
        }
    }

    pub fn with_speeds(mut self, rotation_rate: f64, orbit_rate: f64) -> Self {
        self.set_speeds(rotation_rate, orbit_rate);
        self
    }

    pub fn with_orbit_angle(mut self, angle: f64) -> Self {
        self.set_orbit_angle(angle);
        self
    }

    pub fn with_emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_rings(mut self, has_rings: bool) -> Self {
        self.has_rings = has_rings;
        self
    }

    pub fn with_texture(mut self, texture: Option<String>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_satellite(mut self, satellite: Body) -> Self {
        self.attach_satellite(satellite);
        self
    }

    /// Take ownership of `satellite`, appending it after existing satellites.
    pub fn attach_satellite(&mut self, satellite: Body) {
        self.satellites.push(satellite);
    }

    /// Advance rotation and orbit by `dt`, then every satellite.
    ///
    /// Zero or negative `dt` is accepted (pause and rewind).
    pub fn advance(&mut self, dt: f64) {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_rate * dt);

        if self.orbital_distance > 0.0 {
            self.orbit_angle = wrap_angle(self.orbit_angle + self.orbit_rate * dt);
            self.local_position = orbit_position(self.orbit_angle, self.orbital_distance);
        }

        for satellite in &mut self.satellites {
            satellite.advance(dt);
        }
    }

    pub fn set_speeds(&mut self, rotation_rate: f64, orbit_rate: f64) {
        self.rotation_rate = rotation_rate;
        self.orbit_rate = orbit_rate;
    }

    /// Re-derive `orbit_rate` from the distance law. Returns whether it applied.
    pub fn set_derived_orbit_rate(&mut self, law: &OrbitRateLaw) -> bool {
        match law.rate_for(self.orbital_distance) {
            Some(rate) => {
                self.orbit_rate = rate;
                true
            }
            None => false,
        }
    }

    pub fn set_orbit_angle(&mut self, angle: f64) {
        self.orbit_angle = wrap_angle(angle);
        self.local_position = orbit_position(self.orbit_angle, self.orbital_distance);
    }

    pub fn set_orbital_distance(&mut self, distance: f64) {
        self.orbital_distance = distance.max(0.0);
        self.local_position = orbit_position(self.orbit_angle, self.orbital_distance);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn orbital_distance(&self) -> f64 {
        self.orbital_distance
    }

    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    pub fn orbit_rate(&self) -> f64 {
        self.orbit_rate
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn is_emissive(&self) -> bool {
        self.emissive
    }

    pub fn has_rings(&self) -> bool {
        self.has_rings
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn satellites(&self) -> &[Body] {
        &self.satellites
    }

    /// Mutable access to satellite state, in order. Satellites cannot be
    /// added, removed or reordered through this.
    pub fn satellites_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.satellites.iter_mut()
    }

    /// This body plus every satellite below it.
    pub fn subtree_len(&self) -> usize {
        1 + self.satellites.iter().map(Body::subtree_len).sum::<usize>()
    }

    /// Position relative to the parent frame.
    pub fn local_position(&self) -> DVec3 {
        self.local_position
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            name: self.name.clone(),
            radius: self.radius,
            orbital_distance: self.orbital_distance,
            rotation_rate: self.rotation_rate,
            orbit_rate: self.orbit_rate,
            rotation_angle: self.rotation_angle,
            orbit_angle: self.orbit_angle,
            local_position: self.local_position,
            emissive: self.emissive,
            has_rings: self.has_rings,
            satellites: self.satellites.iter().map(Body::snapshot).collect(),
        }
    }
}

/// Read-only copy of a body's state handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySnapshot {
    pub name: String,
    pub radius: f64,
    pub orbital_distance: f64,
    pub rotation_rate: f64,
    pub orbit_rate: f64,
    pub rotation_angle: f64,
    pub orbit_angle: f64,
    pub local_position: DVec3,
    pub emissive: bool,
    pub has_rings: bool,
    pub satellites: Vec<BodySnapshot>,
}
