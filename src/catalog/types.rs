//! Catalog data types consumed when building the body hierarchy

use serde::{Deserialize, Serialize};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::orbital::OrbitRateLaw;

const DEFAULT_ROTATION_RATE: f64 = 0.002;
const DEFAULT_ORBIT_RATE: f64 = 0.001;

fn default_rotation_rate() -> f64 {
    DEFAULT_ROTATION_RATE
}

fn default_orbit_rate() -> f64 {
    DEFAULT_ORBIT_RATE
}

/// One catalog entry. Satellite entries use the same shape and may nest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default = "default_rotation_rate", alias = "rotationSpeed")]
    pub rotation_rate: f64,
    #[serde(default = "default_orbit_rate", alias = "orbitSpeed")]
    pub orbit_rate: f64,
    #[serde(default)]
    pub emissive: bool,
    #[serde(default, alias = "rings")]
    pub has_rings: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, alias = "moons", skip_serializing_if = "Vec::is_empty")]
    pub satellites: Vec<BodySpec>,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            radius: None,
            distance: 0.0,
            rotation_rate: DEFAULT_ROTATION_RATE,
            orbit_rate: DEFAULT_ORBIT_RATE,
            emissive: false,
            has_rings: false,
            texture: None,
            satellites: Vec::new(),
        }
    }
}

impl BodySpec {
    /// Check this entry and all nested satellites. `path` names the entry in errors.
    pub fn validate(&self, path: &str) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::MissingName {
                path: path.to_string(),
            });
        }
        let name = || self.name.clone();

        let radius = self
            .radius
            .ok_or_else(|| CatalogError::MissingRadius { name: name() })?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CatalogError::InvalidRadius {
                name: name(),
                radius,
            });
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(CatalogError::InvalidDistance {
                name: name(),
                distance: self.distance,
            });
        }
        if !self.rotation_rate.is_finite() || !self.orbit_rate.is_finite() {
            return Err(CatalogError::NonFiniteRate { name: name() });
        }

        for (i, sat) in self.satellites.iter().enumerate() {
            sat.validate(&format!("{path}.satellites[{i}]"))?;
        }
        Ok(())
    }
}

/// A full catalog document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_rate_law: Option<OrbitRateLaw>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub bodies: Vec<BodySpec>,
}

impl Catalog {
    /// Parse either a full document or a bare array of entries.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        if json.trim_start().starts_with('[') {
            let bodies: Vec<BodySpec> = serde_json::from_str(json)?;
            return Ok(Catalog {
                bodies,
                ..Default::default()
            });
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Number of entries including nested satellites.
    pub fn body_count(&self) -> usize {
        fn count(spec: &BodySpec) -> usize {
            1 + spec.satellites.iter().map(count).sum::<usize>()
        }
        self.bodies.iter().map(count).sum()
    }
}
