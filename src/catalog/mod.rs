//! Body catalog
//!
//! Loads the catalog document, builds the body hierarchy from it, and makes
//! the result available as the `SolarSystem` resource.

use bevy::prelude::*;
use std::path::PathBuf;

pub mod error;
pub mod loader;
pub mod types;

pub use error::CatalogError;
pub use loader::{CATALOG_ENV_VAR, CatalogSource, CatalogStore};
pub use types::{BodySpec, Catalog};

use crate::orbital::{Hierarchy, SolarSystem};

/// Outcome of catalog loading, shown in the project info panel
#[derive(Resource, Debug, Clone)]
pub struct CatalogStatus {
    pub source: CatalogSource,
    pub body_count: usize,
    /// Set when a user catalog was rejected and the built-in one used instead
    pub fallback_reason: Option<String>,
    /// Set when no usable catalog exists at all
    pub fatal: Option<String>,
}

/// Plugin that builds the body hierarchy at startup
pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        let override_path = std::env::var_os(CATALOG_ENV_VAR).map(PathBuf::from);
        let store = match CatalogStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Catalog config directory unavailable: {}", e);
                None
            }
        };

        let (system, status) = load_solar_system(override_path, store.as_ref());
        app.insert_resource(SolarSystem(system))
            .insert_resource(status)
            .add_systems(Startup, exit_on_fatal_catalog);
    }
}

/// Resolve and build the active catalog.
///
/// A user catalog that fails to read, parse or validate is logged and
/// replaced by the built-in catalog. If the built-in catalog itself is
/// broken, an empty hierarchy is returned with `fatal` set.
pub fn load_solar_system(
    override_path: Option<PathBuf>,
    store: Option<&CatalogStore>,
) -> (Hierarchy, CatalogStatus) {
    let mut fallback_reason = None;

    match loader::find_user_catalog(override_path, store) {
        Ok(Some((catalog, source))) => match Hierarchy::from_catalog(&catalog) {
            Ok(system) => {
                info!("Loaded {} bodies from {}", system.len(), source);
                let status = CatalogStatus {
                    source,
                    body_count: system.len(),
                    fallback_reason: None,
                    fatal: None,
                };
                return (system, status);
            }
            Err(e) => {
                warn!("Rejected catalog {}: {}; using built-in catalog", source, e);
                fallback_reason = Some(format!("{source}: {e}"));
            }
        },
        Ok(None) => {}
        Err(e) => {
            warn!("{:#}; using built-in catalog", e);
            fallback_reason = Some(format!("{e:#}"));
        }
    }

    let built = loader::builtin_catalog()
        .and_then(|catalog| Hierarchy::from_catalog(&catalog).map_err(Into::into));
    match built {
        Ok(system) => {
            info!("Loaded {} bodies from built-in catalog", system.len());
            let status = CatalogStatus {
                source: CatalogSource::BuiltIn,
                body_count: system.len(),
                fallback_reason,
                fatal: None,
            };
            (system, status)
        }
        Err(e) => {
            error!("Built-in catalog is unusable: {:#}", e);
            let status = CatalogStatus {
                source: CatalogSource::BuiltIn,
                body_count: 0,
                fallback_reason,
                fatal: Some(format!("{e:#}")),
            };
            (Hierarchy::default(), status)
        }
    }
}

fn exit_on_fatal_catalog(status: Res<CatalogStatus>, mut exit: MessageWriter<AppExit>) {
    if let Some(reason) = &status.fatal {
        error!("No usable catalog ({}), exiting", reason);
        exit.write(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bevyorrery-system-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_builtin_catalog_builds_hierarchy() {
        let (system, status) = load_solar_system(None, None);
        assert_eq!(status.source, CatalogSource::BuiltIn);
        assert!(status.fatal.is_none());
        assert!(status.fallback_reason.is_none());
        assert_eq!(system.len(), 11);
        assert_eq!(status.body_count, 11);

        let moon = system.find_by_name("Moon").expect("moon in built-in catalog");
        assert!(moon.orbital_distance() > 0.0);
        assert_eq!(system.parent_of("Moon").map(|b| b.name()), Some("Earth"));
        assert!(system.find_by_name("Jupiter").expect("jupiter").has_rings());
    }

    #[test]
    fn test_user_catalog_replaces_builtin() {
        let dir = unique_temp_dir("user");
        fs::create_dir_all(&dir).expect("create temp dir");
        fs::write(
            dir.join("catalog.json"),
            r#"{ "seed": 1, "bodies": [
                { "name": "Star", "radius": 5, "emissive": true },
                { "name": "Rock", "radius": 1, "distance": 9, "orbitRate": 0.01 }
            ] }"#,
        )
        .expect("write catalog");

        let store = CatalogStore::new_in_dir(dir.clone());
        let (system, status) = load_solar_system(None, Some(&store));
        assert_eq!(system.len(), 2);
        assert_eq!(status.source, CatalogSource::File(dir.join("catalog.json")));
        assert!(system.find_by_name("Sun").is_none());
    }

    #[test]
    fn test_invalid_user_catalog_falls_back() {
        let dir = unique_temp_dir("invalid");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("bad.json");
        fs::write(&path, r#"[ { "name": "Ghost", "distance": 4 } ]"#).expect("write catalog");

        let (system, status) = load_solar_system(Some(path), None);
        assert_eq!(status.source, CatalogSource::BuiltIn);
        let reason = status.fallback_reason.expect("fallback recorded");
        assert!(reason.contains("Ghost"));
        assert!(system.find_by_name("Sun").is_some());
    }

    #[test]
    fn test_unreadable_override_falls_back() {
        let path = unique_temp_dir("absent").join("none.json");
        let (system, status) = load_solar_system(Some(path), None);
        assert!(status.fallback_reason.is_some());
        assert_eq!(system.len(), 11);
    }
}
