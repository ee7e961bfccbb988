//! Catalog source resolution
//!
//! The built-in catalog is compiled in. A user catalog can replace it, either
//! through the `BEVYORRERY_CATALOG` environment variable or a `catalog.json`
//! in the platform config directory.

use anyhow::Context;
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::types::Catalog;

/// Environment variable pointing at a catalog file.
pub const CATALOG_ENV_VAR: &str = "BEVYORRERY_CATALOG";

const CATALOG_FILE_NAME: &str = "catalog.json";

/// Catalog bundled with the binary.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../assets/catalog.json");

/// Where the active catalog came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::BuiltIn => write!(f, "built-in catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// User catalog lookup in a config directory
pub struct CatalogStore {
    config_dir: PathBuf,
}

impl CatalogStore {
    /// Resolve the platform-specific config directory
    ///
    /// - macOS: ~/Library/Application Support/bevyorrery/
    /// - Linux: ~/.config/bevyorrery/
    /// - Windows: %APPDATA%\bevyorrery\config\
    pub fn new() -> Result<Self, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "bevyorrery")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve config directory"))?;
        Ok(Self::new_in_dir(proj_dirs.config_dir().to_path_buf()))
    }

    /// Store rooted at a specific directory (tests, custom setups)
    pub fn new_in_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.config_dir.join(CATALOG_FILE_NAME)
    }

    /// Read the user catalog.
    ///
    /// Returns Ok(None) if no catalog file exists.
    /// Returns Err if the file exists but cannot be read or parsed.
    pub fn read(&self) -> Result<Option<Catalog>, anyhow::Error> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(None);
        }
        read_catalog_file(&path).map(Some)
    }
}

pub fn read_catalog_file(path: &Path) -> Result<Catalog, anyhow::Error> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&contents)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(catalog)
}

pub fn builtin_catalog() -> Result<Catalog, anyhow::Error> {
    Catalog::from_json(BUILTIN_CATALOG_JSON).context("parsing built-in catalog")
}

/// Find a user catalog: explicit override first, then the config directory.
///
/// Ok(None) means no user catalog is configured.
pub fn find_user_catalog(
    override_path: Option<PathBuf>,
    store: Option<&CatalogStore>,
) -> Result<Option<(Catalog, CatalogSource)>, anyhow::Error> {
    if let Some(path) = override_path {
        let catalog = read_catalog_file(&path)?;
        return Ok(Some((catalog, CatalogSource::File(path))));
    }
    let Some(store) = store else {
        return Ok(None);
    };
    Ok(store
        .read()?
        .map(|catalog| (catalog, CatalogSource::File(store.catalog_path()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bevyorrery-catalog-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = builtin_catalog().expect("built-in catalog parses");
        assert_eq!(catalog.bodies.len(), 6);
        assert_eq!(catalog.body_count(), 11);
        assert_eq!(catalog.bodies[0].name, "Sun");
        assert!(catalog.bodies[0].emissive);
        assert!(catalog.orbit_rate_law.is_none());
    }

    #[test]
    fn test_store_miss() {
        let store = CatalogStore::new_in_dir(unique_temp_dir("miss"));
        let result = store.read().expect("missing file is not an error");
        assert!(result.is_none());
    }

    #[test]
    fn test_store_reads_user_catalog() {
        let dir = unique_temp_dir("read");
        fs::create_dir_all(&dir).expect("create temp dir");
        fs::write(
            dir.join("catalog.json"),
            r#"[{ "name": "Lone", "radius": 3, "distance": 0, "emissive": true }]"#,
        )
        .expect("write catalog");

        let store = CatalogStore::new_in_dir(dir.clone());
        let (catalog, source) = find_user_catalog(None, Some(&store))
            .expect("read succeeds")
            .expect("catalog found");
        assert_eq!(catalog.bodies[0].name, "Lone");
        assert_eq!(source, CatalogSource::File(dir.join("catalog.json")));
    }

    #[test]
    fn test_broken_user_catalog_is_an_error() {
        let dir = unique_temp_dir("broken");
        fs::create_dir_all(&dir).expect("create temp dir");
        fs::write(dir.join("catalog.json"), "{ \"bodies\": [ ").expect("write catalog");

        let store = CatalogStore::new_in_dir(dir);
        let err = store.read().expect_err("truncated json");
        assert!(format!("{err:#}").contains("parsing catalog"));
    }

    #[test]
    fn test_override_path_wins() {
        let dir = unique_temp_dir("override");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("custom.json");
        fs::write(&path, r#"{ "seed": 3, "bodies": [] }"#).expect("write catalog");

        let store = CatalogStore::new_in_dir(unique_temp_dir("override-empty"));
        let (catalog, source) = find_user_catalog(Some(path.clone()), Some(&store))
            .expect("read succeeds")
            .expect("catalog found");
        assert_eq!(catalog.seed, Some(3));
        assert_eq!(source, CatalogSource::File(path));
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let path = unique_temp_dir("nope").join("absent.json");
        assert!(find_user_catalog(Some(path), None).is_err());
    }
}
