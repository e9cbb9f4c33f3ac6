//! Application configuration backed by the `config` crate.

use std::{
    fs,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, VaultError};

/// Directory name under the platform config/data roots.
pub const APP_DIR: &str = "cambrian-vault";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "CAMBRIAN_VAULT";

const DEFAULT_CONFIG: &str = r#"# Cambrian Vault configuration

# Catalog id served when a request names an unknown game.
default_game = "gow"

# Optional JSON files replacing the built-in catalog and library.
# catalog_path = "/path/to/catalog.json"
# library_path = "/path/to/library.json"

# Where exported HTML pages are written.
# export_dir = "/path/to/site"
"#;

/// Runtime settings for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog id used when lookups miss.
    #[serde(default = "default_game")]
    pub default_game: String,
    /// JSON catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// JSON library replacing the built-in one.
    #[serde(default)]
    pub library_path: Option<PathBuf>,
    /// Destination directory for site exports.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_game: default_game(),
            catalog_path: None,
            library_path: None,
            export_dir: default_export_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (if present) plus `CAMBRIAN_VAULT__*` overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Location of the user configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default configuration if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    ensure_config_at(config_path())
}

/// Same as [`ensure_default_config`] but for an explicit path.
pub fn ensure_config_at(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();
    if path.exists() {
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| VaultError::io("create", parent, err))?;
    }
    fs::write(&path, DEFAULT_CONFIG).map_err(|err| VaultError::io("write", &path, err))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(path)
}

fn default_game() -> String {
    "gow".to_string()
}

fn default_export_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("site")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.default_game, "gow");
        assert!(config.catalog_path.is_none());
        assert!(config.library_path.is_none());
        Ok(())
    }

    #[test]
    fn reads_values_from_toml() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_game = \"arc\"\ncatalog_path = \"/tmp/catalog.json\"\nexport_dir = \"/tmp/site\"\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.default_game, "arc");
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(Path::new("/tmp/catalog.json"))
        );
        assert_eq!(config.export_dir, PathBuf::from("/tmp/site"));
        Ok(())
    }

    #[test]
    fn default_file_is_written_once_and_parses() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");

        ensure_config_at(&path)?;
        assert!(path.is_file());
        fs::write(&path, "default_game = \"arc\"\n")?;
        ensure_config_at(&path)?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.default_game, "arc");
        Ok(())
    }
}
