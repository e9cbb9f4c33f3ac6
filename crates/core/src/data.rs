//! JSON data files that replace the built-in catalog and library.

use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    error::{Result, VaultError},
    models::{GameRecord, LibraryEntry},
};

/// On-disk catalog: `{ "default_game": "gow", "games": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Optional fallback id; the configured one wins when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_game: Option<String>,
    /// Catalog records in display order.
    pub games: Vec<GameRecord>,
}

/// On-disk library: `{ "entries": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryFile {
    /// Owned games in display order.
    pub entries: Vec<LibraryEntry>,
}

impl CatalogFile {
    /// Load a catalog file, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        read_json(path.as_ref())
    }

    /// Persist the catalog, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "catalog")
    }
}

impl LibraryFile {
    /// Load a library file, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        read_json(path.as_ref())
    }

    /// Persist the library, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "library")
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|err| VaultError::io("read", path, err))?;
    let value = serde_json::from_str(&contents).map_err(|source| VaultError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| VaultError::io("create", parent, err))?;
    }
    let serialized = serde_json::to_string_pretty(value)
        .map_err(|source| VaultError::Serialize { what, source })?;
    fs::write(path, serialized).map_err(|err| VaultError::io("write", path, err))
}
