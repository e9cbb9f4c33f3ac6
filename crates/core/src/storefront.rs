//! Storefront assembly: the catalog and library tables built once at startup.

use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    config::AppConfig,
    data::{CatalogFile, LibraryFile},
    error::Result,
    library::LibraryView,
    models::LibraryEntry,
    seed,
};

/// Immutable tables shared by every page and view.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    library: Vec<LibraryEntry>,
}

impl Storefront {
    /// Wrap already-validated tables.
    pub fn new(catalog: Catalog, library: Vec<LibraryEntry>) -> Self {
        Self { catalog, library }
    }

    /// Built-in tables with the given fallback id.
    pub fn builtin(default_game: &str) -> Result<Self> {
        let catalog = Catalog::new(seed::catalog_records(), default_game)?;
        Ok(Self::new(catalog, seed::library_entries()))
    }

    /// Build from configuration, preferring data files over built-in tables.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let records = match config.catalog_path.as_ref() {
            Some(path) => match CatalogFile::load(path)? {
                Some(file) => {
                    info!(path = %path.display(), games = file.games.len(), "Loaded catalog file");
                    if let Some(file_default) = file.default_game.as_deref() {
                        if file_default != config.default_game {
                            warn!(
                                file_default,
                                configured = %config.default_game,
                                "Catalog file default ignored in favour of configuration"
                            );
                        }
                    }
                    file.games
                }
                None => {
                    warn!(path = %path.display(), "Catalog file missing; using built-in catalog");
                    seed::catalog_records()
                }
            },
            None => seed::catalog_records(),
        };

        let library = match config.library_path.as_ref() {
            Some(path) => match LibraryFile::load(path)? {
                Some(file) => {
                    info!(path = %path.display(), entries = file.entries.len(), "Loaded library file");
                    file.entries
                }
                None => {
                    warn!(path = %path.display(), "Library file missing; using built-in library");
                    seed::library_entries()
                }
            },
            None => seed::library_entries(),
        };

        let catalog = Catalog::new(records, &config.default_game)?;
        Ok(Self::new(catalog, library))
    }

    /// The game catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Owned-games table.
    pub fn library(&self) -> &[LibraryEntry] {
        &self.library
    }

    /// Fresh view-model over the library with default filter state.
    pub fn library_view(&self) -> LibraryView {
        LibraryView::new(self.library.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::LibraryFile, error::VaultError, models::GenreTag};
    use tempfile::tempdir;

    #[test]
    fn builtin_tables_load() -> anyhow::Result<()> {
        let store = Storefront::builtin(seed::DEFAULT_GAME_ID)?;
        assert_eq!(store.catalog().len(), 2);
        assert_eq!(store.library().len(), 2);
        assert_eq!(store.library_view().result().visible_count, 2);
        Ok(())
    }

    #[test]
    fn config_files_replace_builtins() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let library_path = dir.path().join("library.json");
        let mut entries = seed::library_entries();
        entries.push(LibraryEntry {
            id: "celeste".to_string(),
            title: "Celeste".to_string(),
            kind: "Precision Platformer".to_string(),
            genre: GenreTag::Indie,
            hours_played: 41,
            thumbnail: None,
            emoji: "🍓".to_string(),
        });
        LibraryFile { entries }.persist(&library_path)?;

        let config = AppConfig {
            default_game: "arc".to_string(),
            catalog_path: Some(dir.path().join("absent.json")),
            library_path: Some(library_path),
            export_dir: dir.path().join("site"),
        };
        let store = Storefront::from_config(&config)?;
        assert_eq!(store.library().len(), 3);
        assert_eq!(store.catalog().resolve("unknown").id, "arc");
        Ok(())
    }

    #[test]
    fn unknown_default_is_rejected() {
        let config = AppConfig {
            default_game: "zzz".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            Storefront::from_config(&config),
            Err(VaultError::MissingDefault(_))
        ));
    }
}
