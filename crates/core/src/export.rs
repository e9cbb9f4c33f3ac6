//! Static site export: every page written to a directory plus a manifest.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    data::{read_json, write_json},
    error::{Result, VaultError},
    library::FilterState,
    pages::{encode_component, Page, Route},
    storefront::Storefront,
};

/// File name of the manifest written next to the exported pages.
pub const MANIFEST_FILE: &str = ".vault-export.json";

/// Metadata describing the last export into a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExportManifest {
    /// When the export finished.
    pub generated_at: Option<DateTime<Utc>>,
    /// Copyright year stamped into the footers.
    pub year: i32,
    /// Exported file names, relative to the export directory.
    pub pages: Vec<String>,
}

impl ExportManifest {
    /// Load the manifest from `path`, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        read_json(path.as_ref())
    }

    /// Persist the manifest, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "export manifest")
    }
}

/// Manifest location inside an export directory.
pub fn manifest_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(MANIFEST_FILE)
}

/// Outcome of [`export_site`].
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Directory the pages were written to.
    pub dir: PathBuf,
    /// Full paths of the written pages, in write order.
    pub written: Vec<PathBuf>,
    /// Manifest that was persisted alongside them.
    pub manifest: ExportManifest,
}

fn file_name(route: &Route) -> String {
    match route {
        Route::Home => "index.html".to_string(),
        Route::Store => "store.html".to_string(),
        Route::Profile => "profile.html".to_string(),
        Route::Header => "header.html".to_string(),
        Route::Game { id } => format!(
            "game-{}.html",
            encode_component(id.as_deref().unwrap_or("default"))
        ),
        Route::NotFound(page) => format!("{}.html", encode_component(page)),
    }
}

/// Render every page of the storefront into `dir`.
///
/// Writes `index.html`, `store.html`, `profile.html`, `header.html` and one
/// `game-<id>.html` per catalog record, then the export manifest. The profile
/// page is rendered with the default filter.
pub fn export_site(dir: impl AsRef<Path>, storefront: &Storefront, year: i32) -> Result<ExportReport> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|err| VaultError::io("create", dir, err))?;

    let mut routes = vec![Route::Home, Route::Store, Route::Profile, Route::Header];
    routes.extend(storefront.catalog().records().iter().map(|record| Route::Game {
        id: Some(record.id.clone()),
    }));

    let filter = FilterState::default();
    let mut written = Vec::with_capacity(routes.len());
    let mut pages = Vec::with_capacity(routes.len());
    for route in routes {
        let name = file_name(&route);
        let path = dir.join(&name);
        let page = Page::render(route, storefront, &filter, year);
        fs::write(&path, page.html).map_err(|err| VaultError::io("write", &path, err))?;
        debug!(path = %path.display(), "Exported page");
        written.push(path);
        pages.push(name);
    }

    let manifest = ExportManifest {
        generated_at: Some(Utc::now()),
        year,
        pages,
    };
    manifest.persist(manifest_path(dir))?;
    info!(dir = %dir.display(), pages = written.len(), "Exported site");

    Ok(ExportReport {
        dir: dir.to_path_buf(),
        written,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn writes_every_page_and_manifest() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("site");
        let storefront = Storefront::builtin(seed::DEFAULT_GAME_ID)?;

        let report = export_site(&out, &storefront, 2026)?;
        assert_eq!(
            report.manifest.pages,
            vec![
                "index.html",
                "store.html",
                "profile.html",
                "header.html",
                "game-gow.html",
                "game-arc.html",
            ]
        );
        for path in &report.written {
            assert!(path.is_file(), "missing {}", path.display());
        }

        let arc = fs::read_to_string(out.join("game-arc.html"))?;
        assert!(arc.contains("<title>Arc Raiders • Cambrian Vault</title>"));
        let profile = fs::read_to_string(out.join("profile.html"))?;
        assert!(profile.contains("© 2026 Cambrian Vault"));

        let manifest = ExportManifest::load(manifest_path(&out))?.expect("manifest written");
        assert_eq!(manifest, report.manifest);
        assert!(manifest.generated_at.is_some());
        Ok(())
    }

    #[test]
    fn ids_with_path_separators_stay_inside_the_export_dir() -> Result<()> {
        let dir = tempdir()?;
        let mut records = seed::catalog_records();
        records[1].id = "../dlc/arc".to_string();
        let catalog = crate::Catalog::new(records, seed::DEFAULT_GAME_ID)?;
        let storefront = Storefront::new(catalog, seed::library_entries());

        let report = export_site(dir.path(), &storefront, 2026)?;
        assert!(report
            .manifest
            .pages
            .contains(&"game-..%2Fdlc%2Farc.html".to_string()));
        for path in &report.written {
            assert_eq!(path.parent(), Some(dir.path()));
            assert!(path.is_file());
        }
        Ok(())
    }

    #[test]
    fn manifest_absent_before_export() -> Result<()> {
        let dir = tempdir()?;
        assert!(ExportManifest::load(manifest_path(dir.path()))?.is_none());
        Ok(())
    }
}
