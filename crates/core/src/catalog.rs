//! Catalog lookup with an injected fallback record.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{Result, VaultError},
    models::GameRecord,
};

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    /// The requested id exists.
    Found(&'a GameRecord),
    /// The id was unknown; the default record was substituted.
    Fallback(&'a GameRecord),
}

impl<'a> Lookup<'a> {
    /// Record to render, regardless of how it was found.
    pub fn record(self) -> &'a GameRecord {
        match self {
            Lookup::Found(record) | Lookup::Fallback(record) => record,
        }
    }

    /// Whether the default record was substituted.
    pub fn is_fallback(self) -> bool {
        matches!(self, Lookup::Fallback(_))
    }
}

/// Immutable catalog of purchasable games.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<GameRecord>,
    index: HashMap<String, usize>,
    default_index: usize,
}

impl Catalog {
    /// Build a catalog, validating ids, genres, and the fallback id.
    pub fn new(records: Vec<GameRecord>, default_id: &str) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.genres.is_empty() {
                return Err(VaultError::EmptyGenres(record.id.clone()));
            }
            if index.insert(record.id.clone(), position).is_some() {
                return Err(VaultError::DuplicateId(record.id.clone()));
            }
        }
        let default_index = *index
            .get(default_id)
            .ok_or_else(|| VaultError::MissingDefault(default_id.to_string()))?;

        Ok(Self {
            records,
            index,
            default_index,
        })
    }

    /// Resolve `id` to a record, substituting the default on a miss.
    pub fn resolve(&self, id: &str) -> &GameRecord {
        self.lookup(id).record()
    }

    /// Like [`Catalog::resolve`] but reports whether the fallback was used.
    pub fn lookup(&self, id: &str) -> Lookup<'_> {
        match self.index.get(id) {
            Some(&position) => Lookup::Found(&self.records[position]),
            None => {
                debug!(requested = id, fallback = %self.default_record().id, "Unknown game id");
                Lookup::Fallback(self.default_record())
            }
        }
    }

    /// Exact lookup without fallback.
    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// The configured fallback record.
    pub fn default_record(&self) -> &GameRecord {
        &self.records[self.default_index]
    }

    /// All records in table order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty. Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a display count such as `52,341`, returning `None` when malformed.
pub fn try_parse_rating_count(display: &str) -> Option<u64> {
    let cleaned: String = display.trim().chars().filter(|ch| *ch != ',').collect();
    cleaned.parse().ok()
}

/// Parse a display count such as `52,341`; malformed input yields 0.
pub fn parse_rating_count(display: &str) -> u64 {
    try_parse_rating_count(display).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn catalog() -> Catalog {
        Catalog::new(seed::catalog_records(), "gow").expect("seed catalog is valid")
    }

    #[test]
    fn known_ids_resolve_to_themselves() {
        let catalog = catalog();
        for id in ["gow", "arc"] {
            let lookup = catalog.lookup(id);
            assert!(!lookup.is_fallback());
            assert_eq!(lookup.record().id, id);
        }
    }

    #[test]
    fn unknown_and_empty_ids_fall_back() {
        let catalog = catalog();
        for id in ["zzz", "", "GOW", " gow", "arc "] {
            let lookup = catalog.lookup(id);
            assert!(lookup.is_fallback(), "{id:?} should fall back");
            assert_eq!(lookup.record().id, "gow");
        }
        assert_eq!(catalog.resolve("zzz"), catalog.resolve("zzz"));
        assert!(catalog.get("zzz").is_none());
    }

    #[test]
    fn default_is_injected() -> Result<()> {
        let catalog = Catalog::new(seed::catalog_records(), "arc")?;
        assert_eq!(catalog.resolve("nope").id, "arc");
        assert_eq!(catalog.resolve("gow").id, "gow");
        Ok(())
    }

    #[test]
    fn rejects_invalid_tables() {
        let records = seed::catalog_records();
        assert!(matches!(
            Catalog::new(records.clone(), "zzz"),
            Err(VaultError::MissingDefault(id)) if id == "zzz"
        ));

        let mut duplicated = records.clone();
        duplicated.push(records[0].clone());
        assert!(matches!(
            Catalog::new(duplicated, "gow"),
            Err(VaultError::DuplicateId(id)) if id == "gow"
        ));

        let mut genreless = records;
        genreless[1].genres.clear();
        assert!(matches!(
            Catalog::new(genreless, "gow"),
            Err(VaultError::EmptyGenres(id)) if id == "arc"
        ));
    }

    #[test]
    fn rating_counts_strip_separators() {
        assert_eq!(parse_rating_count("52,341"), 52341);
        assert_eq!(parse_rating_count(" 1,000,000 "), 1_000_000);
        assert_eq!(parse_rating_count("0"), 0);
        assert_eq!(parse_rating_count(""), 0);
        assert_eq!(parse_rating_count("N/A"), 0);
        assert_eq!(parse_rating_count("-12"), 0);
    }
}
