//! Library filtering and card projection.

mod view;

pub use view::LibraryView;

use crate::{
    format,
    models::{GenreTag, LibraryEntry},
    pages::Route,
};

/// Backgrounds for entries without a thumbnail.
pub const THUMB_GRADIENTS: [&str; 6] = [
    "linear-gradient(135deg, #0d1b3e 0%, #00344d 100%)",
    "linear-gradient(135deg, #1a0d3e 0%, #3d0050 100%)",
    "linear-gradient(135deg, #0d2e1a 0%, #003d30 100%)",
    "linear-gradient(135deg, #3e1a0d 0%, #4d2000 100%)",
    "linear-gradient(135deg, #1a1a0d 0%, #2d3d00 100%)",
    "linear-gradient(135deg, #0d1e3e 0%, #001a4d 100%)",
];

/// Message shown when no entry survives the filter.
pub const EMPTY_MESSAGE: &str = "No relics match your search.";

/// Per-view filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected tab.
    pub active_filter: GenreTag,
    /// Raw search text as typed.
    pub search_query: String,
}

impl FilterState {
    /// State with the given tab and query.
    pub fn new(active_filter: GenreTag, search_query: impl Into<String>) -> Self {
        Self {
            active_filter,
            search_query: search_query.into(),
        }
    }

    /// Lower-cased, trimmed query used for matching.
    pub fn needle(&self) -> String {
        self.search_query.trim().to_lowercase()
    }

    /// Whether `entry` passes both the tab and the search query.
    pub fn matches(&self, entry: &LibraryEntry) -> bool {
        genre_matches(self.active_filter, entry) && entry_matches(entry, &self.needle())
    }
}

/// Visible subset of the library for one filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult<'a> {
    /// Entries that passed the filter, in table order.
    pub visible_entries: Vec<&'a LibraryEntry>,
    /// `visible_entries.len()`.
    pub visible_count: usize,
    /// True when nothing is visible.
    pub is_empty: bool,
}

impl<'a> RenderResult<'a> {
    fn from_visible(visible_entries: Vec<&'a LibraryEntry>) -> Self {
        let visible_count = visible_entries.len();
        Self {
            visible_entries,
            visible_count,
            is_empty: visible_count == 0,
        }
    }

    /// Card projections for the visible entries.
    pub fn cards(&self) -> Vec<LibraryCard> {
        self.visible_entries
            .iter()
            .map(|entry| LibraryCard::from_entry(entry))
            .collect()
    }

    /// Empty-state message when applicable.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty.then_some(EMPTY_MESSAGE)
    }
}

/// Compute the visible subset of `entries` for `state`.
pub fn render<'a>(entries: &'a [LibraryEntry], state: &FilterState) -> RenderResult<'a> {
    let needle = state.needle();
    let visible = entries
        .iter()
        .filter(|entry| genre_matches(state.active_filter, entry))
        .filter(|entry| entry_matches(entry, &needle))
        .collect();
    RenderResult::from_visible(visible)
}

fn genre_matches(filter: GenreTag, entry: &LibraryEntry) -> bool {
    filter == GenreTag::All || entry.genre == filter
}

fn entry_matches(entry: &LibraryEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.title.to_lowercase().contains(needle)
        || entry.kind.to_lowercase().contains(needle)
}

/// Placeholder background for `id`; stable for a given id.
pub fn gradient_for_id(id: &str) -> &'static str {
    let hash = id
        .chars()
        .fold(0u32, |hash, ch| (hash * 31 + u32::from(first_utf16_unit(ch))) & 0xffff);
    THUMB_GRADIENTS[hash as usize % THUMB_GRADIENTS.len()]
}

// Characters outside the BMP hash by their leading surrogate.
fn first_utf16_unit(ch: char) -> u16 {
    ch.encode_utf16(&mut [0; 2])[0]
}

/// Card image: a real thumbnail or a generated placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Image path, passed through untouched.
    Image(String),
    /// Gradient background with a decorative glyph.
    Placeholder {
        /// CSS background value from [`THUMB_GRADIENTS`].
        gradient: &'static str,
        /// Glyph drawn over the gradient.
        emoji: String,
    },
}

/// View projection of one visible library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCard {
    /// Link to the game page.
    pub href: String,
    /// Catalog id.
    pub id: String,
    /// Game title.
    pub title: String,
    /// Display category.
    pub kind: String,
    /// Playtime label with separators.
    pub hours: String,
    /// Image or placeholder.
    pub thumbnail: Thumbnail,
}

impl LibraryCard {
    /// Project `entry` into a card.
    pub fn from_entry(entry: &LibraryEntry) -> Self {
        let thumbnail = match entry.thumbnail.as_deref() {
            Some(path) if !path.trim().is_empty() => Thumbnail::Image(path.to_string()),
            _ => Thumbnail::Placeholder {
                gradient: gradient_for_id(&entry.id),
                emoji: entry.emoji.clone(),
            },
        };
        Self {
            href: Route::Game {
                id: Some(entry.id.clone()),
            }
            .target(),
            id: entry.id.clone(),
            title: entry.title.clone(),
            kind: entry.kind.clone(),
            hours: format::hours(entry.hours_played),
            thumbnail,
        }
    }
}

/// Totals shown in the profile stats block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    /// Number of owned games.
    pub owned: usize,
    /// Sum of hours across the library.
    pub total_hours: u64,
}

impl LibraryStats {
    /// Aggregate over the whole library, ignoring any filter.
    pub fn collect(entries: &[LibraryEntry]) -> Self {
        Self {
            owned: entries.len(),
            total_hours: entries
                .iter()
                .map(|entry| u64::from(entry.hours_played))
                .sum(),
        }
    }
}
