use tracing::debug;

use super::{render, FilterState, RenderResult};
use crate::models::{GenreTag, LibraryEntry};

/// Event-driven view-model for the library grid.
///
/// Holds the immutable entry list plus the per-view [`FilterState`]. Each
/// event handler updates the state and returns the freshly computed
/// [`RenderResult`] for the rendering adapter.
#[derive(Debug, Clone)]
pub struct LibraryView {
    entries: Vec<LibraryEntry>,
    state: FilterState,
}

impl LibraryView {
    /// Start with the `all` tab and an empty query.
    pub fn new(entries: Vec<LibraryEntry>) -> Self {
        Self {
            entries,
            state: FilterState::default(),
        }
    }

    /// Full, unfiltered entry list.
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// Current filter selection.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Visible subset for the current state.
    pub fn result(&self) -> RenderResult<'_> {
        render(&self.entries, &self.state)
    }

    /// Replace the search text.
    pub fn on_query_change(&mut self, query: impl Into<String>) -> RenderResult<'_> {
        self.state.search_query = query.into();
        debug!(query = %self.state.search_query, "Library query changed");
        self.result()
    }

    /// Append one typed character to the search text.
    pub fn on_query_push(&mut self, ch: char) -> RenderResult<'_> {
        self.state.search_query.push(ch);
        self.result()
    }

    /// Remove the last character of the search text.
    pub fn on_query_pop(&mut self) -> RenderResult<'_> {
        self.state.search_query.pop();
        self.result()
    }

    /// Select a tab; every other tab becomes inactive.
    pub fn on_filter_select(&mut self, tag: GenreTag) -> RenderResult<'_> {
        self.state.active_filter = tag;
        debug!(filter = %tag, "Library filter selected");
        self.result()
    }

    /// Move to the next tab, wrapping.
    pub fn next_filter(&mut self) -> RenderResult<'_> {
        let tag = self.state.active_filter.offset(1);
        self.on_filter_select(tag)
    }

    /// Move to the previous tab, wrapping.
    pub fn previous_filter(&mut self) -> RenderResult<'_> {
        let tag = self.state.active_filter.offset(-1);
        self.on_filter_select(tag)
    }

    /// Whether `tag` is the selected tab.
    pub fn is_active(&self, tag: GenreTag) -> bool {
        self.state.active_filter == tag
    }

    /// Drop the query and return to the `all` tab.
    pub fn reset(&mut self) -> RenderResult<'_> {
        self.state = FilterState::default();
        self.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn exactly_one_tab_is_active() {
        let mut view = LibraryView::new(seed::library_entries());
        for tag in GenreTag::ALL {
            view.on_filter_select(tag);
            let active: Vec<GenreTag> = GenreTag::ALL
                .into_iter()
                .filter(|candidate| view.is_active(*candidate))
                .collect();
            assert_eq!(active, vec![tag]);
        }
    }

    #[test]
    fn events_recompute_the_result() {
        let mut view = LibraryView::new(seed::library_entries());
        assert_eq!(view.result().visible_count, 2);

        assert_eq!(view.on_filter_select(GenreTag::Action).visible_count, 1);
        assert!(view.on_filter_select(GenreTag::Rpg).is_empty);

        view.on_filter_select(GenreTag::All);
        for ch in "raid".chars() {
            view.on_query_push(ch);
        }
        let result = view.result();
        assert_eq!(result.visible_count, 1);
        assert_eq!(result.visible_entries[0].id, "arc");

        view.on_query_pop();
        assert_eq!(view.state().search_query, "rai");
        assert_eq!(view.on_query_change("").visible_count, 2);
    }

    #[test]
    fn tab_cycling_wraps_and_reset_restores_defaults() {
        let mut view = LibraryView::new(seed::library_entries());
        view.previous_filter();
        assert!(view.is_active(GenreTag::Indie));
        view.next_filter();
        view.next_filter();
        assert!(view.is_active(GenreTag::Action));

        view.on_query_change("zzz");
        assert!(view.result().is_empty);
        assert_eq!(view.reset().visible_count, 2);
        assert_eq!(view.state(), &FilterState::default());
    }
}
