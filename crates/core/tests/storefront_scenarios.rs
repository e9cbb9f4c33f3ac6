use anyhow::Result;
use vault_core::{
    library::{gradient_for_id, LibraryStats, EMPTY_MESSAGE},
    parse_rating_count, render, seed, Catalog, FilterState, GenreTag, LibraryEntry, Page, Route,
    Storefront, VaultError,
};

fn catalog() -> Result<Catalog> {
    Ok(Catalog::new(seed::catalog_records(), seed::DEFAULT_GAME_ID)?)
}

fn ids(entries: &[&LibraryEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.id.clone()).collect()
}

#[test]
fn unknown_and_empty_ids_fall_back_to_default() -> Result<()> {
    let catalog = catalog()?;
    assert_eq!(catalog.resolve("zzz").id, "gow");
    assert_eq!(catalog.resolve("").id, "gow");
    assert_eq!(catalog.resolve("ARC").id, "gow");
    assert_eq!(catalog.resolve("arc").id, "arc");
    assert!(catalog.lookup("zzz").is_fallback());
    assert!(!catalog.lookup("gow").is_fallback());
    Ok(())
}

#[test]
fn every_known_id_resolves_to_itself() -> Result<()> {
    let catalog = catalog()?;
    for record in catalog.records() {
        assert_eq!(catalog.resolve(&record.id).id, record.id);
    }
    Ok(())
}

#[test]
fn construction_rejects_missing_default() {
    let err = Catalog::new(seed::catalog_records(), "nope").unwrap_err();
    assert!(matches!(err, VaultError::MissingDefault(id) if id == "nope"));
}

#[test]
fn review_count_display_strings_normalise() {
    assert_eq!(parse_rating_count("52,341"), 52341);
    assert_eq!(parse_rating_count(" 1,000,000 "), 1_000_000);
    assert_eq!(parse_rating_count("lots"), 0);
    assert_eq!(parse_rating_count(""), 0);
}

#[test]
fn all_tab_with_empty_query_shows_everything_in_order() {
    let entries = seed::library_entries();
    let result = render(&entries, &FilterState::default());
    assert_eq!(ids(&result.visible_entries), ["gow", "arc"]);
    assert_eq!(result.visible_count, 2);
    assert!(!result.is_empty);
}

#[test]
fn action_tab_keeps_only_action_entries() {
    let entries = seed::library_entries();
    let result = render(&entries, &FilterState::new(GenreTag::Action, ""));
    assert_eq!(ids(&result.visible_entries), ["gow"]);
    assert_eq!(result.visible_count, 1);
    assert!(result
        .visible_entries
        .iter()
        .all(|entry| entry.genre == GenreTag::Action));
}

#[test]
fn rpg_tab_is_empty_and_shows_message() {
    let entries = seed::library_entries();
    let result = render(&entries, &FilterState::new(GenreTag::Rpg, ""));
    assert!(result.visible_entries.is_empty());
    assert_eq!(result.visible_count, 0);
    assert!(result.is_empty);
    assert_eq!(result.empty_message(), Some(EMPTY_MESSAGE));
}

#[test]
fn padded_mixed_case_query_matches_title() {
    let entries = seed::library_entries();
    let result = render(&entries, &FilterState::new(GenreTag::All, "  GOD  "));
    assert_eq!(ids(&result.visible_entries), ["gow"]);

    let by_type = render(&entries, &FilterState::new(GenreTag::All, "shoot"));
    assert_eq!(ids(&by_type.visible_entries), ["arc"]);
}

#[test]
fn view_keeps_exactly_one_tab_active() -> Result<()> {
    let storefront = Storefront::builtin(seed::DEFAULT_GAME_ID)?;
    let mut view = storefront.library_view();
    for _ in 0..GenreTag::ALL.len() + 1 {
        view.next_filter();
        let active = GenreTag::ALL.iter().filter(|tag| view.is_active(**tag)).count();
        assert_eq!(active, 1);
    }
    Ok(())
}

#[test]
fn placeholder_gradient_is_stable() {
    for id in ["gow", "arc", "", "a-much-longer-identifier"] {
        assert_eq!(gradient_for_id(id), gradient_for_id(id));
    }
}

#[test]
fn library_stats_total_hours() {
    let stats = LibraryStats::collect(&seed::library_entries());
    assert_eq!(stats.owned, 2);
    assert_eq!(stats.total_hours, 179);
}

#[test]
fn game_request_renders_resolved_record() -> Result<()> {
    let storefront = Storefront::builtin(seed::DEFAULT_GAME_ID)?;
    let filter = FilterState::default();

    let page = Page::render(Route::parse("game.php?id=arc"), &storefront, &filter, 2026);
    assert!(page.html.contains("Arc Raiders"));

    let page = Page::render(Route::parse("game.php?id=zzz"), &storefront, &filter, 2026);
    assert!(page.html.contains("52,341"));
    Ok(())
}
