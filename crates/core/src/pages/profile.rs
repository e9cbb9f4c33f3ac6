use serde::Serialize;
use tracing::warn;

use super::{escape, Nav, Shell};
use crate::{
    format,
    library::{
        gradient_for_id, render, FilterState, LibraryCard, LibraryStats, Thumbnail, EMPTY_MESSAGE,
    },
    models::{GenreTag, LibraryEntry},
};

const DIVER_NAME: &str = "Deep Diver Voully";
const DIVER_META: &str = "Makati City, PH • Joined Feb 2024";
const DIVER_LEVEL: u32 = 42;
const ALLIED_DIVERS: u32 = 42;
const RECENT_LIMIT: usize = 2;

/// Profile page with the library grid rendered for `filter`.
pub fn profile(entries: &[LibraryEntry], filter: &FilterState, year: i32) -> String {
    let stats = LibraryStats::collect(entries);
    let main = format!(
        "{hero}\n  <div class=\"container\">\n{stats}\n{recent}\n{library}\n{friends}  </div>\n",
        hero = hero(&stats),
        stats = stats_block(&stats),
        recent = recently_played(entries),
        library = library_section(entries, filter),
        friends = friends(),
    );
    Shell {
        title: "Profile • Cambrian Vault",
        nav: Nav::Profile,
        main_class: "profile-page",
        tagline: "Deep digital oceans.",
        year,
        script: Some(&library_script(entries)),
    }
    .wrap(&main)
}

/// Client-side copy of a library card, consumed by [`LIBRARY_SCRIPT`].
#[derive(Debug, Serialize)]
struct ScriptCard<'a> {
    id: &'a str,
    href: String,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    genre: GenreTag,
    hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    img: Option<String>,
    gradient: &'static str,
    emoji: &'a str,
}

impl<'a> ScriptCard<'a> {
    fn new(entry: &'a LibraryEntry) -> Self {
        let card = LibraryCard::from_entry(entry);
        let (img, gradient) = match card.thumbnail {
            Thumbnail::Image(path) => (Some(path), gradient_for_id(&entry.id)),
            Thumbnail::Placeholder { gradient, .. } => (None, gradient),
        };
        Self {
            id: &entry.id,
            href: card.href,
            title: &entry.title,
            kind: &entry.kind,
            genre: entry.genre,
            hours: card.hours,
            img,
            gradient,
            emoji: &entry.emoji,
        }
    }
}

// Recomputes the grid, count and empty state on every tab click or keystroke.
const LIBRARY_SCRIPT: &str = r#"const grid = document.getElementById('lib-grid');
const empty = document.getElementById('lib-empty');
const countEl = document.getElementById('lib-count');
const searchEl = document.getElementById('lib-search');
const tabs = document.querySelectorAll('.filter-tab');
const activeTab = document.querySelector('.filter-tab.active');
let activeFilter = activeTab ? activeTab.dataset.filter : 'all';

function el(tag, className, text) {
  const node = document.createElement(tag);
  if (className) node.className = className;
  if (text !== undefined) node.textContent = text;
  return node;
}

function buildCard(game) {
  const card = el('a', 'lib-card');
  card.href = game.href;
  card.dataset.genre = game.genre;
  card.dataset.title = game.title.toLowerCase();

  const thumb = el('div', 'lib-card-thumb');
  if (game.img) {
    const img = el('img');
    img.src = game.img;
    img.alt = game.title;
    img.loading = 'lazy';
    thumb.appendChild(img);
  } else {
    const placeholder = el('div', 'lib-thumb-placeholder', game.emoji);
    placeholder.style.background = game.gradient;
    thumb.appendChild(placeholder);
  }
  thumb.appendChild(el('div', 'lib-card-thumb-overlay'));
  thumb.appendChild(el('span', 'lib-dive-btn', 'Dive In'));

  const body = el('div', 'lib-card-body');
  body.appendChild(el('span', 'lib-card-title', game.title));
  body.appendChild(el('span', 'lib-card-type', game.type));
  body.appendChild(el('span', 'lib-card-hours', game.hours));

  card.appendChild(thumb);
  card.appendChild(body);
  return card;
}

function render() {
  const q = searchEl.value.trim().toLowerCase();
  const visible = LIBRARY.filter(g => {
    const matchGenre = activeFilter === 'all' || g.genre === activeFilter;
    const matchQuery = !q || g.title.toLowerCase().includes(q) || g.type.toLowerCase().includes(q);
    return matchGenre && matchQuery;
  });

  grid.replaceChildren(...visible.map(buildCard));
  empty.style.display = visible.length === 0 ? 'block' : 'none';
  countEl.textContent = visible.length;
}

tabs.forEach(tab => {
  tab.addEventListener('click', () => {
    tabs.forEach(t => t.classList.remove('active'));
    tab.classList.add('active');
    activeFilter = tab.dataset.filter;
    render();
  });
});

searchEl.addEventListener('input', render);
"#;

fn library_script(entries: &[LibraryEntry]) -> String {
    let cards: Vec<ScriptCard<'_>> = entries.iter().map(ScriptCard::new).collect();
    let json = match serde_json::to_string(&cards) {
        Ok(json) => json,
        Err(err) => {
            warn!(?err, "Library data could not be serialised; page filters disabled");
            "[]".to_string()
        }
    };
    // Keep `</script>` inside a title from closing the element.
    let json = json.replace('<', "\\u003c");
    format!("const LIBRARY = {json};\n{LIBRARY_SCRIPT}")
}

fn hero(stats: &LibraryStats) -> String {
    format!(
        r##"  <section class="profile-hero">
    <div class="hero-layer">
      <div class="profile-bg-gradient"></div>
      <div class="hero-vignette"></div>
    </div>
    <div class="hero-content container">
      <div class="profile-header">
        <div class="avatar-frame">
          <img src="assets/images/default-avatar.jpg" alt="User Avatar" class="avatar-img">
          <div class="level-badge">LVL {DIVER_LEVEL}<br>Vault Diver</div>
        </div>
        <div class="profile-info">
          <h1 class="profile-name">{DIVER_NAME}</h1>
          <p class="profile-meta">{DIVER_META} • {hours} in Vault</p>
          <p class="profile-bio">
            Exploring ancient digital seas. Curator of forgotten relics.<br>
            &quot;In the depths, true forms emerge.&quot;
          </p>
          <div class="profile-actions">
            <a href="#library" class="btn btn-primary" id="view-library-btn">View Library</a>
          </div>
        </div>
      </div>
    </div>
  </section>
"##,
        hours = hours_total(stats),
    )
}

fn hours_total(stats: &LibraryStats) -> String {
    format!("{} hrs", format::thousands(stats.total_hours))
}

fn stats_block(stats: &LibraryStats) -> String {
    format!(
        r#"    <section class="stats-overview">
      <h2 class="section-title">Vault Stats</h2>
      <div class="stats-grid">
        <div class="stat-card"><div class="stat-number">{owned}</div><div class="stat-label">Relics Owned</div></div>
        <div class="stat-card"><div class="stat-number">{hours}</div><div class="stat-label">Hours Explored</div></div>
        <div class="stat-card"><div class="stat-number">{ALLIED_DIVERS}</div><div class="stat-label">Allied Divers</div></div>
      </div>
    </section>
"#,
        owned = format::thousands(stats.owned as u64),
        hours = format::thousands(stats.total_hours),
    )
}

fn recently_played(entries: &[LibraryEntry]) -> String {
    let cards: String = entries
        .iter()
        .take(RECENT_LIMIT)
        .map(|entry| {
            let card = LibraryCard::from_entry(entry);
            format!(
                r#"        <article class="relic owned-relic">
          <a href="{href}" class="relic-link">
            <div class="relic-visual">
{visual}              <div class="visual-glow"></div>
            </div>
            <div class="relic-body">
              <h3>{title}</h3>
              <p class="relic-type">{kind}</p>
              <div class="relic-hours">{hours}</div>
              <div class="relic-foot"><span class="btn btn-small">Dive In</span></div>
            </div>
          </a>
        </article>
"#,
                href = escape(&card.href),
                visual = thumbnail(&card, "              "),
                title = escape(&card.title),
                kind = escape(&card.kind),
                hours = escape(&card.hours),
            )
        })
        .collect();

    format!(
        r#"    <section class="owned-relics">
      <h2 class="section-title">Recently Played</h2>
      <p class="section-lead">Your most recent dives into the vault.</p>
      <div class="relics-grid">
{cards}      </div>
    </section>
"#
    )
}

fn library_section(entries: &[LibraryEntry], filter: &FilterState) -> String {
    let result = render(entries, filter);

    let tabs: String = GenreTag::ALL
        .iter()
        .map(|tag| {
            let class = if *tag == filter.active_filter {
                "filter-tab active"
            } else {
                "filter-tab"
            };
            format!(
                "          <button class=\"{class}\" data-filter=\"{}\">{}</button>\n",
                tag.as_str(),
                tag.label()
            )
        })
        .collect();

    let cards: String = result
        .cards()
        .iter()
        .zip(&result.visible_entries)
        .map(|(card, entry)| library_card(card, entry.genre))
        .collect();

    let empty_display = if result.is_empty { "block" } else { "none" };

    format!(
        r#"    <section class="library-section" id="library">
      <h2 class="section-title">
        Full Library
        <span class="library-count" id="lib-count">{count}</span>
      </h2>
      <p class="section-lead">Every relic in your vault.</p>
      <div class="library-controls">
        <input type="text" class="library-search" id="lib-search" placeholder="Search your vault…" autocomplete="off" value="{query}">
        <div class="filter-tabs">
{tabs}        </div>
      </div>
      <div class="library-grid" id="lib-grid">
{cards}      </div>
      <p class="library-empty" id="lib-empty" style="display:{empty_display}">{EMPTY_MESSAGE}</p>
    </section>
"#,
        count = result.visible_count,
        query = escape(&filter.search_query),
    )
}

fn library_card(card: &LibraryCard, genre: GenreTag) -> String {
    format!(
        r#"        <a href="{href}" class="lib-card" data-genre="{genre}" data-title="{data_title}">
          <div class="lib-card-thumb">
{thumb}            <div class="lib-card-thumb-overlay"></div>
            <span class="lib-dive-btn">Dive In</span>
          </div>
          <div class="lib-card-body">
            <span class="lib-card-title">{title}</span>
            <span class="lib-card-type">{kind}</span>
            <span class="lib-card-hours">{hours}</span>
          </div>
        </a>
"#,
        href = escape(&card.href),
        data_title = escape(&card.title.to_lowercase()),
        thumb = thumbnail(card, "            "),
        title = escape(&card.title),
        kind = escape(&card.kind),
        hours = escape(&card.hours),
    )
}

fn thumbnail(card: &LibraryCard, indent: &str) -> String {
    match &card.thumbnail {
        Thumbnail::Image(path) => format!(
            "{indent}<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
            escape(path),
            escape(&card.title)
        ),
        Thumbnail::Placeholder { gradient, emoji } => format!(
            "{indent}<div class=\"lib-thumb-placeholder\" style=\"background:{}\">{}</div>\n",
            escape(gradient),
            escape(emoji)
        ),
    }
}

fn friends() -> String {
    r##"    <section class="friends-section">
      <h2 class="section-title">Allied Divers</h2>
      <div class="friends-grid">
        <a href="#" class="friend-card">
          <img src="assets/images/friend1.jpg" alt="Friend 1" class="friend-avatar">
          <span class="friend-name">Echo Diver</span>
          <span class="friend-status online">Online</span>
        </a>
        <a href="#" class="friend-card">
          <img src="assets/images/friend2.jpg" alt="Friend 2" class="friend-avatar">
          <span class="friend-name">Abyss Scout</span>
          <span class="friend-status offline">Offline</span>
        </a>
      </div>
    </section>
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn action_tab_shows_one_card() {
        let entries = seed::library_entries();
        let html = profile(&entries, &FilterState::new(GenreTag::Action, ""), 2026);

        assert!(html.contains("<span class=\"library-count\" id=\"lib-count\">1</span>"));
        assert!(html.contains("<button class=\"filter-tab active\" data-filter=\"action\">Action</button>"));
        assert_eq!(html.matches("filter-tab active").count(), 1);
        assert_eq!(html.matches("class=\"lib-card\"").count(), 1);
        assert!(html.contains("data-title=\"god of war\""));
        assert!(html.contains("id=\"lib-empty\" style=\"display:none\""));
    }

    #[test]
    fn empty_result_shows_message() {
        let entries = seed::library_entries();
        let html = profile(&entries, &FilterState::new(GenreTag::Rpg, ""), 2026);

        assert!(html.contains("<span class=\"library-count\" id=\"lib-count\">0</span>"));
        assert_eq!(html.matches("class=\"lib-card\"").count(), 0);
        assert!(html.contains(&format!(
            "id=\"lib-empty\" style=\"display:block\">{EMPTY_MESSAGE}</p>"
        )));
    }

    #[test]
    fn placeholder_thumbnails_and_stats() {
        let mut entries = seed::library_entries();
        entries[0].thumbnail = None;
        entries[0].hours_played = 1220;
        let html = profile(&entries, &FilterState::default(), 2026);

        assert!(html.contains("class=\"lib-thumb-placeholder\""));
        assert!(html.contains("1,243 hrs in Vault"));
        assert!(html.contains("<div class=\"relic-hours\">1,220 hrs</div>"));
        assert!(html.contains("<div class=\"stat-number\">2</div>"));
    }

    #[test]
    fn library_data_and_filters_ship_with_the_page() -> serde_json::Result<()> {
        let mut entries = seed::library_entries();
        entries[1].title = "Arc </script> Raiders".to_string();
        entries[1].thumbnail = None;
        let html = profile(&entries, &FilterState::default(), 2026);

        let start = html.find("const LIBRARY = ").expect("library data emitted") + 16;
        let end = start + html[start..].find(";\n").expect("library data terminated");
        let data: serde_json::Value = serde_json::from_str(&html[start..end])?;
        assert_eq!(data[0]["id"], "gow");
        assert_eq!(data[0]["genre"], "action");
        assert_eq!(data[0]["href"], "game.php?id=gow");
        assert_eq!(data[0]["hours"], "156 hrs");
        assert_eq!(data[1]["type"], "Extraction Shooter");
        assert_eq!(data[1]["title"], "Arc </script> Raiders");
        assert_eq!(data[1]["gradient"], gradient_for_id("arc"));
        assert!(data[1].get("img").is_none());

        assert!(!html[start..end].contains("</script>"));
        assert!(html.contains("searchEl.addEventListener('input', render);"));
        assert!(html.contains("tab.addEventListener('click'"));
        assert!(html.contains("<script src=\"assets/CV.js\"></script>\n<script>\nconst LIBRARY"));
        Ok(())
    }

    #[test]
    fn query_is_echoed_escaped() {
        let entries = seed::library_entries();
        let html = profile(&entries, &FilterState::new(GenreTag::All, "\"><b>"), 2026);
        assert!(html.contains("value=\"&quot;&gt;&lt;b&gt;\""));
        assert!(html.contains("id=\"lib-count\">0</span>"));
    }
}
