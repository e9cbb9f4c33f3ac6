use super::{escape, Nav, Shell};
use crate::{catalog::Catalog, models::GameRecord};

const STORE_FILTERS: [(&str, &[&str]); 3] = [
    (
        "Genre",
        &["Action", "Adventure", "Roguelike", "Platformer", "Exploration"],
    ),
    (
        "Era",
        &["Pre-2010 Classics", "2010s Renaissance", "Modern Evolutions"],
    ),
    ("Price", &["Free", "Under $20", "$20 – $40", "$40+"]),
];

fn game_href(record: &GameRecord) -> String {
    escape(&format!("game.php?id={}", record.id))
}

/// Landing page with the top-rated relics.
pub fn home(catalog: &Catalog, year: i32) -> String {
    let hero_record = catalog.default_record();
    let relics: String = catalog
        .records()
        .iter()
        .map(|record| {
            format!(
                r#"          <article class="relic">
            <a href="{href}" class="relic-link">
              <div class="relic-visual">
                <img src="{poster}" alt="{title}" loading="lazy">
                <div class="visual-glow"></div>
              </div>
              <div class="relic-body">
                <h3>{title}</h3>
                <p class="relic-type">{line}</p>
                <div class="relic-foot">
                  <span class="price">{price}</span>
                  <span class="btn btn-small">Unseal</span>
                </div>
              </div>
            </a>
          </article>
"#,
                href = game_href(record),
                poster = escape(&record.poster),
                title = escape(&record.title),
                line = escape(&record.showcase_line()),
                price = escape(&record.final_price),
            )
        })
        .collect();

    let main = format!(
        r##"  <section class="hero">
    <div class="hero-layer">
      <video class="hero-video" autoplay muted loop playsinline poster="{poster}">
        <source src="{video}" type="video/mp4">
      </video>
      <canvas id="life-canvas" class="life-particles"></canvas>
      <div class="hero-vignette"></div>
    </div>
    <div class="hero-content container">
      <h1 class="vault-title">Cambrian Vault</h1>
      <p class="vault-subtitle">Ancient digital seas. Sudden explosion of life.<br>Curated relics from forgotten depths await.</p>
      <div class="hero-actions">
        <a href="store.php" class="btn btn-primary">Enter the Vault</a>
        <a href="#relics" class="btn btn-outline">See First Forms</a>
      </div>
    </div>
  </section>

  <section id="relics" class="relics-section">
    <div class="container">
      <h2 class="section-title">Top Rated Relics</h2>
      <p class="section-lead">The most revered forms from the Cambrian burst.</p>
      <div class="relics-grid">
{relics}      </div>
    </div>
  </section>
"##,
        poster = escape(&hero_record.poster),
        video = escape(&hero_record.video),
    );

    Shell {
        title: "Cambrian Vault • Explosion of Digital Life",
        nav: Nav::Home,
        main_class: "",
        tagline: "Deep digital oceans.",
        year,
        script: None,
    }
    .wrap(&main)
}

/// Store listing: showcase, static filter sidebar and catalog grid.
pub fn store(catalog: &Catalog, year: i32) -> String {
    let backdrop = catalog
        .default_record()
        .screenshots
        .last()
        .unwrap_or(&catalog.default_record().poster);

    let showcase: String = catalog
        .records()
        .iter()
        .map(|record| {
            format!(
                r#"        <article class="relic big">
          <a href="{href}" class="relic-link">
            <div class="relic-visual"><img src="{poster}" alt="{title}"></div>
            <div class="relic-info-overlay">
              <h3>{title}</h3>
              <span>{line}</span>
            </div>
          </a>
        </article>
"#,
                href = game_href(record),
                poster = escape(&record.poster),
                title = escape(&record.title),
                line = escape(&record.showcase_line()),
            )
        })
        .collect();

    let filters: String = STORE_FILTERS
        .iter()
        .map(|(group, options)| {
            let items: String = options
                .iter()
                .map(|option| format!("          <li>{}</li>\n", escape(option)))
                .collect();
            format!(
                "      <div class=\"filter-group\">\n        <strong>{group}</strong>\n        <ul>\n{items}        </ul>\n      </div>\n"
            )
        })
        .collect();

    let grid: String = catalog
        .records()
        .iter()
        .map(|record| {
            let image = record.screenshots.get(3).unwrap_or(&record.poster);
            format!(
                r#"      <a href="{href}" class="relic catalog-item">
        <img src="{image}" alt="{title}">
        <div class="info">
          <h4>{title}</h4>
          <span>{price}</span>
        </div>
      </a>
"#,
                href = game_href(record),
                image = escape(image),
                title = escape(&record.title),
                price = escape(&record.price),
            )
        })
        .collect();

    let main = format!(
        r#"  <section class="store-hero">
    <div class="hero-layer">
      <img src="{backdrop}" alt="Vault depths" class="hero-bg-img">
      <div class="hero-vignette deeper"></div>
    </div>
    <div class="hero-content container">
      <h1>The Vault Opens</h1>
      <p>Descend into the Cambrian abyss.<br>Discover, collect, evolve.</p>
    </div>
  </section>

  <section class="top-rated container">
    <h2>Highest Regarded Relics</h2>
    <div class="top-grid">
{showcase}    </div>
  </section>

  <section class="catalog container">
    <aside class="filters">
      <h3>Filter the Depths</h3>
{filters}    </aside>
    <div class="catalog-grid">
{grid}    </div>
  </section>
"#,
        backdrop = escape(backdrop),
    );

    Shell {
        title: "Store • Cambrian Vault",
        nav: Nav::Store,
        main_class: "store-main",
        tagline: "Where digital seas explode with life.",
        year,
        script: None,
    }
    .wrap(&main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn catalog() -> Catalog {
        Catalog::new(seed::catalog_records(), seed::DEFAULT_GAME_ID).expect("seed catalog is valid")
    }

    #[test]
    fn home_links_every_record() {
        let html = home(&catalog(), 2026);
        assert!(html.contains("<a href=\"game.php?id=gow\" class=\"relic-link\">"));
        assert!(html.contains("<a href=\"game.php?id=arc\" class=\"relic-link\">"));
        assert!(html.contains("94% Positive • Action"));
        assert!(html.contains("Highly Anticipated • Shooter"));
        assert!(html.contains("<a href=\"index.php\" class=\"active\">Home</a>"));
    }

    #[test]
    fn store_lists_prices_and_filters() {
        let html = store(&catalog(), 2026);
        assert!(html.contains("<span>$49.99</span>"));
        assert!(html.contains("<span>$39.99</span>"));
        assert!(html.contains("src=\"/assets/games/gow/gow4.jpg\""));
        assert!(html.contains("src=\"/assets/games/gow/gow5.jpg\" alt=\"Vault depths\""));
        assert!(html.contains("<li>$20 – $40</li>"));
        assert!(html.contains("Where digital seas explode with life."));
    }
}
