use super::{escape, escape_multiline, Nav, Shell};
use crate::{
    format,
    models::{GameRecord, Requirement},
};

/// Game detail page for an already-resolved record.
pub fn game(record: &GameRecord, year: i32) -> String {
    let main = format!(
        "{hero}\n{grid}\n{reviews}",
        hero = hero(record),
        grid = main_grid(record),
        reviews = reviews(record),
    );
    Shell {
        title: &format!("{} • Cambrian Vault", record.title),
        nav: Nav::None,
        main_class: "game-page",
        tagline: "All rights reserved.",
        year,
        script: None,
    }
    .wrap(&main)
}

fn hero(record: &GameRecord) -> String {
    let genres: String = record
        .genres
        .iter()
        .map(|genre| format!("          <span class=\"genre-tag\">{}</span>\n", escape(genre)))
        .collect();

    let (discount, original) = match record.discount.as_deref() {
        Some(discount) => (
            format!("          <span class=\"discount\">{}</span>\n", escape(discount)),
            format!(
                "          <span class=\"original-price\">{}</span>\n",
                escape(&record.price)
            ),
        ),
        None => (String::new(), String::new()),
    };

    format!(
        r##"  <section class="game-hero">
    <video class="hero-video" autoplay muted loop playsinline poster="{poster}">
      <source src="{video}" type="video/mp4">
      Your browser does not support the video tag.
    </video>
    <div class="hero-gradient"></div>
    <div class="hero-vignette"></div>
    <div class="hero-content">
      <div class="game-hero-body">
        <div class="game-hero-left">
          <h1 class="game-title">{title}</h1>
          <p class="game-subtitle">{subtitle}</p>
          <div class="genres">
{genres}          </div>
          <p class="meta">
            Developer: {developer} •
            Publisher: {publisher} •
            Release: {release}
          </p>
        </div>
        <div class="game-hero-right">
          <div class="price-actions">
{discount}          <span class="final-price">{final_price}</span>
{original}          </div>
          <div class="action-buttons">
            <a href="#" class="btn btn-buy">Add to Cart</a>
            <a href="#" class="btn btn-wishlist">+ Wishlist</a>
          </div>
        </div>
      </div>
    </div>
  </section>
"##,
        poster = escape(&record.poster),
        video = escape(&record.video),
        title = escape(&record.title),
        subtitle = escape(&record.subtitle),
        developer = escape(&record.developer),
        publisher = escape(&record.publisher),
        release = escape(&record.release_date),
        final_price = escape(&record.final_price),
    )
}

fn main_grid(record: &GameRecord) -> String {
    let features = if record.features.is_empty() {
        String::new()
    } else {
        let items: String = record
            .features
            .iter()
            .map(|feature| format!("        <li>{}</li>\n", escape(feature)))
            .collect();
        format!(
            "      <h3 class=\"sub-title\">Key Mutations</h3>\n      <ul class=\"features-list\">\n{items}      </ul>\n"
        )
    };

    let shots: String = record
        .screenshots
        .iter()
        .map(|shot| {
            format!(
                "        <img src=\"{}\" alt=\"Screenshot\" loading=\"lazy\">\n",
                escape(shot)
            )
        })
        .collect();

    format!(
        r#"  <div class="container main-grid">
    <div class="description-column">
      <h2 class="section-title">About This Relic</h2>
      <p class="description">{description}</p>
{features}      <h3 class="sub-title">Gallery</h3>
      <div class="screenshots">
{shots}      </div>
    </div>
    <div class="requirements-column">
      <h2 class="section-title">System Depths</h2>
      <div class="req-cards">
{minimum}{recommended}      </div>
    </div>
  </div>
"#,
        description = escape_multiline(&record.description),
        minimum = requirement_card("min", "Minimum", &record.min_requirements),
        recommended = requirement_card("rec", "Recommended", &record.recommended_requirements),
    )
}

fn requirement_card(class: &str, heading: &str, requirements: &[Requirement]) -> String {
    let items: String = requirements
        .iter()
        .map(|req| {
            format!(
                "          <div class=\"req-item\"><strong>{}:</strong> {}</div>\n",
                escape(&req.category),
                escape(&req.value)
            )
        })
        .collect();
    format!(
        "        <div class=\"req-card {class}\">\n          <h3>{heading}</h3>\n{items}        </div>\n"
    )
}

fn reviews(record: &GameRecord) -> String {
    let cards: String = record
        .reviews
        .iter()
        .map(|review| {
            format!(
                r#"      <div class="review-card">
        <div class="review-meta">
          <strong>{user}</strong>
          <span>{date}</span>
        </div>
        <p>{text}</p>
      </div>
"#,
                user = escape(&review.user),
                date = escape(&review.date),
                text = escape(&review.text),
            )
        })
        .collect();

    format!(
        r#"  <section class="reviews container">
    <h2 class="section-title">Community Echoes</h2>
    <div class="rating-overview">
      <div class="rating-circle">{percent}</div>
      <div class="rating-text">
        <strong>{rating}</strong><br>
        {count} user reviews
      </div>
    </div>
    <div class="review-cards">
{cards}    </div>
  </section>
"#,
        percent = escape(&record.rating_percent),
        rating = escape(&record.rating),
        count = format::thousands(record.rating_count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn renders_discounted_record() {
        let records = seed::catalog_records();
        let html = game(&records[0], 2026);

        assert!(html.contains("<title>God of War • Cambrian Vault</title>"));
        assert!(html.contains("<span class=\"discount\">-20%</span>"));
        assert!(html.contains("<span class=\"original-price\">$49.99</span>"));
        assert!(html.contains("52,341 user reviews"));
        assert!(html.contains("Over-the-top combat with new weapons &amp; abilities"));
        assert!(html.contains("<strong>Memory:</strong> 8 GB RAM"));
        assert_eq!(html.matches("alt=\"Screenshot\"").count(), 5);
    }

    #[test]
    fn omits_discount_markup_when_not_on_sale() {
        let records = seed::catalog_records();
        let html = game(&records[1], 2026);
        assert!(!html.contains("class=\"discount\""));
        assert!(!html.contains("original-price"));
        assert!(html.contains("<span class=\"final-price\">$39.99</span>"));
        assert!(html.contains("Can&#039;t wait for full release."));
    }

    #[test]
    fn escapes_hostile_fields() {
        let mut record = seed::catalog_records().remove(0);
        record.title = "<script>alert(1)</script>".to_string();
        record.poster = "x\" onerror=\"boom".to_string();
        record.description = "line one\nline two".to_string();
        record.features.clear();

        let html = game(&record, 2026);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("poster=\"x&quot; onerror=&quot;boom\""));
        assert!(html.contains("line one<br>\nline two"));
        assert!(!html.contains("Key Mutations"));
    }
}
