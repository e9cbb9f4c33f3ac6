//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`]; asset paths are passed
//! through as opaque strings.

mod game;
mod profile;
mod route;
mod showcase;

pub use game::game;
pub use profile::profile;
pub use route::{query_param, Route};
pub(crate) use route::encode_component;
pub use showcase::{home, store};

use tracing::debug;

use crate::{library::FilterState, storefront::Storefront};

const SITE_NAME: &str = "Cambrian Vault";
const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Playfair+Display:ital,wght@0,400..900;1,400..900&amp;family=Inter:wght@100..900&amp;display=swap";

/// Escape text for HTML content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape and turn newlines into `<br>` line breaks.
pub fn escape_multiline(input: &str) -> String {
    escape(input).replace("\r\n", "\n").replace('\n', "<br>\n")
}

/// Navigation entry highlighted in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Landing page.
    Home,
    /// Store listing.
    Store,
    /// Profile and library.
    Profile,
    /// Nothing highlighted (game pages, errors).
    None,
}

const NAV_LINKS: [(Nav, &str, &str); 5] = [
    (Nav::Home, "index.php", "Home"),
    (Nav::Store, "store.php", "Store"),
    (Nav::Profile, "profile.php", "Profile"),
    (Nav::None, "about.php", "About"),
    (Nav::None, "community.php", "Community"),
];

/// Shared site header partial.
pub fn header(active: Nav) -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|(nav, href, label)| {
            if *nav == active && active != Nav::None {
                format!("        <li><a href=\"{href}\" class=\"active\">{label}</a></li>\n")
            } else {
                format!("        <li><a href=\"{href}\">{label}</a></li>\n")
            }
        })
        .collect();

    format!(
        r#"<header class="site-header">
  <div class="container header-flex">
    <a href="index.php" class="logo">
      <img src="assets/images/cambrianlogo.png" alt="Cambrian Vault Logo" class="logo-img">
      <span class="logo-text">{SITE_NAME}</span>
    </a>
    <nav class="main-nav">
      <ul>
{links}      </ul>
    </nav>
  </div>
</header>
"#
    )
}

fn footer(year: i32, tagline: &str) -> String {
    format!(
        r#"<footer class="site-footer">
  <div class="container">
    <p>© {year} {SITE_NAME} — {tagline}</p>
  </div>
</footer>
"#,
        tagline = escape(tagline)
    )
}

pub(crate) struct Shell<'a> {
    pub title: &'a str,
    pub nav: Nav,
    pub main_class: &'a str,
    pub tagline: &'a str,
    pub year: i32,
    /// Inline script emitted after the shared `CV.js`.
    pub script: Option<&'a str>,
}

impl Shell<'_> {
    pub(crate) fn wrap(&self, main: &str) -> String {
        let main_open = if self.main_class.is_empty() {
            "<main>".to_string()
        } else {
            format!("<main class=\"{}\">", self.main_class)
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en" class="theme-dark">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="assets/CV.css">
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="{FONTS_HREF}" rel="stylesheet">
</head>
<body>
{header}
{main_open}
{main}</main>

{footer}
<script src="assets/CV.js"></script>
{script}</body>
</html>
"#,
            title = escape(self.title),
            header = header(self.nav),
            footer = footer(self.year, self.tagline),
            script = self
                .script
                .map(|body| format!("<script>\n{body}</script>\n"))
                .unwrap_or_default(),
        )
    }
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Route that produced the page.
    pub route: Route,
    /// Document title.
    pub title: String,
    /// Full HTML document (or fragment for the header partial).
    pub html: String,
}

impl Page {
    /// Render `route` against the storefront tables.
    ///
    /// The profile page is rendered with `filter`; other pages ignore it.
    pub fn render(route: Route, storefront: &Storefront, filter: &FilterState, year: i32) -> Self {
        debug!(?route, "Rendering page");
        let (title, html) = match &route {
            Route::Home => (
                format!("{SITE_NAME} • Explosion of Digital Life"),
                home(storefront.catalog(), year),
            ),
            Route::Store => (
                format!("Store • {SITE_NAME}"),
                store(storefront.catalog(), year),
            ),
            Route::Game { id } => {
                let record = storefront.catalog().resolve(id.as_deref().unwrap_or_default());
                (
                    format!("{} • {SITE_NAME}", record.title),
                    game(record, year),
                )
            }
            Route::Profile => (
                format!("Profile • {SITE_NAME}"),
                profile(storefront.library(), filter, year),
            ),
            Route::Header => (SITE_NAME.to_string(), header(Nav::Home)),
            Route::NotFound(path) => (
                format!("Lost in the Depths • {SITE_NAME}"),
                not_found(path, year),
            ),
        };
        Self { route, title, html }
    }
}

fn not_found(path: &str, year: i32) -> String {
    let main = format!(
        r#"  <section class="not-found container">
    <h1>Lost in the Depths</h1>
    <p>Nothing lives at <code>{path}</code>.</p>
    <a href="index.php" class="btn btn-primary">Return to the surface</a>
  </section>
"#,
        path = escape(path)
    );
    Shell {
        title: &format!("Lost in the Depths • {SITE_NAME}"),
        nav: Nav::None,
        main_class: "not-found-page",
        tagline: "Deep digital oceans.",
        year,
        script: None,
    }
    .wrap(&main)
}
