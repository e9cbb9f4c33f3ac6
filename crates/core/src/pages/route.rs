use once_cell::sync::Lazy;
use regex::Regex;

static TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/*(?P<page>[^?#]*?)(?:\.(?:php|html?))?(?:\?(?P<query>[^#]*))?(?:#.*)?$")
        .expect("invalid request target regex")
});

/// Page addressed by a request target such as `game.php?id=arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, `index.php`.
    Home,
    /// `store.php`.
    Store,
    /// `game.php`; `id` is the raw (decoded) query value, if any.
    Game {
        /// Requested catalog id.
        id: Option<String>,
    },
    /// `profile.php`.
    Profile,
    /// `header.php` partial.
    Header,
    /// Anything else; holds the page name without extension.
    NotFound(String),
}

impl Route {
    /// Parse a request target. Unknown pages map to [`Route::NotFound`].
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        let Some(caps) = TARGET_RE.captures(target) else {
            return Route::NotFound(target.to_string());
        };
        let page = caps.name("page").map(|m| m.as_str()).unwrap_or_default();
        let query = caps.name("query").map(|m| m.as_str()).unwrap_or_default();

        match page {
            "" | "index" => Route::Home,
            "store" => Route::Store,
            "game" => Route::Game {
                id: query_param(query, "id"),
            },
            "profile" => Route::Profile,
            "header" | "assets/header" => Route::Header,
            other => Route::NotFound(other.to_string()),
        }
    }

    /// Canonical target for this route.
    pub fn target(&self) -> String {
        match self {
            Route::Home => "index.php".to_string(),
            Route::Store => "store.php".to_string(),
            Route::Game { id: Some(id) } => format!("game.php?id={}", encode_component(id)),
            Route::Game { id: None } => "game.php".to_string(),
            Route::Profile => "profile.php".to_string(),
            Route::Header => "assets/header.php".to_string(),
            Route::NotFound(page) => format!("{page}.php"),
        }
    }
}

/// Value of `key` in a `a=1&b=2` query string. The last occurrence wins.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(name) == key).then(|| decode_component(value))
        })
        .last()
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'+' => out.push(b' '),
            b'%' => match bytes
                .get(idx + 1..idx + 3)
                .and_then(|pair| hex_pair(pair[0], pair[1]))
            {
                Some(byte) => {
                    out.push(byte);
                    idx += 2;
                }
                None => out.push(b'%'),
            },
            other => out.push(other),
        }
        idx += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

pub(crate) fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str) -> Route {
        Route::Game {
            id: Some(id.to_string()),
        }
    }

    #[test]
    fn parses_known_pages() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("index.php"), Route::Home);
        assert_eq!(Route::parse("/store.php"), Route::Store);
        assert_eq!(Route::parse("store.html"), Route::Store);
        assert_eq!(Route::parse("profile.php#library"), Route::Profile);
        assert_eq!(Route::parse("assets/header.php"), Route::Header);
        assert_eq!(Route::parse("about.php"), Route::NotFound("about".to_string()));
    }

    #[test]
    fn extracts_the_game_id() {
        assert_eq!(Route::parse("game.php?id=arc"), game("arc"));
        assert_eq!(Route::parse("/game.php?ref=home&id=gow#top"), game("gow"));
        assert_eq!(Route::parse("game.php?id=a&id=b"), game("b"));
        assert_eq!(Route::parse("game.php?id="), game(""));
        assert_eq!(Route::parse("game.php"), Route::Game { id: None });
        assert_eq!(Route::parse("game.php?other=1"), Route::Game { id: None });
    }

    #[test]
    fn decodes_percent_and_plus() {
        assert_eq!(query_param("id=god+of%20war", "id").as_deref(), Some("god of war"));
        assert_eq!(query_param("id=%3Cb%3E", "id").as_deref(), Some("<b>"));
        assert_eq!(query_param("id=100%", "id").as_deref(), Some("100%"));
        assert_eq!(query_param("id=%zz", "id").as_deref(), Some("%zz"));
        assert_eq!(query_param("flag&id=x", "id").as_deref(), Some("x"));
    }

    #[test]
    fn targets_reparse_to_the_same_route() {
        for route in [
            Route::Home,
            Route::Store,
            Route::Profile,
            Route::Header,
            game("arc"),
            game("needs encoding & more"),
            Route::Game { id: None },
        ] {
            assert_eq!(Route::parse(&route.target()), route);
        }
    }
}
