//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::catalog::try_parse_rating_count;

/// One user review shown on a game page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer handle.
    pub user: String,
    /// Display date, kept verbatim.
    pub date: String,
    /// Review body.
    pub text: String,
}

/// A single system requirement line (`Memory` -> `8 GB RAM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement category such as `OS` or `Graphics`.
    pub category: String,
    /// Requirement value for the category.
    pub value: String,
}

impl Requirement {
    /// Convenience constructor.
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// One purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Stable key used in `game.php?id=...`.
    pub id: String,
    /// Game title.
    pub title: String,
    /// Tagline under the title.
    #[serde(default)]
    pub subtitle: String,
    /// List price label (`$49.99`).
    pub price: String,
    /// Discount label (`-20%`); absent when the game is not on sale.
    #[serde(
        default,
        deserialize_with = "deserialize_discount",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<String>,
    /// Price after discount.
    pub final_price: String,
    /// Release date label, kept verbatim (`TBA 2026` is valid).
    pub release_date: String,
    /// Developer credit.
    pub developer: String,
    /// Publisher credit.
    pub publisher: String,
    /// Ordered genre labels; never empty.
    pub genres: Vec<String>,
    /// Long description; newlines are preserved.
    pub description: String,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Minimum system requirements in display order.
    #[serde(default)]
    pub min_requirements: Vec<Requirement>,
    /// Recommended system requirements in display order.
    #[serde(default)]
    pub recommended_requirements: Vec<Requirement>,
    /// Rating label (`Very Positive`).
    pub rating: String,
    /// Rating percentage label (`94%` or `N/A`).
    pub rating_percent: String,
    /// Number of user reviews.
    #[serde(default, deserialize_with = "deserialize_rating_count")]
    pub rating_count: u64,
    /// Featured reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Hero video path.
    pub video: String,
    /// Poster image path.
    pub poster: String,
    /// Gallery image paths.
    #[serde(default)]
    pub screenshots: Vec<String>,
}

impl GameRecord {
    /// Returns a user-facing label combining title and subtitle.
    pub fn display_name(&self) -> String {
        if self.subtitle.is_empty() {
            self.title.clone()
        } else {
            format!("{} · {}", self.title, self.subtitle)
        }
    }

    /// Whether a discount label is present.
    pub fn is_discounted(&self) -> bool {
        self.discount.is_some()
    }

    /// Short tagline used on showcase cards (`94% · Action`).
    pub fn showcase_line(&self) -> String {
        let genre = self.genres.first().map(String::as_str).unwrap_or_default();
        if self.rating_percent.ends_with('%') {
            format!("{} Positive • {}", self.rating_percent, genre)
        } else {
            format!("{} • {}", self.rating, genre)
        }
    }
}

/// Filter tags understood by the library view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreTag {
    /// Matches every entry.
    #[default]
    All,
    /// Action games.
    Action,
    /// Role-playing games.
    Rpg,
    /// Shooters.
    Shooter,
    /// Strategy games.
    Strategy,
    /// Independent releases.
    Indie,
}

impl GenreTag {
    /// Every tag in tab order.
    pub const ALL: [GenreTag; 6] = [
        GenreTag::All,
        GenreTag::Action,
        GenreTag::Rpg,
        GenreTag::Shooter,
        GenreTag::Strategy,
        GenreTag::Indie,
    ];

    /// Wire value (`rpg`).
    pub fn as_str(self) -> &'static str {
        match self {
            GenreTag::All => "all",
            GenreTag::Action => "action",
            GenreTag::Rpg => "rpg",
            GenreTag::Shooter => "shooter",
            GenreTag::Strategy => "strategy",
            GenreTag::Indie => "indie",
        }
    }

    /// Tab label (`RPG`).
    pub fn label(self) -> &'static str {
        match self {
            GenreTag::All => "All",
            GenreTag::Action => "Action",
            GenreTag::Rpg => "RPG",
            GenreTag::Shooter => "Shooter",
            GenreTag::Strategy => "Strategy",
            GenreTag::Indie => "Indie",
        }
    }

    /// Position in [`GenreTag::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|tag| *tag == self)
            .unwrap_or_default()
    }

    /// Tag `delta` tabs away, wrapping around.
    pub fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[idx as usize]
    }
}

impl fmt::Display for GenreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One owned game in the personal library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Catalog id the card links to.
    pub id: String,
    /// Game title.
    pub title: String,
    /// Display category (`Mythic Action Adventure`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Normalised filter tag.
    pub genre: GenreTag,
    /// Total hours played.
    #[serde(alias = "hours")]
    pub hours_played: u32,
    /// Thumbnail path; a generated placeholder is used when absent.
    #[serde(default, alias = "img", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Glyph drawn on the placeholder.
    #[serde(default)]
    pub emoji: String,
}

fn deserialize_discount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn deserialize_rating_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match RawCount::deserialize(deserializer)? {
        RawCount::Unsigned(value) => value,
        RawCount::Signed(value) => {
            warn!(value, "Negative rating count coerced to 0");
            0
        }
        RawCount::Float(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
        RawCount::Float(value) => {
            warn!(value, "Invalid rating count coerced to 0");
            0
        }
        RawCount::Text(text) => try_parse_rating_count(&text).unwrap_or_else(|| {
            warn!(raw = %text, "Unparseable rating count coerced to 0");
            0
        }),
    };
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_record() -> serde_json::Value {
        json!({
            "id": "gow",
            "title": "God of War",
            "price": "$49.99",
            "final_price": "$39.99",
            "release_date": "April 20, 2022",
            "developer": "Santa Monica Studio",
            "publisher": "PlayStation PC LLC",
            "genres": ["Action"],
            "description": "Kratos.",
            "rating": "Very Positive",
            "rating_percent": "94%",
            "video": "gow.mp4",
            "poster": "gow1.jpg"
        })
    }

    #[test]
    fn rating_count_accepts_display_strings() -> serde_json::Result<()> {
        let mut value = minimal_record();
        value["rating_count"] = json!("52,341");
        let record: GameRecord = serde_json::from_value(value)?;
        assert_eq!(record.rating_count, 52341);
        Ok(())
    }

    #[test]
    fn malformed_rating_count_becomes_zero() -> serde_json::Result<()> {
        let mut value = minimal_record();
        value["rating_count"] = json!("lots");
        let record: GameRecord = serde_json::from_value(value.clone())?;
        assert_eq!(record.rating_count, 0);

        value["rating_count"] = json!(-4);
        let record: GameRecord = serde_json::from_value(value)?;
        assert_eq!(record.rating_count, 0);
        Ok(())
    }

    #[test]
    fn empty_discount_is_absent() -> serde_json::Result<()> {
        let mut value = minimal_record();
        value["discount"] = json!("");
        let record: GameRecord = serde_json::from_value(value.clone())?;
        assert!(!record.is_discounted());

        value["discount"] = json!("-20%");
        let record: GameRecord = serde_json::from_value(value)?;
        assert_eq!(record.discount.as_deref(), Some("-20%"));
        Ok(())
    }

    #[test]
    fn genre_tags_cycle() {
        assert_eq!(GenreTag::All.offset(-1), GenreTag::Indie);
        assert_eq!(GenreTag::Indie.offset(1), GenreTag::All);
        assert_eq!(GenreTag::Action.offset(2), GenreTag::Shooter);
    }

    #[test]
    fn library_entry_reads_short_field_names() -> serde_json::Result<()> {
        let entry: LibraryEntry = serde_json::from_value(json!({
            "id": "arc",
            "title": "Arc Raiders",
            "type": "Extraction Shooter",
            "genre": "shooter",
            "hours": 23,
            "img": "assets/games/arc/arc1.jpg",
            "emoji": "🔫"
        }))?;
        assert_eq!(entry.genre, GenreTag::Shooter);
        assert_eq!(entry.hours_played, 23);
        assert_eq!(entry.thumbnail.as_deref(), Some("assets/games/arc/arc1.jpg"));
        Ok(())
    }
}
