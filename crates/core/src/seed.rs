//! Built-in catalog and library tables used when no data files are configured.

use crate::models::{GameRecord, GenreTag, LibraryEntry, Requirement, Review};

/// Id of the record served for unknown requests in the built-in catalog.
pub const DEFAULT_GAME_ID: &str = "gow";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn requirements(values: &[(&str, &str)]) -> Vec<Requirement> {
    values
        .iter()
        .map(|(category, value)| Requirement::new(*category, *value))
        .collect()
}

fn review(user: &str, date: &str, text: &str) -> Review {
    Review {
        user: user.to_string(),
        date: date.to_string(),
        text: text.to_string(),
    }
}

fn screenshots(id: &str) -> Vec<String> {
    (1..=5)
        .map(|n| format!("/assets/games/{id}/{id}{n}.jpg"))
        .collect()
}

/// The storefront's catalog in display order.
pub fn catalog_records() -> Vec<GameRecord> {
    vec![
        GameRecord {
            id: "gow".to_string(),
            title: "God of War".to_string(),
            subtitle: "A brutal saga carved from myth and silicon.".to_string(),
            price: "$49.99".to_string(),
            discount: Some("-20%".to_string()),
            final_price: "$39.99".to_string(),
            release_date: "April 20, 2022".to_string(),
            developer: "Santa Monica Studio".to_string(),
            publisher: "PlayStation PC LLC".to_string(),
            genres: strings(&["Action", "Adventure", "RPG", "Hack and Slash"]),
            description: "His vengeance against the Gods of Olympus years behind him, Kratos now \
                lives as a man in the realm of Norse Gods and monsters. It is in this harsh, \
                unforgiving world that he must fight to survive… and teach his son to do the same."
                .to_string(),
            features: strings(&[
                "Stunning redesigned worlds",
                "Engaging narrative with deep character moments",
                "Over-the-top combat with new weapons & abilities",
                "Exploration of vast realms",
            ]),
            min_requirements: requirements(&[
                ("OS", "Windows 10 64-bit"),
                ("Processor", "Intel i5-2500k or AMD Ryzen 3 1200"),
                ("Memory", "8 GB RAM"),
                ("Graphics", "NVIDIA GTX 960 (4GB) or AMD R9 290X (4GB)"),
                ("Storage", "70 GB available space"),
            ]),
            recommended_requirements: requirements(&[
                ("OS", "Windows 10/11 64-bit"),
                ("Processor", "Intel i5-6600k or AMD Ryzen 5 2400 G"),
                ("Memory", "16 GB RAM"),
                ("Graphics", "NVIDIA GTX 1060 (6GB) or AMD RX 5700 (8GB)"),
                ("Storage", "70 GB available space"),
            ]),
            rating: "Very Positive".to_string(),
            rating_percent: "94%".to_string(),
            rating_count: 52341,
            reviews: vec![
                review(
                    "KratosFan92",
                    "Jan 15, 2026",
                    "Masterpiece. The story hits hard, combat is satisfying, visuals insane on PC.",
                ),
                review(
                    "NordicGamer",
                    "Feb 2, 2026",
                    "Best port ever. Runs buttery smooth at 4K 120fps with DLSS. Worth every penny.",
                ),
            ],
            video: "/assets/games/gow/gowvid.mp4".to_string(),
            poster: "/assets/games/gow/gow1.jpg".to_string(),
            screenshots: screenshots("gow"),
        },
        GameRecord {
            id: "arc".to_string(),
            title: "Arc Raiders".to_string(),
            subtitle: "High-stakes extraction in a machine-overrun world.".to_string(),
            price: "$39.99".to_string(),
            discount: None,
            final_price: "$39.99".to_string(),
            release_date: "TBA 2026".to_string(),
            developer: "Embark Studios".to_string(),
            publisher: "Embark Studios".to_string(),
            genres: strings(&["Shooter", "Survival", "Co-op", "PvPvE"]),
            description: "Team up with friends to raid the surface, scavenge resources, and \
                survive against ARC machines in this intense PvPvE extraction shooter."
                .to_string(),
            features: strings(&[
                "Intense PvPvE extraction gameplay",
                "Dynamic co-op battles",
                "Craft and customize gear",
                "Procedural environments",
            ]),
            min_requirements: requirements(&[
                ("OS", "Windows 10 64-bit"),
                ("Processor", "Intel i5-10400"),
                ("Memory", "16 GB RAM"),
                ("Graphics", "NVIDIA GTX 1660 (6GB)"),
                ("Storage", "50 GB available space"),
            ]),
            recommended_requirements: requirements(&[
                ("OS", "Windows 11 64-bit"),
                ("Processor", "Intel i7-10700K"),
                ("Memory", "32 GB RAM"),
                ("Graphics", "NVIDIA RTX 3070 (8GB)"),
                ("Storage", "50 GB available space"),
            ]),
            rating: "Highly Anticipated".to_string(),
            rating_percent: "N/A".to_string(),
            rating_count: 0,
            reviews: vec![
                review(
                    "RaiderBeta",
                    "Dec 10, 2025",
                    "Beta was intense! Love the extraction mechanics and machine designs.",
                ),
                review(
                    "CoopFan",
                    "Jan 5, 2026",
                    "Teamwork shines here. Can't wait for full release.",
                ),
            ],
            video: "/assets/games/arc/arcvid.mp4".to_string(),
            poster: "/assets/games/arc/arc1.jpg".to_string(),
            screenshots: screenshots("arc"),
        },
    ]
}

/// The signed-in diver's owned games.
pub fn library_entries() -> Vec<LibraryEntry> {
    vec![
        LibraryEntry {
            id: "gow".to_string(),
            title: "God of War".to_string(),
            kind: "Mythic Action Adventure".to_string(),
            genre: GenreTag::Action,
            hours_played: 156,
            thumbnail: Some("assets/games/gow/gow1.jpg".to_string()),
            emoji: "⚔️".to_string(),
        },
        LibraryEntry {
            id: "arc".to_string(),
            title: "Arc Raiders".to_string(),
            kind: "Extraction Shooter".to_string(),
            genre: GenreTag::Shooter,
            hours_played: 23,
            thumbnail: Some("assets/games/arc/arc1.jpg".to_string()),
            emoji: "🔫".to_string(),
        },
    ]
}
