use std::fmt::Display;

use serde::{Deserialize, Serialize};

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/300x450?text=";

/// The two supported catalog orderings
///
/// Adding a mode means extending both this enum and the field selection in
/// [`Production::order_key`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// In-universe timeline order
    Chronology,
    /// Real-world publication order
    Release,
}

impl SortBy {
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Chronology => "Chronological",
            SortBy::Release => "Release",
        }
    }
}

/// Kind of production
///
/// The original dataset labels these in Portuguese; the aliases accept both
/// spellings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductionType {
    #[serde(rename = "Movie", alias = "Filme")]
    Movie,
    #[serde(rename = "Series", alias = "Série")]
    Series,
    #[serde(rename = "Animated Series", alias = "Série Animada")]
    AnimatedSeries,
    #[serde(rename = "Special", alias = "Especial")]
    Special,
}

impl Display for ProductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionType::Movie => write!(f, "Movie"),
            ProductionType::Series => write!(f, "Series"),
            ProductionType::AnimatedSeries => write!(f, "Animated Series"),
            ProductionType::Special => write!(f, "Special"),
        }
    }
}

/// One catalog entry, sourced from the dataset and never mutated
///
/// `title` is the identity key: it joins watched state and render identity.
/// Duplicate titles are dropped at the fetch boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Production {
    pub title: String,
    #[serde(rename = "type")]
    pub production_type: ProductionType,
    pub release_year: i32,
    pub release_order: u32,
    pub chronology_order: u32,
    pub phase: String,
    pub synopsis: String,
    pub poster_url: String,
}

impl Production {
    /// The sequence number selected by `sort_by`
    pub fn order_key(&self, sort_by: SortBy) -> u32 {
        match sort_by {
            SortBy::Chronology => self.chronology_order,
            SortBy::Release => self.release_order,
        }
    }

    /// Poster URL for display, substituting a generated placeholder when the
    /// dataset value is empty or not an http(s) URL. No retry, no error.
    pub fn poster(&self) -> String {
        if self.poster_url.starts_with("http://") || self.poster_url.starts_with("https://") {
            self.poster_url.clone()
        } else {
            format!("{}{}", PLACEHOLDER_BASE, urlencoding::encode(&self.title))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "title": "Iron Man",
            "type": "Movie",
            "release_year": 2008,
            "release_order": 1,
            "chronology_order": 3,
            "phase": "Phase 1",
            "synopsis": "Tony Stark builds a suit.",
            "poster_url": "https://example.com/iron-man.jpg"
        }"#
    }

    #[test]
    fn test_production_deserializes() {
        let production: Production = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(production.title, "Iron Man");
        assert_eq!(production.production_type, ProductionType::Movie);
        assert_eq!(production.release_year, 2008);
        assert_eq!(production.order_key(SortBy::Release), 1);
        assert_eq!(production.order_key(SortBy::Chronology), 3);
    }

    #[test]
    fn test_production_type_portuguese_aliases() {
        let cases = [
            ("\"Filme\"", ProductionType::Movie),
            ("\"Série\"", ProductionType::Series),
            ("\"Série Animada\"", ProductionType::AnimatedSeries),
            ("\"Especial\"", ProductionType::Special),
        ];
        for (json, expected) in cases {
            let parsed: ProductionType = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{
            "title": "Broken",
            "type": "Movie",
            "release_year": 2008
        }"#;
        assert!(serde_json::from_str::<Production>(json).is_err());
    }

    #[test]
    fn test_unknown_extra_fields_are_ignored() {
        let json = r#"{
            "title": "Iron Man",
            "type": "Movie",
            "release_year": 2008,
            "release_order": 1,
            "chronology_order": 3,
            "phase": "Phase 1",
            "synopsis": "Tony Stark builds a suit.",
            "poster_url": "",
            "watched": true
        }"#;
        let production: Production = serde_json::from_str(json).unwrap();
        assert_eq!(production.title, "Iron Man");
    }

    #[test]
    fn test_poster_passes_through_valid_url() {
        let production: Production = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(production.poster(), "https://example.com/iron-man.jpg");
    }

    #[test]
    fn test_poster_placeholder_for_missing_url() {
        let mut production: Production = serde_json::from_str(sample_json()).unwrap();
        production.poster_url = String::new();
        assert_eq!(
            production.poster(),
            "https://via.placeholder.com/300x450?text=Iron%20Man"
        );
    }
}
