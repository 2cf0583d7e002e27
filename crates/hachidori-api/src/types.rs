use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

// ── Lenient leaf types ───────────────────────────────────────────

/// A JSON scalar that may arrive as a string, number or boolean.
/// Anything else (arrays, objects) is accepted and ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    /// Verbatim text: strings unquoted, numbers and booleans in JSON form.
    pub fn into_text(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Num(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Other(_) => String::new(),
        }
    }

    /// Only genuine strings; numbers and the rest are dropped.
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// A finite float from a number or numeric text, else `0.0`.
    pub fn to_f64(&self) -> f64 {
        let value = match self {
            Self::Num(n) => n.as_f64(),
            Self::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|f| f.is_finite()).unwrap_or(0.0)
    }
}

/// A nested object that is ignored when it has the wrong shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Parsed(T),
    Ignored(IgnoredAny),
}

impl<T> Lenient<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Parsed(t) => Some(t),
            Self::Ignored(_) => None,
        }
    }
}

fn text(field: Option<Scalar>) -> String {
    field.map(Scalar::into_text).unwrap_or_default()
}

// ── Library list response ────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LibraryItemWire {
    pub status: Option<Scalar>,
    pub episodes_watched: Option<Scalar>,
    pub rating: Option<Lenient<RatingWire>>,
    pub anime: Option<Lenient<AnimeRefWire>>,
}

#[derive(Debug, Deserialize)]
pub struct RatingWire {
    pub value: Option<Scalar>,
}

/// The anime summary embedded in each library item.
#[derive(Debug, Deserialize)]
pub struct AnimeRefWire {
    pub id: Option<Scalar>,
    pub title: Option<Scalar>,
}

/// One item of a user's library, as delivered by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLibraryRecord {
    /// `anime.id`; empty if the record carried none.
    pub remote_id: String,
    /// `status`, untouched (e.g. `"currently-watching"`).
    pub status_code: String,
    pub episodes_watched_raw: String,
    /// `rating.value`.
    pub user_rating_raw: String,
    /// `anime.title` from the embedded anime summary, used when the detail
    /// fetch cannot provide one.
    pub fallback_title: String,
}

impl LibraryItemWire {
    pub fn into_raw_record(self) -> RawLibraryRecord {
        let anime = self.anime.and_then(Lenient::into_option);
        let (remote_id, fallback_title) = match anime {
            Some(a) => (text(a.id), text(a.title)),
            None => (String::new(), String::new()),
        };

        RawLibraryRecord {
            remote_id,
            status_code: self
                .status
                .and_then(Scalar::into_string)
                .unwrap_or_default(),
            episodes_watched_raw: text(self.episodes_watched),
            user_rating_raw: text(
                self.rating
                    .and_then(Lenient::into_option)
                    .and_then(|r| r.value),
            ),
            fallback_title,
        }
    }
}

/// Parse the list endpoint body. The top level must be a JSON array; an
/// item that is not an object becomes an all-default record.
pub fn library_records(body: Value) -> Result<Vec<RawLibraryRecord>, ApiError> {
    let Value::Array(items) = body else {
        return Err(ApiError::Parse("library response is not a JSON array".into()));
    };
    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<LibraryItemWire>(item)
                .unwrap_or_default()
                .into_raw_record()
        })
        .collect())
}

// ── Anime detail response ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnimeWire {
    pub title: Option<Scalar>,
    pub synopsis: Option<Scalar>,
    pub status: Option<Scalar>,
    pub episode_count: Option<Scalar>,
    pub show_type: Option<Scalar>,
    pub community_rating: Option<Scalar>,
    pub genres: Option<Lenient<Vec<Lenient<GenreWire>>>>,
}

#[derive(Debug, Deserialize)]
pub struct GenreWire {
    pub name: Option<Scalar>,
}

/// Metadata for one anime from the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailRecord {
    pub title: String,
    pub synopsis: String,
    pub airing_status: String,
    /// Verbatim numeric text; empty when unknown.
    pub episode_count: String,
    pub show_type: String,
    pub community_rating: f64,
    pub genre_names: Vec<String>,
}

impl AnimeWire {
    pub fn into_detail_record(self) -> DetailRecord {
        let genre_names = self
            .genres
            .and_then(Lenient::into_option)
            .unwrap_or_default()
            .into_iter()
            .filter_map(Lenient::into_option)
            .map(|g| text(g.name))
            .collect();

        DetailRecord {
            title: text(self.title),
            synopsis: text(self.synopsis),
            airing_status: text(self.status),
            episode_count: text(self.episode_count),
            show_type: text(self.show_type),
            community_rating: self.community_rating.as_ref().map_or(0.0, Scalar::to_f64),
            genre_names,
        }
    }
}

impl DetailRecord {
    /// Extract a detail record from a response body.
    ///
    /// Fails only if the body is not a JSON object. Individual fields
    /// degrade to their defaults.
    pub fn from_value(body: &Value) -> Result<Self, ApiError> {
        if !body.is_object() {
            return Err(ApiError::Parse("anime response is not a JSON object".into()));
        }
        AnimeWire::deserialize(body)
            .map(AnimeWire::into_detail_record)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_library_items() {
        let json = r#"[
            {
                "id": 9001,
                "episodes_watched": 12,
                "status": "currently-watching",
                "rating": { "type": "simple", "value": "3.5" },
                "anime": { "id": 1376, "title": "Sword Art Online" }
            },
            {
                "episodes_watched": 0,
                "status": "plan-to-watch",
                "rating": { "type": "simple", "value": null },
                "anime": { "id": "cowboy-bebop", "title": "Cowboy Bebop" }
            }
        ]"#;

        let body: Value = serde_json::from_str(json).unwrap();
        let records = library_records(body).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].remote_id, "1376");
        assert_eq!(records[0].status_code, "currently-watching");
        assert_eq!(records[0].episodes_watched_raw, "12");
        assert_eq!(records[0].user_rating_raw, "3.5");
        assert_eq!(records[0].fallback_title, "Sword Art Online");

        assert_eq!(records[1].remote_id, "cowboy-bebop");
        assert_eq!(records[1].user_rating_raw, "");
    }

    #[test]
    fn test_deserialize_library_item_missing_fields_default() {
        let body: Value = serde_json::from_str(r#"[{ "status": 3 }]"#).unwrap();
        let records = library_records(body).unwrap();
        assert_eq!(records, vec![RawLibraryRecord::default()]);
    }

    #[test]
    fn test_deserialize_library_item_wrong_shapes() {
        let json = r#"[
            {
                "status": "on-hold",
                "episodes_watched": [1, 2],
                "rating": "4",
                "anime": { "id": 7, "title": { "en": "Nested" } }
            },
            "not an object"
        ]"#;

        let body: Value = serde_json::from_str(json).unwrap();
        let records = library_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status_code, "on-hold");
        assert_eq!(records[0].remote_id, "7");
        assert_eq!(records[0].episodes_watched_raw, "");
        assert_eq!(records[0].user_rating_raw, "");
        assert_eq!(records[0].fallback_title, "");
        assert_eq!(records[1], RawLibraryRecord::default());
    }

    #[test]
    fn test_library_records_rejects_non_array() {
        let body: Value = serde_json::from_str(r#"{ "error": "Not found" }"#).unwrap();
        assert!(matches!(library_records(body), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_deserialize_anime_detail() {
        let json = r#"{
            "id": 1,
            "title": "Cowboy Bebop",
            "status": "Finished Airing",
            "episode_count": 26,
            "synopsis": "In the year 2071...",
            "show_type": "TV",
            "community_rating": 4.48,
            "genres": [{ "name": "Action" }, { "name": "Drama" }]
        }"#;

        let body: Value = serde_json::from_str(json).unwrap();
        let detail = DetailRecord::from_value(&body).unwrap();
        assert_eq!(detail.title, "Cowboy Bebop");
        assert_eq!(detail.airing_status, "Finished Airing");
        assert_eq!(detail.episode_count, "26");
        assert_eq!(detail.show_type, "TV");
        assert!((detail.community_rating - 4.48).abs() < f64::EPSILON);
        assert_eq!(detail.genre_names, vec!["Action", "Drama"]);
    }

    #[test]
    fn test_deserialize_anime_detail_defaults() {
        let json = r#"{
            "title": "Unknown Show",
            "episode_count": null,
            "community_rating": "n/a"
        }"#;

        let body: Value = serde_json::from_str(json).unwrap();
        let detail = DetailRecord::from_value(&body).unwrap();
        assert_eq!(detail.title, "Unknown Show");
        assert_eq!(detail.episode_count, "");
        assert_eq!(detail.community_rating, 0.0);
        assert!(detail.genre_names.is_empty());
    }

    #[test]
    fn test_deserialize_anime_rating_as_text() {
        let body: Value = serde_json::from_str(r#"{ "community_rating": "3.25" }"#).unwrap();
        let detail = DetailRecord::from_value(&body).unwrap();
        assert!((detail.community_rating - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_anime_malformed_genres() {
        let body: Value =
            serde_json::from_str(r#"{ "genres": [{ "name": "Mystery" }, 5, { "name": "Horror" }] }"#)
                .unwrap();
        let detail = DetailRecord::from_value(&body).unwrap();
        assert_eq!(detail.genre_names, vec!["Mystery", "Horror"]);

        let body: Value = serde_json::from_str(r#"{ "genres": "Comedy" }"#).unwrap();
        assert!(DetailRecord::from_value(&body).unwrap().genre_names.is_empty());
    }

    #[test]
    fn test_detail_record_rejects_non_object() {
        let body: Value = serde_json::from_str(r#"["not", "an", "object"]"#).unwrap();
        assert!(matches!(DetailRecord::from_value(&body), Err(ApiError::Parse(_))));
    }
}
