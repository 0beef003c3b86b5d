use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::ids::{CardId, ChapterId, DeckId, SeriesId, UserId};

//
// ─── CATALOG RECORDS ───────────────────────────────────────────────────────────
//
// Read models for the backend's content catalog. These exist for listing and
// inspection commands; the backend owns the records and their lifecycle. Any
// column this client does not know about is carried in `extra` so listings
// show whatever the server decides to return.
//

/// A webtoon series vocabulary is extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One chapter of a series, the unit cards are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub series_id: SeriesId,
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, rename = "private", skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub unlocked: bool,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A vocabulary card as stored in the catalog (not yet scheduled for review).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCard {
    pub id: CardId,
    pub chapter_id: ChapterId,
    pub word: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romanization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A study deck generated from a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An account on the backend, real or guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<bool>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_keeps_unknown_columns() {
        let json = r#"{
            "id": "series-1",
            "title": "Tower of God",
            "createdAt": "2024-05-01T12:00:00Z",
            "slug": "tower-of-god"
        }"#;
        let series: Series = serde_json::from_str(json).unwrap();
        assert_eq!(series.title, "Tower of God");
        assert_eq!(series.extra["slug"], Value::from("tower-of-god"));
    }

    #[test]
    fn absent_optionals_are_skipped_on_output() {
        let json = r#"{
            "id": "card-1",
            "chapterId": "chapter-1",
            "word": "나무",
            "definition": "tree",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let card: CatalogCard = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&card).unwrap();
        assert!(out.get("romanization").is_none());
        assert_eq!(out["word"], Value::from("나무"));
    }

    #[test]
    fn chapter_maps_the_private_flag() {
        let json = r#"{
            "id": "chapter-1",
            "seriesId": "series-1",
            "number": 3,
            "private": true,
            "unlocked": false,
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.is_private, Some(true));
        assert!(!chapter.unlocked);
        assert_eq!(chapter.number, 3);
    }
}
