//! Content-catalog endpoints: series, chapters, cards, decks, users, and the
//! dev utilities. All of these are parameter-passing wrappers; the backend
//! owns the records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use study_core::{CardId, CatalogCard, Chapter, ChapterId, Deck, DeckId, Series, SeriesId, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

/// A deck together with its cards, as returned by create and preview.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckBundle {
    #[serde(default)]
    pub deck: Option<Deck>,
    #[serde(default)]
    pub cards: Vec<CatalogCard>,
}

impl ApiClient {
    // ─── Series ────────────────────────────────────────────────────────────

    /// List every series in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn list_series(&self) -> Result<Vec<Series>, ApiError> {
        let response: SeriesListResponse = self.get("supabase/series").await?;
        Ok(response.series)
    }

    /// Create a series by title. The backend derives the rest.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_series(&self, title: &str) -> Result<Value, ApiError> {
        self.post("supabase/series", &CreateSeriesRequest { name: title })
            .await
    }

    /// Search series by title substring.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn search_series(&self, query: &str) -> Result<Value, ApiError> {
        self.get_with_query("supabase/series/search", &[("query", query)])
            .await
    }

    // ─── Chapters ──────────────────────────────────────────────────────────

    /// Add a chapter to a series, identified by name and number.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_chapter(&self, series_name: &str, number: u32) -> Result<Value, ApiError> {
        let payload = AddChapterRequest {
            series_name,
            chapter_number: number,
            words: Vec::new(),
        };
        self.post("supabase/chapters", &payload).await
    }

    /// List the chapters of a series.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn list_chapters(&self, series_id: &SeriesId) -> Result<Vec<Chapter>, ApiError> {
        let response: ChapterListResponse = self
            .get(&format!("supabase/series/{series_id}/chapters"))
            .await?;
        Ok(response.chapters)
    }

    // ─── Cards ─────────────────────────────────────────────────────────────

    /// Add a vocabulary card to a chapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_card(
        &self,
        chapter_id: &ChapterId,
        word: &str,
        definition: &str,
    ) -> Result<Value, ApiError> {
        let payload = CardFieldsRequest {
            word: Some(word),
            definition: Some(definition),
        };
        self.post(&format!("supabase/chapters/{chapter_id}/cards"), &payload)
            .await
    }

    /// Change a card's word and/or definition. Absent fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn edit_card(
        &self,
        card_id: &CardId,
        word: Option<&str>,
        definition: Option<&str>,
    ) -> Result<Value, ApiError> {
        let payload = CardFieldsRequest { word, definition };
        self.patch(&format!("supabase/cards/{card_id}"), &payload)
            .await
    }

    /// Remove a card.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_card(&self, card_id: &CardId) -> Result<Value, ApiError> {
        self.delete(&format!("supabase/cards/{card_id}")).await
    }

    /// List the cards of a chapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn list_cards(&self, chapter_id: &ChapterId) -> Result<Vec<CatalogCard>, ApiError> {
        let response: CardListResponse = self
            .get(&format!("supabase/chapters/{chapter_id}/cards"))
            .await?;
        Ok(response.cards)
    }

    // ─── Decks ─────────────────────────────────────────────────────────────

    /// List every available deck.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn list_decks(&self) -> Result<Vec<Deck>, ApiError> {
        let response: DeckListResponse = self.get("supabase/decks").await?;
        Ok(response.decks)
    }

    /// Generate a deck from a chapter for the given user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn create_deck(
        &self,
        series_name: &str,
        chapter_number: u32,
        user_id: &UserId,
        max_length: Option<u32>,
    ) -> Result<DeckBundle, ApiError> {
        let payload = CreateDeckRequest {
            series_name,
            chapter_number,
            user_id,
            max_length,
        };
        self.post("supabase/decks", &payload).await
    }

    /// Fetch a deck and its cards for display.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn preview_deck(&self, deck_id: &DeckId) -> Result<DeckBundle, ApiError> {
        self.get(&format!("supabase/decks/{deck_id}/preview")).await
    }

    /// Cards currently due or overdue in a deck, with scheduling columns.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request or decoding fails.
    pub async fn due_cards(&self, deck_id: &DeckId) -> Result<Vec<Value>, ApiError> {
        let response: DueListResponse = self.get(&format!("supabase/decks/{deck_id}/due")).await?;
        Ok(response.due)
    }

    /// Apply a quality badge to a deck.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn feature_deck(
        &self,
        deck_id: &DeckId,
        badge: Option<&str>,
    ) -> Result<Value, ApiError> {
        let payload = FeatureDeckRequest { badge };
        self.post(&format!("supabase/decks/{deck_id}/feature"), &payload)
            .await
    }

    // ─── Users ─────────────────────────────────────────────────────────────

    /// Create an account. Empty optional fields are sent as empty strings,
    /// which the backend treats as unset.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_user(&self, user: &NewUser<'_>) -> Result<Value, ApiError> {
        self.post("users", user).await
    }

    /// Log in by username, returning the backend's session payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn login_user(&self, username: &str) -> Result<Value, ApiError> {
        self.post("users/login", &LoginRequest { username }).await
    }

    /// A user's study history and streak data.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn user_progress(&self, user_id: &UserId) -> Result<Value, ApiError> {
        self.get(&format!("users/{user_id}/progress")).await
    }

    /// Wipe a user's progress.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn reset_user(&self, user_id: &UserId) -> Result<Value, ApiError> {
        self.post_empty(&format!("users/{user_id}/reset")).await
    }

    // ─── Dev Utilities ─────────────────────────────────────────────────────

    /// Seed the backend with sample users, series, and decks.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn dev_seed(&self) -> Result<Value, ApiError> {
        self.post_empty("dev/seed").await
    }

    /// Wipe all content and reseed clean.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn dev_reset(&self) -> Result<Value, ApiError> {
        self.post_empty("dev/reset").await
    }

    /// Export the current content set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn dev_export(&self) -> Result<Value, ApiError> {
        self.get("dev/export").await
    }

    /// Ask the backend to watch its upload area for new decks.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn dev_watch(&self) -> Result<Value, ApiError> {
        self.post_empty("dev/watch").await
    }

    /// Lock a chapter until its prerequisites are met.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn lock_chapter(&self, series_id: &SeriesId, number: u32) -> Result<Value, ApiError> {
        self.post_empty(&format!("supabase/series/{series_id}/chapters/{number}/lock"))
            .await
    }

    /// Force-unlock a chapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn unlock_chapter(
        &self,
        series_id: &SeriesId,
        number: u32,
    ) -> Result<Value, ApiError> {
        self.post_empty(&format!(
            "supabase/series/{series_id}/chapters/{number}/unlock"
        ))
        .await
    }
}

/// Fields for `create_user`, borrowed from the command layer.
#[derive(Debug, Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub guest: bool,
    pub email: &'a str,
    pub password: &'a str,
    pub avatar: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateSeriesRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddChapterRequest<'a> {
    series_name: &'a str,
    chapter_number: u32,
    words: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CardFieldsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    word: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDeckRequest<'a> {
    series_name: &'a str,
    chapter_number: u32,
    user_id: &'a UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
}

#[derive(Debug, Serialize)]
struct FeatureDeckRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct SeriesListResponse {
    #[serde(default)]
    series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct ChapterListResponse {
    #[serde(default)]
    chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
struct CardListResponse {
    #[serde(default)]
    cards: Vec<CatalogCard>,
}

#[derive(Debug, Deserialize)]
struct DeckListResponse {
    #[serde(default)]
    decks: Vec<Deck>,
}

#[derive(Debug, Deserialize)]
struct DueListResponse {
    #[serde(default)]
    due: Vec<Value>,
}
