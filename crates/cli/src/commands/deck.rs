use anyhow::{Result, anyhow};
use api::{ApiClient, DeckBundle};
use serde_json::json;
use study_core::{DeckId, UserId};

use crate::config::Settings;
use crate::render;

pub async fn list(client: &ApiClient, json: bool) -> Result<()> {
    let decks = client.list_decks().await?;
    render::print_items(&decks, json)
}

/// Generate a deck from a chapter. The owning user comes from the config.
pub async fn create(
    client: &ApiClient,
    settings: &Settings,
    series: &str,
    chapter: u32,
    max_length: Option<u32>,
    json: bool,
) -> Result<()> {
    let user_id = settings
        .user_id
        .as_deref()
        .ok_or_else(|| anyhow!("No userId found in config. Please login or set userId."))?;

    let bundle = client
        .create_deck(series, chapter, &UserId::new(user_id), max_length)
        .await?;
    print_bundle(&bundle, json)
}

pub async fn preview(client: &ApiClient, deck_id: &str, json: bool) -> Result<()> {
    let bundle = client.preview_deck(&DeckId::new(deck_id)).await?;
    print_bundle(&bundle, json)
}

pub async fn due(client: &ApiClient, deck_id: &str, json: bool) -> Result<()> {
    let due = client.due_cards(&DeckId::new(deck_id)).await?;
    render::print_items(&due, json)
}

pub async fn feature(
    client: &ApiClient,
    deck_id: &str,
    badge: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = client.feature_deck(&DeckId::new(deck_id), badge).await?;
    render::print_record(&result, json)
}

/// The deck row followed by its card rows, in one table.
fn print_bundle(bundle: &DeckBundle, json: bool) -> Result<()> {
    if json {
        return render::print_json(&json!({
            "deck": bundle.deck,
            "cards": bundle.cards,
        }));
    }

    let mut rows = Vec::with_capacity(bundle.cards.len() + 1);
    if let Some(deck) = &bundle.deck {
        rows.push(serde_json::to_value(deck)?);
    }
    for card in &bundle.cards {
        rows.push(serde_json::to_value(card)?);
    }
    render::print_table(&rows);
    Ok(())
}
