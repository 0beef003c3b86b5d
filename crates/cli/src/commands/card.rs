use anyhow::Result;
use api::ApiClient;
use services::Prompter;
use study_core::{CardId, ChapterId};

use crate::prompt::StdinPrompter;
use crate::render;

/// Add a card to a chapter, prompting for whichever fields were not passed
/// as flags.
pub async fn add(
    client: &ApiClient,
    chapter_id: &str,
    word: Option<String>,
    definition: Option<String>,
    json: bool,
) -> Result<()> {
    let mut prompter = StdinPrompter::stdio();
    let word = match word {
        Some(value) => value,
        None => prompter.prompt("Word:")?,
    };
    let definition = match definition {
        Some(value) => value,
        None => prompter.prompt("Definition:")?,
    };

    let result = client
        .add_card(&ChapterId::new(chapter_id), &word, &definition)
        .await?;
    render::print_record(&result, json)
}

pub async fn edit(
    client: &ApiClient,
    card_id: &str,
    word: Option<&str>,
    definition: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = client
        .edit_card(&CardId::new(card_id), word, definition)
        .await?;
    render::print_record(&result, json)
}

pub async fn delete(client: &ApiClient, card_id: &str) -> Result<()> {
    let result = client.delete_card(&CardId::new(card_id)).await?;
    render::print_record(&result, false)
}

pub async fn list(client: &ApiClient, chapter_id: &str, json: bool) -> Result<()> {
    let cards = client.list_cards(&ChapterId::new(chapter_id)).await?;
    render::print_items(&cards, json)
}
