use std::sync::Arc;

use anyhow::Result;
use api::{ApiClient, StudyBackend};
use services::{Prompter, SessionLoopService};
use study_core::{DeckId, UserId};

use crate::prompt::StdinPrompter;
use crate::render;

/// Run one interactive review session for a deck.
pub async fn start(
    client: ApiClient,
    deck_id: String,
    user: Option<String>,
    debug: bool,
) -> Result<()> {
    let mut prompter = StdinPrompter::stdio();
    let user_id = match user {
        Some(value) => value,
        None => prompter.prompt("Enter your user ID:")?,
    };

    let backend: Arc<dyn StudyBackend> = Arc::new(client);
    let service = SessionLoopService::new(backend).with_debug(debug);
    let report = service
        .run(&mut prompter, &UserId::new(user_id), &DeckId::new(deck_id))
        .await?;

    render::print_summary(&report.summary);
    Ok(())
}
