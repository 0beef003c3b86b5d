use anyhow::Result;
use api::ApiClient;
use study_core::SeriesId;

use crate::render;

pub async fn add(client: &ApiClient, series_name: &str, number: u32, json: bool) -> Result<()> {
    let result = client.add_chapter(series_name, number).await?;
    render::print_enveloped(&result, "chapter", json)
}

pub async fn list(client: &ApiClient, series_id: &str, json: bool) -> Result<()> {
    let chapters = client.list_chapters(&SeriesId::new(series_id)).await?;
    render::print_items(&chapters, json)
}
