use anyhow::Result;
use api::ApiClient;

use crate::render;

pub async fn list(client: &ApiClient, json: bool) -> Result<()> {
    let series = client.list_series().await?;
    render::print_items(&series, json)
}

pub async fn create(client: &ApiClient, title: &str, json: bool) -> Result<()> {
    let result = client.create_series(title).await?;
    render::print_enveloped(&result, "series", json)
}

pub async fn search(client: &ApiClient, query: &str, json: bool) -> Result<()> {
    let result = client.search_series(query).await?;
    render::print_enveloped(&result, "series", json)
}
