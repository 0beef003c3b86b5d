use anyhow::{Result, bail};
use api::ApiClient;
use study_core::SeriesId;

use crate::render;

/// The seeding and export commands touch shared backend state, so each one
/// demands an explicit opt-in flag.
fn ensure_allowed(allow_dev: bool) -> Result<()> {
    if !allow_dev {
        bail!("You must pass --allow-dev to run this command.");
    }
    Ok(())
}

pub async fn seed(client: &ApiClient, allow_dev: bool) -> Result<()> {
    ensure_allowed(allow_dev)?;
    let result = client.dev_seed().await?;
    render::print_record(&result, false)
}

pub async fn reset(client: &ApiClient, allow_dev: bool) -> Result<()> {
    ensure_allowed(allow_dev)?;
    let result = client.dev_reset().await?;
    render::print_record(&result, false)
}

pub async fn export(client: &ApiClient, allow_dev: bool) -> Result<()> {
    ensure_allowed(allow_dev)?;
    let result = client.dev_export().await?;
    render::print_record(&result, false)
}

pub async fn watch(client: &ApiClient, allow_dev: bool) -> Result<()> {
    ensure_allowed(allow_dev)?;
    let result = client.dev_watch().await?;
    render::print_record(&result, false)
}

pub async fn lock_chapter(client: &ApiClient, series_id: &str, number: u32) -> Result<()> {
    let result = client
        .lock_chapter(&SeriesId::new(series_id), number)
        .await?;
    render::print_record(&result, false)
}

pub async fn unlock_chapter(client: &ApiClient, series_id: &str, number: u32) -> Result<()> {
    let result = client
        .unlock_chapter(&SeriesId::new(series_id), number)
        .await?;
    render::print_record(&result, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_commands_refuse_to_run_without_the_flag() {
        let err = ensure_allowed(false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must pass --allow-dev to run this command."
        );
        assert!(ensure_allowed(true).is_ok());
    }
}
