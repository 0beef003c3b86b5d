use anyhow::Result;
use api::{ApiClient, NewUser};
use services::Prompter;
use study_core::UserId;

use crate::prompt::StdinPrompter;
use crate::render;

/// Create a user. Optional fields fall back to interactive prompts, and an
/// empty reply leaves the field blank.
pub async fn create(
    client: &ApiClient,
    username: &str,
    guest: bool,
    email: Option<String>,
    password: Option<String>,
    avatar: Option<String>,
    json: bool,
) -> Result<()> {
    let mut prompter = StdinPrompter::stdio();
    let email = match email {
        Some(value) => value,
        None => prompter.prompt("Email (optional):")?,
    };
    let password = match password {
        Some(value) => value,
        None => prompter.prompt("Password (optional):")?,
    };
    let avatar = match avatar {
        Some(value) => value,
        None => prompter.prompt("Avatar URL (optional):")?,
    };

    let user = NewUser {
        username,
        guest,
        email: &email,
        password: &password,
        avatar: &avatar,
    };
    let result = client.create_user(&user).await?;
    render::print_record(&result, json)
}

/// Simulated login that does not touch the stored credentials.
pub async fn login(client: &ApiClient, username: &str) -> Result<()> {
    let result = client.login_user(username).await?;
    render::print_record(&result, false)
}

pub async fn progress(client: &ApiClient, user_id: &str, json: bool) -> Result<()> {
    let result = client.user_progress(&UserId::new(user_id)).await?;
    render::print_record(&result, json)
}

pub async fn reset(client: &ApiClient, user_id: &str) -> Result<()> {
    let result = client.reset_user(&UserId::new(user_id)).await?;
    render::print_record(&result, false)
}
