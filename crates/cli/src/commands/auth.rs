use anyhow::Result;
use api::ApiClient;
use serde_json::Value;

use crate::config::ConfigStore;

/// Log in by username and persist the returned session token. The user id
/// from the response is copied into the config so later commands can use it
/// as the default.
pub async fn login(client: &ApiClient, store: &ConfigStore, username: &str) -> Result<()> {
    println!("Logging in...");
    let result = client.login_user(username).await?;

    match extract_token(&result) {
        Some(token) => store.store_session_token(token)?,
        None => log::warn!("login response for {username} carried no token"),
    }
    if let Some(user_id) = extract_user_id(&result) {
        let mut settings = store.load();
        settings.user_id = Some(user_id.to_owned());
        store.save(&settings)?;
    }

    println!("Logged in as {username}.");
    Ok(())
}

/// Remove the stored session token, if any.
pub fn logout(store: &ConfigStore) -> Result<()> {
    store.clear_session_token()?;
    println!("Logged out.");
    Ok(())
}

/// Backends have used both a flat and a nested token shape.
fn extract_token(payload: &Value) -> Option<&str> {
    payload
        .get("token")
        .or_else(|| payload.pointer("/session/token"))
        .and_then(Value::as_str)
}

fn extract_user_id(payload: &Value) -> Option<&str> {
    payload
        .pointer("/user/id")
        .or_else(|| payload.get("userId"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_is_found_flat_or_nested() {
        assert_eq!(extract_token(&json!({"token": "abc"})), Some("abc"));
        assert_eq!(
            extract_token(&json!({"session": {"token": "xyz"}})),
            Some("xyz")
        );
        assert_eq!(extract_token(&json!({"ok": true})), None);
    }

    #[test]
    fn user_id_is_found_flat_or_nested() {
        assert_eq!(
            extract_user_id(&json!({"user": {"id": "user-1"}})),
            Some("user-1")
        );
        assert_eq!(extract_user_id(&json!({"userId": "user-2"})), Some("user-2"));
        assert_eq!(extract_user_id(&json!({"token": "abc"})), None);
    }
}
