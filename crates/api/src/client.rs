use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;

/// HTTP client for the study backend.
///
/// Joins endpoint paths onto the configured base URL, attaches the bearer
/// token when the user is logged in, and normalizes failures into
/// [`ApiError`]. All endpoint methods live in `study` (session operations)
/// and `catalog` (content CRUD); this file is transport only.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        // A base without a trailing slash would make Url::join replace the
        // last path segment instead of appending to it.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;

        Ok(Self {
            http: Client::new(),
            base_url,
            token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?;
        Self::execute(builder, path).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?.query(query);
        Self::execute(builder, path).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        Self::execute(builder, path).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path)?;
        Self::execute(builder, path).await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path)?.json(body);
        Self::execute(builder, path).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path)?;
        Self::execute(builder, path).await
    }

    /// Send, check the status, and drop the body. For acknowledgement-style
    /// endpoints whose response carries nothing the client reads.
    pub(crate) async fn post_ack(&self, path: &str, body: &impl Serialize) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        log::debug!("POST {path}");
        let response = builder.send().await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        log::debug!("request {path}");
        let response = builder.send().await?;
        let response = Self::check_status(path, response).await?;
        let text = response.text().await?;
        log::debug!("response {path}: {text}");
        let body: T = serde_json::from_str(&text)?;
        Ok(body)
    }

    async fn check_status(path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.ok();
        log::debug!("response {path}: {status}");
        Err(ApiError::Status {
            status,
            message: status_message(status, body.as_deref()),
        })
    }
}

/// Prefer the server's own `{"error": "..."}` body over a generic line.
fn status_message(status: reqwest::StatusCode, body: Option<&str>) -> String {
    body.and_then(|text| serde_json::from_str::<Value>(text).ok())
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("request failed with status {status}"))
}
