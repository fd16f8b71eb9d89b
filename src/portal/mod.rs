//! Minimal ArcGIS Online sharing REST client.
//!
//! Every call goes through `<portal>/sharing/rest/...` with `f=json`. The API
//! reports most failures as an `{"error": {...}}` body with HTTP 200, so each
//! response is checked for that shape before being decoded.

pub mod error;
pub mod item;
pub mod overwrite;

use std::time::Duration;

use reqwest::{multipart::Form, Client};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{debug, info};

pub use error::PortalError;
pub use item::{Item, ItemProperties};

pub const DEFAULT_PORTAL_URL: &str = "https://www.arcgis.com";

/// Token lifetime requested from `generateToken`, in minutes.
const TOKEN_EXPIRATION_MINUTES: &str = "60";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// How long to wait on asynchronous publish jobs.
#[derive(Debug, Clone, Copy)]
pub struct JobPolling {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for JobPolling {
    fn default() -> Self {
        JobPolling {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<String>,
}

impl ErrorBody {
    fn describe(&self) -> String {
        let details: Vec<&str> = self
            .details
            .iter()
            .map(String::as_str)
            .filter(|d| !d.is_empty())
            .collect();
        if details.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, details.join(" "))
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SuccessResponse {
    #[serde(default)]
    success: bool,
}

/// An authenticated portal session.
pub struct Portal {
    client: Client,
    base_url: String,
    token: String,
    polling: JobPolling,
}

impl Portal {
    /// Signs in with a username and password and keeps the issued token.
    pub async fn sign_in(
        client: Client,
        base_url: &str,
        credentials: &Credentials,
    ) -> Result<Self, PortalError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}/sharing/rest/generateToken", base_url);

        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("client", "referer"),
            ("referer", base_url.as_str()),
            ("expiration", TOKEN_EXPIRATION_MINUTES),
            ("f", "json"),
        ];
        let response = client.post(&url).form(&form).send().await?;
        let body: Value = response.error_for_status()?.json().await?;

        let token: TokenResponse = match api_error(&body) {
            Some(e) => return Err(PortalError::Auth(e.describe())),
            None => decode(body)?,
        };
        info!(user = %credentials.username, portal = %base_url, "signed in");

        Ok(Portal {
            client,
            base_url,
            token: token.token,
            polling: JobPolling::default(),
        })
    }

    pub fn with_polling(mut self, polling: JobPolling) -> Self {
        self.polling = polling;
        self
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/sharing/rest/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PortalError> {
        let url = self.rest_url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(&[("f", "json"), ("token", self.token.as_str())])
            .query(query)
            .send()
            .await?;

        checked(response.error_for_status()?.json().await?)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, PortalError> {
        let url = self.rest_url(path);
        debug!(%url, "POST");

        let mut fields = vec![("f", "json"), ("token", self.token.as_str())];
        fields.extend_from_slice(form);
        let response = self.client.post(&url).form(&fields).send().await?;

        checked(response.error_for_status()?.json().await?)
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, PortalError> {
        let url = self.rest_url(path);
        debug!(%url, "POST multipart");

        let form = form.text("f", "json").text("token", self.token.clone());
        let response = self.client.post(&url).multipart(form).send().await?;

        checked(response.error_for_status()?.json().await?)
    }

    /// Looks up an item by its ID.
    pub async fn item(&self, id: &str) -> Result<Item, PortalError> {
        match self.get(&format!("content/items/{}", id), &[]).await {
            Err(PortalError::Api { code, .. }) if matches!(code, 400 | 403 | 404) => {
                Err(PortalError::ItemNotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// Items related to `item` through the named relationship.
    pub async fn related_items(
        &self,
        item: &Item,
        relationship: &str,
        direction: &str,
    ) -> Result<Vec<Item>, PortalError> {
        let related: item::RelatedItems = self
            .get(
                &format!("content/items/{}/relatedItems", item.id),
                &[("relationshipType", relationship), ("direction", direction)],
            )
            .await?;

        Ok(related.related_items)
    }

    /// Updates the item's descriptive properties. Unset properties are left alone.
    pub async fn update_item(
        &self,
        item: &Item,
        properties: &ItemProperties,
    ) -> Result<(), PortalError> {
        let mut form = Vec::new();
        if let Some(snippet) = &properties.snippet {
            form.push(("snippet", snippet.as_str()));
        }
        if let Some(description) = &properties.description {
            form.push(("description", description.as_str()));
        }

        let path = format!("{}/items/{}/update", item.user_content_path(), item.id);
        let response: SuccessResponse = self.post(&path, &form).await?;

        if !response.success {
            return Err(PortalError::Update {
                item: item.id.clone(),
                message: "portal did not report success".to_string(),
            });
        }

        Ok(())
    }
}

fn api_error(body: &Value) -> Option<ErrorBody> {
    body.get("error")
        .and_then(|e| serde_json::from_value(e.clone()).ok())
}

fn checked<T: DeserializeOwned>(body: Value) -> Result<T, PortalError> {
    if let Some(e) = api_error(&body) {
        return Err(PortalError::Api {
            code: e.code,
            message: e.describe(),
        });
    }

    decode(body)
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, PortalError> {
    serde_json::from_value(body).map_err(|e| PortalError::Decode(e.to_string()))
}

// -- Tests -------------------------------------------------------------------
