use std::env;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::repository::RemoteError;

mod catalog_repo;
mod experience_repo;
mod mapping;
mod progress_repo;
mod session_repo;

/// Connection settings for the hosted backend.
///
/// `api_key` is the project's public key, sent on every request. The
/// session's access token, when present, identifies the signed-in user and
/// is what row-level permissions key on.
#[derive(Clone, Debug)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: String,
    pub access_token: Option<String>,
}

impl RestConfig {
    /// Read the connection settings from `PREPDECK_API_URL` and
    /// `PREPDECK_API_KEY`. Returns `None` when either is unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("PREPDECK_API_URL").ok()?;
        let api_key = env::var("PREPDECK_API_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            base_url,
            api_key,
            access_token: None,
        })
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RestInitError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Backend client implementing the repository contracts over the hosted
/// store's REST protocol (row reads as filtered GETs, writes as POSTs with
/// merge-on-conflict semantics).
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestStore {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError` if the base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn new(config: RestConfig) -> Result<Self, RestInitError> {
        Url::parse(&config.base_url)?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key,
            access_token: config.access_token,
        })
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    pub(crate) fn auth_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    pub(crate) fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        req.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    /// GET rows from a table with the given filter pairs.
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, RemoteError> {
        let url = self.table_url(table);
        debug!(table, "reading rows");
        let response = self
            .authed(self.client.get(&url))
            .query(filters)
            .send()
            .await
            .map_err(connection)?;
        let response = check_status(table, response)?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| RemoteError::Serialization(e.to_string()))
    }

    /// POST a row with merge-on-conflict semantics, ignoring the response
    /// body. Used for progress upserts where the caller re-reads afterwards.
    pub(crate) async fn upsert_row<B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<(), RemoteError> {
        let url = self.table_url(table);
        debug!(table, "upserting row");
        let response = self
            .authed(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(body)
            .send()
            .await
            .map_err(connection)?;
        check_status(table, response)?;
        Ok(())
    }

    /// POST a new row and return the stored representation.
    pub(crate) async fn insert_row<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.table_url(table);
        debug!(table, "inserting row");
        let response = self
            .authed(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(connection)?;
        let response = check_status(table, response)?;
        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| RemoteError::Serialization(e.to_string()))?;
        rows.pop().ok_or(RemoteError::NotFound)
    }
}

fn connection(err: reqwest::Error) -> RemoteError {
    RemoteError::Connection(err.to_string())
}

fn check_status(table: &str, response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(table, status = %status, "remote call failed");
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RemoteError::Unauthorized);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound);
    }
    Err(RemoteError::Status(status.as_u16()))
}
