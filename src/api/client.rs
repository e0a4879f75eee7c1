//! HTTP client for the playground API.
//!
//! `PlaygroundApi` is the seam the store's effect handler talks to. The
//! reqwest-backed `HttpApi` is the real thing; tests swap in fakes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use super::types::{
    Playground, PlaygroundDraft, PlaygroundEnvelope, PlaygroundList, SavePlaygroundRequest,
};

/// Errors that can occur while talking to the playground API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[async_trait]
pub trait PlaygroundApi: Send + Sync {
    /// `GET /api/playgrounds`
    async fn list(&self) -> Result<Vec<Playground>, ApiError>;

    /// `GET /api/playgrounds/:id`
    async fn fetch(&self, id: &str) -> Result<PlaygroundEnvelope, ApiError>;

    /// `POST /api/playgrounds`
    async fn create(&self, draft: &PlaygroundDraft) -> Result<PlaygroundEnvelope, ApiError>;

    /// `PUT /api/playgrounds/:id`
    async fn update(
        &self,
        id: &str,
        draft: &PlaygroundDraft,
    ) -> Result<PlaygroundEnvelope, ApiError>;
}

/// reqwest-backed implementation of [`PlaygroundApi`].
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// `base_url` is the server root (e.g. `http://localhost:9292`); the
    /// `/api/playgrounds` paths are appended to it.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/playgrounds{}", self.base_url, path)
    }
}

/// Turns a response into `T`, mapping non-2xx statuses to `ApiError::Api`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl PlaygroundApi for HttpApi {
    async fn list(&self) -> Result<Vec<Playground>, ApiError> {
        let url = self.url("");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let list: PlaygroundList = decode(response).await?;
        Ok(list.playgrounds)
    }

    async fn fetch(&self, id: &str) -> Result<PlaygroundEnvelope, ApiError> {
        let url = self.url(&format!("/{id}"));
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn create(&self, draft: &PlaygroundDraft) -> Result<PlaygroundEnvelope, ApiError> {
        let url = self.url("");
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&SavePlaygroundRequest { playground: draft })
            .send()
            .await?;
        decode(response).await
    }

    async fn update(
        &self,
        id: &str,
        draft: &PlaygroundDraft,
    ) -> Result<PlaygroundEnvelope, ApiError> {
        let url = self.url(&format!("/{id}"));
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(&SavePlaygroundRequest { playground: draft })
            .send()
            .await?;
        decode(response).await
    }
}
