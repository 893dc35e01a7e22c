//! HTTP client for the BDS status API

use super::error::{FetchError, FetchResult};
use super::types::{PlayerList, PlayerRecord, ServerStatus};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the status API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL, e.g. `http://127.0.0.1:8080`
    pub base_url: String,
    /// Sent as the `token` query parameter when set
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the three read endpoints; one request per call, never retried
#[derive(Debug, Clone)]
pub struct BdsClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl BdsClient {
    pub fn new(settings: ApiSettings) -> FetchResult<Self> {
        let base = settings.base_url.trim();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(FetchError::Configuration {
                message: format!(
                    "API URL must start with http:// or https://, got '{}'",
                    settings.base_url
                ),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("bdsquery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Configuration {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { http, settings })
    }

    /// `GET /player?name=<name>`; a `null` body means no such player
    pub async fn fetch_player(&self, name: &str) -> FetchResult<Option<PlayerRecord>> {
        self.get_json("player", &[("name", name)]).await
    }

    /// `GET /status`
    pub async fn fetch_status(&self) -> FetchResult<ServerStatus> {
        self.get_json("status", &[]).await
    }

    /// `GET /players`
    pub async fn fetch_player_list(&self) -> FetchResult<PlayerList> {
        self.get_json("players", &[]).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim().trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> FetchResult<T> {
        let url = self.endpoint(path);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(token) = self.settings.token.as_deref() {
            query.push(("token", token));
        }

        log::debug!("GET {} ({} query parameters)", url, query.len());
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(&url, e))?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.settings.timeout.as_secs(),
            }
        } else {
            // the request URL carries the token in its query string
            FetchError::Network {
                url: url.to_string(),
                source: error.without_url(),
            }
        }
    }
}
