//! HTTP client for the knowledge-management backend.
//!
//! Thin wrapper over the backend's search and health endpoints. Transient
//! failures (HTTP 429, 5xx, network errors) are retried with exponential
//! backoff; other client errors fail immediately.
//!
//! # Retry Strategy
//!
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::{HealthStatus, SearchResponse};

/// Client for the backend's JSON API.
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl SearchClient {
    /// Build a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Query the full-text-search endpoint.
    ///
    /// `scope` narrows results to one entity type (`topics`, `messages`,
    /// `atoms`); `None` or `all` searches everything. Snippets in the
    /// response are raw `<mark>`-delimited text.
    pub async fn search(
        &self,
        query: &str,
        scope: Option<&str>,
        limit: Option<i64>,
    ) -> Result<SearchResponse> {
        let mut params: Vec<(&str, String)> = vec![("q", query.to_string())];
        if let Some(scope) = scope.filter(|s| *s != "all") {
            params.push(("scope", scope.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let url = format!("{}/api/search", self.base_url);
        self.get_json(&url, &params).await
    }

    /// Query the backend health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/api/health", self.base_url);
        self.get_json(&url, &[]).await
    }

    /// GET a JSON resource with retry/backoff.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, 8s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self.http.get(url).query(params).send().await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response.json().await?);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err =
                            Some(anyhow::anyhow!("Backend error {}: {}", status, body_text));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("Backend error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Request failed after retries")))
    }
}
