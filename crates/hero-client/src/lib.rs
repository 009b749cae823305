//! # hero-client -- Async client for the superhero search API
//!
//! Wraps `GET {base}/{token}/search/{name}` and hands replies to the
//! validator and error oracle in `hero-schema`.
//!
//! - [`SuperheroClient::search`] returns a validated
//!   [`HeroSearchResponse`](hero_core::HeroSearchResponse) or a typed error.
//! - The `search_raw*` methods return the undecided [`ApiReply`] so callers
//!   can exercise negative paths (bad tokens, odd names, missing segments).
//! - [`suite`] runs the contract scenario matrix against a client.
//!
//! The access token travels in the URL path. It is never logged, and
//! transport errors are stripped of their URL before they surface.

pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod search;
pub mod suite;

pub use config::{ConfigError, SuperheroConfig};
pub use error::ClientError;
pub use search::{build_search_url, ApiReply};
pub use suite::{
    run_scenario, run_scenarios, run_suite, select, Expectation, Scenario, ScenarioOutcome,
    SuiteReport, Target, SCENARIOS,
};

use std::time::Duration;

use hero_core::HeroSearchResponse;
use url::Url;
use zeroize::Zeroizing;

use crate::search::endpoint_label;

/// Superhero API client.
#[derive(Clone)]
pub struct SuperheroClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: Zeroizing<String>,
}

impl std::fmt::Debug for SuperheroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperheroClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl SuperheroClient {
    /// Create a client from configuration.
    pub fn new(config: SuperheroConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            access_token: config.access_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search by name and validate the reply.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the body is one of the known error shapes.
    /// - [`ClientError::Status`] for any other non-2xx reply.
    /// - [`ClientError::Validation`] when a success body breaks a field rule.
    pub async fn search(&self, name: &str) -> Result<HeroSearchResponse, ClientError> {
        let reply = self.search_raw(name).await?;
        let shape = reply.classify();
        if shape.is_known() {
            return Err(ClientError::Api {
                endpoint: endpoint_label(Some(name)),
                shape,
            });
        }
        if !reply.is_ok_status() {
            return Err(ClientError::Status {
                endpoint: endpoint_label(Some(name)),
                status: reply.status,
                body: reply.body.to_string(),
            });
        }
        let response = reply.validate()?;
        tracing::info!(name, results = response.results.len(), "search validated");
        Ok(response)
    }

    /// Search by name with the configured token. No interpretation.
    pub async fn search_raw(&self, name: &str) -> Result<ApiReply, ClientError> {
        self.get(&self.access_token, Some(name)).await
    }

    /// Search by name with an explicit token instead of the configured one.
    pub async fn search_raw_with_token(
        &self,
        token: &str,
        name: &str,
    ) -> Result<ApiReply, ClientError> {
        self.get(token, Some(name)).await
    }

    /// Search with the configured token where the name segment may be
    /// absent (`None` requests `.../search/`).
    pub async fn search_raw_segment(&self, name: Option<&str>) -> Result<ApiReply, ClientError> {
        self.get(&self.access_token, name).await
    }

    async fn get(&self, token: &str, name: Option<&str>) -> Result<ApiReply, ClientError> {
        let endpoint = endpoint_label(name);
        let url = build_search_url(&self.base_url, token, name)?;

        let resp = crate::retry::retry_send(|| self.http.get(url.clone()).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e.without_url(),
            })?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.clone(),
            source: e.without_url(),
        })?;

        let body = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => body,
            Err(_) if !(200..300).contains(&status) => {
                return Err(ClientError::Status {
                    endpoint,
                    status,
                    body: text,
                });
            }
            Err(source) => return Err(ClientError::Deserialization { endpoint, source }),
        };

        tracing::debug!(endpoint = %endpoint, status, "search reply received");
        Ok(ApiReply { status, body })
    }
}
