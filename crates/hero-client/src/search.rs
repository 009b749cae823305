//! Search endpoint request building and replies.
//!
//! The only endpoint is `GET {base}/{token}/search/{name}`. The API answers
//! `200 OK` for failures too, so a reply is kept as status plus decoded
//! body and interpreted afterwards, either by the validator or by the
//! error oracle.

use hero_core::{HeroSearchResponse, ValidationError};
use hero_schema::{classify_error, validate_hero_search_response, ErrorShape};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ConfigError;

/// Build `{base}/{token}/search/{name}`.
///
/// `token` and `name` are each encoded as a single path segment, so `/`,
/// `?`, `#` and non-ASCII text in a name never change the URL structure.
/// A `None` name ends the path at `search/`.
pub fn build_search_url(base: &Url, token: &str, name: Option<&str>) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            ConfigError::InvalidUrl(base.to_string(), "URL cannot carry path segments".to_string())
        })?
        .pop_if_empty()
        .push(token)
        .push("search")
        .push(name.unwrap_or(""));
    Ok(url)
}

/// Token-free label for a search request, used in logs and errors.
pub(crate) fn endpoint_label(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("GET /search/{name}"),
        None => "GET /search/".to_string(),
    }
}

/// Status and decoded JSON body of one search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn is_ok_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Classify the body against the known error shapes.
    pub fn classify(&self) -> ErrorShape {
        classify_error(&self.body)
    }

    /// Validate the body as a search response.
    pub fn validate(&self) -> Result<HeroSearchResponse, ValidationError> {
        validate_hero_search_response(&self.body)
    }

    /// Names under `results`, read without validation.
    pub fn result_names(&self) -> Vec<&str> {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(|heroes| {
                heroes
                    .iter()
                    .filter_map(|h| h.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True when the body has a `results` array and some hero name contains
    /// `needle`, case-insensitively.
    pub fn any_name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.result_names()
            .iter()
            .any(|name| name.to_lowercase().contains(&needle))
    }
}
