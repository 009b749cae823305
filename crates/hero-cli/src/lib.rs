//! # hero-cli: Superhero Search Contract CLI
//!
//! Provides the `hero` command-line interface over the validator, the
//! error oracle, and the search client.
//!
//! ## Subcommands
//!
//! - `hero search <NAME>`: Live search, validated.
//! - `hero check <FILE>`: Validate a saved response body offline.
//! - `hero classify <FILE>`: Run the error oracle over a saved body.
//! - `hero suite`: Run the contract scenario matrix.
//!
//! ```bash
//! hero search "Black Panther"
//! hero check captured/batman.json --all
//! hero suite --report-dir reports
//! ```
//!
//! Handlers return the process exit code: `0` on success, `1` when the
//! checked thing failed. Errors that stop a handler from running at all
//! propagate as `anyhow::Error`.

pub mod check;
pub mod classify;
pub mod search;
pub mod suite;

use std::path::Path;

use anyhow::{Context, Result};
use hero_client::{SuperheroClient, SuperheroConfig};
use serde_json::Value;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Build a client from `ACCESS_TOKEN` and friends.
pub fn client_from_env() -> Result<SuperheroClient> {
    let config = SuperheroConfig::from_env().context("superhero API configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(SuperheroClient::new(config)?)
}
