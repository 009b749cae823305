//! # Wire Contract Check
//!
//! Validates raw search bodies against the JSON Schema (Draft 2020-12) in
//! `schemas/hero-search-response.schema.json`, which describes the shape the
//! API publishes: hyphenated keys, stats and `id` as integers or numeric
//! strings.
//!
//! Unlike [`crate::validate_hero_search_response`], which stops at the first
//! failure and builds typed records, the contract check reports every
//! violation with its JSON Pointer. It is a drift detector: when the API
//! renames or retypes a field, the report lists all affected paths at once.
//!
//! The schema is compiled once per [`ContractValidator`] and is embedded in
//! the crate, so no file or network access happens at check time.

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

const CONTRACT_SCHEMA: &str = include_str!("../schemas/hero-search-response.schema.json");

/// Error from the wire contract check.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The body departs from the contract at one or more places.
    #[error("body breaks the wire contract at {} place(s)", .drift.len())]
    Broken { drift: Vec<Drift> },

    /// The contract schema could not be parsed or compiled.
    #[error("contract schema is unusable: {0}")]
    Schema(String),
}

/// One place where a body departs from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    /// JSON Pointer into the body; empty for the body itself.
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.pointer.is_empty() { "(root)" } else { self.pointer.as_str() };
        write!(f, "{at}: {}", self.message)
    }
}

/// Compiled wire contract.
///
/// `ContractValidator` is `Send + Sync`; build it once and share it.
pub struct ContractValidator {
    validator: Validator,
}

impl fmt::Debug for ContractValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractValidator").finish_non_exhaustive()
    }
}

impl ContractValidator {
    /// Compile the embedded search-response schema.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Schema`] if the embedded text is not a
    /// valid Draft 2020-12 schema.
    pub fn new() -> Result<Self, ContractError> {
        Self::compile(CONTRACT_SCHEMA)
    }

    fn compile(text: &str) -> Result<Self, ContractError> {
        let schema: Value = serde_json::from_str(text)
            .map_err(|e| ContractError::Schema(format!("invalid JSON: {e}")))?;
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| ContractError::Schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Check a raw body against the contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Broken`] listing every departure.
    pub fn check(&self, body: &Value) -> Result<(), ContractError> {
        let drift: Vec<Drift> = self
            .validator
            .iter_errors(body)
            .map(|e| Drift {
                pointer: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if drift.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = drift.len(), "search body breaks the wire contract");
        Err(ContractError::Broken { drift })
    }

    /// True when the body satisfies the contract.
    pub fn is_valid(&self, body: &Value) -> bool {
        self.validator.is_valid(body)
    }
}
