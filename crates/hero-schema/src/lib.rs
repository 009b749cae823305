//! # hero-schema: Search Response Validation
//!
//! Turns untyped JSON bodies from the superhero search endpoint into the
//! typed records of `hero-core`, or rejects them with a field-level error.
//!
//! ## Validator (`rules` + `engine`)
//!
//! Field shapes, wire aliases, and per-field constraints live in
//! declarative tables ([`rules`]). A generic engine ([`engine`]) walks
//! those tables. Key functions:
//!
//! - [`validate_hero_search_response`]: fail-fast validation of a whole
//!   search body.
//! - [`validate_hero`]: the same for a single hero object.
//! - [`collect_violations`]: every violation in a body, for diagnostics.
//!
//! ## Oracle (`oracle`)
//!
//! [`classify_error`] maps a failure body to one of the known
//! [`ErrorShape`]s, or `Unrecognized`. It never fails.
//!
//! ## Wire Contract (`contract`)
//!
//! [`ContractValidator`] checks a raw body against the embedded JSON
//! Schema of the published wire shape.
//!
//! ## Crate Policy
//!
//! - Depends only on `hero-core` internally.
//! - Validation is pure: no I/O, no shared mutable state.
//! - Nothing is defaulted or repaired; a body either passes every rule or
//!   is rejected.

pub mod contract;
pub mod engine;
pub mod oracle;
pub mod rules;

pub use contract::{ContractError, ContractValidator, Drift};
pub use oracle::{classify_error, is_access_denied, is_not_found_error, ErrorShape};

use hero_core::{Hero, HeroSearchResponse, ValidationError};
use serde_json::Value;

/// Validate a search body and build the typed response.
///
/// Leaf records are checked first, then each hero, then the top-level
/// fields. The first violation aborts the parse.
///
/// # Errors
///
/// Returns the first [`ValidationError`], carrying the offending field path
/// (e.g. `results[2].appearance.gender`).
pub fn validate_hero_search_response(body: &Value) -> Result<HeroSearchResponse, ValidationError> {
    engine::assemble(&rules::SEARCH_RESPONSE, body).map_err(|err| {
        tracing::debug!(path = %err.path(), "search response rejected: {err}");
        err
    })
}

/// Validate a single hero object. Paths are rooted at the hero.
pub fn validate_hero(body: &Value) -> Result<Hero, ValidationError> {
    engine::assemble(&rules::HERO, body)
}

/// Every violation in a search body, in evaluation order.
///
/// Returns an empty list when the body is valid.
pub fn collect_violations(body: &Value) -> Vec<ValidationError> {
    match engine::normalize(&rules::SEARCH_RESPONSE, body, engine::Mode::Exhaustive) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    }
}
