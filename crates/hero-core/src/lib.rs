//! # hero-core: Typed Records for Superhero Search
//!
//! This crate defines the value types produced by validating a superhero
//! search response, plus the error taxonomy the validator reports. Every
//! other crate in the workspace depends on `hero-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Records are plain immutable values.** A [`HeroSearchResponse`] owns
//!    its [`Hero`]s, and each hero owns exactly one of each sub-record. No
//!    sub-record has an independent lifecycle.
//!
//! 2. **Closed sets are enums.** `appearance.gender` is a [`Gender`], so an
//!    unknown gender cannot exist in a validated record.
//!
//! 3. **Validated newtypes at the edges.** [`ImageUrl`] can only hold an
//!    absolute `http`/`https` URL.
//!
//! 4. **Errors carry a [`FieldPath`].** Every [`ValidationError`] names the
//!    offending field as `results[2].appearance.gender`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hero-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod gender;
pub mod model;
pub mod path;

pub use error::{ErrorClass, JsonKind, ValidationError};
pub use gender::{Gender, UnknownGender, GENDER_VALUES};
pub use model::{
    Appearance, Biography, Connections, Hero, HeroSearchResponse, Image, ImageUrl,
    InvalidImageUrl, Powerstats, Work,
};
pub use path::{FieldPath, Segment};
