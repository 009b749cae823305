//! # Gender: Closed Value Set
//!
//! The search API reports `appearance.gender` as one of four literal
//! strings. This enum is the one definition of that set: [`GENDER_VALUES`],
//! which the validator's rule table checks against, is built from
//! [`Gender::as_str`] over [`Gender::ALL`].
//!
//! `"-"` is what the API sends when the gender is not recorded.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gender of a hero as reported by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// Not recorded; the wire value is a single dash.
    #[serde(rename = "-")]
    Unspecified,
    Other,
}

/// Wire values accepted for `appearance.gender`, in canonical order.
pub const GENDER_VALUES: [&str; 4] = [
    Gender::ALL[0].as_str(),
    Gender::ALL[1].as_str(),
    Gender::ALL[2].as_str(),
    Gender::ALL[3].as_str(),
];

impl Gender {
    /// Every gender in canonical order.
    pub const ALL: [Gender; 4] = [Self::Male, Self::Female, Self::Unspecified, Self::Other];

    /// Returns every gender in canonical order.
    pub fn all() -> &'static [Gender] {
        &Self::ALL
    }

    /// Returns the exact wire string for this gender.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unspecified => "-",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of [`GENDER_VALUES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender {0:?}; expected one of Male, Female, -, Other")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    /// Parses the exact wire string. Matching is case-sensitive and does
    /// not trim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGender(s.to_string()))
    }
}
