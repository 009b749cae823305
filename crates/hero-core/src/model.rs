//! # Hero Records
//!
//! Typed, immutable records for one search response. A
//! [`HeroSearchResponse`] owns its heroes, and each [`Hero`] exclusively
//! owns its six sub-records.
//!
//! ## Key spelling
//!
//! Deserialization accepts both the internal (underscored) field names and
//! the hyphenated wire spelling. The validator in `hero-schema` resolves
//! wire aliases itself before handing a normalized document to serde.
//! Serialization writes the wire spelling (`full-name`, `eye-color`,
//! `results-for`, ...), so a validated record re-serializes to the same
//! shape the API sent.
//!
//! Stored strings are kept exactly as received; trimming is only applied
//! when checking for emptiness.

use serde::{Deserialize, Serialize};

use crate::gender::Gender;

/// Numeric ability ratings. Every stat is a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerstats {
    pub intelligence: u64,
    pub strength: u64,
    pub speed: u64,
    pub durability: u64,
    pub power: u64,
    pub combat: u64,
}

impl Powerstats {
    /// Names of the six stats, in wire order.
    pub const NAMES: [&'static str; 6] = [
        "intelligence",
        "strength",
        "speed",
        "durability",
        "power",
        "combat",
    ];

    /// Stats as `(name, value)` pairs in wire order.
    pub fn entries(&self) -> [(&'static str, u64); 6] {
        [
            ("intelligence", self.intelligence),
            ("strength", self.strength),
            ("speed", self.speed),
            ("durability", self.durability),
            ("power", self.power),
            ("combat", self.combat),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    #[serde(rename(serialize = "full-name"), alias = "full-name")]
    pub full_name: String,
    #[serde(rename(serialize = "alter-egos"), alias = "alter-egos")]
    pub alter_egos: String,
    pub aliases: Vec<String>,
    #[serde(rename(serialize = "place-of-birth"), alias = "place-of-birth")]
    pub place_of_birth: String,
    #[serde(rename(serialize = "first-appearance"), alias = "first-appearance")]
    pub first_appearance: String,
    pub publisher: String,
    pub alignment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub gender: Gender,
    pub race: String,
    /// Height in every unit the API reports, e.g. `["6'2", "188 cm"]`.
    pub height: Vec<String>,
    /// Weight in every unit the API reports, e.g. `["210 lb", "95 kg"]`.
    pub weight: Vec<String>,
    #[serde(rename(serialize = "eye-color"), alias = "eye-color")]
    pub eye_color: String,
    #[serde(rename(serialize = "hair-color"), alias = "hair-color")]
    pub hair_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub occupation: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connections {
    #[serde(rename(serialize = "group-affiliation"), alias = "group-affiliation")]
    pub group_affiliation: String,
    pub relatives: String,
}

/// Absolute `http`/`https` URL with a host, kept in its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

/// Error returned by [`ImageUrl::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an absolute http(s) URL: {0:?}")]
pub struct InvalidImageUrl(pub String);

impl ImageUrl {
    /// Returns true when `raw` parses as an absolute URL whose scheme is
    /// `http` or `https` and which names a host.
    pub fn is_valid(raw: &str) -> bool {
        match url::Url::parse(raw) {
            Ok(parsed) => {
                matches!(parsed.scheme(), "http" | "https")
                    && parsed.host_str().is_some_and(|h| !h.is_empty())
            }
            Err(_) => false,
        }
    }

    /// Validate and wrap a URL string.
    pub fn parse(raw: &str) -> Result<Self, InvalidImageUrl> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidImageUrl(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = InvalidImageUrl;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&raw) {
            Ok(Self(raw))
        } else {
            Err(InvalidImageUrl(raw))
        }
    }
}

impl From<ImageUrl> for String {
    fn from(url: ImageUrl) -> Self {
        url.0
    }
}

impl std::fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: ImageUrl,
}

/// One character record returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub powerstats: Powerstats,
    pub biography: Biography,
    pub appearance: Appearance,
    pub work: Work,
    pub connections: Connections,
    pub image: Image,
}

impl Hero {
    /// Case-insensitive substring match on the hero name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Body of a successful `GET /{token}/search/{name}` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSearchResponse {
    /// `"success"` on a successful search.
    pub response: String,
    /// The query echoed back by the API.
    #[serde(rename(serialize = "results-for"), alias = "results-for")]
    pub results_for: String,
    /// Heroes in API return order.
    pub results: Vec<Hero>,
}

impl HeroSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response == "success"
    }

    /// Heroes whose name contains `needle`, ignoring case.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Hero> + 'a {
        self.results.iter().filter(move |h| h.name_contains(needle))
    }
}
