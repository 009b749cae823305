//! # Rule Tables
//!
//! Declarative description of a search response, kept apart from the record
//! types in `hero-core`:
//!
//! - **Shapes** ([`RecordSchema`]): which fields each record has and the
//!   JSON type each field must hold.
//! - **Aliases** ([`ALIASES`]): the hyphenated wire key bound to an
//!   internal field name.
//! - **Constraints** ([`CONSTRAINTS`]): `(record, field) -> predicate ->
//!   message` rows applied after a field's shape is accepted.
//!
//! The engine in [`crate::engine`] walks these tables generically. Adding a
//! rule is a one-line table edit.
//!
//! ## Asymmetry
//!
//! `biography.aliases` only has to be non-empty; its elements may be blank.
//! `appearance.height` and `appearance.weight` additionally require every
//! element to be a non-blank string. This matches the live API contract and
//! is kept on purpose.

use hero_core::{ImageUrl, GENDER_VALUES};
use serde_json::Value;

/// JSON shape a field must have before constraints are applied.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A JSON string.
    Text,
    /// An integer, or a float with no fractional part, or a string that
    /// parses as a base-10 integer after trimming.
    Integer,
    /// Like [`Shape::Integer`], but a finite float is truncated toward zero
    /// instead of rejected, so `27.5` reads as `27` and `-0.5` as `0`.
    Stat,
    /// An array whose elements are all JSON strings.
    TextList,
    /// A nested record.
    Record(&'static RecordSchema),
    /// An array of nested records.
    RecordList(&'static RecordSchema),
}

impl Shape {
    /// True for shapes that descend into nested records.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Record(_) | Self::RecordList(_))
    }
}

/// One field of a record, by internal name.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
}

/// The fields of one record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Record name used as the key into [`ALIASES`] and [`CONSTRAINTS`].
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Binding of a hyphenated wire key to an internal field name.
#[derive(Debug)]
pub struct FieldAlias {
    pub record: &'static str,
    pub field: &'static str,
    pub wire: &'static str,
}

/// Predicate applied to a field whose shape has already been accepted.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// String is non-empty after trimming.
    NonBlank,
    /// Integer is `>= 0`.
    NonNegative,
    /// Array has at least one element.
    NonEmptyList,
    /// Every array element is a non-blank string.
    EveryItemNonBlank,
    /// String equals one of the listed values exactly.
    OneOf(&'static [&'static str]),
    /// String is an absolute `http`/`https` URL with a host.
    HttpUrl,
}

impl Check {
    /// Evaluate the predicate against a shape-checked value.
    ///
    /// Integers arrive already coerced to JSON numbers. A value of the wrong
    /// JSON type never satisfies a check.
    pub fn holds(&self, value: &Value) -> bool {
        match self {
            Self::NonBlank => value.as_str().is_some_and(|s| !s.trim().is_empty()),
            Self::NonNegative => value.as_i64().is_some_and(|n| n >= 0) || value.is_u64(),
            Self::NonEmptyList => value.as_array().is_some_and(|a| !a.is_empty()),
            Self::EveryItemNonBlank => value.as_array().is_some_and(|items| {
                items
                    .iter()
                    .all(|i| i.as_str().is_some_and(|s| !s.trim().is_empty()))
            }),
            Self::OneOf(allowed) => value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| *a == s)),
            Self::HttpUrl => value.as_str().is_some_and(ImageUrl::is_valid),
        }
    }
}

/// A `(record, field) -> predicate -> message` row.
#[derive(Debug)]
pub struct Constraint {
    pub record: &'static str,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

const fn field(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec { name, shape }
}

const fn alias(record: &'static str, field: &'static str, wire: &'static str) -> FieldAlias {
    FieldAlias {
        record,
        field,
        wire,
    }
}

// ── Shapes ──────────────────────────────────────────────────────────────

pub static POWERSTATS: RecordSchema = RecordSchema {
    name: "powerstats",
    fields: &[
        field("intelligence", Shape::Stat),
        field("strength", Shape::Stat),
        field("speed", Shape::Stat),
        field("durability", Shape::Stat),
        field("power", Shape::Stat),
        field("combat", Shape::Stat),
    ],
};

pub static BIOGRAPHY: RecordSchema = RecordSchema {
    name: "biography",
    fields: &[
        field("full_name", Shape::Text),
        field("alter_egos", Shape::Text),
        field("aliases", Shape::TextList),
        field("place_of_birth", Shape::Text),
        field("first_appearance", Shape::Text),
        field("publisher", Shape::Text),
        field("alignment", Shape::Text),
    ],
};

pub static APPEARANCE: RecordSchema = RecordSchema {
    name: "appearance",
    fields: &[
        field("gender", Shape::Text),
        field("race", Shape::Text),
        field("height", Shape::TextList),
        field("weight", Shape::TextList),
        field("eye_color", Shape::Text),
        field("hair_color", Shape::Text),
    ],
};

pub static WORK: RecordSchema = RecordSchema {
    name: "work",
    fields: &[
        field("occupation", Shape::Text),
        field("base", Shape::Text),
    ],
};

pub static CONNECTIONS: RecordSchema = RecordSchema {
    name: "connections",
    fields: &[
        field("group_affiliation", Shape::Text),
        field("relatives", Shape::Text),
    ],
};

pub static IMAGE: RecordSchema = RecordSchema {
    name: "image",
    fields: &[field("url", Shape::Text)],
};

pub static HERO: RecordSchema = RecordSchema {
    name: "hero",
    fields: &[
        field("id", Shape::Integer),
        field("name", Shape::Text),
        field("powerstats", Shape::Record(&POWERSTATS)),
        field("biography", Shape::Record(&BIOGRAPHY)),
        field("appearance", Shape::Record(&APPEARANCE)),
        field("work", Shape::Record(&WORK)),
        field("connections", Shape::Record(&CONNECTIONS)),
        field("image", Shape::Record(&IMAGE)),
    ],
};

pub static SEARCH_RESPONSE: RecordSchema = RecordSchema {
    name: "search_response",
    fields: &[
        field("response", Shape::Text),
        field("results_for", Shape::Text),
        field("results", Shape::RecordList(&HERO)),
    ],
};

// ── Aliases ─────────────────────────────────────────────────────────────

pub static ALIASES: &[FieldAlias] = &[
    alias("biography", "full_name", "full-name"),
    alias("biography", "alter_egos", "alter-egos"),
    alias("biography", "place_of_birth", "place-of-birth"),
    alias("biography", "first_appearance", "first-appearance"),
    alias("appearance", "eye_color", "eye-color"),
    alias("appearance", "hair_color", "hair-color"),
    alias("connections", "group_affiliation", "group-affiliation"),
    alias("search_response", "results_for", "results-for"),
];

/// The wire key bound to `record.field`, if it differs from the internal name.
pub fn wire_key(record: &str, field: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|a| a.record == record && a.field == field)
        .map(|a| a.wire)
}

// ── Constraints ─────────────────────────────────────────────────────────

const NOT_BLANK: &str = "must not be empty";
const NEGATIVE: &str = "must be non-negative";
const NO_ENTRY: &str = "must contain at least one entry";
const BLANK_ENTRY: &str = "entries must be non-empty strings";
const GENDER: &str = "must be one of Male, Female, -, Other";

const fn rule(
    record: &'static str,
    field: &'static str,
    check: Check,
    message: &'static str,
) -> Constraint {
    Constraint {
        record,
        field,
        check,
        message,
    }
}

pub static CONSTRAINTS: &[Constraint] = &[
    rule("powerstats", "intelligence", Check::NonNegative, NEGATIVE),
    rule("powerstats", "strength", Check::NonNegative, NEGATIVE),
    rule("powerstats", "speed", Check::NonNegative, NEGATIVE),
    rule("powerstats", "durability", Check::NonNegative, NEGATIVE),
    rule("powerstats", "power", Check::NonNegative, NEGATIVE),
    rule("powerstats", "combat", Check::NonNegative, NEGATIVE),
    rule("biography", "full_name", Check::NonBlank, NOT_BLANK),
    rule("biography", "alter_egos", Check::NonBlank, NOT_BLANK),
    rule("biography", "place_of_birth", Check::NonBlank, NOT_BLANK),
    rule("biography", "first_appearance", Check::NonBlank, NOT_BLANK),
    rule("biography", "publisher", Check::NonBlank, NOT_BLANK),
    rule("biography", "alignment", Check::NonBlank, NOT_BLANK),
    rule("biography", "aliases", Check::NonEmptyList, "aliases list must not be empty"),
    rule("appearance", "gender", Check::OneOf(&GENDER_VALUES), GENDER),
    rule("appearance", "race", Check::NonBlank, NOT_BLANK),
    rule("appearance", "eye_color", Check::NonBlank, NOT_BLANK),
    rule("appearance", "hair_color", Check::NonBlank, NOT_BLANK),
    rule("appearance", "height", Check::NonEmptyList, NO_ENTRY),
    rule("appearance", "height", Check::EveryItemNonBlank, BLANK_ENTRY),
    rule("appearance", "weight", Check::NonEmptyList, NO_ENTRY),
    rule("appearance", "weight", Check::EveryItemNonBlank, BLANK_ENTRY),
    rule("work", "occupation", Check::NonBlank, NOT_BLANK),
    rule("work", "base", Check::NonBlank, NOT_BLANK),
    rule("connections", "group_affiliation", Check::NonBlank, NOT_BLANK),
    rule("connections", "relatives", Check::NonBlank, NOT_BLANK),
    rule("image", "url", Check::HttpUrl, "must be an absolute http or https URL"),
    rule("hero", "name", Check::NonBlank, "hero name must not be empty"),
    rule("search_response", "response", Check::NonBlank, NOT_BLANK),
    rule("search_response", "results_for", Check::NonBlank, NOT_BLANK),
];

/// Constraints attached to `record.field`, in table order.
pub fn constraints_for<'a>(
    record: &'a str,
    field: &'a str,
) -> impl Iterator<Item = &'static Constraint> + 'a {
    CONSTRAINTS
        .iter()
        .filter(move |c| c.record == record && c.field == field)
}
