//! # Validation Engine
//!
//! Generic walker over the tables in [`crate::rules`]. Given a raw JSON
//! value and a [`RecordSchema`], it resolves wire aliases, checks each
//! field's shape, coerces integers, applies the constraint rows, and
//! produces a normalized document keyed by internal field names. That
//! document is then handed to serde to build the typed records.
//!
//! ## Evaluation order
//!
//! Nested records are walked before a record's own scalar fields, so leaf
//! records (powerstats, biography, ...) are validated first, then each
//! hero's `id` and `name`, then the top-level `response` and `results_for`.
//!
//! ## Modes
//!
//! - [`Mode::FailFast`] stops at the first violation. Used to build records.
//! - [`Mode::Exhaustive`] records every violation. A nested value with the
//!   wrong shape contributes one error and is not descended into.

use hero_core::{FieldPath, JsonKind, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::num::IntErrorKind;

use crate::rules::{self, FieldSpec, RecordSchema, Shape};

/// Whether to stop at the first violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FailFast,
    Exhaustive,
}

/// Signal that fail-fast mode has recorded its error.
struct Halt;

/// `Ok(None)` means the subtree was rejected and its errors are recorded.
type Step = Result<Option<Value>, Halt>;

struct Walker {
    mode: Mode,
    errors: Vec<ValidationError>,
}

impl Walker {
    fn report(&mut self, err: ValidationError) -> Result<(), Halt> {
        self.errors.push(err);
        match self.mode {
            Mode::FailFast => Err(Halt),
            Mode::Exhaustive => Ok(()),
        }
    }

    fn wrong_type(
        &mut self,
        path: &FieldPath,
        expected: &'static str,
        found: &Value,
    ) -> Result<(), Halt> {
        self.report(ValidationError::WrongType {
            path: path.clone(),
            expected,
            found: JsonKind::of(found),
        })
    }

    fn record(&mut self, schema: &'static RecordSchema, value: &Value, path: &FieldPath) -> Step {
        let Some(map) = value.as_object() else {
            self.wrong_type(path, "object", value)?;
            return Ok(None);
        };

        let before = self.errors.len();
        let mut normalized = Map::new();
        let nested = schema.fields.iter().filter(|f| f.shape.is_nested());
        let scalars = schema.fields.iter().filter(|f| !f.shape.is_nested());

        for field in nested.chain(scalars) {
            let field_path = path.key(field.name);
            let Some(raw) = lookup(map, schema.name, field.name) else {
                self.report(ValidationError::MissingField { path: field_path })?;
                continue;
            };
            if let Some(value) = self.field(schema, field, raw, &field_path)? {
                normalized.insert(field.name.to_string(), value);
            }
        }

        Ok((self.errors.len() == before).then_some(Value::Object(normalized)))
    }

    fn field(
        &mut self,
        schema: &'static RecordSchema,
        field: &FieldSpec,
        raw: &Value,
        path: &FieldPath,
    ) -> Step {
        let shaped = match field.shape {
            Shape::Text => self.text(raw, path)?,
            Shape::Integer => self.integer(coerce_integer(raw), raw, path)?,
            Shape::Stat => self.integer(coerce_stat(raw), raw, path)?,
            Shape::TextList => self.text_list(raw, path)?,
            Shape::Record(inner) => self.record(inner, raw, path)?,
            Shape::RecordList(inner) => self.record_list(inner, raw, path)?,
        };
        let Some(value) = shaped else {
            return Ok(None);
        };

        let mut accepted = true;
        for constraint in rules::constraints_for(schema.name, field.name) {
            if !constraint.check.holds(&value) {
                accepted = false;
                self.report(ValidationError::Constraint {
                    path: path.clone(),
                    reason: constraint.message.to_string(),
                })?;
            }
        }
        Ok(accepted.then_some(value))
    }

    fn text(&mut self, raw: &Value, path: &FieldPath) -> Step {
        if raw.is_string() {
            Ok(Some(raw.clone()))
        } else {
            self.wrong_type(path, "string", raw)?;
            Ok(None)
        }
    }

    fn integer(&mut self, coerced: Coerced, raw: &Value, path: &FieldPath) -> Step {
        match coerced {
            Coerced::Int(n) => Ok(Some(Value::Number(Number::from(n)))),
            Coerced::NotInteger => {
                self.wrong_type(path, "integer", raw)?;
                Ok(None)
            }
            Coerced::OutOfRange => {
                self.report(ValidationError::Constraint {
                    path: path.clone(),
                    reason: "integer out of range".to_string(),
                })?;
                Ok(None)
            }
        }
    }

    fn text_list(&mut self, raw: &Value, path: &FieldPath) -> Step {
        let Some(items) = raw.as_array() else {
            self.wrong_type(path, "array of strings", raw)?;
            return Ok(None);
        };
        let mut accepted = true;
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                accepted = false;
                self.wrong_type(&path.index(i), "string", item)?;
            }
        }
        Ok(accepted.then(|| raw.clone()))
    }

    fn record_list(
        &mut self,
        schema: &'static RecordSchema,
        raw: &Value,
        path: &FieldPath,
    ) -> Step {
        let Some(items) = raw.as_array() else {
            self.wrong_type(path, "array", raw)?;
            return Ok(None);
        };
        let mut out = Vec::with_capacity(items.len());
        let mut accepted = true;
        for (i, item) in items.iter().enumerate() {
            match self.record(schema, item, &path.index(i))? {
                Some(record) => out.push(record),
                None => accepted = false,
            }
        }
        Ok(accepted.then_some(Value::Array(out)))
    }
}

/// Find `field` in `map`, preferring the wire alias over the internal name.
fn lookup<'v>(map: &'v Map<String, Value>, record: &str, field: &str) -> Option<&'v Value> {
    rules::wire_key(record, field)
        .and_then(|wire| map.get(wire))
        .or_else(|| map.get(field))
}

#[derive(Debug, PartialEq, Eq)]
enum Coerced {
    Int(i64),
    NotInteger,
    OutOfRange,
}

/// Lax integer coercion: integers, integral floats, and trimmed decimal
/// strings. Booleans and `null` are not integers.
fn coerce_integer(value: &Value) -> Coerced {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Coerced::Int(i)
            } else if n.is_u64() {
                Coerced::OutOfRange
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => {
                        if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                            Coerced::Int(f as i64)
                        } else {
                            Coerced::OutOfRange
                        }
                    }
                    _ => Coerced::NotInteger,
                }
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Coerced::Int(i),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Coerced::OutOfRange,
                _ => Coerced::NotInteger,
            },
        },
        _ => Coerced::NotInteger,
    }
}

/// Stat coercion: [`coerce_integer`], except that a finite float with a
/// fractional part is truncated toward zero.
fn coerce_stat(value: &Value) -> Coerced {
    match coerce_integer(value) {
        Coerced::NotInteger => match value.as_f64() {
            Some(f) if f.is_finite() => {
                let t = f.trunc();
                if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                    Coerced::Int(t as i64)
                } else {
                    Coerced::OutOfRange
                }
            }
            _ => Coerced::NotInteger,
        },
        other => other,
    }
}

/// Walk `value` against `schema`.
///
/// Returns the normalized document (internal keys, coerced integers) or
/// every violation found. In [`Mode::FailFast`] the error list has exactly
/// one entry.
pub fn normalize(
    schema: &'static RecordSchema,
    value: &Value,
    mode: Mode,
) -> Result<Value, Vec<ValidationError>> {
    let mut walker = Walker {
        mode,
        errors: Vec::new(),
    };
    let root = FieldPath::root();
    match walker.record(schema, value, &root) {
        Ok(Some(normalized)) if walker.errors.is_empty() => Ok(normalized),
        _ => Err(walker.errors),
    }
}

/// Validate `value` against `schema` (fail-fast) and build the typed record.
pub fn assemble<T: DeserializeOwned>(
    schema: &'static RecordSchema,
    value: &Value,
) -> Result<T, ValidationError> {
    let normalized = normalize(schema, value, Mode::FailFast).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| ValidationError::Constraint {
                path: FieldPath::root(),
                reason: "rejected without a recorded violation".to_string(),
            })
    })?;

    serde_json::from_value(normalized).map_err(|e| ValidationError::Constraint {
        path: FieldPath::root(),
        reason: format!("record assembly failed: {e}"),
    })
}
