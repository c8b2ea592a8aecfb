//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO built from a JSON body via [`FromRecord`]
//! - An update DTO for full replacement of the mutable columns

pub mod customer;
pub mod rental;
pub mod status;
pub mod video;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use vidstore_core::body::FieldReader;
use vidstore_core::error::CoreError;

/// A persisted entity type.
///
/// Ties a row struct to its table so the generic query helpers in
/// [`crate::query`] can select, filter and look it up by id.
pub trait Record: Serialize + for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Human-readable entity name used in not-found errors.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Every selectable column. Projections and filters must name one of these.
    const COLUMNS: &'static [&'static str];

    /// Plain key-value form of the entity, one entry per public attribute.
    ///
    /// Fails with [`CoreError::Internal`] if the entity does not serialize
    /// to a JSON object.
    fn to_record(&self) -> Result<Map<String, Value>, CoreError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(CoreError::Internal(format!(
                "{} serialized to a non-object value: {other}",
                Self::ENTITY
            ))),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to serialize {}: {e}",
                Self::ENTITY
            ))),
        }
    }
}

/// Construction from a plain key-value mapping (a JSON request body).
pub trait FromRecord: Sized {
    /// Fails with [`CoreError::MissingField`] naming the first absent
    /// required key.
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError>;

    fn from_json(body: &Value) -> Result<Self, CoreError> {
        Self::from_record(FieldReader::new(body)?)
    }
}
