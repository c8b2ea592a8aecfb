//! Typed access to JSON request bodies.
//!
//! Handlers receive bodies as raw [`serde_json::Value`]s so that a missing
//! key can be reported by name (`Request body must include title.`) rather
//! than surfacing as a generic deserialization rejection. Required keys are
//! read one at a time in the order the caller asks for them, so the first
//! absent key is the one reported.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Borrowing reader over a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// Wrap a request body. Anything other than a JSON object is rejected.
    pub fn new(body: &'a Value) -> Result<Self, CoreError> {
        match body {
            Value::Object(object) => Ok(Self { object }),
            _ => Err(CoreError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// Read a required key.
    ///
    /// Absent keys yield [`CoreError::MissingField`]. A present key whose
    /// value cannot be converted to `T` yields [`CoreError::Validation`].
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, CoreError> {
        let value = self
            .object
            .get(key)
            .ok_or_else(|| CoreError::MissingField(key.to_string()))?;
        convert(key, value)
    }
}

fn convert<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, CoreError> {
    T::deserialize(value)
        .map_err(|e| CoreError::Validation(format!("Invalid value for {key}: {e}")))
}
