//! Customer entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vidstore_core::body::FieldReader;
use vidstore_core::error::CoreError;
use vidstore_core::types::{DbId, Timestamp};

use super::{FromRecord, Record};

/// A customer row from the `customers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub postal_code: String,
    pub phone: String,
    pub registered_at: Timestamp,
}

impl Record for Customer {
    const ENTITY: &'static str = "Customer";
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "postal_code", "phone", "registered_at"];
}

/// DTO for creating a new customer. `registered_at` is set by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCustomer {
    pub name: String,
    pub postal_code: String,
    pub phone: String,
}

impl FromRecord for CreateCustomer {
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError> {
        Ok(Self {
            name: fields.require("name")?,
            postal_code: fields.require("postal_code")?,
            phone: fields.require("phone")?,
        })
    }
}

/// DTO for replacing a customer's contact details (full overwrite).
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCustomer {
    pub name: String,
    pub postal_code: String,
    pub phone: String,
}

impl FromRecord for UpdateCustomer {
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError> {
        Ok(Self {
            name: fields.require("name")?,
            postal_code: fields.require("postal_code")?,
            phone: fields.require("phone")?,
        })
    }
}
