//! Rental entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vidstore_core::body::FieldReader;
use vidstore_core::error::CoreError;
use vidstore_core::types::{Date, DbId};

use super::status::StatusId;
use super::{FromRecord, Record};

/// A rental row from the `rentals` table.
///
/// `video_id` and `customer_id` are plain references; the rows they point
/// at may have been deleted since.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    pub video_id: DbId,
    pub customer_id: DbId,
    pub status_id: StatusId,
    pub checkout_date: Date,
    pub due_date: Date,
}

impl Record for Rental {
    const ENTITY: &'static str = "Rental";
    const TABLE: &'static str = "rentals";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "video_id",
        "customer_id",
        "status_id",
        "checkout_date",
        "due_date",
    ];
}

/// Body of a check-out or check-in request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalRequest {
    pub customer_id: DbId,
    pub video_id: DbId,
}

impl FromRecord for RentalRequest {
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError> {
        Ok(Self {
            customer_id: fields.require("customer_id")?,
            video_id: fields.require("video_id")?,
        })
    }
}

/// DTO for inserting a new CHECKOUT rental.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRental {
    pub video_id: DbId,
    pub customer_id: DbId,
    pub checkout_date: Date,
    pub due_date: Date,
}
