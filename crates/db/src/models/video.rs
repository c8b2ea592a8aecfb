//! Video entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vidstore_core::body::FieldReader;
use vidstore_core::error::CoreError;
use vidstore_core::types::{Date, DbId};

use super::{FromRecord, Record};

/// A video row from the `videos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub release_date: Date,
    pub total_inventory: i32,
}

impl Record for Video {
    const ENTITY: &'static str = "Video";
    const TABLE: &'static str = "videos";
    const COLUMNS: &'static [&'static str] = &["id", "title", "release_date", "total_inventory"];
}

/// Columns returned by the video listing.
pub const SUMMARY_FIELDS: &[&str] = &["id", "title", "release_date"];

/// Projection of [`Video`] onto [`SUMMARY_FIELDS`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct VideoSummary {
    pub id: DbId,
    pub title: String,
    pub release_date: Date,
}

/// DTO for creating a new video.
///
/// A negative `total_inventory` passes here and is rejected by the
/// `ck_videos_total_inventory` constraint on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVideo {
    pub title: String,
    pub release_date: Date,
    pub total_inventory: i32,
}

impl FromRecord for CreateVideo {
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError> {
        Ok(Self {
            title: fields.require("title")?,
            release_date: fields.require("release_date")?,
            total_inventory: fields.require("total_inventory")?,
        })
    }
}

/// DTO for replacing a video. Every mutable column is required; this is a
/// full overwrite, not a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateVideo {
    pub title: String,
    pub release_date: Date,
    pub total_inventory: i32,
}

impl FromRecord for UpdateVideo {
    fn from_record(fields: FieldReader<'_>) -> Result<Self, CoreError> {
        let CreateVideo {
            title,
            release_date,
            total_inventory,
        } = CreateVideo::from_record(fields)?;
        Ok(Self {
            title,
            release_date,
            total_inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_reports_first_missing_field() {
        let err = CreateVideo::from_json(&json!({"release_date": "2001-01-01"})).unwrap_err();
        assert_matches!(err, CoreError::MissingField(key) if key == "title");

        let err = CreateVideo::from_json(&json!({"title": "Alien"})).unwrap_err();
        assert_matches!(err, CoreError::MissingField(key) if key == "release_date");

        let err = UpdateVideo::from_json(&json!({"title": "Alien", "release_date": "1979-05-25"}))
            .unwrap_err();
        assert_matches!(err, CoreError::MissingField(key) if key == "total_inventory");
    }

    #[test]
    fn from_json_ignores_unknown_keys() {
        let video = CreateVideo::from_json(&json!({
            "title": "Alien",
            "release_date": "1979-05-25",
            "total_inventory": 2,
            "director": "Ridley Scott",
        }))
        .unwrap();
        assert_eq!(video.title, "Alien");
        assert_eq!(video.total_inventory, 2);
    }

    #[test]
    fn to_record_includes_every_attribute() {
        let video = Video {
            id: 4,
            title: "Alien".to_string(),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            total_inventory: 2,
        };
        let record = video.to_record().unwrap();

        assert_eq!(record.len(), Video::COLUMNS.len());
        assert_eq!(record["id"], 4);
        assert_eq!(record["title"], "Alien");
        assert_eq!(record["release_date"], "1979-05-25");
        assert_eq!(record["total_inventory"], 2);
    }
}
