//! Repository for the `videos` table.

use sqlx::PgConnection;
use vidstore_core::types::DbId;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, release_date, total_inventory";

/// Provides write operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (title, release_date, total_inventory)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.total_inventory)
            .fetch_one(conn)
            .await
    }

    /// Overwrite title, release date and inventory.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = $2,
                release_date = $3,
                total_inventory = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.total_inventory)
            .fetch_optional(conn)
            .await
    }

    /// Find a video and hold a row lock on it until the transaction ends.
    ///
    /// Serializes concurrent check-outs of the same video.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Permanently delete a video by ID. Returns `true` if a row was removed.
    ///
    /// Rentals referencing the video are left untouched.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
