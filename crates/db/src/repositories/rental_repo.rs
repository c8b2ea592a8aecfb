//! Repository for the `rentals` table.

use sqlx::PgConnection;
use vidstore_core::types::DbId;

use crate::models::rental::{CreateRental, Rental};
use crate::models::status::RentalStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_id, customer_id, status_id, checkout_date, due_date";

/// Provides check-out / check-in writes and outstanding-rental counts.
pub struct RentalRepo;

impl RentalRepo {
    /// Insert a CHECKOUT rental, returning the created row.
    pub async fn create_checkout(
        conn: &mut PgConnection,
        input: &CreateRental,
    ) -> Result<Rental, sqlx::Error> {
        let query = format!(
            "INSERT INTO rentals (video_id, customer_id, status_id, checkout_date, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(input.video_id)
            .bind(input.customer_id)
            .bind(RentalStatus::Checkout.id())
            .bind(input.checkout_date)
            .bind(input.due_date)
            .fetch_one(conn)
            .await
    }

    /// Oldest CHECKOUT rental of `video_id` by `customer_id`, row-locked.
    pub async fn find_outstanding(
        conn: &mut PgConnection,
        customer_id: DbId,
        video_id: DbId,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rentals
             WHERE customer_id = $1 AND video_id = $2 AND status_id = $3
             ORDER BY id ASC
             LIMIT 1
             FOR UPDATE"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(customer_id)
            .bind(video_id)
            .bind(RentalStatus::Checkout.id())
            .fetch_optional(conn)
            .await
    }

    /// Transition a rental to CHECKIN.
    pub async fn mark_checked_in(conn: &mut PgConnection, id: DbId) -> Result<Rental, sqlx::Error> {
        let query = format!(
            "UPDATE rentals SET status_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .bind(RentalStatus::Checkin.id())
            .fetch_one(conn)
            .await
    }

    /// Number of copies of a video currently checked out.
    pub async fn count_outstanding_for_video(
        conn: &mut PgConnection,
        video_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rentals WHERE video_id = $1 AND status_id = $2",
        )
        .bind(video_id)
        .bind(RentalStatus::Checkout.id())
        .fetch_one(conn)
        .await
    }

    /// Number of videos a customer currently has checked out.
    pub async fn count_outstanding_for_customer(
        conn: &mut PgConnection,
        customer_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rentals WHERE customer_id = $1 AND status_id = $2",
        )
        .bind(customer_id)
        .bind(RentalStatus::Checkout.id())
        .fetch_one(conn)
        .await
    }
}
