//! Repository for the `customers` table.

use sqlx::PgConnection;
use vidstore_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, postal_code, phone, registered_at";

/// Provides write operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    ///
    /// `registered_at` defaults to `NOW()`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, postal_code, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.name)
            .bind(&input.postal_code)
            .bind(&input.phone)
            .fetch_one(conn)
            .await
    }

    /// Overwrite name, postal code and phone.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = $2,
                postal_code = $3,
                phone = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.postal_code)
            .bind(&input.phone)
            .fetch_optional(conn)
            .await
    }

    /// Permanently delete a customer by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
