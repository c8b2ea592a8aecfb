//! Generic read helpers shared by every route module.
//!
//! [`custom_query`] builds a projected, equality-filtered SELECT over any
//! [`Record`] type; [`validate_model`] loads one row by id or fails with a
//! structured not-found error. Both take a `&mut PgConnection` so they run
//! inside whatever transaction the caller has open.

use std::marker::PhantomData;

use futures::stream::BoxStream;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgConnection, Postgres};
use vidstore_core::error::CoreError;
use vidstore_core::types::DbId;

use crate::models::status::{RentalStatus, StatusId};
use crate::models::Record;

/// Errors from the query helpers: either a domain error (unknown column,
/// missing row) or a database failure.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A value compared for equality in a [`custom_query`] filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Id(DbId),
    Status(StatusId),
}

impl From<DbId> for FilterValue {
    fn from(value: DbId) -> Self {
        Self::Id(value)
    }
}

impl From<RentalStatus> for FilterValue {
    fn from(value: RentalStatus) -> Self {
        Self::Status(value.into())
    }
}

/// A prepared, not-yet-executed query over rows of `E`.
///
/// Column names have already been checked against [`Record::COLUMNS`], so
/// the SQL text only ever contains names from that static list. Nothing
/// touches the database until [`fetch`](Self::fetch) or
/// [`fetch_all`](Self::fetch_all) is called.
#[derive(Debug, Clone)]
pub struct CustomQuery<E> {
    sql: String,
    binds: Vec<FilterValue>,
    _entity: PhantomData<fn() -> E>,
}

/// Build a query over `E` projected to `fields` and restricted to rows
/// matching every `(column, value)` pair in `filters`.
///
/// An empty `fields` slice selects every column. Rows come back in
/// insertion (`id`) order.
pub fn custom_query<E: Record>(
    fields: &[&str],
    filters: &[(&str, FilterValue)],
) -> Result<CustomQuery<E>, CoreError> {
    let projection: Vec<&'static str> = if fields.is_empty() {
        E::COLUMNS.to_vec()
    } else {
        fields
            .iter()
            .map(|field| known_column::<E>(field))
            .collect::<Result<_, _>>()?
    };

    let mut sql = format!("SELECT {} FROM {}", projection.join(", "), E::TABLE);
    let mut binds = Vec::with_capacity(filters.len());

    for (i, (column, value)) in filters.iter().enumerate() {
        let column = known_column::<E>(column)?;
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        sql.push_str(&format!("{column} = ${}", i + 1));
        binds.push(value.clone());
    }
    sql.push_str(" ORDER BY id ASC");

    Ok(CustomQuery {
        sql,
        binds,
        _entity: PhantomData,
    })
}

impl<E: Record> CustomQuery<E> {
    /// The generated SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Stream matching rows as `R`, which must be buildable from the
    /// projected columns.
    pub fn fetch<'a, R>(&'a self, conn: &'a mut PgConnection) -> BoxStream<'a, Result<R, sqlx::Error>>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'a,
    {
        self.bind(sqlx::query_as::<_, R>(&self.sql)).fetch(conn)
    }

    /// Collect all matching rows as `R`.
    pub async fn fetch_all<R>(&self, conn: &mut PgConnection) -> Result<Vec<R>, sqlx::Error>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.bind(sqlx::query_as::<_, R>(&self.sql))
            .fetch_all(conn)
            .await
    }

    fn bind<'q, R>(
        &'q self,
        mut query: QueryAs<'q, Postgres, R, PgArguments>,
    ) -> QueryAs<'q, Postgres, R, PgArguments> {
        for value in &self.binds {
            query = match value {
                FilterValue::Id(v) => query.bind(*v),
                FilterValue::Status(v) => query.bind(*v),
            };
        }
        query
    }
}

/// Load one `E` by primary key.
///
/// Fails with [`CoreError::NotFound`] carrying `E::ENTITY` and `id` when no
/// such row exists.
pub async fn validate_model<E: Record>(conn: &mut PgConnection, id: DbId) -> Result<E, QueryError> {
    let query = format!(
        "SELECT {} FROM {} WHERE id = $1",
        E::COLUMNS.join(", "),
        E::TABLE
    );
    sqlx::query_as::<_, E>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| {
            tracing::debug!(entity = E::ENTITY, id, "Lookup found no row");
            QueryError::Core(CoreError::NotFound {
                entity: E::ENTITY,
                id,
            })
        })
}

fn known_column<E: Record>(name: &str) -> Result<&'static str, CoreError> {
    E::COLUMNS
        .iter()
        .copied()
        .find(|column| *column == name)
        .ok_or_else(|| {
            CoreError::Validation(format!("Unknown column '{name}' for {}", E::ENTITY))
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::models::rental::Rental;
    use crate::models::video::{Video, SUMMARY_FIELDS};

    #[test]
    fn projection_without_filters() {
        let query = custom_query::<Video>(SUMMARY_FIELDS, &[]).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, release_date FROM videos ORDER BY id ASC"
        );
    }

    #[test]
    fn empty_projection_selects_every_column() {
        let query = custom_query::<Video>(&[], &[]).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, release_date, total_inventory FROM videos ORDER BY id ASC"
        );
    }

    #[test]
    fn filters_are_conjunctive_and_numbered() {
        let query = custom_query::<Rental>(
            &["id", "customer_id", "due_date"],
            &[
                ("video_id", FilterValue::Id(7)),
                ("status_id", RentalStatus::Checkout.into()),
            ],
        )
        .unwrap();

        assert_eq!(
            query.sql(),
            "SELECT id, customer_id, due_date FROM rentals \
             WHERE video_id = $1 AND status_id = $2 ORDER BY id ASC"
        );
        assert_eq!(
            query.binds,
            vec![FilterValue::Id(7), FilterValue::Status(1)]
        );
    }

    #[test]
    fn unknown_projection_column_is_rejected() {
        let err = custom_query::<Video>(&["id", "budget"], &[]).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("budget"));
    }

    #[test]
    fn unknown_filter_column_is_rejected() {
        let err = custom_query::<Rental>(&[], &[("video_id; DROP TABLE rentals", FilterValue::Id(1))])
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
