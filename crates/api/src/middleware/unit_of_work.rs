//! Per-request transaction extractor.

use std::ops::{Deref, DerefMut};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::error::AppError;
use crate::state::AppState;

/// A database transaction scoped to one request.
///
/// Handlers take this as an extractor parameter, pass `&mut uow` wherever a
/// `&mut PgConnection` is expected, and call [`UnitOfWork::commit`] once all
/// writes succeeded. Returning early (including via `?`) drops the
/// transaction, which rolls it back.
///
/// ```ignore
/// async fn my_handler(Path(id): Path<DbId>, mut uow: UnitOfWork) -> AppResult<Json<Video>> {
///     let video: Video = validate_model(&mut uow, id).await?;
///     uow.commit().await?;
///     Ok(Json(video))
/// }
/// ```
pub struct UnitOfWork(Transaction<'static, Postgres>);

impl UnitOfWork {
    pub async fn begin(pool: &vidstore_db::DbPool) -> Result<Self, sqlx::Error> {
        Ok(Self(pool.begin().await?))
    }

    /// Commit every write made through this unit of work.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.0.commit().await
    }
}

impl Deref for UnitOfWork {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.0
    }
}

impl DerefMut for UnitOfWork {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.0
    }
}

impl FromRequestParts<AppState> for UnitOfWork {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::begin(&state.pool).await?)
    }
}
