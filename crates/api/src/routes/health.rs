use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and its schema is current,
    /// `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration this build ships.
    pub expected_schema_version: Option<i64>,
}

/// GET /health
///
/// Never fails: an unreachable database is reported in the body.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let expected_schema_version = vidstore_db::expected_schema_version();
    let schema_version = match vidstore_db::applied_schema_version(&state.pool).await {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read schema version");
            None
        }
    };

    let db_healthy = schema_version.is_some();
    let schema_version = schema_version.flatten();
    let status = if db_healthy && schema_version == expected_schema_version {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version,
        expected_schema_version,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
