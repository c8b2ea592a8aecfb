pub mod customer;
pub mod health;
pub mod rental;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the resource route table.
///
/// Route hierarchy:
///
/// ```text
/// /videos                                          list, create
/// /videos/{id}                                     get, replace, delete
/// /videos/{id}/rentals                             customers holding a copy
/// /videos/{id}/history                             customers who returned it
///
/// /customers                                       list, create
/// /customers/{id}                                  get, replace, delete
/// /customers/{id}/rentals                          videos checked out now
/// /customers/{id}/history                          videos returned
///
/// /rentals/check-out                               lend a copy (POST)
/// /rentals/check-in                                return a copy (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/videos", video::router())
        .nest("/customers", customer::router())
        .nest("/rentals", rental::router())
}
