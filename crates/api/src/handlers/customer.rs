//! Handlers for the `/customers` resource.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use vidstore_core::error::CoreError;
use vidstore_core::types::DbId;
use vidstore_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use vidstore_db::models::video::Video;
use vidstore_db::models::{FromRecord, Record};
use vidstore_db::repositories::CustomerRepo;
use vidstore_db::{custom_query, validate_model};

use crate::error::{AppError, AppResult};
use crate::handlers::rental::{rental_records, RentalView};
use crate::middleware::unit_of_work::UnitOfWork;

/// GET /customers
pub async fn list(mut uow: UnitOfWork) -> AppResult<Json<Vec<Customer>>> {
    let customers = custom_query::<Customer>(&[], &[])?
        .fetch_all::<Customer>(&mut uow)
        .await?;
    uow.commit().await?;
    Ok(Json(customers))
}

/// GET /customers/{id}
pub async fn get_by_id(Path(id): Path<DbId>, mut uow: UnitOfWork) -> AppResult<Json<Customer>> {
    let customer = validate_model::<Customer>(&mut uow, id).await?;
    uow.commit().await?;
    Ok(Json(customer))
}

/// POST /customers
pub async fn create(
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let input = CreateCustomer::from_json(&body)?;
    let customer = CustomerRepo::create(&mut uow, &input).await?;
    uow.commit().await?;

    tracing::info!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /customers/{id}
pub async fn update(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<Json<Customer>> {
    let customer = validate_model::<Customer>(&mut uow, id).await?;
    let input = UpdateCustomer::from_json(&body)?;

    let customer = CustomerRepo::replace(&mut uow, customer.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: Customer::ENTITY,
            id,
        }))?;
    uow.commit().await?;

    tracing::info!(customer_id = customer.id, "Customer updated");
    Ok(Json(customer))
}

/// DELETE /customers/{id}
///
/// Responds 200 with the pre-deletion representation. Rentals are kept.
pub async fn delete(Path(id): Path<DbId>, mut uow: UnitOfWork) -> AppResult<Json<Customer>> {
    let customer = validate_model::<Customer>(&mut uow, id).await?;
    CustomerRepo::delete(&mut uow, customer.id).await?;
    uow.commit().await?;

    tracing::info!(customer_id = customer.id, "Customer deleted");
    Ok(Json(customer))
}

/// GET /customers/{id}/rentals
///
/// Videos the customer currently has out, each with its `due_date`.
pub async fn list_rentals(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let customer = validate_model::<Customer>(&mut uow, id).await?;
    let records = rental_records::<Video>(
        &mut uow,
        "customer_id",
        customer.id,
        RentalView::Active,
        |rental| rental.video_id,
    )
    .await?;
    uow.commit().await?;
    Ok(Json(records))
}

/// GET /customers/{id}/history
pub async fn list_history(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let customer = validate_model::<Customer>(&mut uow, id).await?;
    let records = rental_records::<Video>(
        &mut uow,
        "customer_id",
        customer.id,
        RentalView::History,
        |rental| rental.video_id,
    )
    .await?;
    uow.commit().await?;
    Ok(Json(records))
}
