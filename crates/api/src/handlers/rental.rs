//! Handlers for the `/rentals` resource, plus the rental listing shared by
//! the video and customer sub-resources.

use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use sqlx::PgConnection;
use vidstore_core::error::CoreError;
use vidstore_core::rental::{available_inventory, can_check_out, due_date};
use vidstore_core::types::{Date, DbId};
use vidstore_db::models::customer::Customer;
use vidstore_db::models::rental::{CreateRental, Rental, RentalRequest};
use vidstore_db::models::status::RentalStatus;
use vidstore_db::models::video::Video;
use vidstore_db::models::{FromRecord, Record};
use vidstore_db::repositories::{RentalRepo, VideoRepo};
use vidstore_db::{custom_query, validate_model, FilterValue};

use crate::error::{AppError, AppResult};
use crate::middleware::unit_of_work::UnitOfWork;

// ---------------------------------------------------------------------------
// Shared rental listings
// ---------------------------------------------------------------------------

/// Which rentals a listing shows and which dates it attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalView {
    /// Checked out now; attaches `due_date`.
    Active,
    /// Already returned; attaches `checkout_date` and `due_date`.
    History,
}

impl RentalView {
    fn status(self) -> RentalStatus {
        match self {
            Self::Active => RentalStatus::Checkout,
            Self::History => RentalStatus::Checkin,
        }
    }

    fn attach_dates(self, record: &mut Map<String, Value>, rental: &Rental) {
        if self == Self::History {
            record.insert("checkout_date".into(), json!(rental.checkout_date));
        }
        record.insert("due_date".into(), json!(rental.due_date));
    }
}

/// Rentals whose `column` equals `id`, each resolved to the `E` row that
/// `counterpart` points at and merged with the rental dates.
///
/// A rental pointing at a deleted row fails the whole listing with
/// `NotFound`.
pub async fn rental_records<E: Record>(
    conn: &mut PgConnection,
    column: &'static str,
    id: DbId,
    view: RentalView,
    counterpart: fn(&Rental) -> DbId,
) -> AppResult<Vec<Map<String, Value>>> {
    let rentals = custom_query::<Rental>(
        &[],
        &[
            (column, FilterValue::from(id)),
            ("status_id", FilterValue::from(view.status())),
        ],
    )?
    .fetch_all::<Rental>(&mut *conn)
    .await?;
    tracing::debug!(
        column,
        id,
        status = view.status().name(),
        count = rentals.len(),
        "Loaded rentals"
    );

    let mut records = Vec::with_capacity(rentals.len());
    for rental in &rentals {
        let entity = validate_model::<E>(&mut *conn, counterpart(rental)).await?;
        let mut record = entity.to_record()?;
        view.attach_dates(&mut record, rental);
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Check-out / check-in
// ---------------------------------------------------------------------------

/// Response body for a successful check-out.
#[derive(Debug, Serialize)]
pub struct CheckOutResponse {
    pub customer_id: DbId,
    pub video_id: DbId,
    pub due_date: Date,
    pub videos_checked_out_count: i64,
    pub available_inventory: i64,
}

/// Response body for a successful check-in.
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub customer_id: DbId,
    pub video_id: DbId,
    pub videos_checked_out_count: i64,
    pub available_inventory: i64,
}

/// POST /rentals/check-out
///
/// Lends one copy of `video_id` to `customer_id` for the standard rental
/// period. The video row stays locked until commit so concurrent
/// check-outs cannot take the last copy twice.
pub async fn check_out(
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<Json<CheckOutResponse>> {
    let request = RentalRequest::from_json(&body)?;
    let customer = validate_model::<Customer>(&mut uow, request.customer_id).await?;
    let video = lock_video(&mut uow, request.video_id).await?;

    let checked_out = RentalRepo::count_outstanding_for_video(&mut uow, video.id).await?;
    if !can_check_out(video.total_inventory, checked_out) {
        tracing::info!(
            video_id = video.id,
            total_inventory = video.total_inventory,
            checked_out,
            "Check-out refused, no copies available"
        );
        return Err(AppError::BadRequest("Could not perform checkout".into()));
    }

    let today = chrono::Utc::now().date_naive();
    let rental = RentalRepo::create_checkout(
        &mut uow,
        &CreateRental {
            video_id: video.id,
            customer_id: customer.id,
            checkout_date: today,
            due_date: due_date(today),
        },
    )
    .await?;
    let videos_checked_out_count =
        RentalRepo::count_outstanding_for_customer(&mut uow, customer.id).await?;
    uow.commit().await?;

    tracing::info!(
        rental_id = rental.id,
        customer_id = customer.id,
        video_id = video.id,
        due_date = %rental.due_date,
        "Video checked out"
    );
    Ok(Json(CheckOutResponse {
        customer_id: customer.id,
        video_id: video.id,
        due_date: rental.due_date,
        videos_checked_out_count,
        available_inventory: available_inventory(video.total_inventory, checked_out + 1),
    }))
}

/// POST /rentals/check-in
///
/// Returns the customer's oldest outstanding copy of the video.
pub async fn check_in(
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<Json<CheckInResponse>> {
    let request = RentalRequest::from_json(&body)?;
    let customer = validate_model::<Customer>(&mut uow, request.customer_id).await?;
    let video = lock_video(&mut uow, request.video_id).await?;

    let rental = RentalRepo::find_outstanding(&mut uow, customer.id, video.id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "No outstanding rentals for customer {} and video {}",
                customer.id, video.id
            ))
        })?;
    RentalRepo::mark_checked_in(&mut uow, rental.id).await?;

    let checked_out = RentalRepo::count_outstanding_for_video(&mut uow, video.id).await?;
    let videos_checked_out_count =
        RentalRepo::count_outstanding_for_customer(&mut uow, customer.id).await?;
    uow.commit().await?;

    tracing::info!(
        rental_id = rental.id,
        customer_id = customer.id,
        video_id = video.id,
        "Video checked in"
    );
    Ok(Json(CheckInResponse {
        customer_id: customer.id,
        video_id: video.id,
        videos_checked_out_count,
        available_inventory: available_inventory(video.total_inventory, checked_out),
    }))
}

async fn lock_video(conn: &mut PgConnection, id: DbId) -> AppResult<Video> {
    VideoRepo::find_for_update(conn, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: Video::ENTITY,
            id,
        }))
}
