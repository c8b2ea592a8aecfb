//! Handlers for the `/videos` resource.
//!
//! Rental sub-resources:
//! `/videos/{id}/rentals` (checked out now) and `/videos/{id}/history`
//! (returned).

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use vidstore_core::error::CoreError;
use vidstore_core::types::DbId;
use vidstore_db::models::customer::Customer;
use vidstore_db::models::video::{CreateVideo, UpdateVideo, Video, VideoSummary, SUMMARY_FIELDS};
use vidstore_db::models::{FromRecord, Record};
use vidstore_db::repositories::VideoRepo;
use vidstore_db::{custom_query, validate_model};

use crate::error::{AppError, AppResult};
use crate::handlers::rental::{rental_records, RentalView};
use crate::middleware::unit_of_work::UnitOfWork;

/// GET /videos
///
/// Every video, projected to `id`, `title` and `release_date`.
pub async fn list(mut uow: UnitOfWork) -> AppResult<Json<Vec<VideoSummary>>> {
    let videos = custom_query::<Video>(SUMMARY_FIELDS, &[])?
        .fetch_all::<VideoSummary>(&mut uow)
        .await?;
    uow.commit().await?;
    Ok(Json(videos))
}

/// GET /videos/{id}
pub async fn get_by_id(Path(id): Path<DbId>, mut uow: UnitOfWork) -> AppResult<Json<Video>> {
    let video = validate_model::<Video>(&mut uow, id).await?;
    uow.commit().await?;
    Ok(Json(video))
}

/// POST /videos
///
/// Requires `title`, `release_date` and `total_inventory`; the first one
/// missing is named in the 400 response.
pub async fn create(
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let input = CreateVideo::from_json(&body)?;
    let video = VideoRepo::create(&mut uow, &input).await?;
    uow.commit().await?;

    tracing::info!(video_id = video.id, title = %video.title, "Video created");
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /videos/{id}
///
/// Overwrites title, release date and inventory. The video must exist
/// before the body is validated, so an unknown id is a 404 even when the
/// body is incomplete.
pub async fn update(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
    Json(body): Json<Value>,
) -> AppResult<Json<Video>> {
    let video = validate_model::<Video>(&mut uow, id).await?;
    let input = UpdateVideo::from_json(&body)?;

    let video = VideoRepo::replace(&mut uow, video.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: Video::ENTITY,
            id,
        }))?;
    uow.commit().await?;

    tracing::info!(video_id = video.id, "Video updated");
    Ok(Json(video))
}

/// DELETE /videos/{id}
///
/// Responds 200 with the representation the video had before deletion.
pub async fn delete(Path(id): Path<DbId>, mut uow: UnitOfWork) -> AppResult<Json<Video>> {
    let video = validate_model::<Video>(&mut uow, id).await?;
    VideoRepo::delete(&mut uow, video.id).await?;
    uow.commit().await?;

    tracing::info!(video_id = video.id, "Video deleted");
    Ok(Json(video))
}

/// GET /videos/{id}/rentals
///
/// Customers currently holding a copy, each with the rental's `due_date`.
pub async fn list_rentals(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let video = validate_model::<Video>(&mut uow, id).await?;
    let records = rental_records::<Customer>(
        &mut uow,
        "video_id",
        video.id,
        RentalView::Active,
        |rental| rental.customer_id,
    )
    .await?;
    uow.commit().await?;
    Ok(Json(records))
}

/// GET /videos/{id}/history
///
/// Customers who have returned the video, each with the rental's
/// `checkout_date` and `due_date`.
pub async fn list_history(
    Path(id): Path<DbId>,
    mut uow: UnitOfWork,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let video = validate_model::<Video>(&mut uow, id).await?;
    let records = rental_records::<Customer>(
        &mut uow,
        "video_id",
        video.id,
        RentalView::History,
        |rental| rental.customer_id,
    )
    .await?;
    uow.commit().await?;
    Ok(Json(records))
}
