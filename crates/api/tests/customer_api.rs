//! HTTP-level integration tests for the `/customers` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_customer, create_video, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_customer_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/customers",
        json!({"name": "Grace", "postal_code": "10001", "phone": "555-0199"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Grace");
    assert_eq!(json["postal_code"], "10001");
    assert_eq!(json["phone"], "555-0199");
    assert!(json["registered_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_customer_missing_phone_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/customers",
        json!({"name": "Grace", "postal_code": "10001"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"details": "Request body must include phone."})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_customers(pool: PgPool) {
    create_customer(&pool, "C1").await;
    create_customer(&pool, "C2").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/customers").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["C1", "C2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_customer(pool: PgPool) {
    let id = create_customer(&pool, "Before").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/customers/{id}"),
        json!({"name": "After", "postal_code": "02139", "phone": "555-0123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "After");
    assert_eq!(json["postal_code"], "02139");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_customer_is_404_before_body_check(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/customers/424242", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_customer_returns_deleted_customer(pool: PgPool) {
    let id = create_customer(&pool, "Leaving").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/customers/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Leaving");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/customers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_customer_rentals_and_history_follow_check_in(pool: PgPool) {
    let customer = create_customer(&pool, "Renter").await;
    let video = create_video(&pool, "Vertigo", 2).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/rentals/check-out",
        json!({"customer_id": customer, "video_id": video}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let rentals = body_json(get(app, &format!("/customers/{customer}/rentals")).await).await;
    let rentals = rentals.as_array().unwrap();
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0]["id"], video);
    assert_eq!(rentals[0]["title"], "Vertigo");
    assert!(rentals[0]["due_date"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/rentals/check-in",
        json!({"customer_id": customer, "video_id": video}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let rentals = body_json(get(app, &format!("/customers/{customer}/rentals")).await).await;
    assert_eq!(rentals, json!([]));

    let app = common::build_test_app(pool);
    let history = body_json(get(app, &format!("/customers/{customer}/history")).await).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["title"], "Vertigo");
    assert!(history[0]["checkout_date"].is_string());
    assert!(history[0]["due_date"].is_string());
}
