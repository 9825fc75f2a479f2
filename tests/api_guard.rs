mod common;

use axum::http::StatusCode;
use menew_api::{models::Role, routes::create_app};
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, empty_request, json_request, offline_state, token_for};

#[tokio::test]
async fn days_listing_requires_a_bearer_token() {
    let app = create_app(offline_state());

    let response = app.oneshot(empty_request("GET", "/days", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "unauthorized");
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let app = create_app(offline_state());
    let request = axum::http::Request::builder()
        .uri("/client/menus")
        .header("authorization", "Basic YWRtaW46YWRtaW4=")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["data"]["kind"], "unauthorized");
}

#[tokio::test]
async fn garbage_token_is_an_invalid_token() {
    let app = create_app(offline_state());

    let response = app
        .oneshot(empty_request("GET", "/days", Some("not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["data"]["kind"], "invalid_token");
}

#[tokio::test]
async fn token_from_another_secret_is_rejected() {
    let foreign = menew_api::state::AppState::new(
        offline_state().pool.clone(),
        menew_api::services::auth_service::TokenKeys::new(b"someone-else", 8),
    );
    let token = token_for(&foreign, 1, "admin@example.com", Role::Admin);
    let app = create_app(offline_state());

    let response = app
        .oneshot(json_request(
            "POST",
            "/admin/dishes",
            Some(&token),
            json!({ "name": "Soup", "category": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["data"]["kind"], "invalid_token");
}

#[tokio::test]
async fn clients_cannot_use_admin_endpoints() {
    let state = offline_state();
    let token = token_for(&state, 2, "client@example.com", Role::Client);
    let app = create_app(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/dishes",
            Some(&token),
            json!({ "name": "Soup", "category": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["data"]["kind"], "forbidden");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/day-dishes/1",
            Some(&token),
            json!({ "dish_ids": [1, 2] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(empty_request("GET", "/day-dishes-detailed/2024-01-10", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_cannot_pick_client_menus() {
    let state = offline_state();
    let token = token_for(&state, 1, "admin@example.com", Role::Admin);
    let app = create_app(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/client/menus",
            Some(&token),
            json!({ "day": "2024-01-10", "firstDishId": 1, "secondDishId": 5, "dessertId": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn menu_with_missing_fields_is_a_validation_error() {
    let state = offline_state();
    let token = token_for(&state, 2, "client@example.com", Role::Client);
    let app = create_app(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/client/menus",
            Some(&token),
            json!({ "day": "2024-01-10", "firstDishId": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "validation_error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("second_dish_id"), "{message}");
    assert!(message.contains("dessert_id"), "{message}");
}

#[tokio::test]
async fn non_integer_dish_ids_are_a_validation_error() {
    let state = offline_state();
    let token = token_for(&state, 1, "admin@example.com", Role::Admin);
    let app = create_app(state);

    for body in [
        json!({ "dish_ids": "1,2,3" }),
        json!({ "dish_ids": [1, "two"] }),
        json!({ "dish_ids": [1.5] }),
        json!({}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/admin/day-dishes/1", Some(&token), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["data"]["kind"], "validation_error");
    }
}

#[tokio::test]
async fn malformed_dates_are_validation_errors() {
    let app = create_app(offline_state());

    let response = app
        .oneshot(empty_request("GET", "/days/check-dishes?date=tomorrow", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["data"]["kind"], "validation_error");
}

#[tokio::test]
async fn unknown_routes_use_the_error_envelope() {
    let app = create_app(offline_state());

    let response = app
        .oneshot(empty_request("GET", "/no/such/route", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "not_found");
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = create_app(offline_state());

    let response = app.oneshot(empty_request("GET", "/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "ok");
}
