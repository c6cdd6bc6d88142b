//! HTTP-level tests for authentication, permissions, and payload validation.
//!
//! Every request here is answered before a query runs, so the app is built
//! on a lazy pool and no database is required.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, build_test_app, delete, delete_auth, get, get_auth, lazy_pool, post_json,
    post_json_auth, put_json, send, token_for,
};
use serde_json::json;
use tower::ServiceExt;

fn valid_breed() -> serde_json::Value {
    json!({
        "name": "Labrador",
        "size": "large",
        "friendliness": 5,
        "trainability": 4,
        "shedding_amount": 3,
        "exercise_needs": 4,
    })
}

fn valid_dog() -> serde_json::Value {
    json!({
        "name": "Rex",
        "age": 3,
        "gender": "male",
        "color": "black",
    })
}

// ---------------------------------------------------------------------------
// Anonymous writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_breed_writes_are_rejected_with_401() {
    let response = post_json(build_test_app(lazy_pool()), "/api/breeds/", valid_breed()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Authentication credentials were not provided.");

    let response = put_json(build_test_app(lazy_pool()), "/api/breeds/1/", valid_breed()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(build_test_app(lazy_pool()), "/api/breeds/1/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_dog_writes_are_rejected_with_401() {
    let response = post_json(build_test_app(lazy_pool()), "/api/dogs/", valid_dog()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = put_json(build_test_app(lazy_pool()), "/api/dogs/1/", valid_dog()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(build_test_app(lazy_pool()), "/api/dogs/1/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_write_with_invalid_body_still_gets_401() {
    let response = post_json(build_test_app(lazy_pool()), "/api/breeds/", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_token_is_rejected_even_on_reads() {
    let response = get_auth(build_test_app(lazy_pool()), "/api/breeds/", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/dogs/")
        .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app(lazy_pool()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_authentication() {
    let response = get(build_test_app(lazy_pool()), "/api/users/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(build_test_app(lazy_pool()), "/api/users/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_request_requires_both_fields() {
    let response = post_json(
        build_test_app(lazy_pool()),
        "/api/token/",
        json!({ "username": "alice" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["password"][0], "This field is required.");
}

#[tokio::test]
async fn refresh_request_requires_a_token() {
    let response = post_json(build_test_app(lazy_pool()), "/api/token/refresh/", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["refresh"][0], "This field is required.");
}

#[tokio::test]
async fn revoke_request_requires_a_token() {
    let response = post_json(build_test_app(lazy_pool()), "/api/token/revoke/", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["refresh"][0], "This field is required.");
}

#[tokio::test]
async fn registration_enforces_password_length() {
    let response = post_json(
        build_test_app(lazy_pool()),
        "/api/users/",
        json!({ "username": "alice", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["password"][0],
        "Ensure this field has at least 8 characters."
    );
}

// ---------------------------------------------------------------------------
// Payload validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_breed_reports_every_bad_field() {
    let token = token_for(1);
    let body = json!({
        "name": "  ",
        "size": "huge",
        "friendliness": 0,
        "trainability": 6,
        "shedding_amount": 3,
    });

    let response = post_json_auth(build_test_app(lazy_pool()), "/api/breeds/", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field may not be blank.");
    assert_eq!(json["fields"]["size"][0], "\"huge\" is not a valid choice.");
    assert_eq!(
        json["fields"]["friendliness"][0],
        "Ensure this value is greater than or equal to 1."
    );
    assert_eq!(
        json["fields"]["trainability"][0],
        "Ensure this value is less than or equal to 5."
    );
    assert_eq!(json["fields"]["exercise_needs"][0], "This field is required.");
    assert!(json["fields"].get("shedding_amount").is_none());
}

#[tokio::test]
async fn invalid_dog_is_rejected_before_the_breed_lookup() {
    let token = token_for(1);
    let body = json!({ "name": "Rex", "age": -1, "breed": 7, "color": "black" });

    let response = post_json_auth(build_test_app(lazy_pool()), "/api/dogs/", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["age"][0],
        "Ensure this value is greater than or equal to 0."
    );
    assert_eq!(json["fields"]["gender"][0], "This field is required.");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let token = token_for(1);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/breeds/")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = build_test_app(lazy_pool()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn wrongly_typed_field_is_a_bad_request() {
    let token = token_for(1);
    let mut body = valid_dog();
    body["age"] = json!("three");

    let response = post_json_auth(build_test_app(lazy_pool()), "/api/dogs/", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_is_not_allowed() {
    let token = token_for(1);
    let response = send(
        build_test_app(lazy_pool()),
        Method::PATCH,
        "/api/breeds/1/",
        Some(valid_breed()),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn non_numeric_id_is_a_json_bad_request() {
    for uri in ["/api/dogs/abc/", "/api/breeds/abc/"] {
        let response = get(build_test_app(lazy_pool()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }

    let token = token_for(1);
    let response = delete_auth(build_test_app(lazy_pool()), "/api/dogs/abc/", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_test_app(lazy_pool()), "/api/cats/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(build_test_app(lazy_pool()), "/api/cats/").await;
    assert!(response.headers().contains_key("x-request-id"));
}
