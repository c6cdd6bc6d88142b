//! End-to-end tests for registration, token exchange, and account removal.
//!
//! Each test gets a fresh database from the PostgreSQL server at
//! `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete_auth, get, get_auth, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

const PASSWORD: &str = "correct-horse-battery";

async fn register(pool: &PgPool, username: &str) -> serde_json::Value {
    let body = json!({ "username": username, "password": PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/users/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn obtain(pool: &PgPool, username: &str, password: &str) -> axum::response::Response {
    let body = json!({ "username": username, "password": password });
    post_json(build_test_app(pool.clone()), "/api/token/", body).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_obtain_and_refresh(pool: PgPool) {
    let user = register(&pool, "alice").await;
    assert_eq!(user["username"], "alice");
    assert!(user.get("password_hash").is_none());

    let response = obtain(&pool, "alice", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tokens = body_json(response).await;
    let access = tokens["access"].as_str().expect("access token").to_string();
    let refresh = tokens["refresh"].as_str().expect("refresh token").to_string();

    let me = body_json(get_auth(build_test_app(pool.clone()), "/api/users/me/", &access).await)
        .await;
    assert_eq!(me["id"], user["id"]);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/token/refresh/",
        json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert!(refreshed["access"].is_string());
    assert!(refreshed.get("refresh").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoked_refresh_token_stops_working(pool: PgPool) {
    register(&pool, "erin").await;
    let tokens = body_json(obtain(&pool, "erin", PASSWORD).await).await;
    let refresh = json!({ "refresh": tokens["refresh"] });

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/token/revoke/",
        refresh.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/token/refresh/",
        refresh.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = post_json(build_test_app(pool.clone()), "/api/token/revoke/", refresh).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Other sessions of the same account are untouched.
    let other = body_json(obtain(&pool, "erin", PASSWORD).await).await;
    let response = post_json(
        build_test_app(pool),
        "/api/token/refresh/",
        json!({ "refresh": other["refresh"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_credentials_are_401(pool: PgPool) {
    register(&pool, "bob").await;

    let response = obtain(&pool, "bob", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "No active account found with the given credentials"
    );

    let response = obtain(&pool, "nobody", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        build_test_app(pool),
        "/api/token/refresh/",
        json!({ "refresh": "made-up" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_is_a_conflict(pool: PgPool) {
    register(&pool, "carol").await;

    let body = json!({ "username": "carol", "password": PASSWORD });
    let response = post_json(build_test_app(pool), "/api/users/", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_account_removes_owned_dogs(pool: PgPool) {
    register(&pool, "dave").await;
    let tokens = body_json(obtain(&pool, "dave", PASSWORD).await).await;
    let access = tokens["access"].as_str().unwrap().to_string();

    let dog = json!({ "name": "Rover", "age": 4, "gender": "male", "color": "white" });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/dogs/", dog, &access).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let dog_uri = format!("/api/dogs/{}/", body_json(response).await["id"]);

    let response = delete_auth(build_test_app(pool.clone()), "/api/users/me/", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &dog_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        build_test_app(pool),
        "/api/token/refresh/",
        json!({ "refresh": tokens["refresh"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
