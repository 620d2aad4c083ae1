//! Shared test harness: router construction and HTTP helpers.
//!
//! Mirrors the router construction in `main.rs` via [`build_app_router`] so
//! integration tests exercise the same middleware stack (CORS, request ID,
//! timeout, tracing, panic recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use wallhub_api::auth::jwt::JwtConfig;
use wallhub_api::auth::password::hash_password;
use wallhub_api::config::ServerConfig;
use wallhub_api::router::build_app_router;
use wallhub_api::state::AppState;
use wallhub_db::models::profile::{CreateProfile, UserProfile};
use wallhub_db::repositories::ProfileRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Shared plaintext password for seeded test users.
pub const TEST_PASSWORD: &str = "test-password-123!";

/// Create a profile directly in the database with the given role (`admin`,
/// `moderator`, and `user` are seeded by the migrations).
pub async fn create_test_user(pool: &PgPool, email: &str, role_name: &str) -> UserProfile {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateProfile {
        email: email.to_string(),
        password_hash: hashed,
        full_name: Some(email.split('@').next().unwrap().to_string()),
        avatar_url: None,
        role_name: role_name.to_string(),
    };
    ProfileRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log a seeded user in via the API and return the full auth response.
pub async fn login_user(app: Router, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    body_json(response).await
}

/// Log a seeded user in and return just the access token.
pub async fn token_for(app: Router, email: &str) -> String {
    let json = login_user(app, email).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}
