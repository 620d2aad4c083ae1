//! HTTP-level integration tests for signup, login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, login_user, post_json, token_for, TEST_PASSWORD};
use sqlx::PgPool;
use wallhub_db::models::profile::UserStatus;
use wallhub_db::repositories::ProfileRepo;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Signup creates a pending profile with the baseline role.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_creates_baseline_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "newcomer@test.com",
        "password": "long-enough-password",
        "full_name": "New Comer",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["email"], "newcomer@test.com");
    assert_eq!(json["role_name"], "user");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["onboarding_completed"], false);
    // The password hash must never appear in a response.
    assert!(json.get("password_hash").is_none());
}

/// Duplicate emails are rejected with 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_email(pool: PgPool) {
    create_test_user(&pool, "taken@test.com", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "taken@test.com",
        "password": "long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Short passwords and malformed emails are rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_validation(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "a@test.com", "password": "short" });
    let response = post_json(app.clone(), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "email": "not-an-email", "password": "long-enough-password" });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns tokens, stamps last_login_at, and activates a
/// pending account.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "loginuser@test.com", "user").await;
    assert_eq!(user.status, UserStatus::Pending);

    let app = common::build_test_app(pool.clone());
    let json = login_user(app, "loginuser@test.com").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["profile"]["id"], user.id);
    assert_eq!(json["profile"]["status"], "active");

    let refreshed = ProfileRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(refreshed.last_login_at.is_some());
}

/// Wrong password and unknown email both return 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_bad_credentials(pool: PgPool) {
    create_test_user(&pool, "victim@test.com", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "victim@test.com", "password": "incorrect" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Deactivated and suspended accounts may not sign in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_blocked_statuses(pool: PgPool) {
    let inactive = create_test_user(&pool, "inactive@test.com", "user").await;
    ProfileRepo::set_status(&pool, inactive.id, UserStatus::Inactive)
        .await
        .unwrap();
    let suspended = create_test_user(&pool, "suspended@test.com", "user").await;
    ProfileRepo::set_status(&pool, suspended.id, UserStatus::Suspended)
        .await
        .unwrap();

    let app = common::build_test_app(pool);

    for email in ["inactive@test.com", "suspended@test.com"] {
        let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{email}");
    }
}

/// Five consecutive failures lock the account; the correct password is then
/// rejected too.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_lockout(pool: PgPool) {
    create_test_user(&pool, "locked@test.com", "user").await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let body = serde_json::json!({ "email": "locked@test.com", "password": "incorrect" });
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let body = serde_json::json!({ "email": "locked@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// Refresh rotates the token: the new pair works, the old one is dead.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotation(pool: PgPool) {
    create_test_user(&pool, "refresher@test.com", "user").await;
    let app = common::build_test_app(pool);

    let login = login_user(app.clone(), "refresher@test.com").await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert!(rotated["access_token"].is_string());
    assert_ne!(rotated["refresh_token"], login["refresh_token"]);

    // The consumed token is revoked.
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session for the user.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    create_test_user(&pool, "leaver@test.com", "user").await;
    let app = common::build_test_app(pool);

    let login = login_user(app.clone(), "leaver@test.com").await;
    let access_token = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = common::post_auth(app.clone(), "/api/v1/auth/logout", access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Requests without a token are rejected by the extractor.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::get_auth(app, "/api/v1/profile", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid token resolves to the caller's own profile.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_own_profile(pool: PgPool) {
    let user = create_test_user(&pool, "me@test.com", "user").await;
    let app = common::build_test_app(pool);

    let token = token_for(app.clone(), "me@test.com").await;
    let response = common::get_auth(app, "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["email"], "me@test.com");
}
