//! HTTP-level integration tests for role management: listing order, the
//! permission catalog, and the deletion guards.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, delete_auth, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;
use wallhub_db::repositories::RoleRepo;

/// Create a role via the API as the given admin and return its id.
async fn create_role_via_api(
    app: axum::Router,
    token: &str,
    name: &str,
    permissions: serde_json::Value,
    priority: i32,
) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "display_name": name,
        "description": null,
        "permissions": permissions,
        "color": "#3B82F6",
        "priority": priority,
    });
    let response = post_json_auth(app, "/api/v1/admin/roles", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Roles list highest priority first, ties broken by name ascending.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_listing_order(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "admin@test.com").await;

    // Seeds: admin(100), moderator(50), user(10). Add a tie at 50 and a 20.
    create_role_via_api(app.clone(), &token, "vip", serde_json::json!([]), 50).await;
    create_role_via_api(app.clone(), &token, "editor", serde_json::json!([]), 20).await;

    let response = get_auth(app, "/api/v1/admin/roles", &token).await;
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["admin", "moderator", "vip", "editor", "user"]);
}

/// The permission catalog is served with display categories.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_permission_catalog(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "admin@test.com").await;

    let response = get_auth(app, "/api/v1/admin/permissions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let catalog = json["data"].as_array().unwrap();
    assert_eq!(catalog.len(), 14);
    assert!(catalog
        .iter()
        .any(|p| p["id"] == "system_admin" && p["category"] == "System"));
    assert!(catalog
        .iter()
        .any(|p| p["id"] == "moderate_comments" && p["category"] == "Content"));
}

/// Creating a role requires `manage_roles`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_role_requires_manage_roles(pool: PgPool) {
    create_test_user(&pool, "mod@test.com", "moderator").await;
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "mod@test.com").await;

    let body = serde_json::json!({
        "name": "sneaky",
        "display_name": "Sneaky",
        "permissions": [],
        "color": "#000000",
        "priority": 1,
    });
    let response = post_json_auth(app, "/api/v1/admin/roles", &token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An unknown permission id in the payload fails deserialization.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_permission_id_rejected(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "admin@test.com").await;

    let body = serde_json::json!({
        "name": "broken",
        "display_name": "Broken",
        "permissions": ["launch_missiles"],
        "color": "#000000",
        "priority": 1,
    });
    let response = post_json_auth(app, "/api/v1/admin/roles", &token, body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Duplicate role names conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_role_name_conflicts(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "admin@test.com").await;

    let body = serde_json::json!({
        "name": "moderator",
        "display_name": "Moderator Again",
        "permissions": [],
        "color": "#000000",
        "priority": 1,
    });
    let response = post_json_auth(app, "/api/v1/admin/roles", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// System roles cannot be deleted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_system_role_rejected(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(app.clone(), "admin@test.com").await;

    let admin_role = RoleRepo::find_by_name(&pool, "admin").await.unwrap().unwrap();
    let response = delete_auth(
        app,
        &format!("/api/v1/admin/roles/{}", admin_role.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SYSTEM_ROLE");
}

/// A role referenced by any profile cannot be deleted until it is released;
/// afterwards it disappears from the listing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_role_in_use(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let member = create_test_user(&pool, "member@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(app.clone(), "admin@test.com").await;

    let role_id =
        create_role_via_api(app.clone(), &token, "editor", serde_json::json!([]), 20).await;

    // Assign, then try to delete.
    let body = serde_json::json!({ "role_name": "editor" });
    put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/role", member.id),
        &token,
        body,
    )
    .await;

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/roles/{role_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ROLE_IN_USE");

    // Release the role and retry.
    let body = serde_json::json!({ "role_name": "user" });
    put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/role", member.id),
        &token,
        body,
    )
    .await;

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/roles/{role_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/admin/roles", &token).await;
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["name"] != "editor"));
}

/// The editor scenario: a custom role holding only `manage_wallpapers` can
/// reach the moderation listing but nothing in user management.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_scenario(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let member = create_test_user(&pool, "editor@test.com", "user").await;
    let app = common::build_test_app(pool);
    let admin_token = token_for(app.clone(), "admin@test.com").await;

    create_role_via_api(
        app.clone(),
        &admin_token,
        "editor",
        serde_json::json!(["manage_wallpapers"]),
        20,
    )
    .await;
    let body = serde_json::json!({ "role_name": "editor" });
    put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/role", member.id),
        &admin_token,
        body,
    )
    .await;

    // Token issued after the role change carries the editor role.
    let editor_token = token_for(app.clone(), "editor@test.com").await;

    let response = get_auth(app.clone(), "/api/v1/admin/wallpapers", &editor_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), "/api/v1/admin/users", &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/admin/dashboard", &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Updating a role's permission set takes effect on the next check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_role_permissions(pool: PgPool) {
    create_test_user(&pool, "admin@test.com", "admin").await;
    let member = create_test_user(&pool, "member@test.com", "user").await;
    let app = common::build_test_app(pool);
    let admin_token = token_for(app.clone(), "admin@test.com").await;

    let role_id = create_role_via_api(
        app.clone(),
        &admin_token,
        "analyst",
        serde_json::json!([]),
        30,
    )
    .await;
    let body = serde_json::json!({ "role_name": "analyst" });
    put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/role", member.id),
        &admin_token,
        body,
    )
    .await;

    let member_token = token_for(app.clone(), "member@test.com").await;
    let response = get_auth(app.clone(), "/api/v1/admin/dashboard", &member_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Grant view_dashboard; the permission set is resolved per request, so
    // the same token now passes.
    let body = serde_json::json!({ "permissions": ["view_dashboard"] });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/roles/{role_id}"),
        &admin_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/admin/dashboard", &member_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
