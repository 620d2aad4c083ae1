//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wallhub_core::error::CoreError;
use wallhub_core::permissions::PermissionId;
use wallhub_core::types::DbId;
use wallhub_db::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use wallhub_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Public category listing with approved-wallpaper counts.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryWithCount>>>> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{slug}
///
/// Public category detail by slug.
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "Category",
                name: slug,
            })
        })?;

    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/admin/categories
///
/// Create a category. Requires `manage_settings`.
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    require_permission(&state, &auth, PermissionId::ManageSettings).await?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Update a category. Requires `manage_settings`.
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    require_permission(&state, &auth, PermissionId::ManageSettings).await?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Delete a category; its wallpapers stay, uncategorized. Requires
/// `manage_settings`. Returns 204.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_permission(&state, &auth, PermissionId::ManageSettings).await?;

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
