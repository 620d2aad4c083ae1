//! Handlers for the `/wallpapers` resource.
//!
//! The public surface serves only approved wallpapers; upload, edit,
//! approval, and deletion are each gated by their own permission.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wallhub_core::error::CoreError;
use wallhub_core::permissions::PermissionId;
use wallhub_core::slug::slugify;
use wallhub_core::types::DbId;
use wallhub_db::models::notification::NotificationKind;
use wallhub_db::models::wallpaper::{
    CreateWallpaper, UpdateWallpaper, Wallpaper, WallpaperFilter,
};
use wallhub_db::repositories::{ProfileRepo, VoteRepo, WallpaperRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::notifications::notify;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for wallpaper listings. Approval visibility is decided
/// by the handler, never by the caller.
#[derive(Debug, Default, Deserialize)]
pub struct WallpaperListQuery {
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl WallpaperListQuery {
    fn into_filter(self, approved_only: bool) -> WallpaperFilter {
        WallpaperFilter {
            search: self.search,
            category_id: self.category_id,
            featured: self.featured,
            approved_only,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Request body for `POST /wallpapers`.
#[derive(Debug, Deserialize)]
pub struct CreateWallpaperRequest {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub resolution: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
}

/// Request body for `POST /wallpapers/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub approved: bool,
}

/// Request body for `POST /wallpapers/{id}/feature`.
#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    pub featured: bool,
}

/// Wallpaper detail with its aggregate rating.
#[derive(Debug, Serialize)]
pub struct WallpaperDetail {
    #[serde(flatten)]
    pub wallpaper: Wallpaper,
    pub votes: i64,
    /// Arithmetic mean of 1-5 star votes; `None` with no votes yet.
    pub rating: Option<f64>,
}

/// Response for `POST /wallpapers/{id}/download`.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub download_url: String,
    pub downloads_count: i64,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wallpapers
///
/// Public listing: approved wallpapers only, with substring search and
/// category/featured filters.
pub async fn list_wallpapers(
    State(state): State<AppState>,
    Query(query): Query<WallpaperListQuery>,
) -> AppResult<Json<DataResponse<Vec<Wallpaper>>>> {
    let wallpapers = WallpaperRepo::list(&state.pool, &query.into_filter(true)).await?;
    Ok(Json(DataResponse { data: wallpapers }))
}

/// GET /api/v1/wallpapers/{slug}
///
/// Public detail by slug, with vote count and mean rating. Unapproved
/// wallpapers are indistinguishable from missing ones.
pub async fn get_wallpaper(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<WallpaperDetail>>> {
    let wallpaper = WallpaperRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|w| w.approved)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "Wallpaper",
                name: slug,
            })
        })?;

    let summary = VoteRepo::summary(&state.pool, wallpaper.id).await?;

    Ok(Json(DataResponse {
        data: WallpaperDetail {
            wallpaper,
            votes: summary.votes,
            rating: summary.rating,
        },
    }))
}

/// POST /api/v1/wallpapers/{id}/download
///
/// Count a download and hand back the image URL. Anonymous downloads count
/// against the wallpaper only; authenticated ones also bump the
/// downloader's profile counter.
pub async fn download_wallpaper(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DownloadResponse>>> {
    let exists_and_approved = WallpaperRepo::find_by_id(&state.pool, id)
        .await?
        .map(|w| w.approved)
        .unwrap_or(false);
    if !exists_and_approved {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }));
    }

    let wallpaper = WallpaperRepo::record_download(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }))?;

    if let Some(user) = auth {
        ProfileRepo::increment_downloads(&state.pool, user.user_id).await?;
    }

    Ok(Json(DataResponse {
        data: DownloadResponse {
            download_url: wallpaper.image_url,
            downloads_count: wallpaper.downloads_count,
        },
    }))
}

// ---------------------------------------------------------------------------
// Gated handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/wallpapers
///
/// Moderation listing: includes unapproved rows.
pub async fn list_all_wallpapers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WallpaperListQuery>,
) -> AppResult<Json<DataResponse<Vec<Wallpaper>>>> {
    require_permission(&state, &auth, PermissionId::ManageWallpapers).await?;

    let wallpapers = WallpaperRepo::list(&state.pool, &query.into_filter(false)).await?;
    Ok(Json(DataResponse { data: wallpapers }))
}

/// POST /api/v1/wallpapers
///
/// Register an uploaded wallpaper's metadata. Requires
/// `upload_wallpapers`; the row enters unapproved.
pub async fn create_wallpaper(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateWallpaperRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Wallpaper>>)> {
    let actor = require_permission(&state, &auth, PermissionId::UploadWallpapers).await?;

    let slug = slugify(&input.title);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must contain at least one alphanumeric character".into(),
        )));
    }

    let create_dto = CreateWallpaper {
        title: input.title,
        slug,
        description: input.description,
        category_id: input.category_id,
        tags: input.tags,
        resolution: input.resolution,
        file_size_bytes: input.file_size_bytes,
        image_url: input.image_url,
        thumbnail_url: input.thumbnail_url,
        uploader_id: Some(actor.id),
    };
    let wallpaper = WallpaperRepo::create(&state.pool, &create_dto).await?;
    ProfileRepo::increment_uploads(&state.pool, actor.id).await?;

    tracing::info!(
        wallpaper_id = wallpaper.id,
        slug = %wallpaper.slug,
        uploader_id = actor.id,
        "Wallpaper uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: wallpaper })))
}

/// PUT /api/v1/wallpapers/{id}
///
/// Edit wallpaper metadata. Requires `manage_wallpapers`.
pub async fn update_wallpaper(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWallpaper>,
) -> AppResult<Json<DataResponse<Wallpaper>>> {
    require_permission(&state, &auth, PermissionId::ManageWallpapers).await?;

    let wallpaper = WallpaperRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }))?;

    Ok(Json(DataResponse { data: wallpaper }))
}

/// DELETE /api/v1/wallpapers/{id}
///
/// Remove a wallpaper. Requires `delete_wallpapers`. Returns 204.
pub async fn delete_wallpaper(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = require_permission(&state, &auth, PermissionId::DeleteWallpapers).await?;

    let deleted = WallpaperRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }));
    }

    tracing::info!(wallpaper_id = id, admin_id = actor.id, "Wallpaper deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/wallpapers/{id}/approve
///
/// Approve or un-approve a wallpaper. Requires `approve_wallpapers`.
pub async fn approve_wallpaper(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<Json<DataResponse<Wallpaper>>> {
    require_permission(&state, &auth, PermissionId::ApproveWallpapers).await?;

    let wallpaper = WallpaperRepo::set_approved(&state.pool, id, input.approved)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }))?;

    if input.approved {
        if let Some(uploader_id) = wallpaper.uploader_id {
            notify(
                &state.pool,
                uploader_id,
                NotificationKind::Success,
                &format!("Your wallpaper '{}' was approved", wallpaper.title),
            )
            .await;
        }
    }

    Ok(Json(DataResponse { data: wallpaper }))
}

/// POST /api/v1/wallpapers/{id}/feature
///
/// Toggle the featured flag. Requires `approve_wallpapers`.
pub async fn feature_wallpaper(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<FeatureRequest>,
) -> AppResult<Json<DataResponse<Wallpaper>>> {
    require_permission(&state, &auth, PermissionId::ApproveWallpapers).await?;

    let wallpaper = WallpaperRepo::set_featured(&state.pool, id, input.featured)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id,
        }))?;

    Ok(Json(DataResponse { data: wallpaper }))
}
