//! Handlers for the `/notifications` resource, plus the fire-and-forget
//! notification sink used by the admin and content surfaces.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wallhub_core::error::CoreError;
use wallhub_core::types::DbId;
use wallhub_db::models::notification::{Notification, NotificationKind};
use wallhub_db::repositories::NotificationRepo;
use wallhub_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Record a user-visible outcome. Fire-and-forget: a failed insert is
/// logged and never fails the operation that produced it.
pub(crate) async fn notify(pool: &DbPool, user_id: DbId, kind: NotificationKind, message: &str) {
    if let Err(e) = NotificationRepo::create(pool, user_id, kind, message).await {
        tracing::warn!(user_id, error = %e, "Failed to record notification");
    }
}

/// Query parameters for `GET /notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationListQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
///
/// The authenticated user's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list(
        &state.pool,
        auth.user_id,
        query.unread_only.unwrap_or(false),
        query.limit,
        query.offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<i64>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: count }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark one of the user's notifications read. Returns 204 No Content.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let updated = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))
    }
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the user's notifications read. Returns the updated count.
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<u64>>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: updated }))
}
