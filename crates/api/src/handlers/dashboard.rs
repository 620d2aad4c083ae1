//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use wallhub_core::permissions::PermissionId;
use wallhub_db::models::dashboard::DashboardSummary;
use wallhub_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
///
/// Site-wide entity counts. Requires `view_dashboard`.
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    require_permission(&state, &auth, PermissionId::ViewDashboard).await?;

    let summary = DashboardRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}
