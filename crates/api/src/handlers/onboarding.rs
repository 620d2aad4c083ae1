//! Handlers for the onboarding flow.
//!
//! Each completed step is logged as an idempotent `(user, step)` upsert; the
//! completion endpoint replays the logged data in flow order, persists the
//! accumulated form onto the profile, and flips `onboarding_completed`.

use axum::extract::{Path, State};
use axum::Json;
use wallhub_core::error::CoreError;
use wallhub_core::onboarding::{OnboardingFlow, OnboardingStep, StepData};
use wallhub_db::models::notification::NotificationKind;
use wallhub_db::models::onboarding::OnboardingRecord;
use wallhub_db::models::profile::ProfileResponse;
use wallhub_db::repositories::{OnboardingRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::notifications::notify;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/onboarding/steps
///
/// The authenticated user's step log.
pub async fn list_steps(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<OnboardingRecord>>>> {
    let records = OnboardingRepo::list_steps(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/onboarding/steps/{step_name}
///
/// Record a completed step with its form data. Re-submitting the same step
/// overwrites the earlier record.
pub async fn complete_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(step_name): Path<String>,
    Json(input): Json<StepData>,
) -> AppResult<Json<DataResponse<OnboardingRecord>>> {
    let step = OnboardingStep::parse(&step_name).map_err(AppError::Core)?;

    let data = serde_json::to_value(&input)
        .map_err(|e| AppError::InternalError(format!("Step data serialization error: {e}")))?;
    let record = OnboardingRepo::upsert_step(&state.pool, auth.user_id, step.name(), &data).await?;

    tracing::info!(user_id = auth.user_id, step = step.name(), "Onboarding step completed");

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/onboarding/complete
///
/// Finish the flow: replay the logged step data in flow order, merge any
/// final payload, persist the accumulated form onto the profile, and set
/// `onboarding_completed`. This is the only place that flips the flag, and
/// it is never reset.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(extra): Json<StepData>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let records = OnboardingRepo::list_steps(&state.pool, auth.user_id).await?;

    let logged = records.into_iter().filter_map(|record| {
        // Steps are validated at write time, so an unknown name here means
        // the catalog shrank; skip rather than fail the whole completion.
        let step = match OnboardingStep::parse(&record.step_name) {
            Ok(step) => step,
            Err(_) => {
                tracing::warn!(
                    user_id = record.user_id,
                    step = %record.step_name,
                    "Skipping unknown onboarding step record",
                );
                return None;
            }
        };
        let data: StepData = serde_json::from_value(record.data).unwrap_or_default();
        Some((step, data))
    });

    let mut form = OnboardingFlow::replay(logged);
    form.merge(extra);

    let profile = ProfileRepo::complete_onboarding(&state.pool, auth.user_id, &form)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    // Log the terminal step with the final form so the record trail is
    // self-contained.
    let final_data = serde_json::to_value(&form)
        .map_err(|e| AppError::InternalError(format!("Form serialization error: {e}")))?;
    OnboardingRepo::upsert_step(
        &state.pool,
        auth.user_id,
        OnboardingStep::Complete.name(),
        &final_data,
    )
    .await?;

    notify(
        &state.pool,
        auth.user_id,
        NotificationKind::Success,
        "Welcome to Wallhub! Your profile is all set up.",
    )
    .await;

    tracing::info!(user_id = auth.user_id, "Onboarding completed");

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}
