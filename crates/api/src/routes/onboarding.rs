//! Route definitions for the onboarding flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET  /steps              -> list_steps
/// POST /steps/{step_name}  -> complete_step (idempotent upsert)
/// POST /complete           -> complete (flips onboarding_completed)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/steps", get(onboarding::list_steps))
        .route("/steps/{step_name}", post(onboarding::complete_step))
        .route("/complete", post(onboarding::complete))
}
