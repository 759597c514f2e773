//! Activity log reads. The log has no write surface of its own; entries are
//! appended by role and user mutations.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::app::AppState;
use crate::gateway::CurrentUser;
use crate::models::activity::ActivityEntry;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activity))
        .route("/actors/:actor_id", get(list_activity_by_actor))
}

/// Full activity log, newest first
#[utoipa::path(
    get,
    path = "/activity",
    tag = "Activity",
    responses(
        (status = 200, description = "Activity entries, newest first", body = Vec<ActivityEntry>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn list_activity(
    State(state): State<AppState>,
    _caller: CurrentUser,
) -> Json<Vec<ActivityEntry>> {
    Json(state.rbac.activity())
}

/// Activity entries recorded for one acting user, newest first
#[utoipa::path(
    get,
    path = "/activity/actors/{actor_id}",
    tag = "Activity",
    params(("actor_id" = Uuid, Path, description = "Acting user ID")),
    responses(
        (status = 200, description = "That actor's entries, newest first", body = Vec<ActivityEntry>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn list_activity_by_actor(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(actor_id): Path<Uuid>,
) -> Json<Vec<ActivityEntry>> {
    Json(state.rbac.activity_by_actor(actor_id))
}
