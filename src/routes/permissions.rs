//! Permission catalog reads. The catalog is seeded configuration data;
//! there are no write endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app::AppState;
use crate::gateway::CurrentUser;
use crate::models::permission::{Permission, PermissionGroup};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_permissions))
        .route("/grouped", get(grouped_permissions))
}

/// List the full permission catalog in catalog order
#[utoipa::path(
    get,
    path = "/permissions",
    tag = "Permissions",
    responses(
        (status = 200, description = "Permission catalog", body = Vec<Permission>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn list_permissions(
    State(state): State<AppState>,
    _caller: CurrentUser,
) -> Json<Vec<Permission>> {
    Json(state.rbac.catalog.list().to_vec())
}

/// Catalog grouped by category, for the role editor's bulk selection
#[utoipa::path(
    get,
    path = "/permissions/grouped",
    tag = "Permissions",
    responses(
        (status = 200, description = "Catalog grouped by category", body = Vec<PermissionGroup>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn grouped_permissions(
    State(state): State<AppState>,
    _caller: CurrentUser,
) -> Json<Vec<PermissionGroup>> {
    Json(state.rbac.catalog.grouped())
}
