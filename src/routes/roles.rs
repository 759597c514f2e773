//! Role registry endpoints. Every successful mutation lands one entry in
//! the activity log; deletion is refused while users still hold the role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::AppError;
use crate::gateway::CurrentUser;
use crate::models::role::{RoleCreateRequest, RoleListQuery, RoleUpdateRequest, RoleWithCount};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route(
            "/:role_id",
            get(get_role).put(update_role).delete(delete_role),
        )
}

/// List roles, optionally filtered by a name/description substring
#[utoipa::path(
    get,
    path = "/roles",
    tag = "Roles",
    params(RoleListQuery),
    responses(
        (status = 200, description = "Roles with live holder counts", body = Vec<RoleWithCount>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn list_roles(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(query): Query<RoleListQuery>,
) -> Json<Vec<RoleWithCount>> {
    Json(state.rbac.list_roles(query.search.as_deref()))
}

/// Create a role
#[utoipa::path(
    post,
    path = "/roles",
    tag = "Roles",
    request_body = RoleCreateRequest,
    responses(
        (status = 201, description = "Role created", body = RoleWithCount),
        (status = 400, description = "Missing field, empty permission set, or unknown permission"),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(req): Json<RoleCreateRequest>,
) -> Result<(StatusCode, Json<RoleWithCount>), AppError> {
    let role = state.rbac.create_role(&caller.actor(), req)?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Get one role
#[utoipa::path(
    get,
    path = "/roles/{role_id}",
    tag = "Roles",
    params(("role_id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = RoleWithCount),
        (status = 404, description = "Role not found"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn get_role(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleWithCount>, AppError> {
    Ok(Json(state.rbac.get_role(role_id)?))
}

/// Update name, description and/or permission set
#[utoipa::path(
    put,
    path = "/roles/{role_id}",
    tag = "Roles",
    params(("role_id" = Uuid, Path, description = "Role ID")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleWithCount),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Role not found"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(role_id): Path<Uuid>,
    Json(req): Json<RoleUpdateRequest>,
) -> Result<Json<RoleWithCount>, AppError> {
    Ok(Json(state.rbac.update_role(&caller.actor(), role_id, req)?))
}

/// Delete a role nobody holds
#[utoipa::path(
    delete,
    path = "/roles/{role_id}",
    tag = "Roles",
    params(("role_id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role still held by users; the message carries the count"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn delete_role(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(role_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.rbac.delete_role(&caller.actor(), role_id)?;
    Ok(StatusCode::NO_CONTENT)
}
