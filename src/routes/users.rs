//! User directory endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::AppError;
use crate::gateway::CurrentUser;
use crate::models::user::{User, UserCreateRequest, UserListQuery, UserUpdateRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// List users with text search, status filter and exact role filter
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(query): Query<UserListQuery>,
) -> Json<Vec<User>> {
    Json(state.rbac.list_users(&query))
}

/// Create a user bound to a role by name
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing field, malformed email, or unknown role"),
        (status = 401, description = "Not signed in"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(req): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.rbac.create_user(&caller.actor(), req)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get one user
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.rbac.get_user(user_id)?))
}

/// Update user fields; changed fields re-validate as on create
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "User not found"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.rbac.update_user(&caller.actor(), user_id, req)?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    security(("gatewayAuth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.rbac.delete_user(&caller.actor(), user_id)?;
    Ok(StatusCode::NO_CONTENT)
}
