//! Access evaluation endpoints: the route-guard decision and the menu the
//! caller may see. Both go through the one shared evaluator.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app::AppState;
use crate::authz::{visible_entries, AccessDecision, NavEntry, PolicyEvaluator};
use crate::errors::AppError;
use crate::gateway::Caller;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(evaluate))
        .route("/menu", get(menu))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EvaluateRequest {
    /// Navigation target key, e.g. `inventory`
    #[schema(example = "inventory")]
    pub target: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluateResponse {
    pub target: String,
    pub decision: AccessDecision,
}

/// Decide whether the caller may enter a navigation target.
/// Denials are normal outcomes here, not errors; only an unknown
/// target key is a 404.
#[utoipa::path(
    post,
    path = "/access/evaluate",
    tag = "Access",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Policy decision", body = EvaluateResponse),
        (status = 404, description = "Unknown navigation target"),
    )
)]
pub async fn evaluate(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let entry = state
        .nav
        .iter()
        .find(|e| e.key == req.target)
        .ok_or_else(|| AppError::not_found(format!("unknown target '{}'", req.target)))?;

    let decision = state.evaluator.evaluate(&identity, &entry.rule);
    Ok(Json(EvaluateResponse {
        target: req.target,
        decision,
    }))
}

/// Menu entries visible to the caller; denied entries are omitted entirely
#[utoipa::path(
    get,
    path = "/access/menu",
    tag = "Access",
    responses(
        (status = 200, description = "Visible menu entries", body = Vec<NavEntry>),
    )
)]
pub async fn menu(State(state): State<AppState>, Caller(identity): Caller) -> Json<Vec<NavEntry>> {
    let visible = visible_entries(state.evaluator.as_ref(), &identity, &state.nav);
    Json(visible.into_iter().cloned().collect())
}
