use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::{default_nav, NavEntry, RoleEvaluator};
use crate::routes::{access, activity, health, permissions, roles, users};
use crate::store::Rbac;

#[derive(Clone)]
pub struct AppState {
    pub rbac: Arc<Rbac>,
    pub evaluator: Arc<RoleEvaluator>,
    pub nav: Arc<Vec<NavEntry>>,
}

impl AppState {
    pub fn new(rbac: Arc<Rbac>) -> Self {
        let evaluator = Arc::new(RoleEvaluator::new(rbac.clone()));
        Self {
            rbac,
            evaluator,
            nav: Arc::new(default_nav()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .nest("/permissions", permissions::routes())
        .nest("/roles", roles::routes())
        .nest("/users", users::routes())
        .nest("/activity", activity::routes())
        .nest("/access", access::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
