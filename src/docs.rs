use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::authz;
use crate::models;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::permissions::list_permissions,
        routes::permissions::grouped_permissions,
        routes::roles::list_roles,
        routes::roles::create_role,
        routes::roles::get_role,
        routes::roles::update_role,
        routes::roles::delete_role,
        routes::users::list_users,
        routes::users::create_user,
        routes::users::get_user,
        routes::users::update_user,
        routes::users::delete_user,
        routes::activity::list_activity,
        routes::activity::list_activity_by_actor,
        routes::access::evaluate,
        routes::access::menu,
    ),
    components(
        schemas(
            models::permission::Permission,
            models::permission::PermissionCategory,
            models::permission::PermissionGroup,
            models::role::Role,
            models::role::RoleWithCount,
            models::role::RoleCreateRequest,
            models::role::RoleUpdateRequest,
            models::user::User,
            models::user::UserStatus,
            models::user::UserCreateRequest,
            models::user::UserUpdateRequest,
            models::activity::ActivityEntry,
            models::activity::ActivityAction,
            models::activity::ResourceKind,
            authz::AccessDecision,
            authz::AccessRule,
            authz::NavEntry,
            routes::access::EvaluateRequest,
            routes::access::EvaluateResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Permissions", description = "Read-only permission catalog"),
        (name = "Roles", description = "Role registry"),
        (name = "Users", description = "User directory"),
        (name = "Activity", description = "Append-only audit trail"),
        (name = "Access", description = "Policy evaluation and menu visibility")
    )
)]
pub struct ApiDoc;

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
    let mut doc = serde_json::to_value(ApiDoc::openapi())?;

    ensure_security_components(&mut doc);
    ensure_servers(&mut doc, port);

    Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> Router {
    let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
        .try_it_out_enabled(true)
        .with_credentials(true)
        .persist_authorization(true);

    let doc_json =
        Arc::new(serde_json::to_value(&doc).expect("OpenAPI serialization must succeed"));

    let json_route = {
        let doc_json = Arc::clone(&doc_json);
        get(move || {
            let doc_json = Arc::clone(&doc_json);
            async move { Json((*doc_json).clone()) }
        })
    };

    Router::new()
        .route("/api-docs/openapi.json", json_route)
        .merge(SwaggerUi::new("/docs").config(swagger_config))
}

/// The gateway identity headers, modeled as an apiKey scheme so Swagger UI's
/// Authorize dialog can set `x-user-id` for Try-it-out.
fn ensure_security_components(doc: &mut Value) {
    let components = doc
        .as_object_mut()
        .expect("openapi document is an object")
        .entry("components")
        .or_insert_with(|| json!({}));

    if let Some(components) = components.as_object_mut() {
        components.entry("securitySchemes").or_insert_with(|| {
            json!({
                "gatewayAuth": {
                    "type": "apiKey",
                    "in": "header",
                    "name": "x-user-id",
                    "description": "Caller id resolved by the upstream gateway; pair with x-user-name and x-user-role headers"
                }
            })
        });
    }
}

fn ensure_servers(doc: &mut Value, port: u16) {
    if doc.get("servers").is_none() {
        doc["servers"] = json!([
            { "url": format!("http://localhost:{}", port) }
        ]);
    }
}
