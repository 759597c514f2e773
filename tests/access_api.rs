use std::sync::Arc;

use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

use helmdesk::store::{Rbac, RbacConfig};
use helmdesk::{create_app, AppState};

fn app() -> Router {
    create_app(AppState::new(Arc::new(Rbac::new(RbacConfig::default()))))
}

async fn evaluate(app: &Router, role: Option<&str>, target: &str) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method("POST").uri("/access/evaluate");
    if let Some(role) = role {
        builder = builder
            .header("x-user-id", Uuid::new_v4().to_string())
            .header("x-user-name", "Someone")
            .header("x-user-role", role);
    }
    let req = builder
        .header("content-type", "application/json")
        .body(Body::from(json!({ "target": target }).to_string()))?;

    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn menu(app: &Router, role: Option<&str>) -> Result<Vec<String>> {
    let mut builder = Request::builder().uri("/access/menu");
    if let Some(role) = role {
        builder = builder
            .header("x-user-id", Uuid::new_v4().to_string())
            .header("x-user-name", "Someone")
            .header("x-user-role", role);
    }
    let resp = app.clone().oneshot(builder.body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value: Value = serde_json::from_slice(&bytes)?;
    Ok(value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap().to_string())
        .collect())
}

#[tokio::test]
async fn viewer_is_unauthorized_where_admin_is_granted() -> Result<()> {
    let app = app();

    // inventory is restricted to Admin/Manager
    let (status, body) = evaluate(&app, Some("Viewer"), "inventory").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "redirect_to_unauthorized");

    let (_, body) = evaluate(&app, Some("Admin"), "inventory").await?;
    assert_eq!(body["decision"], "granted");
    Ok(())
}

#[tokio::test]
async fn anonymous_caller_is_redirected_to_sign_in() -> Result<()> {
    let app = app();
    let (status, body) = evaluate(&app, None, "dashboard").await?;
    assert_eq!(status, StatusCode::OK, "a denial is not an error");
    assert_eq!(body["decision"], "redirect_to_sign_in");
    Ok(())
}

#[tokio::test]
async fn role_match_is_case_insensitive() -> Result<()> {
    let app = app();
    let (_, body) = evaluate(&app, Some("mAnAgEr"), "orders").await?;
    assert_eq!(body["decision"], "granted");
    Ok(())
}

#[tokio::test]
async fn unknown_target_is_not_found() -> Result<()> {
    let app = app();
    let (status, _) = evaluate(&app, Some("Admin"), "secret-lab").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn repeated_evaluation_is_stable() -> Result<()> {
    let app = app();
    let (_, first) = evaluate(&app, Some("Viewer"), "reports").await?;
    for _ in 0..3 {
        let (_, again) = evaluate(&app, Some("Viewer"), "reports").await?;
        assert_eq!(again["decision"], first["decision"]);
    }
    Ok(())
}

#[tokio::test]
async fn menu_visibility_matches_enforcement() -> Result<()> {
    let app = app();

    assert!(menu(&app, None).await?.is_empty());

    let manager_menu = menu(&app, Some("Manager")).await?;
    assert!(manager_menu.contains(&"inventory".to_string()));
    assert!(!manager_menu.contains(&"settings".to_string()));

    // every visible entry must evaluate to granted, and no hidden entry may
    for key in &manager_menu {
        let (_, body) = evaluate(&app, Some("Manager"), key).await?;
        assert_eq!(body["decision"], "granted", "{key} visible but denied");
    }
    let (_, body) = evaluate(&app, Some("Manager"), "settings").await?;
    assert_eq!(body["decision"], "redirect_to_unauthorized");
    Ok(())
}
