use std::sync::Arc;

use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt; // for `oneshot`

use helmdesk::store::{Rbac, RbacConfig};
use helmdesk::{create_app, AppState};

#[tokio::test]
async fn health_answers_without_identity() -> Result<()> {
    let app = create_app(AppState::new(Arc::new(Rbac::new(RbacConfig::default()))));

    let req = Request::builder().uri("/health").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(value["status"], "ok");
    Ok(())
}
