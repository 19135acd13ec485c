//! Health endpoint tests

use crate::support::{assert_status, parse_json, with_test_app};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_returns_ok() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app.request(Method::GET, "/health", None).await?;

            assert_status(status, StatusCode::OK, "health check");
            let data = parse_json(&body)?;
            assert_eq!(data["status"], "ok");
            assert!(data["version"].is_string());

            Ok(())
        })
    })
    .await
}
