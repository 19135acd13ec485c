//! Shared helpers for integration tests

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use coursebook::{
    api::create_router,
    config::{Config, DatabaseConfig, LoggingConfig, ServerConfig},
    state::{AppState, AppStateOptions},
};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::json;
use std::{future::Future, pin::Pin};
use tower::ServiceExt;

/// An application wired to a fresh in-memory database, driven in-process.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Send a request through the router and collect the response.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await?.to_bytes();

        Ok((parts.status, parts.headers, bytes))
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            // A single connection keeps the in-memory database alive and
            // private to the test.
            url: "sqlite::memory:".to_string(),
            pool_min_size: 1,
            pool_max_size: 1,
            pool_timeout_seconds: 5,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            json: false,
        },
    }
}

type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

pub async fn with_test_app<F>(test: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_test_app_with_config(|_| {}, test).await
}

pub async fn with_test_app_with_config<M, F>(mutate: M, test: F) -> anyhow::Result<()>
where
    M: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = test_config();
    mutate(&mut config);

    let state = AppState::new_with_options(
        config,
        AppStateOptions {
            run_migrations: true,
        },
    )
    .await?;

    let app = TestApp {
        router: create_router(state),
    };

    test(app).await
}

pub fn to_json_body(value: &impl Serialize) -> anyhow::Result<Body> {
    Ok(Body::from(serde_json::to_vec(value)?))
}

pub fn parse_json(bytes: &Bytes) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}");
}

/// Create a course through the API and return its JSON record.
pub async fn create_course(app: &TestApp, name: &str) -> anyhow::Result<serde_json::Value> {
    let (status, _headers, body) = app
        .request(
            Method::POST,
            "/api/v1/courses/",
            Some(to_json_body(&json!({ "name": name }))?),
        )
        .await?;
    assert_status(status, StatusCode::CREATED, "create course fixture");

    parse_json(&body)
}

/// Create `count` distinctly named courses, returned in creation order.
pub async fn seed_courses(
    app: &TestApp,
    count: usize,
) -> anyhow::Result<Vec<serde_json::Value>> {
    let mut created = Vec::with_capacity(count);
    for i in 0..count {
        created.push(create_course(app, &format!("Course {:02}", i + 1)).await?);
    }

    Ok(created)
}

/// Create a student enrolled in the given courses, returning the record.
pub async fn create_student(
    app: &TestApp,
    name: &str,
    courses: &[i64],
) -> anyhow::Result<serde_json::Value> {
    let (status, _headers, body) = app
        .request(
            Method::POST,
            "/api/v1/students/",
            Some(to_json_body(&json!({ "name": name, "courses": courses }))?),
        )
        .await?;
    assert_status(status, StatusCode::CREATED, "create student fixture");

    parse_json(&body)
}
