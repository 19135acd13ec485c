//! Course resource handlers

use crate::{models::CourseFilter, state::AppState, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value as JsonValue;

pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Response> {
    let courses = state.courses.list(filter).await?;

    Ok((StatusCode::OK, Json(courses)).into_response())
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let course = state.courses.get(id).await?;

    Ok((StatusCode::OK, Json(course)).into_response())
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let course = state.courses.create(body).await?;

    Ok((StatusCode::CREATED, Json(course)).into_response())
}

pub async fn replace_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let course = state.courses.replace(id, body).await?;

    Ok((StatusCode::OK, Json(course)).into_response())
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let course = state.courses.update(id, body).await?;

    Ok((StatusCode::OK, Json(course)).into_response())
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.courses.delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
