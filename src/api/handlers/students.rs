//! Student resource handlers

use crate::{models::StudentFilter, state::AppState, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value as JsonValue;

pub async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Result<Response> {
    let students = state.students.list(filter).await?;

    Ok((StatusCode::OK, Json(students)).into_response())
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let student = state.students.get(id).await?;

    Ok((StatusCode::OK, Json(student)).into_response())
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let student = state.students.create(body).await?;

    Ok((StatusCode::CREATED, Json(student)).into_response())
}

pub async fn replace_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let student = state.students.replace(id, body).await?;

    Ok((StatusCode::OK, Json(student)).into_response())
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Result<Response> {
    let student = state.students.update(id, body).await?;

    Ok((StatusCode::OK, Json(student)).into_response())
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.students.delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
