//! Data model: persisted records, request payloads, and list filters

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

/// A course as stored and as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A student with the ids of the courses they are enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub courses: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourse {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    /// Course ids to enroll in. Every id must refer to an existing course.
    #[serde(default)]
    pub courses: Vec<i64>,
}

/// Partial update: absent fields are left unchanged. An explicit `courses`
/// list replaces the enrollment set wholesale.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub courses: Option<Vec<i64>>,
}

/// Exact-match predicates for course listing, bound straight from the
/// query string. When several are supplied the most specific wins: `id`
/// over `name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Exact-match predicates for student listing. Precedence when several are
/// supplied: `id`, then `name`, then `course` (enrollment).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub course: Option<i64>,
}

/// Decode a JSON body into a typed payload.
///
/// Bodies are extracted as raw JSON so that shape errors (missing or
/// mistyped fields) surface as a 400 with the serde message rather than
/// the framework's 422 rejection.
pub fn decode<T: DeserializeOwned>(value: JsonValue) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Validation(e.to_string()))
}
