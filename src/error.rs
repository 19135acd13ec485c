//! Application error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified error type for the whole crate.
///
/// Services and the store return this directly; handlers bubble it up with
/// `?` and the `IntoResponse` impl turns it into the wire contract:
/// 400 for invalid input, 404 for missing records, 500 for everything else.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or incomplete request payload (missing/mistyped fields).
    #[error("{0}")]
    Validation(String),

    /// Declarative payload validation failed; carries per-field detail.
    #[error("validation failed")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::Invalid(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::Invalid(_) => "validation",
            Error::NotFound(_) => "not-found",
            Error::Database(_) => "database",
            Error::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail stays in the logs, not on the wire.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut error = json!({
            "code": self.code(),
            "message": message,
        });

        if let Error::Invalid(errors) = &self {
            let fields: serde_json::Map<String, serde_json::Value> = errors
                .field_errors()
                .iter()
                .map(|(field, errs)| {
                    let messages: Vec<String> = errs
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    (field.to_string(), json!(messages))
                })
                .collect();
            error["fields"] = serde_json::Value::Object(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
