use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Build the JSON error body every Docket service returns:
/// `{"kind": "<SCREAMING_SNAKE>", "message": "<human readable>"}`.
///
/// Logging is left to the caller, which still holds the error source.
pub fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    let body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    (status, axum::Json(body)).into_response()
}

/// Body for successful operations that have nothing else to return (deletes, bulk updates).
pub fn message_response(message: impl Into<String>) -> Response {
    axum::Json(serde_json::json!({ "message": message.into() })).into_response()
}
