use axum::{
    Json,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::modules::resources::application::errors::ApplicationError;
use crate::modules::resources::core::decide::DecideError;
use crate::shared::core::precondition::Precondition;
use crate::shared::infrastructure::object_store::StoredObject;

pub fn document_response(status: StatusCode, object: &StoredObject) -> Response {
    (
        status,
        [(header::ETAG, format!("\"{}\"", object.metadata.etag))],
        Json(object.to_document()),
    )
        .into_response()
}

pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

pub fn error_response(err: ApplicationError) -> Response {
    let status = match &err {
        ApplicationError::UnknownType(_) => StatusCode::NOT_FOUND,
        ApplicationError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::Rejected(DecideError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ApplicationError::Rejected(DecideError::PreconditionFailed { .. }) => {
            StatusCode::PRECONDITION_FAILED
        }
        ApplicationError::Conflict { .. } => StatusCode::CONFLICT,
        ApplicationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, %status, "request rejected");
    }

    message_response(status, err.to_string())
}

/// Read an `If-Match` / `If-None-Match` style header. A malformed value is
/// answered with 400 instead of being ignored.
pub fn precondition_header(
    headers: &HeaderMap,
    name: HeaderName,
) -> Result<Option<Precondition>, Response> {
    let Some(raw) = headers.get(&name) else {
        return Ok(None);
    };
    let raw = raw.to_str().map_err(|_| {
        message_response(StatusCode::BAD_REQUEST, format!("{name} is not valid text"))
    })?;
    Precondition::parse(raw)
        .map(Some)
        .map_err(|e| message_response(StatusCode::BAD_REQUEST, format!("{name}: {e}")))
}
