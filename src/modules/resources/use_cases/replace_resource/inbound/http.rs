use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::modules::resources::adapters::inbound::http_support::{
    document_response, error_response, precondition_header,
};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path((type_name, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let prev = match precondition_header(&headers, header::IF_MATCH) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .handlers
        .replace
        .handle(&type_name, &id, body, prev.as_ref())
        .await
    {
        Ok(replaced) => document_response(StatusCode::OK, &replaced),
        Err(e) => error_response(e),
    }
}
