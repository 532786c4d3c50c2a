use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use crate::modules::resources::adapters::inbound::http_support::{
    document_response, error_response,
};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.handlers.create.handle(&type_name, body).await {
        Ok(created) => document_response(StatusCode::CREATED, &created),
        Err(e) => error_response(e),
    }
}
