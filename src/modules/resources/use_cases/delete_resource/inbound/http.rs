use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::modules::resources::adapters::inbound::http_support::{
    error_response, precondition_header,
};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path((type_name, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let prev = match precondition_header(&headers, header::IF_MATCH) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .handlers
        .delete
        .handle(&type_name, &id, prev.as_ref())
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
