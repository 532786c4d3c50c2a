use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::modules::resources::adapters::inbound::http_support::{
    document_response, error_response, message_response, precondition_header,
};
use crate::modules::resources::use_cases::get_resource::handler::GetOutcome;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path((type_name, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let prev = match precondition_header(&headers, header::IF_NONE_MATCH) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .handlers
        .get
        .handle(&type_name, &id, prev.as_ref())
        .await
    {
        Ok(GetOutcome::Found(object)) => document_response(StatusCode::OK, &object),
        Ok(GetOutcome::NotModified(metadata)) => (
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, format!("\"{}\"", metadata.etag))],
        )
            .into_response(),
        Ok(GetOutcome::Missing) => {
            message_response(StatusCode::NOT_FOUND, format!("{type_name} {id} not found"))
        }
        Err(e) => error_response(e),
    }
}
