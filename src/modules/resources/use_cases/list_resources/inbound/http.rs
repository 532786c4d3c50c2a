use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use crate::modules::resources::adapters::inbound::http_support::{
    error_response, message_response,
};
use crate::modules::resources::core::list::ListOpts;
use crate::shell::state::AppState;

/// `GET /{type_name}?text=foo&num[gt]=3&_sort=+text,-num&_after=<id>&_offset=0&_limit=20`
pub async fn handle(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let opts = match ListOpts::from_query_pairs(params) {
        Ok(o) => o,
        Err(e) => return message_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.handlers.list.handle(&type_name, &opts).await {
        Ok(objects) => Json(
            objects
                .iter()
                .map(|o| o.to_document())
                .collect::<Vec<Value>>(),
        )
        .into_response(),
        Err(e) => error_response(e),
    }
}
