use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::resources::use_cases::create_resource::inbound::http as create_http;
use crate::modules::resources::use_cases::delete_resource::inbound::http as delete_http;
use crate::modules::resources::use_cases::get_resource::inbound::http as get_http;
use crate::modules::resources::use_cases::list_resources::inbound::http as list_http;
use crate::modules::resources::use_cases::replace_resource::inbound::http as replace_http;
use crate::modules::resources::use_cases::update_resource::inbound::http as update_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{type_name}",
            post(create_http::handle).get(list_http::handle),
        )
        .route(
            "/{type_name}/{id}",
            get(get_http::handle)
                .put(replace_http::handle)
                .patch(update_http::handle)
                .delete(delete_http::handle),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
