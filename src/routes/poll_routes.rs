use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::controllers::poll_controllers::{
    cast_vote, close_poll, create_poll, delete_poll, get_poll, get_results, polls,
};
use crate::middleware::auth::require_user;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    let signed_in = middleware::from_fn_with_state(state.clone(), require_user);

    Router::new()
        .route("/", get(polls::get_all_polls))
        .route("/create", post(create_poll::create_poll).route_layer(signed_in.clone()))
        .route(
            "/:poll_id",
            get(get_poll::get_poll)
                .merge(delete(delete_poll::delete_poll).route_layer(signed_in.clone())),
        )
        .route("/:poll_id/results", get(get_results::get_results))
        .route("/:poll_id/vote", post(cast_vote::cast_vote).route_layer(signed_in.clone()))
        .route("/:poll_id/close", post(close_poll::close_poll).route_layer(signed_in))
        .with_state(state)
}
