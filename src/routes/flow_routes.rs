use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::flow_controllers::{list_flows, run_flow};
use crate::state::AppState;

pub fn flow_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_flows::list_flows))
        .route("/:name", post(run_flow::run_flow))
        .with_state(state)
}
