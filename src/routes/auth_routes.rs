use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controllers::{logout, me};
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/me", get(me::me))
        .route("/logout", post(logout::logout))
        .with_state(state)
}
