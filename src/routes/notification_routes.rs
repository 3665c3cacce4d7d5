use axum::{routing::get, Router};

use crate::controllers::notification_controllers::get_token;

pub fn notification_routes() -> Router {
    Router::new().route("/token", get(get_token::get_token))
}
