pub mod auth_routes;
pub mod flow_routes;
pub mod notification_routes;
pub mod poll_routes;

use std::time::Instant;

use axum::{extract::State, response::Json, routing::get, Router};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::state::AppState;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn app(state: AppState) -> Router {
    Lazy::force(&START_TIME);

    Router::new()
        .route("/", get(root).with_state(state.clone()))
        .nest("/api/auth", auth_routes::auth_routes(state.clone()))
        .nest("/api/polls", poll_routes::poll_routes(state.clone()))
        .nest("/api/notifications", notification_routes::notification_routes())
        .nest("/api/flows", flow_routes::flow_routes(state))
}

fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    let uptime = format_uptime(START_TIME.elapsed().as_secs());

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {uptime}"),
        "services": {
            "auth": state.auth.name(),
            "push": state.push.name(),
            "firebase": state.firebase.status(),
        }
    }))
}
