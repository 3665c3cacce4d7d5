use axum::{extract::State, Json};

use crate::flows::FlowInfo;
use crate::state::AppState;

pub async fn list_flows(State(state): State<AppState>) -> Json<Vec<FlowInfo>> {
    Json(state.flows.describe())
}
