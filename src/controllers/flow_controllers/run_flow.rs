use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn run_flow(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<Value>,
) -> AppResult<Json<Value>> {
    let flow = state
        .flows
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Flow '{name}' is not registered")))?;

    info!(flow = %name, "Running flow");
    Ok(Json(flow.run(input).await?))
}
