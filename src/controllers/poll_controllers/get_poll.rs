use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::state::AppState;
use crate::store::{parse_poll_id, poll_not_found};
use crate::utils::error::AppResult;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let id = parse_poll_id(&poll_id)?;

    let poll = state.polls.find(id).await?.ok_or_else(poll_not_found)?;

    Ok(Json(PollResponse::from(poll)))
}
