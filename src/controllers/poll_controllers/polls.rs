use axum::{
    extract::{Query, State},
    Json,
};

use crate::controllers::poll_controllers::models::{ListPollsQuery, PollResponse};
use crate::state::AppState;
use crate::store::PollFilter;
use crate::utils::error::AppResult;

pub async fn get_all_polls(
    State(state): State<AppState>,
    Query(query): Query<ListPollsQuery>,
) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = state
        .polls
        .list(PollFilter { active: query.active })
        .await?;

    Ok(Json(polls.into_iter().map(PollResponse::from).collect()))
}
