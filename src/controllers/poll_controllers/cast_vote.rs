use axum::{
    extract::{Extension, Path, State},
    Json,
};
use tracing::debug;

use crate::controllers::poll_controllers::models::{CastVoteRequest, PollResponse};
use crate::services::auth_provider::AuthUser;
use crate::state::AppState;
use crate::store::parse_poll_id;
use crate::utils::error::AppResult;

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<PollResponse>> {
    let id = parse_poll_id(&poll_id)?;

    let poll = state.polls.cast_vote(id, payload.option_key.clone()).await?;
    debug!(poll_id = %poll_id, option = %payload.option_key, uid = %user.uid, "Vote recorded");

    Ok(Json(PollResponse::from(poll)))
}
