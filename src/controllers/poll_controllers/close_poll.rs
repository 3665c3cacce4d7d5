use axum::{
    extract::{Extension, Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::PollResponse;
use crate::services::auth_provider::AuthUser;
use crate::services::push::{notify, PushNotification, POLLS_TOPIC};
use crate::state::AppState;
use crate::store::{parse_poll_id, ClosedPoll};
use crate::utils::error::AppResult;

pub async fn close_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<PollResponse>> {
    let id = parse_poll_id(&poll_id)?;

    let ClosedPoll { poll, changed } = state.polls.close(id).await?;
    if !changed {
        info!(poll_id = %poll_id, "Poll already closed");
        return Ok(Json(PollResponse::from(poll)));
    }
    info!(poll_id = %poll_id, uid = %user.uid, "Poll closed");

    notify(
        state.push.clone(),
        PushNotification::new(POLLS_TOPIC, "Poll closed", poll.title.clone())
            .with_data("pollId", poll_id)
            .with_data("event", "closed"),
    );

    Ok(Json(PollResponse::from(poll)))
}
