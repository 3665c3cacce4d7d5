use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::poll_models::{NewPoll, Poll};
use crate::services::auth_provider::AuthUser;
use crate::services::push::{notify, PushNotification, POLLS_TOPIC};
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewPoll>,
) -> AppResult<(StatusCode, Json<PollResponse>)> {
    let poll = Poll::from_draft(payload)?;
    let poll = state.polls.insert(poll).await?;

    let id = poll.id.map(|id| id.to_hex()).unwrap_or_default();
    info!(poll_id = %id, uid = %user.uid, "Poll created");

    notify(
        state.push.clone(),
        PushNotification::new(POLLS_TOPIC, "New poll", poll.title.clone())
            .with_data("pollId", id)
            .with_data("event", "created"),
    );

    Ok((StatusCode::CREATED, Json(PollResponse::from(poll))))
}
