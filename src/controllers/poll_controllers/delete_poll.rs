use axum::{
    extract::{Extension, Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::DeletePollResponse;
use crate::services::auth_provider::AuthUser;
use crate::state::AppState;
use crate::store::{parse_poll_id, poll_not_found};
use crate::utils::error::AppResult;

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<DeletePollResponse>> {
    let id = parse_poll_id(&poll_id)?;

    if !state.polls.delete(id).await? {
        return Err(poll_not_found());
    }
    info!(poll_id = %poll_id, uid = %user.uid, "Poll deleted");

    Ok(Json(DeletePollResponse { deleted: true }))
}
