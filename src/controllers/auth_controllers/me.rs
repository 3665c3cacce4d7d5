use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::services::auth_provider::AuthState;
use crate::state::AppState;

pub async fn me(State(state): State<AppState>, cookie_jar: CookieJar) -> Json<AuthState> {
    Json(state.auth.resolve(&cookie_jar).await)
}
