use axum::http::header::{HeaderValue, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::info;

use crate::utils::error::{AppError, AppResult};
use crate::utils::session::{expired_session_cookie, SESSION_COOKIE};

pub async fn logout(cookie_jar: CookieJar) -> AppResult<Response> {
    if cookie_jar.get(SESSION_COOKIE).is_some() {
        info!("Clearing session cookie");
    }

    let mut resp = Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
    .into_response();

    let cookie = HeaderValue::from_str(&expired_session_cookie())
        .map_err(|e| AppError::InternalError(format!("Invalid cookie header: {e}")))?;
    resp.headers_mut().insert(SET_COOKIE, cookie);

    Ok(resp)
}
