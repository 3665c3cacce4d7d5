use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::utils::error::AppError;

/// Lets the request through only once the auth provider has settled on a
/// user, and hands that user to the handler as an extension.
pub async fn require_user(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = state.auth.resolve(&cookie_jar).await;

    if auth.loading {
        return Err(AppError::Unavailable("Authentication is still loading".to_string()));
    }

    let user = auth
        .user
        .ok_or_else(|| AppError::AuthenticationError("Sign in required".to_string()))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
