use axum_extra::extract::cookie::CookieJar;
use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::session::{self, SESSION_COOKIE};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_logged_in: bool,
}

/// What the UI gets back: a user once resolved, and whether resolution is
/// still pending. Callers gate on `loading` before trusting `user`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }
}

pub trait AuthProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve<'a>(&'a self, cookies: &'a CookieJar) -> BoxFuture<'a, AuthState>;
}

/// Development stand-in: everyone is the same logged-in user.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockAuthProvider;

impl MockAuthProvider {
    pub fn user() -> AuthUser {
        AuthUser {
            uid: "mock-user-id".to_string(),
            email: Some("dev@example.com".to_string()),
            display_name: Some("Dev User".to_string()),
            is_logged_in: true,
        }
    }
}

impl AuthProvider for MockAuthProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn resolve<'a>(&'a self, _cookies: &'a CookieJar) -> BoxFuture<'a, AuthState> {
        future::ready(AuthState {
            user: Some(Self::user()),
            loading: false,
        })
        .boxed()
    }
}

/// Verifies the `session_token` cookie issued by the identity service.
pub struct SessionAuthProvider {
    secret: String,
}

impl SessionAuthProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl AuthProvider for SessionAuthProvider {
    fn name(&self) -> &'static str {
        "session"
    }

    fn resolve<'a>(&'a self, cookies: &'a CookieJar) -> BoxFuture<'a, AuthState> {
        let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return future::ready(AuthState::signed_out()).boxed();
        };

        let state = match session::verify_token(&self.secret, &token) {
            Ok(claims) => AuthState {
                user: Some(AuthUser {
                    uid: claims.sub,
                    email: claims.email,
                    display_name: claims.name,
                    is_logged_in: true,
                }),
                loading: false,
            },
            Err(e) => {
                debug!("Rejected session token: {e}");
                AuthState::signed_out()
            }
        };
        future::ready(state).boxed()
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Cookie;

    use super::*;

    #[tokio::test]
    async fn mock_is_always_logged_in() {
        let state = MockAuthProvider.resolve(&CookieJar::new()).await;

        assert!(!state.loading);
        let user = state.user.unwrap();
        assert!(user.is_logged_in);
        assert_eq!(user, MockAuthProvider::user());
    }

    #[tokio::test]
    async fn session_without_cookie_is_signed_out() {
        let provider = SessionAuthProvider::new("secret");
        let state = provider.resolve(&CookieJar::new()).await;
        assert_eq!(state, AuthState::signed_out());
    }

    #[tokio::test]
    async fn session_with_valid_cookie_resolves_user() {
        let token = session::create_token("secret", "u-42", Some("u@x.io"), Some("U")).unwrap();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, token));

        let state = SessionAuthProvider::new("secret").resolve(&jar).await;
        let user = state.user.unwrap();
        assert_eq!(user.uid, "u-42");
        assert_eq!(user.display_name.as_deref(), Some("U"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn session_with_forged_cookie_is_signed_out() {
        let token = session::create_token("attacker", "u-42", None, None).unwrap();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, token));

        let state = SessionAuthProvider::new("secret").resolve(&jar).await;
        assert!(state.user.is_none());
    }

    #[test]
    fn auth_user_uses_camel_case() {
        let value = serde_json::to_value(MockAuthProvider::user()).unwrap();
        assert_eq!(value["isLoggedIn"], serde_json::json!(true));
        assert_eq!(value["displayName"], serde_json::json!("Dev User"));
    }
}
