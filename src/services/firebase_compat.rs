//! Inert stand-ins for the old client-side Firebase integration.
//!
//! Legacy call sites keep resolving while the app moves off Firebase, but
//! nothing here talks to a backend: handles are absent, the config is empty,
//! tokens are empty strings and subscriptions never fire.

use futures::future::{self, BoxFuture, FutureExt};
use serde::Serialize;
use tracing::debug;

use super::push::{PushNotification, PushProvider};
use crate::utils::error::AppResult;

/// Placeholder type for the handles that used to be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyHandle {}

pub const DB: Option<LegacyHandle> = None;
pub const AUTH: Option<LegacyHandle> = None;
pub const MESSAGING: Option<LegacyHandle> = None;

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

pub fn firebase_config() -> FirebaseClientConfig {
    FirebaseClientConfig::default()
}

pub async fn get_token() -> String {
    String::new()
}

pub fn on_message<F>(_handler: F)
where
    F: Fn(PushNotification) + Send + 'static,
{
}

/// Push provider used while notifications are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPushProvider;

impl PushProvider for NoopPushProvider {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn send<'a>(&'a self, notification: &'a PushNotification) -> BoxFuture<'a, AppResult<Option<String>>> {
        debug!(topic = %notification.topic, title = %notification.title, "Push disabled, dropping notification");
        future::ready(Ok(None)).boxed()
    }
}
