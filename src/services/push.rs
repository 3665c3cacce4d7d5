use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::firebase_admin::{FirebaseAdmin, Message, Messaging, Notification};
use super::firebase_compat::NoopPushProvider;
use crate::config::PushKind;
use crate::utils::error::AppResult;

pub const POLLS_TOPIC: &str = "polls";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PushNotification {
    pub topic: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl PushNotification {
    pub fn new(topic: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

pub trait PushProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deliver a notification. `Ok(None)` means nothing was sent.
    fn send<'a>(&'a self, notification: &'a PushNotification) -> BoxFuture<'a, AppResult<Option<String>>>;
}

pub struct FcmPushProvider {
    messaging: Messaging,
}

impl FcmPushProvider {
    pub fn new(messaging: Messaging) -> Self {
        Self { messaging }
    }
}

impl PushProvider for FcmPushProvider {
    fn name(&self) -> &'static str {
        "fcm"
    }

    fn send<'a>(&'a self, notification: &'a PushNotification) -> BoxFuture<'a, AppResult<Option<String>>> {
        async move {
            let mut message = Message::to_topic(
                notification.topic.clone(),
                Notification {
                    title: notification.title.clone(),
                    body: notification.body.clone(),
                },
            );
            message.data = notification.data.clone();
            let name = self.messaging.send(&message).await?;
            Ok(Some(name))
        }
        .boxed()
    }
}

pub fn select_push_provider(kind: PushKind, admin: &FirebaseAdmin) -> Arc<dyn PushProvider> {
    match (kind, admin.admin_messaging()) {
        (PushKind::Fcm, Some(messaging)) => {
            info!("Push notifications delivered through FCM");
            Arc::new(FcmPushProvider::new(messaging.clone()))
        }
        (PushKind::Fcm, None) => {
            warn!("PUSH_PROVIDER=fcm but Firebase messaging is unavailable, notifications disabled");
            Arc::new(NoopPushProvider)
        }
        (PushKind::Noop, _) => Arc::new(NoopPushProvider),
    }
}

/// Fire-and-forget delivery; failures are logged, never returned.
pub fn notify(provider: Arc<dyn PushProvider>, notification: PushNotification) {
    tokio::spawn(async move {
        if let Err(e) = provider.send(&notification).await {
            warn!(provider = provider.name(), topic = %notification.topic, "Push delivery failed: {e}");
        }
    });
}
