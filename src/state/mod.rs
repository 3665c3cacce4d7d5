use std::sync::Arc;

use crate::flows::FlowRegistry;
use crate::services::{auth_provider::AuthProvider, firebase_admin::FirebaseAdmin, push::PushProvider};
use crate::store::PollStore;

#[derive(Clone)]
pub struct AppState {
    pub polls: Arc<dyn PollStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub push: Arc<dyn PushProvider>,
    pub firebase: Arc<FirebaseAdmin>,
    pub flows: Arc<FlowRegistry>,
}

impl AppState {
    pub fn new(
        polls: Arc<dyn PollStore>,
        auth: Arc<dyn AuthProvider>,
        push: Arc<dyn PushProvider>,
        firebase: Arc<FirebaseAdmin>,
        flows: Arc<FlowRegistry>,
    ) -> Self {
        Self { polls, auth, push, firebase, flows }
    }
}
