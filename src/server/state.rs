use axum::extract::FromRef;

use crate::notifications::NotificationStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedNotificationStore = Arc<dyn NotificationStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub notification_store: GuardedNotificationStore,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedNotificationStore {
    fn from_ref(input: &ServerState) -> Self {
        input.notification_store.clone()
    }
}
