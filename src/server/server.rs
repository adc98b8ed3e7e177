use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::notification_routes::{
    create_notification, get_unread_count, get_user_notifications, update_notification,
};
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, notification_store: GuardedNotificationStore) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        notification_store,
        hash: env!("GIT_HASH").to_string(),
    };

    let notification_routes: Router = Router::new()
        .route("/notifications", post(create_notification))
        .route(
            "/notifications/{notification_id}",
            patch(update_notification),
        )
        .route(
            "/users/{user_id}/notifications",
            get(get_user_notifications),
        )
        .route("/users/{user_id}/unread-count", get(get_unread_count))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .merge(notification_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

pub async fn run_server(
    config: ServerConfig,
    notification_store: GuardedNotificationStore,
) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, notification_store);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Ready to serve at {}!", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
