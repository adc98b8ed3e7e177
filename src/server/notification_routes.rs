//! Notification API endpoints.
//!
//! Request bodies are decoded by key presence: a body that is not a JSON
//! object is treated like an empty one, present values are coerced the way
//! loosely typed callers expect (numbers become text, `unread` follows JSON
//! truthiness).

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;
use super::state::GuardedNotificationStore;
use crate::notifications::{NewNotification, Notification, ValidationError};

#[derive(Serialize)]
struct CreateNotificationResponse {
    #[serde(flatten)]
    notification: Notification,
    message: &'static str,
}

#[derive(Serialize)]
struct UserNotificationsResponse {
    user_id: String,
    notifications: Vec<Notification>,
}

#[derive(Serialize)]
struct UnreadCountResponse {
    user_id: String,
    unread_count: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

fn parse_body(body: &Bytes) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            debug!("Request body is not a JSON object: {}", other);
            Map::new()
        }
        Err(err) => {
            debug!("Unreadable request body: {}", err);
            Map::new()
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Only plain digit strings name a notification, signs are not accepted.
fn parse_notification_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// POST /notifications - Store a notification sent by another service
pub async fn create_notification(
    State(store): State<GuardedNotificationStore>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let fields = parse_body(&body);
    let user_id = fields
        .get("user_id")
        .filter(|value| is_truthy(value))
        .map(as_text);
    let notification_description = fields
        .get("notification_description")
        .filter(|value| !value.is_null())
        .map(as_text);
    let new_notification =
        NewNotification::new(user_id.as_deref(), notification_description.as_deref())?;

    let notification = store.create_notification(new_notification)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNotificationResponse {
            notification,
            message: "Notification received",
        }),
    )
        .into_response())
}

/// GET /users/{user_id}/notifications - All notifications of a user, newest first
pub async fn get_user_notifications(
    State(store): State<GuardedNotificationStore>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let notifications = store.get_user_notifications(&user_id)?;
    Ok(Json(UserNotificationsResponse {
        user_id,
        notifications,
    })
    .into_response())
}

/// GET /users/{user_id}/unread-count
pub async fn get_unread_count(
    State(store): State<GuardedNotificationStore>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let unread_count = store.get_unread_count(&user_id)?;
    Ok(Json(UnreadCountResponse {
        user_id,
        unread_count,
    })
    .into_response())
}

/// PATCH /notifications/{notification_id} - Set the unread flag
///
/// Unknown ids are reported as updated, nothing is changed. A path segment
/// that is not an unsigned integer does not name a notification at all.
pub async fn update_notification(
    State(store): State<GuardedNotificationStore>,
    Path(raw_notification_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let notification_id =
        parse_notification_id(&raw_notification_id).ok_or(ApiError::NotFound)?;
    let unread = parse_body(&body)
        .get("unread")
        .map(is_truthy)
        .ok_or(ValidationError::MissingUnread)?;

    if !store.set_notification_unread(notification_id, unread)? {
        debug!(
            "Notification {} does not exist, nothing updated",
            notification_id
        );
    }

    Ok(Json(MessageResponse {
        message: "Notification updated",
    })
    .into_response())
}
