//! Notification data models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted notification.
///
/// `notification_id` and `created_at` are assigned by the store, `unread`
/// is the only field that changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub user_id: String,
    pub notification_description: String,
    /// RFC 3339, UTC, microsecond precision.
    pub created_at: String,
    pub unread: bool,
}

/// A validated notification that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    user_id: String,
    notification_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user_id and notification_description are required")]
    MissingNotificationFields,

    #[error("Must include 'unread' true or false")]
    MissingUnread,
}

impl NewNotification {
    /// Trims both fields. `user_id` must not be empty afterwards,
    /// an empty description is accepted.
    pub fn new(
        user_id: Option<&str>,
        notification_description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let (Some(user_id), Some(notification_description)) = (user_id, notification_description)
        else {
            return Err(ValidationError::MissingNotificationFields);
        };

        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ValidationError::MissingNotificationFields);
        }

        Ok(Self {
            user_id: user_id.to_string(),
            notification_description: notification_description.trim().to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn notification_description(&self) -> &str {
        &self.notification_description
    }

    pub fn into_parts(self) -> (String, String) {
        (self.user_id, self.notification_description)
    }
}
