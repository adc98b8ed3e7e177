//! Notification storage trait

use anyhow::Result;

use super::models::{NewNotification, Notification};

/// Trait for notification storage operations
pub trait NotificationStore: Send + Sync {
    /// Persist a notification. The store assigns the id and `created_at`,
    /// and the notification starts unread.
    fn create_notification(&self, notification: NewNotification) -> Result<Notification>;

    /// Get all notifications for a user, ordered by created_at DESC.
    /// Order among notifications sharing the same `created_at` is unspecified.
    fn get_user_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Get count of unread notifications for a user.
    fn get_unread_count(&self, user_id: &str) -> Result<usize>;

    /// Set the unread flag of a notification.
    /// Returns false if no notification has the given id.
    fn set_notification_unread(&self, notification_id: i64, unread: bool) -> Result<bool>;
}
