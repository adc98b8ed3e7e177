//! User notifications module

mod models;
mod schema;
mod sqlite_notification_store;
mod store;

pub use models::{NewNotification, Notification, ValidationError};
pub use schema::NOTIFICATION_VERSIONED_SCHEMAS;
pub use sqlite_notification_store::SqliteNotificationStore;
pub use store::NotificationStore;
