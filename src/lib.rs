//! Notification Store Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod notifications;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use notifications::{NotificationStore, SqliteNotificationStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
