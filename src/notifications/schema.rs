//! SQLite schema definitions for the notifications database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Notifications
// =============================================================================

pub(super) const NOTIFICATIONS_TABLE_V1: Table = Table {
    name: "notifications",
    columns: &[
        sqlite_column!(
            "notification_id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("user_id", &SqlType::Text, non_null = true),
        sqlite_column!("notification_description", &SqlType::Text, non_null = true),
        sqlite_column!("created_at", &SqlType::Text, non_null = true), // RFC 3339
        sqlite_column!(
            "unread",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
    ],
    indices: &[(
        "idx_notifications_user_created",
        "user_id, created_at DESC",
    )],
};

/// All versioned schemas for the notifications database.
///
/// Version 1: notifications table
pub const NOTIFICATION_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[NOTIFICATIONS_TABLE_V1],
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_v1_schema_creates_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &NOTIFICATION_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        schema.validate(&conn).unwrap();
    }

    #[test]
    fn test_user_index_created() {
        let conn = Connection::open_in_memory().unwrap();
        NOTIFICATION_VERSIONED_SCHEMAS[0].create(&conn).unwrap();

        let idx_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name='idx_notifications_user_created'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(idx_count, 1);
    }

    #[test]
    fn test_unread_defaults_to_true() {
        let conn = Connection::open_in_memory().unwrap();
        NOTIFICATION_VERSIONED_SCHEMAS[0].create(&conn).unwrap();

        conn.execute(
            "INSERT INTO notifications (user_id, notification_description, created_at)
             VALUES ('user-1', 'hello', '2026-10-19T08:15:02.000000Z')",
            [],
        )
        .unwrap();

        let unread: i64 = conn
            .query_row("SELECT unread FROM notifications", [], |r| r.get(0))
            .unwrap();
        assert_eq!(unread, 1);
    }
}
