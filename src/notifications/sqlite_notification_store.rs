use super::models::{NewNotification, Notification};
use super::schema::{NOTIFICATIONS_TABLE_V1, NOTIFICATION_VERSIONED_SCHEMAS};
use super::NotificationStore;
use crate::sqlite_persistence::{read_schema_version, VersionedSchema};
use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite backed [`NotificationStore`].
///
/// Holds only the database location. Each operation opens its own
/// connection and drops it before returning, writes run inside a
/// transaction that rolls back unless committed.
pub struct SqliteNotificationStore {
    db_path: PathBuf,
}

impl SqliteNotificationStore {
    /// Opens the database at `db_path`, creating the schema if the file is
    /// new and validating it otherwise.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let store = Self {
            db_path: db_path.as_ref().to_path_buf(),
        };
        let mut conn = store.connect()?;
        store.ensure_schema(&mut conn)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path).with_context(|| {
            format!("Failed to open notifications database {:?}", self.db_path)
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn ensure_schema(&self, conn: &mut Connection) -> Result<()> {
        let latest_schema = NOTIFICATION_VERSIONED_SCHEMAS
            .last()
            .context("No notifications schema defined")?;

        match read_schema_version(conn)? {
            None => {
                let tables = user_tables(conn)?;
                if tables.is_empty() {
                    info!("Creating new notifications database at {:?}", self.db_path);
                    let tx = conn.transaction()?;
                    latest_schema.create(&tx)?;
                    tx.commit()?;
                } else if tables == [NOTIFICATIONS_TABLE_V1.name]
                    && NOTIFICATIONS_TABLE_V1.has_same_column_names(conn)?
                {
                    info!(
                        "Adopting unversioned notifications table in {:?}",
                        self.db_path
                    );
                    let tx = conn.transaction()?;
                    adopt_unversioned_table(&tx, latest_schema)?;
                    tx.commit()?;
                } else {
                    bail!(
                        "Database {:?} has unversioned tables ({}), refusing to use it",
                        self.db_path,
                        tables.join(", ")
                    );
                }
            }
            Some(version) if version == latest_schema.version => {
                latest_schema.validate(conn).with_context(|| {
                    format!(
                        "Notifications database schema validation failed for version {}",
                        version
                    )
                })?;
                debug!(
                    "Opened notifications database {:?} at version {}",
                    self.db_path, version
                );
            }
            Some(version) => {
                bail!("Unknown notifications database version {}", version);
            }
        }
        Ok(())
    }

    fn now_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn row_to_notification(row: &rusqlite::Row) -> rusqlite::Result<Notification> {
        Ok(Notification {
            notification_id: row.get("notification_id")?,
            user_id: row.get("user_id")?,
            notification_description: row.get("notification_description")?,
            created_at: row.get("created_at")?,
            unread: row.get("unread")?,
        })
    }
}

fn user_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(tables)
}

/// Moves rows of a `notifications` table that was never stamped into the
/// latest schema. Ids are kept, so the AUTOINCREMENT sequence continues past
/// them. SQLite `datetime()` timestamps are rewritten to the RFC 3339 form
/// so that they keep sorting before newer rows.
fn adopt_unversioned_table(tx: &Transaction, latest_schema: &VersionedSchema) -> Result<()> {
    tx.execute(
        "ALTER TABLE notifications RENAME TO notifications_unversioned",
        [],
    )?;
    latest_schema.create(tx)?;
    let adopted = tx.execute(
        "INSERT INTO notifications (notification_id, user_id, notification_description, created_at, unread)
         SELECT notification_id, user_id, notification_description,
                COALESCE(strftime('%Y-%m-%dT%H:%M:%S', created_at) || '.000000Z', created_at),
                unread != 0
         FROM notifications_unversioned",
        [],
    )?;
    tx.execute("DROP TABLE notifications_unversioned", [])?;
    info!("Adopted {} existing notifications", adopted);
    Ok(())
}

impl NotificationStore for SqliteNotificationStore {
    fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        let (user_id, notification_description) = notification.into_parts();
        let created_at = Self::now_timestamp();

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO notifications (user_id, notification_description, created_at, unread)
             VALUES (?1, ?2, ?3, 1)",
            params![user_id, notification_description, created_at],
        )?;
        let notification_id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(
            "Created notification {} for user {}",
            notification_id, user_id
        );

        Ok(Notification {
            notification_id,
            user_id,
            notification_description,
            created_at,
            unread: true,
        })
    }

    fn get_user_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT notification_id, user_id, notification_description, created_at, unread
             FROM notifications
             WHERE user_id = ?1
             ORDER BY created_at DESC",
        )?;
        let notifications = stmt
            .query_map(params![user_id], Self::row_to_notification)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notifications)
    }

    fn get_unread_count(&self, user_id: &str) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND unread = 1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn set_notification_unread(&self, notification_id: i64, unread: bool) -> Result<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let updated = tx.execute(
            "UPDATE notifications SET unread = ?1 WHERE notification_id = ?2",
            params![unread, notification_id],
        )?;
        tx.commit()?;

        debug!(
            "Set unread={} on notification {} ({} rows)",
            unread, notification_id, updated
        );
        Ok(updated > 0)
    }
}
