//! SQLite-backed order and credential store.
//!
//! The store is a single local file holding two tables: `orders` (the
//! synthetic delivery dataset) and `users` (the login allow-list). No
//! connection outlives a single operation: every call opens the file, runs
//! its statements, and releases the handle on the way out, whichever exit
//! path it takes.

use crate::auth::models::Credential;
use crate::models::{Order, OrderStatus};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info, warn};

/// Username of the credential seeded into a fresh store.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password of the credential seeded into a fresh store. Stored verbatim;
/// this gate keeps casual visitors out of a demo, nothing more.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY,
    delivery_agent TEXT NOT NULL,
    order_time TEXT NOT NULL,
    delivery_time TEXT NOT NULL,
    cost REAL NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0
);
"#;

/// Handle on the store file. Cheap to clone around; holds no open
/// connection, only the path.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: String,
}

impl Store {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Whether the store file is already present on disk. File existence is
    /// the whole contract: the generator keys off it, nothing inspects the
    /// contents.
    pub fn exists(&self) -> bool {
        Path::new(&self.db_path).exists()
    }

    /// Scoped acquisition: open the file, run one operation, close on every
    /// exit path (the connection drops whether `op` succeeds or fails).
    fn with_conn<T>(&self, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open store at {}", self.db_path))?;
        op(&conn)
    }

    /// Create both tables and seed the default admin credential. Safe to
    /// call on an existing store.
    pub fn init_schema(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL").ok();
            conn.pragma_update(None, "synchronous", "NORMAL").ok();

            conn.execute_batch(SCHEMA_SQL)
                .context("Failed to create store schema")?;

            self.create_default_admin(conn)?;

            debug!("💾 Store schema ready at {}", self.db_path);
            Ok(())
        })
    }

    /// Seed the allow-list with admin/admin123 when no credential exists yet.
    fn create_default_admin(&self, conn: &Connection) -> Result<()> {
        let user_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .context("Failed to count stored credentials")?;

        if user_count == 0 {
            conn.execute(
                "INSERT INTO users (username, password, is_admin) VALUES (?1, ?2, ?3)",
                params![DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD, 1],
            )
            .context("Failed to seed default admin credential")?;

            info!(
                "🔐 Default admin credential created (username: {})",
                DEFAULT_ADMIN_USERNAME
            );
            warn!("⚠️  Credentials are stored in plaintext; keep this dashboard off the open internet");
        }

        Ok(())
    }

    /// Batch-insert generated orders inside one transaction. An open
    /// transaction rolls back if any row fails, so the store never ends up
    /// half-seeded.
    pub fn insert_orders(&self, orders: &[Order]) -> Result<usize> {
        if orders.is_empty() {
            return Ok(0);
        }

        self.with_conn(|conn| {
            conn.execute("BEGIN IMMEDIATE", [])
                .context("Failed to begin insert transaction")?;

            let mut inserted = 0usize;
            {
                let mut stmt = conn.prepare(
                    "INSERT INTO orders (delivery_agent, order_time, delivery_time, cost, status)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;

                for order in orders {
                    inserted += stmt.execute(params![
                        order.delivery_agent,
                        order.order_time.to_rfc3339(),
                        order.delivery_time.to_rfc3339(),
                        order.cost,
                        order.status.as_str(),
                    ])?;
                }
            }

            conn.execute("COMMIT", [])
                .context("Failed to commit insert transaction")?;

            debug!("📦 Inserted {} orders", inserted);
            Ok(inserted)
        })
    }

    /// Fetch the full order set, oldest first. Filtering happens in memory
    /// downstream, so this is the only order query the store needs.
    pub fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, delivery_agent, order_time, delivery_time, cost, status
                 FROM orders ORDER BY id",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, f64>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, delivery_agent, order_time, delivery_time, cost, status)| {
                    Ok(Order {
                        id: Some(id),
                        delivery_agent,
                        order_time: parse_stored_time(&order_time)?,
                        delivery_time: parse_stored_time(&delivery_time)?,
                        cost,
                        status: OrderStatus::from_str(&status)
                            .with_context(|| format!("Unknown order status in store: {status}"))?,
                    })
                })
                .collect()
        })
    }

    pub fn count_orders(&self) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
                .context("Failed to count orders")
        })
    }

    /// Look up a credential by exact (username, password) pair. Unknown
    /// username and wrong password are indistinguishable to the caller.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<Credential>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password, is_admin FROM users
                 WHERE username = ?1 AND password = ?2",
            )?;

            let result = stmt.query_row(params![username, password], |row| {
                Ok(Credential {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password: row.get(2)?,
                    is_admin: row.get::<_, i64>(3)? != 0,
                })
            });

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e).context("Failed to query credential"),
            }
        })
    }

    /// List every stored credential. The API layer sanitizes these before
    /// they leave the process.
    pub fn list_users(&self) -> Result<Vec<Credential>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password, is_admin FROM users ORDER BY id",
            )?;

            let users = stmt
                .query_map([], |row| {
                    Ok(Credential {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                        is_admin: row.get::<_, i64>(3)? != 0,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(users)
        })
    }
}

fn parse_stored_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Malformed timestamp in store: {raw}"))
}
