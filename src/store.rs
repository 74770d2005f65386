//! SQLite trade store.
//!
//! Two tables: `trades` (catalog index) and `trade_content` (canonical
//! content JSON, one row per trade). The connection sits behind a mutex, so
//! writers are serialized.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::assets;
use crate::models::{ContentRecord, Trade};

/// Database file name inside the data directory.
pub const DB_FILE: &str = "tradeforge.db";

/// Store failures callers need to tell apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A trade with this slug already exists.
    #[error("Trade '{0}' already exists")]
    Conflict(String),
    /// SQLite failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Stored JSON could not be (de)serialized.
    #[error("invalid stored content: {0}")]
    Json(#[from] serde_json::Error),
    /// The connection mutex was poisoned by a panicking writer.
    #[error("trade store lock poisoned")]
    Poisoned,
    /// A caller-supplied step failed inside a transaction; nothing was committed.
    #[error("{0:#}")]
    Aborted(anyhow::Error),
}

/// A trade row with its bookkeeping columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRow {
    /// Catalog fields
    #[serde(flatten)]
    pub trade: Trade,
    /// Insertion time
    pub created_at: DateTime<Utc>,
    /// Hash of the analysis profile that generated this trade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_hash: Option<String>,
}

/// Thread-safe trade store.
#[derive(Clone)]
pub struct TradeStore {
    conn: Arc<Mutex<Connection>>,
}

impl TradeStore {
    /// Opens (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "Opened trade store");
        Self::init(conn)
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE IF NOT EXISTS trades (
                slug TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                icon TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL,
                profile_hash TEXT
             );
             CREATE TABLE IF NOT EXISTS trade_content (
                trade_slug TEXT PRIMARY KEY REFERENCES trades(slug) ON DELETE CASCADE,
                json TEXT NOT NULL
             );",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Inserts the default trades with synthesized content when the store is empty.
    ///
    /// Returns the number of trades inserted.
    pub fn seed_defaults(&self) -> Result<usize, StoreError> {
        if self.count()? > 0 {
            return Ok(0);
        }

        let text = assets::text("seed_trades.json").map_err(StoreError::Aborted)?;
        let seeds: Vec<Trade> = serde_json::from_str(&text)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = Utc::now();
        for trade in &seeds {
            let content = ContentRecord::synthesize(&trade.slug, &trade.name);
            insert_row(&tx, trade, now, None)?;
            insert_content(&tx, &trade.slug, &content)?;
        }
        tx.commit()?;

        info!(count = seeds.len(), "Seeded default trades");
        Ok(seeds.len())
    }

    /// Number of trades.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM trades", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// All trades in insertion order.
    pub fn list(&self) -> Result<Vec<Trade>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT slug, name, icon, description FROM trades ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Trade {
                slug: row.get(0)?,
                name: row.get(1)?,
                icon: row.get(2)?,
                description: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Looks up one trade.
    pub fn get(&self, slug: &str) -> Result<Option<TradeRow>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT slug, name, icon, description, created_at, profile_hash
                 FROM trades WHERE slug = ?1",
                params![slug],
                |row| {
                    let created: String = row.get(4)?;
                    let created_at = DateTime::parse_from_rfc3339(&created)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                        })?
                        .with_timezone(&Utc);
                    Ok(TradeRow {
                        trade: Trade {
                            slug: row.get(0)?,
                            name: row.get(1)?,
                            icon: row.get(2)?,
                            description: row.get(3)?,
                        },
                        created_at,
                        profile_hash: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Stored content for a trade.
    pub fn content(&self, slug: &str) -> Result<Option<ContentRecord>, StoreError> {
        let conn = self.lock()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT json FROM trade_content WHERE trade_slug = ?1",
                params![slug],
                |row| row.get(0),
            )
            .optional()?;
        json.map(|j| serde_json::from_str(&j))
            .transpose()
            .map_err(StoreError::from)
    }

    /// Inserts a trade with its content.
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] when the slug is taken.
    pub fn insert(&self, trade: &Trade, content: &ContentRecord) -> Result<TradeRow, StoreError> {
        self.insert_with(trade, content, None, || Ok(()))
    }

    /// Inserts a trade with its content, running `finalize` before commit.
    ///
    /// The rows are written inside a transaction; `finalize` runs while the
    /// transaction is open and the insert commits only if it succeeds. A
    /// failing `finalize` rolls everything back and is returned as
    /// [`StoreError::Aborted`].
    pub fn insert_with<F>(
        &self,
        trade: &Trade,
        content: &ContentRecord,
        profile_hash: Option<&str>,
        finalize: F,
    ) -> Result<TradeRow, StoreError>
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM trades WHERE slug = ?1)",
            params![trade.slug],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StoreError::Conflict(trade.slug.clone()));
        }

        let created_at = Utc::now();
        insert_row(&tx, trade, created_at, profile_hash)?;
        insert_content(&tx, &trade.slug, content)?;

        finalize().map_err(StoreError::Aborted)?;
        tx.commit()?;

        debug!(slug = %trade.slug, "Inserted trade");
        Ok(TradeRow {
            trade: trade.clone(),
            created_at,
            profile_hash: profile_hash.map(str::to_string),
        })
    }
}

fn insert_row(
    conn: &Connection,
    trade: &Trade,
    created_at: DateTime<Utc>,
    profile_hash: Option<&str>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO trades (slug, name, icon, description, created_at, profile_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            trade.slug,
            trade.name,
            trade.icon,
            trade.description,
            created_at.to_rfc3339(),
            profile_hash
        ],
    )?;
    Ok(())
}

fn insert_content(conn: &Connection, slug: &str, content: &ContentRecord) -> Result<(), StoreError> {
    let json = serde_json::to_string(content)?;
    conn.execute(
        "INSERT INTO trade_content (trade_slug, json) VALUES (?1, ?2)",
        params![slug, json],
    )?;
    Ok(())
}
