//! SQLite-backed cache store.

use std::{path::Path, str::FromStr};

use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::{CacheFuture, NewQaEntry, QaCache, QaCacheEntry, QaCacheError};

const COLUMNS: &str = "id, question, answer, context, ask_count, created_at";

pub struct SqliteQaCache {
    pool: SqlitePool,
}

impl SqliteQaCache {
    /// Opens (or creates) the database named by a `sqlite://` URL.
    pub async fn connect(url: &str) -> Result<Self, QaCacheError> {
        let options = SqliteConnectOptions::from_str(url)?;
        Self::with_options(options).await
    }

    /// Opens (or creates) the database file at `path`.
    pub async fn with_path(path: impl AsRef<Path>) -> Result<Self, QaCacheError> {
        let options = SqliteConnectOptions::new().filename(path.as_ref());
        Self::with_options(options).await
    }

    async fn with_options(options: SqliteConnectOptions) -> Result<Self, QaCacheError> {
        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        if let Some(dir) = options.get_filename().parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await?;

        let cache = Self { pool };
        cache.init_schema().await?;
        info!("qa cache ready");
        Ok(cache)
    }

    async fn init_schema(&self) -> Result<(), QaCacheError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL UNIQUE,
                answer TEXT NOT NULL,
                context TEXT NOT NULL,
                ask_count INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Number of cached questions.
    pub async fn count(&self) -> Result<u64, QaCacheError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as u64)
    }
}

fn entry_from_row(row: &SqliteRow) -> Result<QaCacheEntry, QaCacheError> {
    let id: i64 = row.try_get("id")?;
    let ask_count: i64 = row.try_get("ask_count")?;
    let created_at: String = row.try_get("created_at")?;

    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| QaCacheError::Decode {
            id,
            reason: format!("created_at: {e}"),
        })?
        .with_timezone(&Utc);
    let ask_count = u64::try_from(ask_count).map_err(|_| QaCacheError::Decode {
        id,
        reason: format!("negative ask_count {ask_count}"),
    })?;

    Ok(QaCacheEntry {
        id,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        context: row.try_get("context")?,
        ask_count,
        created_at,
    })
}

impl QaCache for SqliteQaCache {
    fn find_and_increment<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>> {
        Box::pin(async move {
            let sql = format!(
                "UPDATE questions SET ask_count = ask_count + 1, updated_at = ?2
                 WHERE question = ?1 RETURNING {COLUMNS}"
            );
            let row = sqlx::query(&sql)
                .bind(question)
                .bind(Utc::now().to_rfc3339())
                .fetch_optional(&self.pool)
                .await?;
            let entry = row.as_ref().map(entry_from_row).transpose()?;
            if let Some(e) = &entry {
                debug!(id = e.id, ask_count = e.ask_count, "cache hit");
            }
            Ok(entry)
        })
    }

    fn insert_or_increment<'a>(&'a self, entry: NewQaEntry<'a>) -> CacheFuture<'a, QaCacheEntry> {
        Box::pin(async move {
            let sql = format!(
                "INSERT INTO questions (question, answer, context, ask_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 1, ?4, ?4)
                 ON CONFLICT(question) DO UPDATE SET
                    ask_count = ask_count + 1,
                    updated_at = excluded.updated_at
                 RETURNING {COLUMNS}"
            );
            let row = sqlx::query(&sql)
                .bind(entry.question)
                .bind(entry.answer)
                .bind(entry.context)
                .bind(Utc::now().to_rfc3339())
                .fetch_one(&self.pool)
                .await?;
            let stored = entry_from_row(&row)?;
            debug!(id = stored.id, ask_count = stored.ask_count, "cache insert");
            Ok(stored)
        })
    }

    fn get<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>> {
        Box::pin(async move {
            let sql = format!("SELECT {COLUMNS} FROM questions WHERE question = ?1");
            let row = sqlx::query(&sql)
                .bind(question)
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(entry_from_row).transpose()
        })
    }
}
