//! SQLite-backed record source.
//!
//! Reads the interaction log table written by the chatbot. Older databases
//! predate some columns, so the table layout is inspected on every fetch and
//! only the columns that exist are selected.

use crate::source::LogSource;
use async_trait::async_trait;
use chatlens_common::{Feedback, InsightsError, LogRecord, RecordId, RecordScope, Result};
use chatlens_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Maximum pooled connections for a file database.
const MAX_CONNECTIONS: u32 = 4;

fn storage_error(error: sqlx::Error) -> InsightsError {
    InsightsError::storage(error.to_string())
}

/// Which optional columns the log table has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableColumns {
    /// `id` column; `rowid` is used when absent.
    pub id: bool,
    /// `user_query` column.
    pub user_query: bool,
    /// `feedback` column.
    pub feedback: bool,
    /// `in_scope` column.
    pub in_scope: bool,
}

/// Reads interaction records from a SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    pool: SqlitePool,
    table: String,
}

impl SqliteSource {
    /// Opens an existing database file.
    pub async fn open(path: impl AsRef<Path>, table: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening interaction log database: {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| {
                InsightsError::storage(format!("Failed to open {}: {}", path.display(), e))
            })?;

        Self::from_pool(pool, table)
    }

    /// Opens the database described by `config`.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::open(&config.path, config.table.clone()).await
    }

    /// Wraps an existing pool.
    ///
    /// The table name is interpolated into SQL, so only ASCII alphanumerics
    /// and `_` are accepted.
    pub fn from_pool(pool: SqlitePool, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InsightsError::invalid_input(format!(
                "invalid table name: {table:?}"
            )));
        }
        Ok(Self { pool, table })
    }

    /// The underlying connection pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The log table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Inspects the log table's optional columns.
    ///
    /// Fails when the table does not exist or has no `created_at` column.
    pub async fn columns(&self) -> Result<TableColumns> {
        let sql = format!(r#"PRAGMA table_info("{}")"#, self.table);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        if rows.is_empty() {
            return Err(InsightsError::storage(format!(
                "table {} not found",
                self.table
            )));
        }

        let mut columns = TableColumns::default();
        let mut has_created_at = false;
        for row in &rows {
            let name: String = row.try_get("name").map_err(storage_error)?;
            match name.to_ascii_lowercase().as_str() {
                "id" => columns.id = true,
                "created_at" => has_created_at = true,
                "user_query" => columns.user_query = true,
                "feedback" => columns.feedback = true,
                "in_scope" => columns.in_scope = true,
                _ => {}
            }
        }

        if !has_created_at {
            return Err(InsightsError::storage(format!(
                "table {} has no created_at column",
                self.table
            )));
        }

        debug!(?columns, "Inspected table {}", self.table);
        Ok(columns)
    }

    fn select_sql(&self, columns: TableColumns, scope: RecordScope) -> String {
        // Only integer ids are kept; anything else falls back to the rowid.
        let id = if columns.id {
            "CASE WHEN typeof(id) = 'integer' THEN id ELSE rowid END"
        } else {
            "rowid"
        };
        let user_query = if columns.user_query {
            "CAST(user_query AS TEXT)"
        } else {
            "NULL"
        };
        // Non-numeric feedback is read as unset.
        let feedback = if columns.feedback {
            "CASE WHEN typeof(feedback) IN ('integer', 'real') THEN CAST(feedback AS INTEGER) END"
        } else {
            "NULL"
        };
        let in_scope = if columns.in_scope {
            "COALESCE(CAST(in_scope AS INTEGER), 1)"
        } else {
            "1"
        };
        let filter = match scope {
            RecordScope::InScopeOnly if columns.in_scope => format!("WHERE {in_scope} <> 0"),
            _ => String::new(),
        };

        format!(
            r#"SELECT {id} AS id, CAST(created_at AS TEXT) AS created_at, {user_query} AS user_query, {feedback} AS feedback, {in_scope} AS in_scope FROM "{table}" {filter} ORDER BY rowid"#,
            table = self.table
        )
    }

    fn decode_row(row: &SqliteRow) -> Result<LogRecord> {
        let id: i64 = row.try_get("id").map_err(storage_error)?;
        let created_at: Option<String> = row.try_get("created_at").map_err(storage_error)?;
        let user_query: Option<String> = row.try_get("user_query").map_err(storage_error)?;
        let feedback_flag: Option<i64> = row.try_get("feedback").map_err(storage_error)?;
        let in_scope: i64 = row.try_get("in_scope").map_err(storage_error)?;

        let feedback = feedback_flag.and_then(|flag| {
            let feedback = Feedback::from_flag(flag);
            if feedback.is_none() {
                debug!("Record {} has unknown feedback value {}, treating as unset", id, flag);
            }
            feedback
        });

        Ok(LogRecord {
            id: RecordId(id),
            // A missing timestamp is rejected later as malformed.
            created_at: created_at.unwrap_or_default(),
            user_query,
            feedback,
            in_scope: in_scope != 0,
        })
    }

    /// Adds the `in_scope` column to a legacy table.
    ///
    /// New rows default to in scope; existing rows whose query matches one of
    /// the SQL `LIKE` patterns are marked out of scope. Returns `false` when
    /// the column already existed and nothing was changed.
    #[instrument(skip(self, out_of_scope_patterns), fields(table = %self.table))]
    pub async fn ensure_in_scope_column(&self, out_of_scope_patterns: &[String]) -> Result<bool> {
        let columns = self.columns().await?;
        if columns.in_scope {
            debug!("Column in_scope already present");
            return Ok(false);
        }

        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let alter = format!(
            r#"ALTER TABLE "{}" ADD COLUMN in_scope INTEGER DEFAULT 1"#,
            self.table
        );
        sqlx::query(&alter)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        let mut marked = 0u64;
        if columns.user_query {
            let update = format!(
                r#"UPDATE "{}" SET in_scope = 0 WHERE user_query LIKE ?"#,
                self.table
            );
            for pattern in out_of_scope_patterns {
                let result = sqlx::query(&update)
                    .bind(pattern)
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error)?;
                marked += result.rows_affected();
            }
        }

        tx.commit().await.map_err(storage_error)?;

        info!("Added in_scope column, marked {} rows out of scope", marked);
        Ok(true)
    }
}

#[async_trait]
impl LogSource for SqliteSource {
    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch(&self, scope: RecordScope) -> Result<Vec<LogRecord>> {
        let columns = self.columns().await?;
        let sql = self.select_sql(columns, scope);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let records = rows
            .iter()
            .map(Self::decode_row)
            .collect::<Result<Vec<_>>>()?;

        info!("Fetched {} records from {}", records.len(), self.table);
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
