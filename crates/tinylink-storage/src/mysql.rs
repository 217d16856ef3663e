use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use tinylink_core::store::{LinkStore, Result};
use tinylink_core::{Clock, Link, ShortCode, StorageError, SystemClock};
use tracing::trace;

const SCHEMA: &str = include_str!("../ddl/mysql/links.sql");

/// MySQL implementation of the link store contract.
///
/// Uniqueness of `code` is enforced by the `uk_links_code` constraint, so
/// concurrent creators racing for the same code see exactly one success.
/// Deletes are hard deletes; a deleted code can be created again.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }

    /// Creates a store that stamps records with `clock`.
    pub fn with_clock(pool: MySqlPool, clock: impl Clock + 'static) -> Self {
        Self {
            pool,
            clock: Arc::new(clock),
        }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `links` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn now_millis(&self) -> i64 {
        self.clock.now().as_millisecond()
    }
}

impl std::fmt::Debug for MySqlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlStore")
            .field("pool", &self.pool)
            .finish()
    }
}

fn parse_millis(column: &str, millis: i64) -> Result<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{millis}': {e}"))
    })
}

fn row_to_link(row: &MySqlRow) -> Result<Link> {
    let code: String = row.try_get("code").map_err(map_sqlx_error)?;
    let target_url: String = row.try_get("target_url").map_err(map_sqlx_error)?;
    let total_clicks: u64 = row.try_get("total_clicks").map_err(map_sqlx_error)?;
    let last_clicked_at: Option<i64> = row.try_get("last_clicked_at").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Link {
        code: ShortCode::new_unchecked(code),
        target_url,
        total_clicks,
        last_clicked_at: last_clicked_at
            .map(|millis| parse_millis("last_clicked_at", millis))
            .transpose()?,
        created_at: parse_millis("created_at", created_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl LinkStore for MySqlStore {
    async fn create(&self, code: &ShortCode, target_url: &str) -> Result<Link> {
        let link = Link::new(code.clone(), target_url, self.clock.now());

        let result = sqlx::query(
            r#"
            INSERT INTO links (code, target_url, total_clicks, last_clicked_at, created_at)
            VALUES (?, ?, 0, NULL, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(target_url)
        .bind(link.created_at.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                trace!(code = %code, "inserted link");
                Ok(link)
            }
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Link>> {
        let row = sqlx::query(
            r#"
            SELECT code, target_url, total_clicks, last_clicked_at, created_at
            FROM links
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_link).transpose()
    }

    async fn resolve_and_increment(&self, code: &ShortCode) -> Result<Option<Link>> {
        let now = self.now_millis();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // The UPDATE takes the row lock, so the SELECT below sees this
        // transaction's increment and no concurrent one.
        let updated = sqlx::query(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked_at = ?
            WHERE code = ?
            "#,
        )
        .bind(now)
        .bind(code.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT code, target_url, total_clicks, last_clicked_at, created_at
            FROM links
            WHERE code = ?
            "#,
        )
        .bind(code.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        row_to_link(&row).map(Some)
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE code = ?
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Link>> {
        let rows = sqlx::query(
            r#"
            SELECT code, target_url, total_clicks, last_clicked_at, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_link).collect()
    }
}
