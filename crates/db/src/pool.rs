//! Bounded connection pool with an optional admission limit.
//!
//! sqlx already caps live connections and queues waiters without bound.
//! [`DbPool`] adds the two knobs sqlx lacks: a cap on how many callers may
//! queue, and fail-fast acquisition when the pool is exhausted.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use marketing_core::config::{parse_or, ConfigError};
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::{PgPool, Postgres};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Pool sizing and queueing behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on concurrent live connections.
    pub max_connections: u32,
    /// Maximum number of callers allowed to wait for a connection; `0` means
    /// unbounded.
    pub queue_limit: u32,
    /// When `false`, callers fail immediately instead of waiting.
    pub wait_for_connections: bool,
    /// Driver-level bound on a single wait for a connection.
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            queue_limit: 0,
            wait_for_connections: true,
            acquire_timeout_secs: 30,
        }
    }
}

impl PoolConfig {
    /// Load from environment variables, falling back to [`Default`].
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `DB_MAX_CONNECTIONS`      | `10`    |
    /// | `DB_QUEUE_LIMIT`          | `0`     |
    /// | `DB_WAIT_FOR_CONNECTIONS` | `true`  |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            queue_limit: parse_or(lookup, "DB_QUEUE_LIMIT", defaults.queue_limit)?,
            wait_for_connections: parse_or(
                lookup,
                "DB_WAIT_FOR_CONNECTIONS",
                defaults.wait_for_connections,
            )?,
            acquire_timeout_secs: parse_or(
                lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(config)
    }

    /// How many callers may hold or wait for a connection at once, if capped.
    fn admission_limit(&self) -> Option<usize> {
        let max = self.max_connections as usize;
        if !self.wait_for_connections {
            Some(max)
        } else if self.queue_limit == 0 {
            None
        } else {
            Some(max + self.queue_limit as usize)
        }
    }
}

/// Shared handle to the connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: PgPool,
    admission: Option<Arc<Semaphore>>,
}

/// Point-in-time view of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Live connections, idle or in use.
    pub connections: u32,
    pub idle: usize,
    /// Remaining admission slots; `None` when waiting is unbounded.
    pub admission_available: Option<usize>,
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    Ok(DbPool::from_pool(pool, config))
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    sqlx::query("SELECT 1").execute(&mut *conn).await?;
    Ok(())
}

impl DbPool {
    /// Wrap an existing sqlx pool, e.g. the per-test pool from `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool, config: &PoolConfig) -> Self {
        let admission = config
            .admission_limit()
            .map(|limit| Arc::new(Semaphore::new(limit)));
        Self { pool, admission }
    }

    /// Borrow a connection. It returns to the pool when the guard drops,
    /// whether or not the statements run on it succeeded.
    ///
    /// Fails with [`sqlx::Error::PoolTimedOut`] when the admission limit is
    /// reached, and with whatever sqlx reports when the driver-level wait
    /// times out.
    pub async fn acquire(&self) -> Result<DbConn, sqlx::Error> {
        let permit = match &self.admission {
            Some(admission) => match Arc::clone(admission).try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!("Connection pool exhausted, rejecting caller");
                    return Err(sqlx::Error::PoolTimedOut);
                }
            },
            None => None,
        };

        let conn = self.pool.acquire().await?;
        Ok(DbConn {
            conn,
            permit,
        })
    }

    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            connections: self.pool.size(),
            idle: self.pool.num_idle(),
            admission_available: self.admission.as_ref().map(|a| a.available_permits()),
        }
    }

    /// Close every connection. Pending and future acquisitions fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A borrowed connection, exclusively owned until dropped.
pub struct DbConn {
    conn: PoolConnection<Postgres>,
    permit: Option<OwnedSemaphorePermit>,
}

impl std::fmt::Debug for DbConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConn")
            .field("admitted", &self.permit.is_some())
            .finish_non_exhaustive()
    }
}

impl Deref for DbConn {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.conn
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
