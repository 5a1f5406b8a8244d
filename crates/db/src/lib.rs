//! PostgreSQL access: connection pool, schema bootstrap, models and
//! repositories.

pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

pub use pool::{create_pool, health_check, DbConn, DbPool, PoolConfig, PoolStatus};
