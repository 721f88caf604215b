//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool with explicit limits, shared by reference
//! - List operations use JOINs plus one batched participant query - no N+1
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step writes

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    /// Fresh in-memory database with the schema applied.
    pub(crate) async fn migrated_pool() -> SqlitePool {
        let pool = super::create_memory_pool().await.expect("memory pool");
        super::migrations::run(&pool).await.expect("migrations");
        pool
    }
}
