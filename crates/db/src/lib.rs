//! Data access for the `ritual` schema of the remote relational store.
//!
//! The store exclusively owns the durable rows; this crate only issues
//! idempotent write intents and trusts the store's unique constraints
//! plus atomic upserts for conflict resolution.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
pub use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Maximum connections held by the seeding worker's pool.
const MAX_CONNECTIONS: u32 = 5;

/// Upper bound on waiting for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect a bounded pool to the relational store.
///
/// The acquire timeout keeps a dead store from blocking a run
/// indefinitely; the caller sees the failure as a registry or
/// state-write error on the first statement.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
