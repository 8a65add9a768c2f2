pub mod invoice_store;

pub use invoice_store::PostgresInvoiceStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use crate::infrastructure::config::DatabaseConfig;

/// Open the connection pool the store runs on. The pool is created at
/// process start and passed down explicitly; nothing in this crate reaches
/// for ambient connection state.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
  tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(&config.url),
  )
  .await
  .map_err(|_| sqlx::Error::PoolTimedOut)?
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}
