#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod options;
#[cfg(feature = "postgres-raw")]
pub mod postgres;
pub mod provider;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres-raw")]
    #[error(transparent)]
    Postgres(postgres::postgres::PostgresDatabaseError),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// The data-context seam the database providers consume.
///
/// The host application owns the full query machinery; providers only need
/// the ability to push raw statements at the active connection and to close
/// it on shutdown.
#[async_trait]
pub trait Database: Send + Sync + std::fmt::Debug {
    /// Executes a raw SQL batch against the active connection.
    ///
    /// The batch may contain multiple `;`-separated statements; they are
    /// executed in order.
    ///
    /// # Errors
    ///
    /// * If the engine rejects any statement in the batch
    async fn exec_raw(&self, statement: &str) -> Result<(), DatabaseError>;

    /// # Errors
    ///
    /// Will return `Err` if the close failed to trigger.
    fn trigger_close(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), DatabaseError> {
        self.trigger_close()
    }
}
