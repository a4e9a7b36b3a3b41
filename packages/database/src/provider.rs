use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{Database, DatabaseError};

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Error)]
pub enum DatabaseProviderError {
    /// An external dump/restore tool exited with a non-zero status. Carries
    /// the exit code (`None` when the child was killed by a signal) and the
    /// captured stderr text.
    #[error("External tool exited with status {status:?}: {stderr}")]
    ToolFailure {
        status: Option<i32>,
        stderr: String,
    },
    #[error("Operation is not supported for this backend: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Operation was cancelled")]
    Cancelled,
}

/// The pluggable backend contract a database engine implements for the host.
///
/// Lifecycle hooks default to no-ops; an engine overrides only what it has
/// work for.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Hook for customizing the host's data model. Most engines have nothing
    /// to add here.
    fn on_model_creating(&self) {}

    /// Hook for customizing the host's model conventions.
    fn configure_conventions(&self) {}

    /// Runs engine-specific maintenance on the host's schedule.
    ///
    /// # Errors
    ///
    /// * If the maintenance work fails
    async fn run_scheduled_optimisation(
        &self,
        _token: CancellationToken,
    ) -> Result<(), DatabaseProviderError> {
        Ok(())
    }

    /// Runs engine-specific work during host shutdown.
    ///
    /// # Errors
    ///
    /// * If the shutdown work fails
    async fn run_shutdown_task(
        &self,
        _token: CancellationToken,
    ) -> Result<(), DatabaseProviderError> {
        Ok(())
    }

    /// Creates a database snapshot and returns its identifier.
    ///
    /// Identifiers are derived from the current UTC time at one-second
    /// resolution; two backups started within the same second collide.
    ///
    /// # Errors
    ///
    /// * If the snapshot cannot be created
    async fn create_backup(
        &self,
        token: CancellationToken,
    ) -> Result<String, DatabaseProviderError>;

    /// Restores the snapshot named by `id`.
    ///
    /// A missing snapshot is logged and treated as a no-op; callers cannot
    /// distinguish "nothing to do" from "succeeded".
    ///
    /// # Errors
    ///
    /// * If the restore fails
    async fn restore_backup(
        &self,
        token: CancellationToken,
        id: &str,
    ) -> Result<(), DatabaseProviderError>;

    /// Deletes the snapshot named by `id`.
    ///
    /// A missing snapshot is logged and treated as a no-op.
    ///
    /// # Errors
    ///
    /// * If the snapshot exists but cannot be removed
    async fn delete_backup(&self, id: &str) -> Result<(), DatabaseProviderError>;

    /// Empties the given tables, cascading to dependent rows.
    ///
    /// Table names are interpolated into the batch with simple quoting only;
    /// callers MUST supply trusted, pre-validated identifiers.
    ///
    /// # Errors
    ///
    /// * If the engine rejects the batch
    async fn purge_tables(
        &self,
        db: &dyn Database,
        table_names: &[&str],
    ) -> Result<(), DatabaseProviderError>;
}
