use async_trait::async_trait;
use jellyfin_database::{
    Database,
    provider::{DatabaseProvider, DatabaseProviderError},
};
use jellyfin_database_connection::ConnectionInfo;
use tokio_util::sync::CancellationToken;

use crate::purge;

const BACKUP_UNSUPPORTED: &str = "Backups require the PostgreSQL client tools";

/// Degenerate PostgreSQL provider for deployments without the client tools.
///
/// Snapshot operations report [`DatabaseProviderError::Unsupported`] so
/// callers can tell "not available for this backend" from "succeeded";
/// everything else behaves like the full provider.
#[derive(Debug)]
pub struct StubPostgresDatabaseProvider {
    connection: ConnectionInfo,
}

impl StubPostgresDatabaseProvider {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    #[must_use]
    pub const fn connection(&self) -> &ConnectionInfo {
        &self.connection
    }
}

#[async_trait]
impl DatabaseProvider for StubPostgresDatabaseProvider {
    async fn create_backup(
        &self,
        _token: CancellationToken,
    ) -> Result<String, DatabaseProviderError> {
        Err(DatabaseProviderError::Unsupported(BACKUP_UNSUPPORTED))
    }

    async fn restore_backup(
        &self,
        _token: CancellationToken,
        _id: &str,
    ) -> Result<(), DatabaseProviderError> {
        Err(DatabaseProviderError::Unsupported(BACKUP_UNSUPPORTED))
    }

    async fn delete_backup(&self, _id: &str) -> Result<(), DatabaseProviderError> {
        Err(DatabaseProviderError::Unsupported(BACKUP_UNSUPPORTED))
    }

    async fn purge_tables(
        &self,
        db: &dyn Database,
        table_names: &[&str],
    ) -> Result<(), DatabaseProviderError> {
        purge::purge_tables(db, table_names).await
    }
}
