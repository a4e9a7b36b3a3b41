use async_trait::async_trait;
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    task::JoinHandle,
};
use tokio_postgres::Client;

use crate::{Database, DatabaseError};

pub struct PostgresDatabase {
    client: Client,
    handle: JoinHandle<()>,
}

impl PostgresDatabase {
    #[must_use]
    pub fn new<T: AsyncRead + AsyncWrite + Unpin + Send + 'static>(
        client: Client,
        connection: tokio_postgres::Connection<tokio_postgres::Socket, T>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("Postgres database connection error: {e:?}");
            }
        });

        Self { client, handle }
    }
}

impl Drop for PostgresDatabase {
    fn drop(&mut self) {
        if let Err(e) = self.trigger_close() {
            log::error!("Failed to drop postgres database connection: {e:?}");
        }
    }
}

impl std::fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Error)]
pub enum PostgresDatabaseError {
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
}

impl From<PostgresDatabaseError> for DatabaseError {
    fn from(value: PostgresDatabaseError) -> Self {
        Self::Postgres(value)
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn exec_raw(&self, statement: &str) -> Result<(), DatabaseError> {
        self.client
            .batch_execute(statement)
            .await
            .map_err(PostgresDatabaseError::Postgres)?;
        Ok(())
    }

    fn trigger_close(&self) -> Result<(), DatabaseError> {
        self.handle.abort();
        Ok(())
    }
}
