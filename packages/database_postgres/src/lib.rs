#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod backup;
pub mod purge;
pub mod stub;

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use jellyfin_config::AppType;
use jellyfin_database::{
    Database,
    options::{DatabaseOption, DatabaseOptionsError},
    provider::{DatabaseProvider, DatabaseProviderError},
};
use jellyfin_database_connection::ConnectionInfo;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum InitPostgresProviderError {
    #[error(transparent)]
    Options(#[from] DatabaseOptionsError),
    #[error("Could not determine the application data directory")]
    DataDir,
}

/// PostgreSQL implementation of the host's database provider contract.
///
/// Connection parameters and the data directory are fixed at construction,
/// so operations may be called in any order and share no mutable state.
/// Snapshots are stored under `{data_dir}/backups` in the dump tool's
/// archive format, one file per identifier; the filesystem is the only
/// catalog of backups.
#[derive(Debug)]
pub struct PostgresDatabaseProvider {
    connection: ConnectionInfo,
    data_dir: PathBuf,
    dump_program: OsString,
    restore_program: OsString,
}

impl PostgresDatabaseProvider {
    #[must_use]
    pub fn new(connection: ConnectionInfo, data_dir: PathBuf) -> Self {
        log::info!("Initialised PostgreSQL database provider: {connection}");

        Self {
            connection,
            data_dir,
            dump_program: "pg_dump".into(),
            restore_program: "pg_restore".into(),
        }
    }

    /// Builds a provider from the host's option bag, storing snapshots under
    /// `data_dir`.
    ///
    /// # Errors
    ///
    /// * If an option value fails to convert
    pub fn init(
        options: &[DatabaseOption],
        data_dir: PathBuf,
    ) -> Result<Self, InitPostgresProviderError> {
        Ok(Self::new(ConnectionInfo::from_options(options)?, data_dir))
    }

    /// Builds a provider from the host's option bag, storing snapshots under
    /// the server's default application data directory.
    ///
    /// # Errors
    ///
    /// * If an option value fails to convert
    /// * If the application data directory cannot be determined or created
    pub fn init_default(options: &[DatabaseOption]) -> Result<Self, InitPostgresProviderError> {
        let data_dir = jellyfin_config::make_app_data_dir_path(AppType::Server)
            .ok_or(InitPostgresProviderError::DataDir)?;

        Self::init(options, data_dir)
    }

    /// Overrides the dump tool invoked by
    /// [`DatabaseProvider::create_backup`]. The default `pg_dump` is
    /// resolved on the execution `PATH`.
    #[must_use]
    pub fn with_dump_program(mut self, program: impl Into<OsString>) -> Self {
        self.dump_program = program.into();
        self
    }

    /// Overrides the restore tool invoked by
    /// [`DatabaseProvider::restore_backup`]. The default `pg_restore` is
    /// resolved on the execution `PATH`.
    #[must_use]
    pub fn with_restore_program(mut self, program: impl Into<OsString>) -> Self {
        self.restore_program = program.into();
        self
    }

    #[must_use]
    pub const fn connection(&self) -> &ConnectionInfo {
        &self.connection
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabaseProvider {
    async fn create_backup(
        &self,
        token: CancellationToken,
    ) -> Result<String, DatabaseProviderError> {
        backup::create_backup(&self.connection, &self.data_dir, &self.dump_program, &token).await
    }

    async fn restore_backup(
        &self,
        token: CancellationToken,
        id: &str,
    ) -> Result<(), DatabaseProviderError> {
        backup::restore_backup(
            &self.connection,
            &self.data_dir,
            &self.restore_program,
            id,
            &token,
        )
        .await
    }

    async fn delete_backup(&self, id: &str) -> Result<(), DatabaseProviderError> {
        backup::delete_backup(&self.data_dir, id)
    }

    async fn purge_tables(
        &self,
        db: &dyn Database,
        table_names: &[&str],
    ) -> Result<(), DatabaseProviderError> {
        purge::purge_tables(db, table_names).await
    }
}
