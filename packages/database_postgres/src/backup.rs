use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use jellyfin_database::provider::DatabaseProviderError;
use jellyfin_database_connection::ConnectionInfo;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Subdirectory of the application data directory that holds snapshots.
pub const BACKUPS_DIR_NAME: &str = "backups";

/// Suffix appended to the identifier to form the artifact file name.
pub const BACKUP_FILE_SUFFIX: &str = "_jellyfin.dump";

const PASSWORD_ENV_VAR: &str = "PGPASSWORD";

/// Derives a backup identifier from the current UTC time.
///
/// One-second resolution; two identifiers generated within the same second
/// collide.
#[must_use]
pub fn backup_id() -> String {
    jellyfin_time::datetime_utc_now()
        .format("%Y%m%d%H%M%S")
        .to_string()
}

/// Returns the artifact path for `id` under `data_dir`.
#[must_use]
pub fn backup_file_path(data_dir: &Path, id: &str) -> PathBuf {
    data_dir
        .join(BACKUPS_DIR_NAME)
        .join(format!("{id}{BACKUP_FILE_SUFFIX}"))
}

fn make_backups_dir_path(data_dir: &Path) -> io::Result<PathBuf> {
    let path = data_dir.join(BACKUPS_DIR_NAME);

    if !path.is_dir() {
        std::fs::create_dir_all(&path)?;
    }

    Ok(path)
}

/// Arguments passed to the dump tool.
///
/// The password is deliberately absent; it travels via `PGPASSWORD` in the
/// child environment only, so it never shows up in process listings.
#[must_use]
pub fn dump_args(connection: &ConnectionInfo, file: &Path) -> Vec<OsString> {
    vec![
        "--host".into(),
        connection.host().into(),
        "--port".into(),
        connection.port().to_string().into(),
        "--username".into(),
        connection.user().into(),
        "--format".into(),
        "custom".into(),
        "--blobs".into(),
        "--verbose".into(),
        "--file".into(),
        file.as_os_str().to_os_string(),
        connection.name().into(),
    ]
}

/// Arguments passed to the restore tool. Same password contract as
/// [`dump_args`].
#[must_use]
pub fn restore_args(connection: &ConnectionInfo, file: &Path) -> Vec<OsString> {
    vec![
        "--host".into(),
        connection.host().into(),
        "--port".into(),
        connection.port().to_string().into(),
        "--username".into(),
        connection.user().into(),
        "--dbname".into(),
        connection.name().into(),
        "--clean".into(),
        "--verbose".into(),
        file.as_os_str().to_os_string(),
    ]
}

async fn run_tool(
    program: &OsStr,
    args: &[OsString],
    password: &str,
    token: &CancellationToken,
) -> Result<(), DatabaseProviderError> {
    log::debug!("run_tool: program={program:?} args={args:?}");

    let child = Command::new(program)
        .args(args)
        .env(PASSWORD_ENV_VAR, password)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let output = tokio::select! {
        () = token.cancelled() => {
            // Dropping the wait future kills the child via kill_on_drop.
            log::debug!("run_tool: cancelled, killing {program:?}");
            return Err(DatabaseProviderError::Cancelled);
        }
        output = child.wait_with_output() => output?,
    };

    if !output.status.success() {
        return Err(DatabaseProviderError::ToolFailure {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

pub(crate) async fn create_backup(
    connection: &ConnectionInfo,
    data_dir: &Path,
    program: &OsStr,
    token: &CancellationToken,
) -> Result<String, DatabaseProviderError> {
    let id = backup_id();
    let dir = make_backups_dir_path(data_dir)?;
    let file = dir.join(format!("{id}{BACKUP_FILE_SUFFIX}"));

    log::info!(
        "Creating database backup {id} at {file}",
        file = file.display()
    );

    run_tool(
        program,
        &dump_args(connection, &file),
        connection.password(),
        token,
    )
    .await?;

    Ok(id)
}

pub(crate) async fn restore_backup(
    connection: &ConnectionInfo,
    data_dir: &Path,
    program: &OsStr,
    id: &str,
    token: &CancellationToken,
) -> Result<(), DatabaseProviderError> {
    let file = backup_file_path(data_dir, id);

    if !file.is_file() {
        log::error!("Backup file {file} does not exist", file = file.display());
        return Ok(());
    }

    log::info!("Restoring database backup {id}");

    run_tool(
        program,
        &restore_args(connection, &file),
        connection.password(),
        token,
    )
    .await
}

pub(crate) fn delete_backup(data_dir: &Path, id: &str) -> Result<(), DatabaseProviderError> {
    let file = backup_file_path(data_dir, id);

    if !file.is_file() {
        log::error!("Backup file {file} does not exist", file = file.display());
        return Ok(());
    }

    std::fs::remove_file(&file)?;

    log::info!("Deleted database backup {id}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    fn test_connection() -> ConnectionInfo {
        ConnectionInfo::new(
            "db.local".to_string(),
            5433,
            "media".to_string(),
            "admin".to_string(),
            "s3cret".to_string(),
        )
    }

    #[test_log::test]
    #[serial]
    fn backup_id_formats_utc_time_at_second_resolution() {
        jellyfin_time::simulator::set_now(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        );

        let id = backup_id();

        jellyfin_time::simulator::reset_now();

        assert_eq!(id, "20231114221320");
    }

    #[test_log::test]
    #[serial]
    fn backup_ids_collide_within_the_same_second() {
        jellyfin_time::simulator::set_now(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        );

        let first = backup_id();
        let second = backup_id();

        jellyfin_time::simulator::reset_now();

        assert_eq!(first, second);
    }

    #[test_log::test]
    fn backup_file_path_uses_the_naming_convention() {
        let path = backup_file_path(Path::new("/var/lib/jellyfin"), "20231114221320");

        assert_eq!(
            path,
            Path::new("/var/lib/jellyfin/backups/20231114221320_jellyfin.dump")
        );
    }

    #[test_log::test]
    fn dump_args_carry_connection_flags_in_order() {
        let file = Path::new("/data/backups/20231114221320_jellyfin.dump");

        let args = dump_args(&test_connection(), file);

        let expected: Vec<OsString> = vec![
            "--host".into(),
            "db.local".into(),
            "--port".into(),
            "5433".into(),
            "--username".into(),
            "admin".into(),
            "--format".into(),
            "custom".into(),
            "--blobs".into(),
            "--verbose".into(),
            "--file".into(),
            file.as_os_str().to_os_string(),
            "media".into(),
        ];
        assert_eq!(args, expected);
    }

    #[test_log::test]
    fn restore_args_carry_connection_flags_in_order() {
        let file = Path::new("/data/backups/20231114221320_jellyfin.dump");

        let args = restore_args(&test_connection(), file);

        let expected: Vec<OsString> = vec![
            "--host".into(),
            "db.local".into(),
            "--port".into(),
            "5433".into(),
            "--username".into(),
            "admin".into(),
            "--dbname".into(),
            "media".into(),
            "--clean".into(),
            "--verbose".into(),
            file.as_os_str().to_os_string(),
        ];
        assert_eq!(args, expected);
    }

    #[test_log::test]
    fn tool_args_never_contain_the_password() {
        let file = Path::new("/data/backups/20231114221320_jellyfin.dump");
        let connection = test_connection();

        for args in [dump_args(&connection, file), restore_args(&connection, file)] {
            assert!(
                args.iter().all(|arg| arg != "s3cret"),
                "password leaked into argv: {args:?}"
            );
        }
    }
}
