use jellyfin_database::{Database, provider::DatabaseProviderError};

/// Builds one cascading truncate statement per table name, in input order.
///
/// Names are wrapped in double quotes and nothing more; this is not safe
/// against untrusted input.
#[must_use]
pub fn truncate_statements(table_names: &[&str]) -> String {
    table_names
        .iter()
        .map(|name| format!("TRUNCATE TABLE \"{name}\" CASCADE;"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Empties the given tables, cascading to dependent rows, as a single batch
/// against the active connection.
///
/// Callers MUST supply trusted, pre-validated identifiers; see
/// [`truncate_statements`].
///
/// # Errors
///
/// * If the engine rejects the batch
pub async fn purge_tables(
    db: &dyn Database,
    table_names: &[&str],
) -> Result<(), DatabaseProviderError> {
    if table_names.is_empty() {
        return Ok(());
    }

    let statement = truncate_statements(table_names);

    log::debug!("purge_tables: executing batch:\n{statement}");

    db.exec_raw(&statement).await?;

    Ok(())
}
