use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations.
///
/// Each migration runs at most once; `schema_version` records what has
/// been applied, so re-opening the database is idempotent.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![
        (1, include_str!("../../resources/migrations/001_initial.sql")),
        (2, include_str!("../../resources/migrations/002_exame_indexes.sql")),
    ];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get::<_, i64>(0),
    )
    .unwrap_or(0)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // schema_version + prontuarios + exames (+ sqlite_sequence for AUTOINCREMENT)
        let count = count_tables(&conn).unwrap();
        assert!(count >= 3, "Expected at least 3 tables, got {count}");
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 2);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        // Run migrations again: should not error
        let result = run_migrations(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn database_opens_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prontuarios.db");
        let conn = open_database(&path).unwrap();
        let count = count_tables(&conn).unwrap();
        assert!(count >= 3);

        // Re-open: should be idempotent
        let conn2 = open_database(&path).unwrap();
        let count2 = count_tables(&conn2).unwrap();
        assert_eq!(count, count2);
    }

    #[test]
    fn cascade_delete_removes_exames() {
        let conn = open_memory_database().unwrap();

        conn.execute(
            "INSERT INTO prontuarios (nome, cpf, data_consulta, diagnostico)
             VALUES ('Maria', '123', '2024-01-10', 'virose')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO exames (prontuario_id, tipo, created_at)
             VALUES (1, 'hemograma', '2024-01-10T10:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM prontuarios WHERE id = 1", []).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM exames WHERE prontuario_id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn exame_requires_existing_prontuario() {
        let conn = open_memory_database().unwrap();
        let result = conn.execute(
            "INSERT INTO exames (prontuario_id, tipo, created_at)
             VALUES (99, 'hemograma', '2024-01-10T10:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
