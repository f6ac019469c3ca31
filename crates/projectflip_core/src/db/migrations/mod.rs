//! Schema history for the saved store.
//!
//! 1. `init`: one table per collection plus `store_meta`.
//! 2. `retired_ids`: ids deleted from a collection, kept so they are never
//!    issued again after a restore.
//!
//! # Invariants
//! - Versions start at 1 and increase by one per step.
//! - A step and its `PRAGMA user_version` bump commit together; a failing
//!   step leaves the database at the previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "retired_ids",
        sql: include_str!("0002_retired_ids.sql"),
    },
];

/// Schema version a fully migrated store database reports.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer
///   build.
/// - `DbError::MigrationFailed` naming the step whose SQL was rejected.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply(conn, MIGRATIONS)
}

fn apply(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = steps.last().map_or(0, |migration| migration.version);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    for migration in steps
        .iter()
        .filter(|migration| migration.version > current_version)
    {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)
            .and_then(|()| {
                tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            })
            .map_err(|source| DbError::MigrationFailed {
                version: migration.version,
                name: migration.name,
                source,
            })?;
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply, current_user_version, Migration, MIGRATIONS};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1, "{}", migration.name);
        }
    }

    #[test]
    fn failing_step_is_named_and_keeps_earlier_steps() {
        let steps = [
            Migration {
                version: 1,
                name: "good",
                sql: "CREATE TABLE kept (id TEXT);",
            },
            Migration {
                version: 2,
                name: "broken",
                sql: "CREATE TABLE kept (id TEXT);",
            },
        ];
        let mut conn = Connection::open_in_memory().unwrap();

        let err = apply(&mut conn, &steps).unwrap_err();

        match err {
            DbError::MigrationFailed { version, name, .. } => {
                assert_eq!(version, 2);
                assert_eq!(name, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(current_user_version(&conn).unwrap(), 1);
    }
}
