// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` connection setup.
//!
//! The server binary can run against `MariaDB` with `--database-url`, but the
//! standard test suite only touches `SQLite`. Backend validation tests in
//! `tests/backend_validation_tests.rs` are `#[ignore]`d and run through
//! `cargo xtask test-mariadb`, which:
//!
//! 1. Starts a `MariaDB` container via Docker
//! 2. Exports `DATABASE_URL` and `PARTICIPIUM_TEST_BACKEND=mariadb`
//! 3. Runs the ignored tests
//! 4. Removes the container
//!
//! ## Schema parity
//!
//! `migrations_mysql/` must stay equivalent to `migrations/`: same tables,
//! columns, nullability, unique keys, checks, foreign keys and indexes.
//! Only the syntax differs (`AUTO_INCREMENT`, `BIGINT`, `VARCHAR` for
//! indexed text, `ENGINE=InnoDB`). Change both directories together.

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Returns the auto-increment id of the most recent insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// Schema for the `MySQL` backend.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

/// Connects to `database_url` and migrates the schema.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Connecting to MySQL database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Applies every pending embedded migration.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(
    conn: &mut MysqlConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let applied = conn.run_pending_migrations(MYSQL_MIGRATIONS)?;
    info!(count = applied.len(), "Applied MySQL migrations");
    Ok(())
}

/// Fails unless `@@foreign_key_checks` is 1 for this session.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when checks
/// are off, or `QueryFailed` if the variable cannot be read.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    let check: ForeignKeyCheck = diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks")
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to read foreign_key_checks: {e}"))
        })?;

    if check.fk_checks == 1 {
        info!("MySQL foreign key enforcement is enabled");
        Ok(())
    } else {
        Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
    }
}
