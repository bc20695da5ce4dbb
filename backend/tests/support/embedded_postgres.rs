//! Embedded PostgreSQL helpers for the Diesel adapter suites.
//!
//! Each test gets a fresh database cloned from a template that already has
//! the embedded Diesel migrations applied, so schemas never drift from
//! `backend/migrations`.

use std::sync::{Mutex, OnceLock};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
const TEMPLATE_NAME: &str = "courses_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Run all pending migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<(), String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(TEMPLATE_NAME)
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(TEMPLATE_NAME)
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(TEMPLATE_NAME))?;
    }
    Ok(())
}

/// Provision a migrated, throwaway database dropped when the guard is.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    ensure_template_database(cluster)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), TEMPLATE_NAME)
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// Count the rows in `table` using a plain client outside Diesel.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = table.replace('"', "\"\"");
    let row = client
        .query_one(format!(r#"SELECT COUNT(*) FROM "{escaped}""#).as_str(), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
