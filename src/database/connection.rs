use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = build_manager(database_path);
    build_pool(manager)
}

// Cascade and set-null rules only fire with foreign keys enabled,
// and SQLite enables them per connection.
fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

fn build_pool(manager: SqliteConnectionManager) -> Result<DbPool> {
    r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}

/// Runs `work` inside BEGIN/COMMIT, rolling back when it fails
pub fn with_transaction<T, F>(conn: &mut DbConn, work: F) -> Result<T>
where
    F: FnOnce(&mut DbConn) -> Result<T>,
{
    conn.execute_batch("BEGIN IMMEDIATE")
        .context("Failed to begin transaction")?;

    let result = work(conn).and_then(|value| {
        conn.execute_batch("COMMIT")
            .context("Failed to commit transaction")?;
        Ok(value)
    });

    // A failed COMMIT leaves the transaction open
    if result.is_err() && !conn.is_autocommit() {
        if let Err(rollback) = conn.execute_batch("ROLLBACK") {
            log::error!("Rollback failed: {:?}", rollback);
        }
    }
    result
}
