// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::config::RewriteConfig;
use crate::db::migrations::initialize_database;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

// busy_timeout first: pooled connections switch to WAL concurrently
const PRAGMAS: &str = "PRAGMA busy_timeout = 5000;
     PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;";

/// Get the database file path
///
/// Uses the configured path when set, otherwise
/// {APP_DATA}/catalog-url-rewrite/url_rewrite.db
pub fn get_database_path(config: &RewriteConfig) -> AppResult<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let dir = app_data_dir.join("catalog-url-rewrite");
    std::fs::create_dir_all(&dir)?;

    Ok(dir.join("url_rewrite.db"))
}

/// Create a connection pool over a database file
///
/// - SQLite in WAL mode
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch(PRAGMAS));

    let pool = Pool::builder()
        .max_size(8)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::info!("Opened URL rewrite database at {}", db_path.display());
    Ok(pool)
}

/// Open the configured database and bring its schema up to date
pub fn open_database(config: &RewriteConfig) -> AppResult<ConnectionPool> {
    let pool = create_connection_pool(&get_database_path(config)?)?;
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }
    Ok(pool)
}

/// Create a single-connection pool over a private in-memory database.
/// One connection only: every in-memory connection is its own database.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_database_path_wins() {
        let config = RewriteConfig {
            database_path: Some(PathBuf::from("/tmp/rewrites.db")),
            ..RewriteConfig::default()
        };
        assert_eq!(get_database_path(&config).unwrap(), PathBuf::from("/tmp/rewrites.db"));
    }

    #[test]
    fn test_file_pool_enables_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("test.db")).unwrap();
        let conn = get_connection(&pool).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_open_database_initializes_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = RewriteConfig {
            database_path: Some(dir.path().join("rewrites.db")),
            ..RewriteConfig::default()
        };

        let pool = open_database(&config).unwrap();
        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM url_rewrite", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);

        drop(conn);
        open_database(&config).unwrap();
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();
        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }
}
