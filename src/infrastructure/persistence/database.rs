//! SQLite connection setup.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::time::Duration;

/// Opens the link store and keeps the schema current.
pub struct Database;

impl Database {
    /// Opens (creating if missing) the SQLite file at `path` and runs the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a migration fails.
    pub async fn connect(path: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        tracing::info!(path, "Opened link store");

        Self::migrate(&pool).await?;

        Ok(pool)
    }

    /// Opens an existing SQLite file for inspection.
    ///
    /// Unlike [`Database::connect`] this neither creates the file nor runs
    /// migrations, so a mistyped path is reported instead of silently
    /// producing an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub async fn open_existing(path: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(pool)
    }

    /// Applies the migrations under `migrations/`.
    ///
    /// The schema statements are idempotent, so running this against an
    /// existing store is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        tracing::info!("Schema is up to date");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db_path() -> PathBuf {
        std::env::temp_dir().join(format!("ghlink-{}.db", uuid::Uuid::new_v4()))
    }

    fn cleanup(path: &PathBuf) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn test_open_existing_refuses_missing_file() {
        let path = temp_db_path();

        let result = Database::open_existing(path.to_str().unwrap(), 1).await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_open_existing_after_connect() {
        let path = temp_db_path();
        let path_str = path.to_str().unwrap();

        let pool = Database::connect(path_str, 1).await.unwrap();
        pool.close().await;

        let pool = Database::open_existing(path_str, 1).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        pool.close().await;

        cleanup(&path);
    }
}
