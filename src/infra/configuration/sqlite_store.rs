use crate::core::configuration::{ConfigurationEntry, ConfigurationStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tokio::sync::OnceCell;

/// SQLite-backed configuration table.
///
/// The connection pool is opened lazily on first use, so constructing the
/// store at startup never touches the database. A failed open leaves the cell
/// empty and the next call tries again.
pub struct SqliteConfigurationStore {
    database_url: String,
    pool: OnceCell<Pool<Sqlite>>,
}

impl SqliteConfigurationStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        let database_url = database_url.into();
        let database_url = if database_url.starts_with("sqlite:") {
            database_url
        } else {
            format!("sqlite://{}", database_url)
        };

        Self {
            database_url,
            pool: OnceCell::new(),
        }
    }

    async fn pool(&self) -> Result<&Pool<Sqlite>, StoreError> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<Pool<Sqlite>, StoreError> {
        // Make sure the parent directory exists for file-backed databases
        let path_str = self
            .database_url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        if !path_str.contains(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::migrate(&pool).await?;

        tracing::info!(url = %self.database_url, "Configuration database connected");
        Ok(pool)
    }

    async fn migrate(pool: &Pool<Sqlite>) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS configuration (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                value TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigurationStore for SqliteConfigurationStore {
    async fn insert_missing(&self, names: &[&str]) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for name in names {
            let result = sqlx::query(
                r#"
                INSERT INTO configuration (name)
                VALUES (?)
                ON CONFLICT(name) DO NOTHING
                "#,
            )
            .bind(*name)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list(&self) -> Result<Vec<ConfigurationEntry>, StoreError> {
        let pool = self.pool().await?;
        let rows = sqlx::query("SELECT name, value FROM configuration ORDER BY name")
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ConfigurationEntry {
                name: row.get("name"),
                value: row.get("value"),
            })
            .collect())
    }
}
