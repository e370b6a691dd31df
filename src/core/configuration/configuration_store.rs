use super::configuration_models::ConfigurationEntry;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Insert every name that is not already present.
    /// Existing rows are left alone; returns how many rows were newly created.
    async fn insert_missing(&self, names: &[&str]) -> Result<u64, StoreError>;

    /// All rows, ordered by name.
    async fn list(&self) -> Result<Vec<ConfigurationEntry>, StoreError>;
}
